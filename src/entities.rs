use crate::types::{InputSnapshot, Point, Rect};

// --- Item kinds ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Bug(u32),
    FeatureRequest(u32),
    Contribution,
    Sponsoring,
}

impl ItemKind {
    pub fn is_recovery(&self) -> bool {
        matches!(self, ItemKind::Contribution | ItemKind::Sponsoring)
    }

    pub fn label_lines(&self) -> Vec<String> {
        match self {
            ItemKind::Bug(id) => vec!["BUG".to_string(), format!("#{}", id)],
            ItemKind::FeatureRequest(id) => {
                vec!["FEATURE".to_string(), "REQUEST".to_string(), format!("#{}", id)]
            }
            ItemKind::Contribution => vec!["CONTRI-".to_string(), "BUTION".to_string()],
            ItemKind::Sponsoring => vec!["SPONSORING".to_string()],
        }
    }
}

pub trait BoundsProvider {
    fn bounds(&self, kind: &ItemKind, anchor: Point) -> Rect;
}

// --- Item ---
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub anchor: Point,
    pub initial_lifetime: u32,
    pub lifetime: u32,
    pub base_score: u32,
    pub hovered: bool,
    resolved: bool,
}

impl Item {
    /// `lifetime` is raised to 1 so the ratio in `score` stays finite.
    pub fn new(kind: ItemKind, anchor: Point, lifetime: u32, base_score: u32) -> Self {
        let lifetime = lifetime.max(1);
        Item {
            kind,
            anchor,
            initial_lifetime: lifetime,
            lifetime,
            base_score,
            hovered: false,
            resolved: false,
        }
    }

    pub fn is_recovery(&self) -> bool {
        self.kind.is_recovery()
    }

    /// Advances one tick: ages the item, then checks hover and click.
    /// A click on the tick the lifetime runs out still resolves it.
    pub fn update(&mut self, input: &InputSnapshot, bounds: &impl BoundsProvider) {
        if self.resolved {
            return;
        }
        if self.lifetime > 0 {
            self.lifetime -= 1;
        }
        self.hovered = input.any_within(&bounds.bounds(&self.kind, self.anchor));
        if self.hovered && input.just_activated {
            self.resolved = true;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Reward for resolving now: `base * sqrt(remaining / initial)`.
    pub fn score(&self) -> u32 {
        let ratio = self.lifetime as f64 / self.initial_lifetime as f64;
        (self.base_score as f64 * ratio.sqrt()) as u32
    }

    pub fn urgency(&self) -> f64 {
        self.lifetime as f64 / self.initial_lifetime as f64
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct BoxBounds;

    impl BoundsProvider for BoxBounds {
        fn bounds(&self, _kind: &ItemKind, anchor: Point) -> Rect {
            Rect::new(
                Point::new(anchor.x - 1, anchor.y - 1),
                Point::new(anchor.x + 2, anchor.y + 2),
            )
        }
    }

    pub(crate) fn click_at(p: Point) -> InputSnapshot {
        InputSnapshot { pointers: vec![p], just_activated: true }
    }

    pub(crate) fn hover_at(p: Point) -> InputSnapshot {
        InputSnapshot { pointers: vec![p], just_activated: false }
    }

    fn bug() -> Item {
        Item::new(ItemKind::Bug(1), Point::new(10, 10), 400, 10)
    }

    #[test]
    fn labels_by_kind() {
        assert_eq!(ItemKind::Bug(7).label_lines(), vec!["BUG", "#7"]);
        assert_eq!(ItemKind::FeatureRequest(3).label_lines(), vec!["FEATURE", "REQUEST", "#3"]);
        assert_eq!(ItemKind::Contribution.label_lines(), vec!["CONTRI-", "BUTION"]);
        assert_eq!(ItemKind::Sponsoring.label_lines(), vec!["SPONSORING"]);
        assert!(ItemKind::Sponsoring.is_recovery());
        assert!(!ItemKind::FeatureRequest(1).is_recovery());
    }

    #[test]
    fn fresh_item_scores_its_base() {
        let item = bug();
        assert_eq!(item.score(), 10);
        assert!(item.is_alive());
        assert!(!item.is_resolved());
    }

    #[test]
    fn click_on_first_tick_scores_nine() {
        let mut item = bug();
        item.update(&click_at(Point::new(10, 10)), &BoxBounds);
        assert!(item.is_resolved());
        assert_eq!(item.lifetime, 399);
        assert_eq!(item.score(), 9);
    }

    #[test]
    fn hover_without_click_does_not_resolve() {
        let mut item = bug();
        item.update(&hover_at(Point::new(11, 9)), &BoxBounds);
        assert!(item.hovered);
        assert!(!item.is_resolved());

        item.update(&click_at(Point::new(20, 20)), &BoxBounds);
        assert!(!item.hovered);
        assert!(!item.is_resolved());
    }

    #[test]
    fn any_touch_can_hit() {
        let mut item = bug();
        let input = InputSnapshot {
            pointers: vec![Point::new(0, 0), Point::new(9, 11)],
            just_activated: true,
        };
        item.update(&input, &BoxBounds);
        assert!(item.is_resolved());
    }

    #[test]
    fn expires_after_its_lifetime() {
        let mut item = Item::new(ItemKind::Bug(1), Point::new(10, 10), 3, 10);
        let idle = InputSnapshot::default();
        item.update(&idle, &BoxBounds);
        item.update(&idle, &BoxBounds);
        assert!(item.is_alive());
        item.update(&idle, &BoxBounds);
        assert!(!item.is_alive());
        assert_eq!(item.score(), 0);
        item.update(&idle, &BoxBounds);
        assert_eq!(item.lifetime, 0);
    }

    #[test]
    fn score_decays_toward_zero() {
        let mut item = bug();
        let idle = InputSnapshot::default();
        let mut last = item.score();
        while item.is_alive() {
            item.update(&idle, &BoxBounds);
            assert!(item.score() <= last);
            last = item.score();
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn resolved_item_is_frozen() {
        let mut item = bug();
        item.update(&click_at(Point::new(10, 10)), &BoxBounds);
        let snapshot = item.clone();
        item.update(&InputSnapshot::default(), &BoxBounds);
        assert_eq!(item, snapshot);
    }

    #[test]
    fn zero_lifetime_is_raised_to_one() {
        let item = Item::new(ItemKind::Sponsoring, Point::new(0, 0), 0, 0);
        assert_eq!(item.initial_lifetime, 1);
        assert_eq!(item.score(), 0);
    }
}
