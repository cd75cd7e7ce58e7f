use crate::constants::{FIELD_MARGIN, HUD_HEIGHT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Half-open rectangle: `min` is inside, `max` is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Rect { min, max }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x < self.max.x && self.min.y <= p.y && p.y < self.max.y
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub pointers: Vec<Point>,
    pub just_activated: bool,
}

impl InputSnapshot {
    pub fn any_within(&self, rect: &Rect) -> bool {
        self.pointers.iter().any(|&p| rect.contains(p))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotLayout {
    pub rows: usize,
    pub cols: usize,
    pub width: u16,
    pub height: u16,
}

impl SlotLayout {
    pub fn new(rows: usize, cols: usize, width: u16, height: u16) -> Self {
        SlotLayout { rows, cols, width, height }
    }

    pub fn anchor(&self, row: usize, col: usize) -> Point {
        let field_width = self.width.saturating_sub(FIELD_MARGIN * 2) as i32;
        let field_height = self.height.saturating_sub(FIELD_MARGIN * 2 + HUD_HEIGHT) as i32;
        let slot_width = field_width / self.cols.max(1) as i32;
        let slot_height = field_height / self.rows.max(1) as i32;
        Point::new(
            col as i32 * slot_width + slot_width / 2 + FIELD_MARGIN as i32,
            row as i32 * slot_height + slot_height / 2 + FIELD_MARGIN as i32 + HUD_HEIGHT as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_half_open() {
        let r = Rect::new(Point::new(2, 3), Point::new(5, 6));
        assert!(r.contains(Point::new(2, 3)));
        assert!(r.contains(Point::new(4, 5)));
        assert!(!r.contains(Point::new(5, 5)));
        assert!(!r.contains(Point::new(4, 6)));
        assert!(!r.contains(Point::new(1, 3)));
    }

    #[test]
    fn anchors_are_distinct_and_inside_the_field() {
        let layout = SlotLayout::new(3, 4, 80, 24);
        let mut seen = Vec::new();
        for row in 0..3 {
            for col in 0..4 {
                let p = layout.anchor(row, col);
                assert!(p.x >= FIELD_MARGIN as i32 && p.x < 80 - FIELD_MARGIN as i32);
                assert!(p.y >= (FIELD_MARGIN + HUD_HEIGHT) as i32 && p.y < 24 - FIELD_MARGIN as i32);
                assert!(!seen.contains(&p));
                seen.push(p);
            }
        }
    }
}
