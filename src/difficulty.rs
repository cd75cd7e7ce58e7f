//! Difficulty curve.
//!
//! Spawn rate, item lifetime and reward are all functions of the current
//! score alone. Each one follows `5 - log10(score)` so the game speeds up
//! smoothly without discrete levels:
//!
//! | stars | lifetime | cool time   | base reward |
//! |-------|----------|-------------|-------------|
//! | 0     | 400      | 60..120     | 10          |
//! | 100   | 300      | 45..90      | 10          |
//! | 1k    | 200      | 30..60      | 31          |
//! | 10k   | 100      | 15..30      | 100         |
//! | 100k  | 100      | 5..10       | 316         |

use crate::constants::*;
use crate::entities::ItemKind;
use crate::rng::RandomSource;

fn stars_log10(score: u32) -> f64 {
    (score.max(1) as f64).log10()
}

pub fn cooldown_base(score: u32) -> u32 {
    let raw = 15.0 * (5.0 - stars_log10(score));
    raw.clamp(MIN_COOL_TIME, MAX_COOL_TIME) as u32
}

/// Cool time after a successful spawn: `base + rand(0..base)`.
pub fn spawn_cooldown(score: u32, rng: &mut impl RandomSource) -> u32 {
    let base = cooldown_base(score);
    base + rng.below(base)
}

pub fn item_lifetime(score: u32) -> u32 {
    let raw = 100.0 * (5.0 - stars_log10(score));
    raw.clamp(MIN_LIFETIME, MAX_LIFETIME) as u32
}

pub fn base_reward(score: u32) -> u32 {
    ((score as f64).sqrt() as u32).max(MIN_BASE_SCORE)
}

/// Odds (1 in n) of a recovery item, or `None` when none may spawn.
pub fn recovery_odds(score: u32, lives: u32) -> Option<u32> {
    if score < RECOVERY_SCORE_THRESHOLD {
        return None;
    }
    match lives {
        0..=1 => Some(3),
        2..=3 => Some(5),
        l if l < MAX_PLAYER_LIFE => Some(10),
        _ => None,
    }
}

/// Rolls for a recovery item. No roll is consumed when none is possible.
pub fn roll_recovery(score: u32, lives: u32, rng: &mut impl RandomSource) -> bool {
    match recovery_odds(score, lives) {
        Some(n) => rng.one_in(n),
        None => false,
    }
}

pub fn pick_kind(recovery: bool, bug_counter: &mut u32, rng: &mut impl RandomSource) -> ItemKind {
    if recovery {
        return match rng.below(2) {
            0 => ItemKind::Contribution,
            _ => ItemKind::Sponsoring,
        };
    }
    *bug_counter += 1;
    match rng.below(2) {
        0 => ItemKind::Bug(*bug_counter),
        _ => ItemKind::FeatureRequest(*bug_counter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRolls;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SAMPLES: [u32; 12] = [0, 1, 9, 10, 99, 100, 999, 1000, 9_999, 10_000, 100_000, u32::MAX];

    #[test]
    fn curve_stays_within_bounds() {
        for score in SAMPLES {
            assert!((5..=60).contains(&cooldown_base(score)), "cool time at {}", score);
            assert!((100..=400).contains(&item_lifetime(score)), "lifetime at {}", score);
            assert!(base_reward(score) >= 10, "reward at {}", score);
        }
    }

    #[test]
    fn curve_is_monotonic() {
        for pair in SAMPLES.windows(2) {
            assert!(item_lifetime(pair[1]) <= item_lifetime(pair[0]));
            assert!(cooldown_base(pair[1]) <= cooldown_base(pair[0]));
            assert!(base_reward(pair[1]) >= base_reward(pair[0]));
        }
    }

    #[test]
    fn reference_points() {
        assert_eq!(item_lifetime(0), 400);
        assert!((299..=300).contains(&item_lifetime(100)));
        assert!((199..=200).contains(&item_lifetime(1000)));
        assert_eq!(item_lifetime(100_000), 100);

        assert_eq!(cooldown_base(0), 60);
        assert!((44..=45).contains(&cooldown_base(100)));
        assert!((29..=30).contains(&cooldown_base(1000)));
        assert_eq!(cooldown_base(100_000), 5);

        assert_eq!(base_reward(0), 10);
        assert_eq!(base_reward(99), 10);
        assert_eq!(base_reward(10_000), 100);
    }

    #[test]
    fn spawn_cooldown_adds_up_to_base_minus_one() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let c = spawn_cooldown(0, &mut rng);
            assert!((60..120).contains(&c));
        }
        assert_eq!(spawn_cooldown(100_000, &mut ScriptedRolls::new(&[4])), 9);
        assert_eq!(spawn_cooldown(100_000, &mut ScriptedRolls::new(&[])), 5);
    }

    #[test]
    fn recovery_needs_a_hundred_stars() {
        assert_eq!(recovery_odds(0, 1), None);
        assert_eq!(recovery_odds(99, 1), None);
        let mut always = ScriptedRolls::new(&[0, 0, 0]);
        assert!(!roll_recovery(0, 1, &mut always));
        assert_eq!(always.remaining(), 3);
    }

    #[test]
    fn recovery_odds_follow_lives() {
        assert_eq!(recovery_odds(100, 1), Some(3));
        assert_eq!(recovery_odds(100, 2), Some(5));
        assert_eq!(recovery_odds(100, 3), Some(5));
        assert_eq!(recovery_odds(100, 4), Some(10));
        assert_eq!(recovery_odds(100, 5), Some(10));
        assert_eq!(recovery_odds(100, 6), None);
        assert!(roll_recovery(500, 1, &mut ScriptedRolls::new(&[3])));
        assert!(!roll_recovery(500, 1, &mut ScriptedRolls::new(&[1])));
    }

    #[test]
    fn bug_ids_are_shared_between_bugs_and_feature_requests() {
        let mut counter = 0;
        let mut rolls = ScriptedRolls::new(&[0, 1, 1, 0]);
        assert_eq!(pick_kind(false, &mut counter, &mut rolls), ItemKind::Bug(1));
        assert_eq!(pick_kind(false, &mut counter, &mut rolls), ItemKind::FeatureRequest(2));
        assert_eq!(pick_kind(true, &mut counter, &mut rolls), ItemKind::Sponsoring);
        assert_eq!(pick_kind(true, &mut counter, &mut rolls), ItemKind::Contribution);
        assert_eq!(counter, 2);
    }
}
