use rand::Rng;

/// Uniform integer rolls used by the spawner.
pub trait RandomSource {
    fn below(&mut self, bound: u32) -> u32;

    fn one_in(&mut self, n: u32) -> bool {
        self.below(n) == 0
    }
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }
}

/// Replays a fixed list of rolls, each reduced modulo the requested bound.
/// Once the script runs out every roll is 0.
#[cfg(test)]
pub struct ScriptedRolls {
    rolls: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedRolls {
    pub fn new(rolls: &[u32]) -> Self {
        ScriptedRolls { rolls: rolls.iter().copied().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRolls {
    fn below(&mut self, bound: u32) -> u32 {
        self.rolls.pop_front().unwrap_or(0) % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seeded_rng_stays_below_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        for bound in 1..50 {
            assert!(rng.below(bound) < bound);
        }
    }

    #[test]
    fn scripted_rolls_replay_in_order() {
        let mut rolls = ScriptedRolls::new(&[1, 7, 4]);
        assert_eq!(rolls.below(2), 1);
        assert_eq!(rolls.below(5), 2);
        assert!(!rolls.one_in(3));
        assert_eq!(rolls.remaining(), 0);
        assert!(rolls.one_in(3));
    }
}
