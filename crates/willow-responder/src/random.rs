use std::collections::VecDeque;

use rand::Rng;

/// Source of the engine's random draws.
///
/// The engine is pure aside from these calls, so swapping in a scripted
/// implementation makes its output fully deterministic.
pub trait RandomSource {
    /// Uniform index in `0..len`; `len` is always non-zero
    fn pick_index(&mut self, len: usize) -> usize;

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool;
}

/// Default source backed by the thread-local rng
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl ThreadRandom {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        rand::thread_rng().gen_bool(p)
    }
}

/// Scripted source: replays queued answers, then falls back to index 0 /
/// false. Used to pin engine output in tests.
#[derive(Debug, Default)]
pub struct StepRandom {
    picks: VecDeque<usize>,
    chances: VecDeque<bool>,
}

impl StepRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks = picks.into_iter().collect();
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances = chances.into_iter().collect();
        self
    }
}

impl RandomSource for StepRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0).min(len.saturating_sub(1))
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let mut random = ThreadRandom::new();
        for _ in 0..100 {
            assert!(random.pick_index(3) < 3);
        }
    }

    #[test]
    fn test_step_random_replays_script() {
        let mut random = StepRandom::new()
            .with_picks([2, 9])
            .with_chances([true]);
        assert_eq!(random.pick_index(5), 2);
        // out-of-range picks clamp to the last valid index
        assert_eq!(random.pick_index(5), 4);
        // exhausted script falls back to 0 / false
        assert_eq!(random.pick_index(5), 0);
        assert!(random.chance(0.2));
        assert!(!random.chance(0.2));
    }
}
