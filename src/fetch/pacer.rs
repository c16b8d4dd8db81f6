//! Randomized request pacing.

use std::time::Duration;

use rand::Rng;

use crate::options::Options;

/// Sleeps a random duration before network calls.
///
/// Primary delays precede search and post requests; secondary delays
/// precede redirect, frame, and mobile requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    primary_ms: [u64; 2],
    secondary_ms: [u64; 2],
}

impl Pacer {
    #[must_use]
    pub const fn new(primary_ms: [u64; 2], secondary_ms: [u64; 2]) -> Self {
        Self {
            primary_ms,
            secondary_ms,
        }
    }

    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.primary_delay_ms, options.secondary_delay_ms)
    }

    /// A pacer that never sleeps.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new([0, 0], [0, 0])
    }

    pub async fn primary(&self) {
        Self::sleep(self.primary_ms).await;
    }

    pub async fn secondary(&self) {
        Self::sleep(self.secondary_ms).await;
    }

    /// Uniform pick in `[lo, hi]` milliseconds.
    #[must_use]
    pub fn pick([lo, hi]: [u64; 2]) -> Duration {
        if hi <= lo {
            return Duration::from_millis(lo);
        }
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }

    async fn sleep(range: [u64; 2]) {
        let delay = Self::pick(range);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_stays_in_range() {
        for _ in 0..200 {
            let d = Pacer::pick([1000, 2000]);
            assert!(d >= Duration::from_millis(1000));
            assert!(d <= Duration::from_millis(2000));
        }
    }

    #[test]
    fn degenerate_range_is_fixed() {
        assert_eq!(Pacer::pick([0, 0]), Duration::ZERO);
        assert_eq!(Pacer::pick([5, 5]), Duration::from_millis(5));
    }

    #[tokio::test]
    async fn disabled_pacer_returns_immediately() {
        let started = std::time::Instant::now();
        Pacer::disabled().primary().await;
        Pacer::disabled().secondary().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }
}
