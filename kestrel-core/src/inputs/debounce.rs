//! Two-sample agreement debouncer
//!
//! A raw level must be observed on two consecutive polls before it
//! becomes the stable level. At the 10 ms input poll cadence this rides
//! out contact bounce without adding noticeable latency.

/// Two-sample debouncer over a single boolean level
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    stable: bool,
    last: bool,
}

impl Debouncer {
    /// Create a debouncer with a known initial stable level
    pub const fn new(initial: bool) -> Self {
        Self {
            stable: initial,
            last: initial,
        }
    }

    /// Feed one raw sample and return the stable level
    pub fn update(&mut self, raw: bool) -> bool {
        if raw == self.last {
            self.stable = raw;
        } else {
            self.last = raw;
        }
        self.stable
    }

    /// Current stable level without feeding a sample
    pub fn stable(&self) -> bool {
        self.stable
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_glitch_is_ignored() {
        let mut deb = Debouncer::new(false);
        assert!(!deb.update(true)); // first sight, not stable yet
        assert!(!deb.update(false)); // glitch over, still low
        assert!(!deb.stable());
    }

    #[test]
    fn test_two_samples_flip_the_level() {
        let mut deb = Debouncer::new(false);
        assert!(!deb.update(true));
        assert!(deb.update(true));
        assert!(deb.stable());

        assert!(deb.update(false));
        assert!(!deb.update(false));
    }

    #[test]
    fn test_alternating_input_never_flips() {
        let mut deb = Debouncer::new(false);
        for _ in 0..50 {
            assert!(!deb.update(true));
            assert!(!deb.update(false));
        }
    }

    proptest! {
        #[test]
        fn prop_two_equal_samples_settle(samples in proptest::collection::vec(any::<bool>(), 2..64)) {
            let mut deb = Debouncer::new(false);
            let mut out = false;
            for &s in &samples {
                out = deb.update(s);
            }
            let n = samples.len();
            if samples[n - 1] == samples[n - 2] {
                // Any two consecutive equal samples fully determine the output
                prop_assert_eq!(out, samples[n - 1]);
            }
        }
    }
}
