// Randomness seam so simulations can be driven deterministically in tests

pub trait RandomSource: Send + Sync {
    /// Uniform draw from [0, 1).
    fn unit(&self) -> f64;

    /// Uniform index into 0..len. `len` must be non-zero.
    fn index(&self, len: usize) -> usize;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Plays back queued draws so tests can force specific branches.
    /// An exhausted script falls back to draws that fail Bernoulli trials.
    pub(crate) struct ScriptedRandom {
        units: Mutex<VecDeque<f64>>,
        indices: Mutex<VecDeque<usize>>,
    }

    impl ScriptedRandom {
        pub(crate) fn new(
            units: impl IntoIterator<Item = f64>,
            indices: impl IntoIterator<Item = usize>,
        ) -> Self {
            Self {
                units: Mutex::new(units.into_iter().collect()),
                indices: Mutex::new(indices.into_iter().collect()),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn unit(&self) -> f64 {
            self.units.lock().unwrap().pop_front().unwrap_or(1.0)
        }

        fn index(&self, len: usize) -> usize {
            self.indices
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(0)
                .min(len.saturating_sub(1))
        }
    }
}
