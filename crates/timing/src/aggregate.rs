//! Geometric mean over cycle samples.

/// Running geometric mean kept as a sum of logarithms.
///
/// Samples fold in any order. A single zero sample pins the mean to zero.
#[derive(Debug, Clone, Default)]
pub struct GeometricMean {
    log_sum: f64,
    count: u64,
    saw_zero: bool,
}

impl GeometricMean {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: u64) {
        self.count += 1;
        if sample == 0 {
            self.saw_zero = true;
        } else {
            self.log_sum += (sample as f64).ln();
        }
    }

    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The score, or `None` when nothing was pushed.
    pub fn finish(self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        if self.saw_zero {
            return Some(0.0);
        }
        Some((self.log_sum / self.count as f64).exp())
    }
}

impl Extend<u64> for GeometricMean {
    fn extend<T: IntoIterator<Item = u64>>(&mut self, iter: T) {
        for sample in iter {
            self.push(sample);
        }
    }
}

impl FromIterator<u64> for GeometricMean {
    fn from_iter<T: IntoIterator<Item = u64>>(iter: T) -> Self {
        let mut mean = Self::new();
        mean.extend(iter);
        mean
    }
}
