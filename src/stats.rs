//! Summary statistics over a benchmark's run times.
//!
//! Quantiles use linear interpolation between closest ranks (the "R-7"
//! definition), so values match the usual spreadsheet and NumPy defaults.

/// Multiplier applied to the interquartile range to place the fences.
pub const TUKEY_K: f64 = 1.5;

fn sorted(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile `p` of an already sorted, non-empty slice.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    if lo >= n - 1 {
        return sorted[n - 1];
    }
    let frac = h - h.floor();
    sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
}

/// Compute quantile `p` of `samples`.
///
/// # Panics
///
/// Panics if `samples` is empty or if `p` is outside [0, 1].
pub fn quantile(samples: &[f64], p: f64) -> f64 {
    assert!(!samples.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );
    quantile_sorted(&sorted(samples), p)
}

/// Tukey fences around the interquartile range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TukeyFences {
    pub q25: f64,
    pub q75: f64,
    pub lower: f64,
    pub upper: f64,
}

impl TukeyFences {
    pub fn from_samples(samples: &[f64]) -> Self {
        let sorted = sorted(samples);
        Self::from_sorted(&sorted)
    }

    fn from_sorted(sorted: &[f64]) -> Self {
        let q25 = quantile_sorted(sorted, 0.25);
        let q75 = quantile_sorted(sorted, 0.75);
        let mut fences = Self {
            q25,
            q75,
            lower: q25,
            upper: q75,
        };
        let spread = TUKEY_K * fences.iqr();
        fences.lower -= spread;
        fences.upper += spread;
        fences
    }

    fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value > self.upper || value < self.lower
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierSummary {
    pub count: usize,
    pub samples: usize,
    pub percentage: f64,
}

impl OutlierSummary {
    /// Count the samples outside the Tukey fences.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Self {
        assert!(!samples.is_empty(), "Cannot summarise empty run times");
        let fences = TukeyFences::from_samples(samples);
        let count = samples.iter().filter(|&&v| fences.is_outlier(v)).count();
        Self {
            count,
            samples: samples.len(),
            percentage: count as f64 / samples.len() as f64 * 100.0,
        }
    }
}

/// The five values drawn for one box: whisker ends, quartiles and median.
///
/// Whiskers stop at the most extreme samples still inside the fences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
}

impl BoxStats {
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Self {
        assert!(!samples.is_empty(), "Cannot summarise empty run times");
        let sorted = sorted(samples);
        let fences = TukeyFences::from_sorted(&sorted);
        let inside = || sorted.iter().copied().filter(|&v| !fences.is_outlier(v));
        // q25/q75 always lie inside the fences, so both folds see at least one sample
        let whisker_low = inside().fold(fences.q25, f64::min);
        let whisker_high = inside().fold(fences.q75, f64::max);
        Self {
            whisker_low,
            q1: fences.q25,
            median: quantile_sorted(&sorted, 0.5),
            q3: fences.q75,
            whisker_high,
        }
    }
}
