use serde::{Deserialize, Serialize};

use crate::detection::types::DetectedError;

/// Share of detected errors per confidence bucket, in whole percent.
///
/// For non-empty input the buckets sum to exactly 100; for empty input
/// all are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl ConfidenceDistribution {
    /// Bucket `errors` into high (`>= high_min`), medium (`>= medium_min`) and low.
    pub fn from_errors(errors: &[DetectedError], high_min: f64, medium_min: f64) -> Self {
        let mut counts = [0usize; 3];
        for error in errors {
            let bucket = if error.confidence >= high_min {
                0
            } else if error.confidence >= medium_min {
                1
            } else {
                2
            };
            counts[bucket] += 1;
        }

        let [high, medium, low] = largest_remainder_percentages(counts);
        Self { high, medium, low }
    }

    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low
    }
}

/// Integer percentages of `counts` that sum to 100, rounding by largest remainder.
/// Ties go to the earlier bucket.
fn largest_remainder_percentages(counts: [usize; 3]) -> [u32; 3] {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return [0; 3];
    }

    let mut percentages = [0u32; 3];
    let mut remainders = [(0usize, 0usize); 3];
    for (i, &count) in counts.iter().enumerate() {
        let scaled = count * 100;
        percentages[i] = (scaled / total) as u32;
        remainders[i] = (scaled % total, i);
    }

    let assigned: u32 = percentages.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take((100 - assigned) as usize) {
        percentages[i] += 1;
    }
    percentages
}
