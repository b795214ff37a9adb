//! Summary statistics over the filtered market values

use crate::view::TableView;
use cnyre_core::Column;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; None below two values
    pub std_dev: Option<f64>,
}

impl ValueSummary {
    /// None for an empty input
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std_dev = (count >= 2).then(|| {
            let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });

        Some(Self {
            count,
            min: sorted[0],
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: sorted[count - 1],
            mean,
            std_dev,
        })
    }

    /// Summary of a numeric column over every row of `view`, ignoring nulls
    pub fn of(view: &TableView, column: Column) -> Option<Self> {
        Self::from_values(&view.numeric_values(column))
    }

    /// Quartile ranges as `(label, from, to)`
    pub fn quartile_ranges(&self) -> [(&'static str, f64, f64); 4] {
        [
            ("Quartile 1 (0% - 25%)", self.min, self.q1),
            ("Quartile 2 (25% - 50%)", self.q1, self.median),
            ("Quartile 3 (50% - 75%)", self.median, self.q3),
            ("Quartile 4 (75% - 100%)", self.q3, self.max),
        ]
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}
