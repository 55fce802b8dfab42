/// Arithmetic mean. An empty slice yields NaN (0 / 0), not an error.
pub fn mean(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    for &v in values {
        sum += v;
    }
    sum / values.len() as f64
}

/// Approximate median. Sorts `values` in place.
///
/// Odd lengths return the middle element. Even lengths average
/// `values[l/2 - 1]` and `values[l/2 + 1]`, skipping the true upper-middle
/// element; this approximation is the published contract of the aggregation
/// endpoint. For `l == 2` the upper index is clamped to the last element.
/// An empty slice yields NaN.
pub fn median(values: &mut [f64]) -> f64 {
    let l = values.len();
    if l == 0 {
        return f64::NAN;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    if l % 2 == 1 {
        return values[l / 2];
    }
    let hi = (l / 2 + 1).min(l - 1);
    (values[l / 2 - 1] + values[hi]) / 2.0
}

/// How a pipeline collapses its samples before serialization.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    None,
    Mean,
    Median,
}

impl Reduction {
    /// Returns the data unchanged for `None`, otherwise a single-element vector.
    pub fn apply(self, mut data: Vec<f64>) -> Vec<f64> {
        match self {
            Reduction::None => data,
            Reduction::Mean => vec![mean(&data)],
            Reduction::Median => vec![median(&mut data)],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Reduction::None => "none",
            Reduction::Mean => "mean",
            Reduction::Median => "median",
        }
    }
}
