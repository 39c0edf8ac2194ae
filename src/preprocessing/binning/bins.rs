//! Learned bin boundaries for a single feature.

use crate::frame::Column;
use crate::preprocessing::error::PreprocessingError;
use serde::{Deserialize, Serialize};

/// Bin boundaries and labels for one feature.
///
/// Built from ordered groups of training values, one group per bin. For each
/// pair of adjacent groups the first value of the later group is the shared
/// cut point: it is the upper bound of bin `i` and the lower bound of bin
/// `i + 1`. The first bin extends down to `-Inf` and the last one up to `+Inf`,
/// so every number (including values never seen during fit) falls in a bin.
///
/// A value `v` belongs to the highest bin `i` with `v >= lower_bounds[i]`.
/// Labels are printed as `"(lower, upper]"`, so a value equal to a cut point
/// lands in the bin whose label shows it as the (open) lower edge.
///
/// # Example
/// ```
/// use featurebin::preprocessing::binning::BinSet;
///
/// let groups = vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0], vec![6.0, 7.0], vec![8.0, 9.0]];
/// let bins = BinSet::from_groups(&groups)?;
///
/// assert_eq!(bins.labels()[0], "(-Inf, 3.00]");
/// assert_eq!(bins.assign_levels(&[-50.0, 3.0, 7.5, 1e9]), vec![0, 1, 2, 3]);
/// # Ok::<(), featurebin::preprocessing::PreprocessingError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinSet {
    lower_bounds: Vec<f64>,
    upper_bounds: Vec<f64>,
    labels: Vec<String>,
}

impl BinSet {
    /// Build the bin set from ordered, non-empty value groups.
    ///
    /// # Errors
    /// [`PreprocessingError::Configuration`] if there are no groups or a
    /// group is empty.
    pub fn from_groups<G: AsRef<[f64]>>(groups: &[G]) -> Result<Self, PreprocessingError> {
        if groups.is_empty() {
            return Err(PreprocessingError::Configuration(
                "cannot build bins from zero groups".to_string(),
            ));
        }
        let firsts: Vec<f64> = groups
            .iter()
            .map(|g| {
                g.as_ref().first().copied().ok_or_else(|| {
                    PreprocessingError::Configuration("cannot build a bin from an empty group".to_string())
                })
            })
            .collect::<Result<_, _>>()?;

        let n_bins = firsts.len();
        let mut lower_bounds = Vec::with_capacity(n_bins);
        let mut upper_bounds = Vec::with_capacity(n_bins);
        let mut labels = Vec::with_capacity(n_bins);

        for i in 0..n_bins {
            let lower = if i == 0 { f64::NEG_INFINITY } else { firsts[i] };
            let upper = if i + 1 == n_bins {
                f64::INFINITY
            } else {
                firsts[i + 1]
            };
            lower_bounds.push(lower);
            upper_bounds.push(upper);
            labels.push(format_label(lower, upper));
        }

        Ok(Self {
            lower_bounds,
            upper_bounds,
            labels,
        })
    }

    /// Rebuild a bin set from persisted bounds and labels.
    ///
    /// # Errors
    /// [`PreprocessingError::Serialization`] if the three sequences differ in
    /// length, are empty, the bounds are not non-decreasing, or the first
    /// lower bound is not `-Inf` or the last upper bound is not `+Inf`.
    pub fn from_parts(
        lower_bounds: Vec<f64>,
        upper_bounds: Vec<f64>,
        labels: Vec<String>,
    ) -> Result<Self, PreprocessingError> {
        let n = lower_bounds.len();
        if n == 0 || upper_bounds.len() != n || labels.len() != n {
            return Err(PreprocessingError::Serialization(format!(
                "inconsistent bin set: {} lower bounds, {} upper bounds, {} labels",
                n,
                upper_bounds.len(),
                labels.len()
            )));
        }
        if lower_bounds[0] != f64::NEG_INFINITY || upper_bounds[n - 1] != f64::INFINITY {
            return Err(PreprocessingError::Serialization(format!(
                "bin set must span (-Inf, Inf], got lower bound {} and upper bound {}",
                lower_bounds[0],
                upper_bounds[n - 1]
            )));
        }
        let sorted = |b: &[f64]| b.windows(2).all(|w| w[0] <= w[1]);
        if !sorted(&lower_bounds) || !sorted(&upper_bounds) {
            return Err(PreprocessingError::Serialization(
                "bin bounds must be non-decreasing".to_string(),
            ));
        }
        Ok(Self {
            lower_bounds,
            upper_bounds,
            labels,
        })
    }

    pub fn n_bins(&self) -> usize {
        self.lower_bounds.len()
    }

    /// Lower bound of each bin; the first is always `-Inf`.
    pub fn lower_bounds(&self) -> &[f64] {
        &self.lower_bounds
    }

    /// Upper bound of each bin; the last is always `+Inf`.
    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper_bounds
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Bin index of every value, in input order.
    ///
    /// Every element starts in the highest bin. Walking the lower bounds from
    /// last to first, each element below the current bound drops one bin.
    /// Out-of-range values clamp to the first or last bin, and NaN (which
    /// compares below every bound) saturates at bin 0.
    pub fn assign_levels(&self, values: &[f64]) -> Vec<usize> {
        let mut levels = vec![self.n_bins() - 1; values.len()];
        for &bound in self.lower_bounds.iter().rev() {
            for (level, &v) in levels.iter_mut().zip(values) {
                if !(v >= bound) {
                    *level = level.saturating_sub(1);
                }
            }
        }
        levels
    }

    /// Bin index of a single value by binary search over the lower bounds.
    ///
    /// Agrees with [`assign_levels`](Self::assign_levels) on every input.
    pub fn level_of(&self, value: f64) -> usize {
        self.lower_bounds
            .partition_point(|&bound| value >= bound)
            .saturating_sub(1)
    }

    /// Label of every value, in input order.
    pub fn assign_labels(&self, values: &[f64]) -> Vec<String> {
        self.assign_levels(values)
            .into_iter()
            .map(|level| self.labels[level].clone())
            .collect()
    }

    /// Assign bins and package the result as an output column: `Text`
    /// labels when `as_label`, otherwise `Int` levels.
    pub fn assign(&self, values: &[f64], as_label: bool) -> Column {
        if as_label {
            Column::Text(self.assign_labels(values))
        } else {
            Column::Int(
                self.assign_levels(values)
                    .into_iter()
                    .map(|level| level as i64)
                    .collect(),
            )
        }
    }
}

fn format_label(lower: f64, upper: f64) -> String {
    match (lower.is_infinite(), upper.is_infinite()) {
        (true, true) => "(-Inf, Inf]".to_string(),
        (true, false) => format!("(-Inf, {:.2}]", upper),
        (false, true) => format!("({:.2}, Inf]", lower),
        (false, false) => format!("({:.2}, {:.2}]", lower, upper),
    }
}
