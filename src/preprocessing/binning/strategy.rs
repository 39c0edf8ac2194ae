//! Boundary-computation strategies.

use super::bins::BinSet;
use super::entropy::entropy_groups;
use crate::preprocessing::error::PreprocessingError;
use crate::utils::{chunk, unique_with_counts};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How bin boundaries are chosen from a training sample.
///
/// Both strategies work on the sorted distinct values of the sample, so
/// repeated values never straddle a boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinStrategy {
    /// Equal-population chunks of the distinct values. When the count does
    /// not divide evenly, earlier chunks get one extra value.
    #[default]
    Uniform,
    /// Split points chosen to maximize entropy gain over the distinct
    /// values weighted by how often each occurs.
    Entropy,
}

impl BinStrategy {
    /// Every registered strategy, in display order.
    pub const ALL: [BinStrategy; 2] = [BinStrategy::Uniform, BinStrategy::Entropy];

    /// Registered strategy names.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|s| s.as_str().to_string()).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinStrategy::Uniform => "uniform",
            BinStrategy::Entropy => "entropy",
        }
    }

    /// Learn `n_bins` bins for `values`.
    ///
    /// `column` is only used to name the feature in errors.
    ///
    /// # Errors
    /// - [`PreprocessingError::Configuration`] if `n_bins < 2`.
    /// - [`PreprocessingError::NonFinite`] if `values` holds NaN or an infinity.
    /// - [`PreprocessingError::InsufficientCardinality`] if `values` has fewer
    ///   distinct values than `n_bins`. The bin count is never reduced silently.
    pub fn compute(
        &self,
        column: &str,
        values: &[f64],
        n_bins: usize,
    ) -> Result<BinSet, PreprocessingError> {
        if n_bins < 2 {
            return Err(PreprocessingError::Configuration(format!(
                "n_bins must be an integer > 1, got {} for column '{}'",
                n_bins, column
            )));
        }
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(PreprocessingError::NonFinite {
                column: column.to_string(),
                row,
            });
        }

        let (unique, counts) = unique_with_counts(values);
        if unique.len() < n_bins {
            return Err(PreprocessingError::InsufficientCardinality {
                column: column.to_string(),
                n_unique: unique.len(),
                n_bins,
            });
        }

        match self {
            BinStrategy::Uniform => BinSet::from_groups(&chunk(&unique, n_bins)),
            BinStrategy::Entropy => {
                let counts: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
                BinSet::from_groups(&entropy_groups(&unique, &counts, n_bins))
            }
        }
    }
}

impl fmt::Display for BinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BinStrategy {
    type Err = PreprocessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| PreprocessingError::UnsupportedStrategy {
                got: s.to_string(),
                valid: Self::names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_ten_values_four_bins() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let bins = BinStrategy::Uniform.compute("x", &values, 4).unwrap();
        assert_eq!(bins.lower_bounds(), &[f64::NEG_INFINITY, 3.0, 6.0, 8.0]);
        assert_eq!(
            bins.labels(),
            &[
                "(-Inf, 3.00]".to_string(),
                "(3.00, 6.00]".to_string(),
                "(6.00, 8.00]".to_string(),
                "(8.00, Inf]".to_string(),
            ]
        );
    }

    #[test]
    fn test_uniform_ignores_duplicates_and_order() {
        let values = [9.0, 0.0, 3.0, 3.0, 3.0, 1.0, 6.0, 8.0, 2.0, 4.0, 5.0, 7.0, 0.0];
        let bins = BinStrategy::Uniform.compute("x", &values, 4).unwrap();
        assert_eq!(bins.lower_bounds(), &[f64::NEG_INFINITY, 3.0, 6.0, 8.0]);
    }

    #[test]
    fn test_uniform_widths_follow_density() {
        // dense near zero, sparse far out
        let values = [0.0, 0.1, 0.2, 0.3, 50.0, 100.0];
        let bins = BinStrategy::Uniform.compute("x", &values, 3).unwrap();
        assert_eq!(bins.lower_bounds(), &[f64::NEG_INFINITY, 0.2, 50.0]);
    }

    #[test]
    fn test_insufficient_cardinality() {
        let values = [1.0, 1.0, 2.0, 2.0];
        let err = BinStrategy::Uniform.compute("feat", &values, 3).unwrap_err();
        match err {
            PreprocessingError::InsufficientCardinality {
                column,
                n_unique,
                n_bins,
            } => {
                assert_eq!(column, "feat");
                assert_eq!(n_unique, 2);
                assert_eq!(n_bins, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bin_count_below_two_rejected() {
        for strategy in BinStrategy::ALL {
            for n_bins in [0, 1] {
                let result = strategy.compute("x", &[1.0, 2.0, 3.0], n_bins);
                assert!(
                    matches!(result, Err(PreprocessingError::Configuration(_))),
                    "{} with {} bins",
                    strategy,
                    n_bins
                );
            }
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for strategy in BinStrategy::ALL {
            let result = strategy.compute("x", &[1.0, f64::NAN, f64::NAN], 3);
            assert!(matches!(
                result,
                Err(PreprocessingError::NonFinite { ref column, row: 1 }) if column == "x"
            ));

            let result = strategy.compute("x", &[1.0, 2.0, f64::INFINITY], 2);
            assert!(matches!(
                result,
                Err(PreprocessingError::NonFinite { row: 2, .. })
            ));
        }
    }

    #[test]
    fn test_entropy_insufficient_cardinality() {
        let result = BinStrategy::Entropy.compute("feat", &[1.0, 1.0], 2);
        assert!(matches!(
            result,
            Err(PreprocessingError::InsufficientCardinality { .. })
        ));
    }

    #[test]
    fn test_exact_cardinality_one_value_per_bin() {
        let values = [5.0, 1.0, 3.0];
        for strategy in BinStrategy::ALL {
            let bins = strategy.compute("x", &values, 3).unwrap();
            assert_eq!(bins.assign_levels(&[1.0, 3.0, 5.0]), vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_entropy_produces_requested_bins() {
        let values: Vec<f64> = (0..40).map(|i| f64::from(i % 13) * 1.5).collect();
        let bins = BinStrategy::Entropy.compute("x", &values, 5).unwrap();
        assert_eq!(bins.n_bins(), 5);
        assert!(bins.lower_bounds().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("uniform".parse::<BinStrategy>().unwrap(), BinStrategy::Uniform);
        assert_eq!("entropy".parse::<BinStrategy>().unwrap(), BinStrategy::Entropy);
    }

    #[test]
    fn test_from_str_unknown_lists_choices() {
        let err = "quantile".parse::<BinStrategy>().unwrap_err();
        match err {
            PreprocessingError::UnsupportedStrategy { got, valid } => {
                assert_eq!(got, "quantile");
                assert_eq!(valid, vec!["uniform".to_string(), "entropy".to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_display_round_trips() {
        for strategy in BinStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<BinStrategy>().unwrap(), strategy);
        }
    }
}
