//! Bin-count specification and serde-facing configuration.

use super::strategy::BinStrategy;
use crate::preprocessing::error::PreprocessingError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Default number of bins per column.
pub const DEFAULT_N_BINS: usize = 10;

/// How many bins each configured column gets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NBins {
    /// The same count for every column.
    All(usize),
    /// One count per column, positionally matched to the column list.
    PerColumn(Vec<usize>),
    /// Counts keyed by column name; keys must match the column list exactly.
    ByName(BTreeMap<String, usize>),
}

impl Default for NBins {
    fn default() -> Self {
        NBins::All(DEFAULT_N_BINS)
    }
}

impl From<usize> for NBins {
    fn from(n: usize) -> Self {
        NBins::All(n)
    }
}

impl From<Vec<usize>> for NBins {
    fn from(counts: Vec<usize>) -> Self {
        NBins::PerColumn(counts)
    }
}

impl From<BTreeMap<String, usize>> for NBins {
    fn from(counts: BTreeMap<String, usize>) -> Self {
        NBins::ByName(counts)
    }
}

impl NBins {
    /// Normalize to one `(column, count)` pair per column, in `cols` order.
    ///
    /// # Errors
    /// [`PreprocessingError::Configuration`] when a per-column list has the
    /// wrong length, mapping keys differ from `cols` (extra or missing), or
    /// any count is not greater than 1.
    pub fn resolve(&self, cols: &[String]) -> Result<Vec<(String, usize)>, PreprocessingError> {
        let resolved: Vec<(String, usize)> = match self {
            NBins::All(n) => cols.iter().map(|c| (c.clone(), *n)).collect(),
            NBins::PerColumn(counts) => {
                if counts.len() != cols.len() {
                    return Err(PreprocessingError::Configuration(format!(
                        "dim mismatch between cols ({}) and n_bins ({})",
                        cols.len(),
                        counts.len()
                    )));
                }
                cols.iter().cloned().zip(counts.iter().copied()).collect()
            }
            NBins::ByName(counts) => {
                let extra: Vec<&String> = counts.keys().filter(|k| !cols.contains(k)).collect();
                let missing: Vec<&String> =
                    cols.iter().filter(|c| !counts.contains_key(*c)).collect();
                if !extra.is_empty() || !missing.is_empty() {
                    return Err(PreprocessingError::Configuration(format!(
                        "when n_bins is a mapping its keys must match cols \
                         (extra keys: {:?}, missing keys: {:?})",
                        extra, missing
                    )));
                }
                cols.iter()
                    .filter_map(|c| counts.get(c).map(|&n| (c.clone(), n)))
                    .collect()
            }
        };

        for (col, n) in &resolved {
            if *n <= 1 {
                return Err(PreprocessingError::Configuration(format!(
                    "each n_bins value must be an integer > 1, got {} for column '{}'",
                    n, col
                )));
            }
        }
        Ok(resolved)
    }
}

/// Check the column list is non-empty and free of duplicates.
pub(crate) fn validate_cols(cols: &[String]) -> Result<(), PreprocessingError> {
    if cols.is_empty() {
        return Err(PreprocessingError::Configuration(
            "cols must name at least one column; binning a whole frame is not allowed".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(cols.len());
    for col in cols {
        if !seen.insert(col.as_str()) {
            return Err(PreprocessingError::Configuration(format!(
                "column '{}' is listed more than once",
                col
            )));
        }
    }
    Ok(())
}

/// Bin counts as written in a config file.
///
/// Counts are read as plain JSON numbers so that a fractional or negative
/// count is reported as a configuration error instead of a parse error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinCountConfig {
    Single(f64),
    List(Vec<f64>),
    Map(BTreeMap<String, f64>),
}

impl Default for BinCountConfig {
    fn default() -> Self {
        BinCountConfig::Single(DEFAULT_N_BINS as f64)
    }
}

impl TryFrom<&BinCountConfig> for NBins {
    type Error = PreprocessingError;

    fn try_from(config: &BinCountConfig) -> Result<Self, Self::Error> {
        Ok(match config {
            BinCountConfig::Single(n) => NBins::All(integral_count(*n, "all columns")?),
            BinCountConfig::List(counts) => NBins::PerColumn(
                counts
                    .iter()
                    .enumerate()
                    .map(|(i, &n)| integral_count(n, &format!("position {}", i)))
                    .collect::<Result<_, _>>()?,
            ),
            BinCountConfig::Map(counts) => NBins::ByName(
                counts
                    .iter()
                    .map(|(col, &n)| Ok((col.clone(), integral_count(n, col)?)))
                    .collect::<Result<_, PreprocessingError>>()?,
            ),
        })
    }
}

impl From<&NBins> for BinCountConfig {
    fn from(n_bins: &NBins) -> Self {
        match n_bins {
            NBins::All(n) => BinCountConfig::Single(*n as f64),
            NBins::PerColumn(counts) => {
                BinCountConfig::List(counts.iter().map(|&n| n as f64).collect())
            }
            NBins::ByName(counts) => BinCountConfig::Map(
                counts.iter().map(|(c, &n)| (c.clone(), n as f64)).collect(),
            ),
        }
    }
}

fn integral_count(n: f64, context: &str) -> Result<usize, PreprocessingError> {
    if !n.is_finite() || n.fract() != 0.0 || n <= 1.0 || n > u32::MAX as f64 {
        return Err(PreprocessingError::Configuration(format!(
            "each n_bins value must be an integer > 1, got {} for {}",
            n, context
        )));
    }
    Ok(n as usize)
}

fn default_strategy() -> String {
    BinStrategy::default().to_string()
}

fn default_true() -> bool {
    true
}

/// Binning configuration as read from / written to JSON.
///
/// ```
/// use featurebin::preprocessing::binning::BinningConfig;
///
/// let config = BinningConfig::from_json_str(
///     r#"{ "cols": ["a", "b"], "n_bins": {"a": 3, "b": 5}, "strategy": "entropy" }"#,
/// )?;
/// assert!(config.overwrite);
/// # Ok::<(), featurebin::preprocessing::PreprocessingError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinningConfig {
    /// Columns to bin, in output order.
    pub cols: Vec<String>,
    #[serde(default)]
    pub n_bins: BinCountConfig,
    /// Strategy name; see [`BinStrategy::names`].
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Emit interval labels instead of integer levels.
    #[serde(default = "default_true")]
    pub return_bin_label: bool,
    /// Replace source columns instead of appending `<col>_binned`.
    #[serde(default = "default_true")]
    pub overwrite: bool,
    /// Return the full frame instead of its raw backing array.
    #[serde(default = "default_true")]
    pub as_frame: bool,
}

impl BinningConfig {
    /// Configuration with defaults for everything but the columns.
    pub fn new<I, S>(cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cols: cols.into_iter().map(Into::into).collect(),
            n_bins: BinCountConfig::default(),
            strategy: default_strategy(),
            return_bin_label: true,
            overwrite: true,
            as_frame: true,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PreprocessingError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, PreprocessingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
