//! Column binning transformer.
//!
//! Learns per-column bin boundaries on a training frame and maps numeric
//! columns of later frames to bin labels or bin indices.

use super::bins::BinSet;
use super::config::{validate_cols, BinCountConfig, BinningConfig, NBins};
use super::strategy::BinStrategy;
use crate::frame::{validate_columns_present, validate_table, Cell, Frame};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use log::{debug, info};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Bins selected numeric columns of a [`Frame`].
///
/// # Example
/// ```
/// use featurebin::frame::{Column, Frame};
/// use featurebin::preprocessing::binning::{BinningTransformer, BinStrategy};
/// use featurebin::preprocessing::{FittedTransformer, Transformer};
///
/// let train = Frame::new().with_column("a", Column::Float((0..10).map(f64::from).collect()))?;
///
/// let fitted = BinningTransformer::new(["a"])
///     .with_n_bins(4)
///     .with_strategy(BinStrategy::Uniform)
///     .fit(&train)?;
///
/// let binned = fitted.transform(&train)?.into_frame().expect("frame output");
/// assert_eq!(binned.column("a").unwrap().get(0).unwrap().to_string(), "(-Inf, 3.00]");
/// # Ok::<(), featurebin::preprocessing::PreprocessingError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BinningTransformer {
    cols: Vec<String>,
    n_bins: NBins,
    strategy: BinStrategy,
    return_bin_label: bool,
    overwrite: bool,
    as_frame: bool,
}

impl BinningTransformer {
    /// Create a transformer for `cols` with default settings: 10 bins per
    /// column, uniform strategy, label output, in-place overwrite, frame output.
    pub fn new<I, S>(cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cols: cols.into_iter().map(Into::into).collect(),
            n_bins: NBins::default(),
            strategy: BinStrategy::default(),
            return_bin_label: true,
            overwrite: true,
            as_frame: true,
        }
    }

    /// Use the same number of bins for every column.
    pub fn with_n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = NBins::All(n_bins);
        self
    }

    /// Set bin counts per column, either as a list matched to the columns
    /// by position or as a map keyed by column name.
    pub fn with_bin_counts(mut self, n_bins: impl Into<NBins>) -> Self {
        self.n_bins = n_bins.into();
        self
    }

    pub fn with_strategy(mut self, strategy: BinStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Emit interval labels (`true`) or integer bin indices (`false`).
    pub fn with_bin_labels(mut self, return_bin_label: bool) -> Self {
        self.return_bin_label = return_bin_label;
        self
    }

    /// Replace source columns (`true`) or append `<col>_binned` (`false`).
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Return a [`Frame`] (`true`) or its backing array (`false`).
    pub fn with_as_frame(mut self, as_frame: bool) -> Self {
        self.as_frame = as_frame;
        self
    }

    pub fn cols(&self) -> &[String] {
        &self.cols
    }

    pub fn n_bins(&self) -> &NBins {
        &self.n_bins
    }

    pub fn strategy(&self) -> BinStrategy {
        self.strategy
    }

    /// Check the configuration and resolve one bin count per column.
    ///
    /// # Errors
    /// [`PreprocessingError::Configuration`] for an empty or duplicated
    /// column list, or bin counts that do not fit the columns.
    pub fn validate(&self) -> Result<Vec<(String, usize)>, PreprocessingError> {
        validate_cols(&self.cols)?;
        self.n_bins.resolve(&self.cols)
    }

    /// Serde-facing view of this configuration.
    pub fn to_config(&self) -> BinningConfig {
        BinningConfig {
            cols: self.cols.clone(),
            n_bins: BinCountConfig::from(&self.n_bins),
            strategy: self.strategy.to_string(),
            return_bin_label: self.return_bin_label,
            overwrite: self.overwrite,
            as_frame: self.as_frame,
        }
    }
}

impl TryFrom<BinningConfig> for BinningTransformer {
    type Error = PreprocessingError;

    fn try_from(config: BinningConfig) -> Result<Self, Self::Error> {
        let n_bins = NBins::try_from(&config.n_bins)?;
        let strategy: BinStrategy = config.strategy.parse()?;
        let transformer = BinningTransformer::new(config.cols)
            .with_bin_counts(n_bins)
            .with_strategy(strategy)
            .with_bin_labels(config.return_bin_label)
            .with_overwrite(config.overwrite)
            .with_as_frame(config.as_frame);
        transformer.validate()?;
        Ok(transformer)
    }
}

/// Result of a binning transform.
#[derive(Clone, Debug, PartialEq)]
pub enum BinnedOutput {
    Frame(Frame),
    /// Backing cells of the output frame, row-major, in frame column order.
    Array(Array2<Cell>),
}

impl BinnedOutput {
    pub fn into_frame(self) -> Option<Frame> {
        match self {
            BinnedOutput::Frame(frame) => Some(frame),
            BinnedOutput::Array(_) => None,
        }
    }

    /// The output as a cell array, converting a frame if needed.
    pub fn into_array(self) -> Array2<Cell> {
        match self {
            BinnedOutput::Frame(frame) => frame.to_array(),
            BinnedOutput::Array(array) => array,
        }
    }

    pub fn n_rows(&self) -> usize {
        match self {
            BinnedOutput::Frame(frame) => frame.n_rows(),
            BinnedOutput::Array(array) => array.nrows(),
        }
    }
}

/// Learned bins of one column.
#[derive(Clone, Debug, PartialEq)]
struct FittedColumn {
    name: String,
    n_bins: usize,
    bins: BinSet,
}

/// Serializable parameters for a fitted [`BinningTransformer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinningParams {
    /// Configured columns, in fit order.
    pub cols: Vec<String>,
    /// Resolved bin count per column, aligned with `cols`.
    pub n_bins: Vec<usize>,
    pub strategy: BinStrategy,
    pub return_bin_label: bool,
    pub overwrite: bool,
    pub as_frame: bool,
    /// Learned bins per column, aligned with `cols`.
    pub bins: Vec<BinSetParams>,
}

/// Persisted form of a [`BinSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinSetParams {
    pub lower_bounds: Vec<f64>,
    pub upper_bounds: Vec<f64>,
    pub labels: Vec<String>,
}

/// Fitted binning transformer ready for inference.
///
/// Immutable once built: transforms never change the learned bins.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedBinning {
    transformer: BinningTransformer,
    columns_: Vec<FittedColumn>,
}

impl FittedBinning {
    /// Configuration the bins were learned with.
    pub fn transformer(&self) -> &BinningTransformer {
        &self.transformer
    }

    /// Columns the bins were learned on, in fit order.
    pub fn fit_cols(&self) -> Vec<&str> {
        self.columns_.iter().map(|c| c.name.as_str()).collect()
    }

    /// Learned bins for `column`, if it was fitted.
    pub fn bins(&self, column: &str) -> Option<&BinSet> {
        self.columns_
            .iter()
            .find(|c| c.name == column)
            .map(|c| &c.bins)
    }

    /// Resolved bin count for `column`, if it was fitted.
    pub fn n_bins(&self, column: &str) -> Option<usize> {
        self.columns_
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.n_bins)
    }

    fn fit_col_names(&self) -> Vec<String> {
        self.columns_.iter().map(|c| c.name.clone()).collect()
    }
}

impl Transformer for BinningTransformer {
    type Input = Frame;
    type Output = BinnedOutput;
    type Params = BinningParams;
    type Fitted = FittedBinning;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let counts = self.validate()?;
        let (table, _) = validate_table(data, Some(&self.cols), true)?;

        if table.n_rows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit BinningTransformer on empty data".to_string(),
            ));
        }

        let mut columns_ = Vec::with_capacity(counts.len());
        for (name, n_bins) in counts {
            let values = table.numeric(&name)?;
            let bins = self.strategy.compute(&name, &values, n_bins)?;
            debug!(
                "fitted {} bins for column '{}' over {} rows, lower bounds {:?}",
                bins.n_bins(),
                name,
                values.len(),
                bins.lower_bounds()
            );
            columns_.push(FittedColumn { name, n_bins, bins });
        }

        info!(
            "fitted {} binning on {} column(s) over {} rows",
            self.strategy,
            columns_.len(),
            table.n_rows()
        );

        Ok(FittedBinning {
            transformer: self.clone(),
            columns_,
        })
    }
}

impl FittedTransformer for FittedBinning {
    type Input = Frame;
    type Output = BinnedOutput;
    type Params = BinningParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (mut table, _) = validate_table(data, Some(&self.transformer.cols), false)?;
        validate_columns_present(&self.fit_col_names(), table.names())?;

        for column in &self.columns_ {
            let values = table.numeric(&column.name)?;
            let binned = column.bins.assign(&values, self.transformer.return_bin_label);
            let target = if self.transformer.overwrite {
                column.name.clone()
            } else {
                format!("{}_binned", column.name)
            };
            table.set_column(target, binned)?;
        }

        debug!(
            "binned {} column(s) over {} rows (labels: {}, overwrite: {}, as_frame: {})",
            self.columns_.len(),
            table.n_rows(),
            self.transformer.return_bin_label,
            self.transformer.overwrite,
            self.transformer.as_frame
        );

        Ok(if self.transformer.as_frame {
            BinnedOutput::Frame(table)
        } else {
            BinnedOutput::Array(table.to_array())
        })
    }

    fn extract_params(&self) -> Self::Params {
        BinningParams {
            cols: self.fit_col_names(),
            n_bins: self.columns_.iter().map(|c| c.n_bins).collect(),
            strategy: self.transformer.strategy,
            return_bin_label: self.transformer.return_bin_label,
            overwrite: self.transformer.overwrite,
            as_frame: self.transformer.as_frame,
            bins: self
                .columns_
                .iter()
                .map(|c| BinSetParams {
                    lower_bounds: c.bins.lower_bounds().to_vec(),
                    upper_bounds: c.bins.upper_bounds().to_vec(),
                    labels: c.bins.labels().to_vec(),
                })
                .collect(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.n_bins.len() != params.cols.len() || params.bins.len() != params.cols.len() {
            return Err(PreprocessingError::Serialization(format!(
                "expected bins for {} column(s), found {} counts and {} bin sets",
                params.cols.len(),
                params.n_bins.len(),
                params.bins.len()
            )));
        }

        let transformer = BinningTransformer::new(params.cols.clone())
            .with_bin_counts(params.n_bins.clone())
            .with_strategy(params.strategy)
            .with_bin_labels(params.return_bin_label)
            .with_overwrite(params.overwrite)
            .with_as_frame(params.as_frame);
        transformer
            .validate()
            .map_err(|e| PreprocessingError::Serialization(e.to_string()))?;

        let mut columns_ = Vec::with_capacity(params.cols.len());
        for ((name, n_bins), set) in params.cols.into_iter().zip(params.n_bins).zip(params.bins) {
            let bins = BinSet::from_parts(set.lower_bounds, set.upper_bounds, set.labels)?;
            if bins.n_bins() != n_bins {
                return Err(PreprocessingError::Serialization(format!(
                    "column '{}' declares {} bins but stores {}",
                    name,
                    n_bins,
                    bins.n_bins()
                )));
            }
            columns_.push(FittedColumn { name, n_bins, bins });
        }

        Ok(FittedBinning {
            transformer,
            columns_,
        })
    }

    fn n_features_in(&self) -> usize {
        self.columns_.len()
    }
}
