//! Stateful fit/transform facade over [`BinningTransformer`].

use super::config::BinningConfig;
use super::transformer::{BinnedOutput, BinningTransformer, FittedBinning};
use crate::frame::Frame;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};

/// Holds a binning configuration and, once fitted, the learned bins.
///
/// Refitting replaces the learned state only when the new fit succeeds; a
/// failed fit leaves the engine exactly as it was.
///
/// # Example
/// ```
/// use featurebin::frame::{Column, Frame};
/// use featurebin::preprocessing::binning::{BinningEngine, BinningTransformer};
///
/// let data = Frame::new().with_column("a", Column::Float((0..10).map(f64::from).collect()))?;
///
/// let mut engine = BinningEngine::new(BinningTransformer::new(["a"]).with_n_bins(4))?;
/// let binned = engine.fit(&data)?.transform(&data)?;
/// assert_eq!(binned.n_rows(), 10);
/// # Ok::<(), featurebin::preprocessing::PreprocessingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BinningEngine {
    transformer: BinningTransformer,
    fitted: Option<FittedBinning>,
}

impl BinningEngine {
    /// Create an unfitted engine.
    ///
    /// # Errors
    /// [`PreprocessingError::Configuration`] if the transformer configuration
    /// is invalid; nothing is deferred to fit time.
    pub fn new(transformer: BinningTransformer) -> Result<Self, PreprocessingError> {
        transformer.validate()?;
        Ok(Self {
            transformer,
            fitted: None,
        })
    }

    /// Create an unfitted engine from a serde configuration.
    pub fn from_config(config: BinningConfig) -> Result<Self, PreprocessingError> {
        Self::new(BinningTransformer::try_from(config)?)
    }

    /// Wrap an already fitted snapshot, e.g. one loaded from disk.
    pub fn from_fitted(fitted: FittedBinning) -> Self {
        Self {
            transformer: fitted.transformer().clone(),
            fitted: Some(fitted),
        }
    }

    /// Learn bins from `data`, replacing any previous fit on success.
    pub fn fit(&mut self, data: &Frame) -> Result<&mut Self, PreprocessingError> {
        let fitted = self.transformer.fit(data)?;
        self.fitted = Some(fitted);
        Ok(self)
    }

    /// Bin `data` with the learned bins.
    ///
    /// # Errors
    /// [`PreprocessingError::NotFitted`] before a successful fit, plus any
    /// error of [`FittedBinning::transform`].
    pub fn transform(&self, data: &Frame) -> Result<BinnedOutput, PreprocessingError> {
        self.fitted
            .as_ref()
            .ok_or(PreprocessingError::NotFitted("BinningEngine"))?
            .transform(data)
    }

    pub fn fit_transform(&mut self, data: &Frame) -> Result<BinnedOutput, PreprocessingError> {
        self.fit(data)?.transform(data)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The learned snapshot, if fitted.
    pub fn fitted(&self) -> Option<&FittedBinning> {
        self.fitted.as_ref()
    }

    pub fn transformer(&self) -> &BinningTransformer {
        &self.transformer
    }

    /// Persist the learned bins.
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), PreprocessingError> {
        self.fitted
            .as_ref()
            .ok_or(PreprocessingError::NotFitted("BinningEngine"))?
            .save_to_file(path)
    }

    /// Restore a fitted engine saved with [`save_to_file`](Self::save_to_file).
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PreprocessingError> {
        Ok(Self::from_fitted(FittedBinning::load_from_file(path)?))
    }
}
