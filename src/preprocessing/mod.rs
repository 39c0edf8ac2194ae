//! Data preprocessing transformers.
//!
//! Transformers follow a strict fit/transform split: an unfitted
//! [`Transformer`] holds hyperparameters and learns from training data,
//! producing an immutable [`FittedTransformer`] that transforms new data and
//! can be saved and loaded.
//!
//! # Design Philosophy
//!
//! - **Explicit state**: fitted parameters live in a separate type, so a
//!   transform before fit is impossible on the typed API and reported as
//!   [`PreprocessingError::NotFitted`] on [`BinningEngine`].
//! - **Serializable**: fitted transformers round-trip through `bincode`.
//! - **No mutation of inputs**: transforms work on a private copy.
//!
//! # Available Transformers
//!
//! ## Binning
//! - [`BinningTransformer`]: map numeric columns to interval bins using a
//!   [`BinStrategy`]
//!
//! # Example
//!
//! ```
//! use featurebin::frame::{Column, Frame};
//! use featurebin::preprocessing::{BinningTransformer, FittedBinning, FittedTransformer, Transformer};
//!
//! let train = Frame::new()
//!     .with_column("age", Column::Float(vec![18.0, 25.0, 31.0, 40.0, 52.0, 67.0]))?;
//!
//! let fitted = BinningTransformer::new(["age"]).with_n_bins(3).fit(&train)?;
//!
//! let path = std::env::temp_dir().join("featurebin_preprocessing_doc.bin");
//! fitted.save_to_file(&path)?;
//! let loaded = FittedBinning::load_from_file(&path)?;
//! # std::fs::remove_file(&path).ok();
//!
//! assert_eq!(loaded.transform(&train)?, fitted.transform(&train)?);
//! # Ok::<(), featurebin::preprocessing::PreprocessingError>(())
//! ```

pub mod binning;
pub mod error;
pub mod traits;

pub use binning::{
    BinSet, BinStrategy, BinnedOutput, BinningConfig, BinningEngine, BinningParams,
    BinningTransformer, FittedBinning, NBins,
};
pub use error::PreprocessingError;
pub use traits::{FittedTransformer, Transformer};
