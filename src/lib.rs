//! # featurebin
//!
//! Discretize numeric columns of a table into interval bins.
//!
//! Bins are learned per column from a training [`Frame`](frame::Frame),
//! either as equal-population chunks of the distinct values or by
//! entropy-driven splitting, and then applied to any frame with the same
//! columns. Values outside the training range fall into the open-ended first
//! or last bin, so a fitted binner never rejects a numeric value.
//!
//! ## Core Design Principles
//!
//! - **Training/Inference Separation**: [`Transformer`](preprocessing::Transformer)
//!   learns, [`FittedTransformer`](preprocessing::FittedTransformer) applies.
//!   Fitted state is immutable and serializable.
//! - **Loud failure**: bad configuration, missing columns, non-finite training
//!   data or too few distinct values are errors, never silent fallbacks.
//!
//! ## Quick Start
//!
//! ```rust
//! use featurebin::frame::{Column, Frame};
//! use featurebin::preprocessing::{BinningEngine, BinningTransformer, BinStrategy};
//!
//! let data = Frame::new()
//!     .with_column("a", Column::Float((0..10).map(f64::from).collect()))?
//!     .with_column("b", Column::Int(vec![5, 1, 9, 3, 7, 2, 8, 0, 6, 4]))?;
//!
//! let mut engine = BinningEngine::new(
//!     BinningTransformer::new(["a", "b"])
//!         .with_bin_counts(vec![4, 2])
//!         .with_strategy(BinStrategy::Uniform)
//!         .with_overwrite(false),
//! )?;
//!
//! let binned = engine.fit_transform(&data)?.into_frame().expect("frame output");
//! assert!(binned.contains("a_binned"));
//! assert_eq!(binned.column("a_binned").unwrap().get(3).unwrap().to_string(), "(3.00, 6.00]");
//! # Ok::<(), featurebin::preprocessing::PreprocessingError>(())
//! ```

pub mod frame;
pub mod preprocessing;
pub mod serialization;
pub mod utils;

pub use frame::{Cell, Column, Frame};
pub use preprocessing::{BinStrategy, BinningEngine, BinningTransformer, PreprocessingError};
