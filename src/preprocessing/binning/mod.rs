//! Unsupervised discretization of numeric columns.
//!
//! - [`BinStrategy`]: how boundaries are chosen (`uniform` or `entropy`).
//! - [`BinSet`]: learned boundaries and labels for one column.
//! - [`BinningTransformer`] / [`FittedBinning`]: the [`Transformer`](crate::preprocessing::Transformer)
//!   pair that learns and applies bins over a [`Frame`](crate::frame::Frame).
//! - [`BinningEngine`]: mutable fit/transform wrapper around the pair.
//! - [`BinningConfig`]: JSON-facing configuration.

mod bins;
mod config;
mod engine;
pub mod entropy;
mod strategy;
mod transformer;

pub use bins::BinSet;
pub use config::{BinCountConfig, BinningConfig, NBins, DEFAULT_N_BINS};
pub use engine::BinningEngine;
pub use strategy::BinStrategy;
pub use transformer::{
    BinSetParams, BinnedOutput, BinningParams, BinningTransformer, FittedBinning,
};
