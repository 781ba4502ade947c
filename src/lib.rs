//! Training of feed-forward neural networks through a differentiable, regularized cost function
//! minimized from several random starting points.

pub mod arch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod flatten;
pub mod optimization;
pub mod training;

pub use error::{NnErr, Result};
