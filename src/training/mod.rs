//! Turning a network and its training data into a minimizable cost, and minimizing it.

pub mod check;
mod cost;
mod trainer;

pub use cost::{CostFn, FlatCostFn};
pub use trainer::Trainer;
