mod gradient_descent;
mod minimizer;

pub use gradient_descent::{GradientDescent, GradientDescentConfig};
pub use minimizer::{MinimizeResult, Minimizer};
