mod act_fn;
mod sigmoid;
mod tanh;

pub use act_fn::{ActFn, ActFnConfig};
pub use sigmoid::Sigmoid;
pub use tanh::Tanh;
