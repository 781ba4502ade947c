mod err_fn;
mod logit;
mod squared;

use serde::Deserialize;

pub use err_fn::ErrFn;
pub use logit::Logit;
pub use squared::Squared;

/// Error function as written in a JSON config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrFnConfig {
    #[default]
    Logit,
    Squared,
}
