pub use amm::*;
pub use dlog::*;
pub use error::*;
pub use factor::*;
pub use num_util::*;
pub use sampler::*;
pub use validate::*;

mod amm;
mod dlog;
mod error;
mod factor;
mod num_util;
mod sampler;
mod validate;
