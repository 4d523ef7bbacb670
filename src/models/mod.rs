mod slide;
mod stats;

pub use slide::*;
pub use stats::*;
