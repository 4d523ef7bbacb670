mod config;
mod context;
mod export;
mod preview;
mod slides;

pub use config::*;
pub use context::*;
pub use export::*;
pub use preview::*;
pub use slides::*;
