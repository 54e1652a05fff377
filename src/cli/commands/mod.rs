//! CLI command implementations.

mod fetch;
mod serve;

pub use fetch::run_fetch;
pub use serve::run_serve;
