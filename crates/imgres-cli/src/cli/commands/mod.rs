//! CLI command handlers, one file per command.

mod config;
mod resolve;
mod rewrite;

pub use config::run_config;
pub use resolve::run_resolve;
pub use rewrite::run_rewrite;
