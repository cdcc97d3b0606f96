//! ZenSwitch library
//!
//! Core functionality for the `zen` CLI: allow-list resolution, target
//! filtering, quit orchestration, and config file handling.

pub mod allowlist;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod switcher;

// Re-export main types for convenience
pub use allowlist::{filter_targets, resolve, Options, DEFAULT_ALLOWED_APPS};
pub use cli::{Cli, Commands};
pub use error::{Result, ZenError};
pub use executor::{ExecOutput, Executor, OsExecutor};
pub use switcher::{
    effective_allowed_apps, execute_with_options, preview_with_options, running_app_names,
    self_app_names,
};
