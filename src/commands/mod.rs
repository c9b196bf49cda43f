//! Command handler layer.
//!
//! ## Files
//! - `admin.rs` — config command tree.
//! - `runtime.rs` — check/eval/rules.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate classification and I/O to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::handle_config_commands;
pub use runtime::handle_runtime_commands;
