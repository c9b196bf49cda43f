//! Service layer containing the classification core and side-effect helpers.
//!
//! ## Service map
//! - `registry.rs` — immutable default-toleration rule table.
//! - `evaluator.rs` — default/modified verdict for one toleration.
//! - `compliance.rs` — pod × toleration loop and report aggregation.
//! - `pods.rs` — pod document intake (file or stdin).
//! - `config.rs` — config file loading and registry construction.
//! - `storage.rs` — JSONL audit trail.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - `registry` and `evaluator` stay pure: no I/O, no logging.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod compliance;
pub mod config;
pub mod evaluator;
pub mod output;
pub mod pods;
pub mod registry;
pub mod storage;
