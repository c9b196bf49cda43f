//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — toleration/QoS input types, pod documents, report structs.
//! - `constants.rs` — well-known taint keys and default paths.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects and no
//! classification logic (that lives in `services::evaluator`).
//!
//! ## Compatibility note
//! Serde names follow the Kubernetes wire format for pod input, and the report
//! structs define the `--json` output. Keep schema-impacting changes in sync with
//! `docs/contracts/*`.

pub mod constants;
pub mod models;
