//! Application state facade over the project store.
//!
//! # Responsibility
//! - Hold UI-observable snapshots (`projects`, current project, selection).
//! - Turn store failures into a single clearable error message.
//!
//! # See also
//! - `repo::project_store` for persistence semantics.

pub mod app_state;
pub mod filter;
