//! Survey domain model for projects and their boreholes.
//!
//! # Responsibility
//! - Define the canonical records persisted in the project collection.
//! - Provide field validation and partial-update merge helpers.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - A borehole belongs to exactly one project and is never moved.
//! - Deletion is a hard removal from the owning sequence (no tombstones).

pub mod borehole;
pub mod project;
pub mod timestamp;
pub mod validation;
