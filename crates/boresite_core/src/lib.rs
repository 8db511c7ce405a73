//! Core domain logic for Boresite.
//! This crate owns the survey project/borehole records and their persistence.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::borehole::{Borehole, BoreholeId, BoreholePatch, BoreholeStatus, NewBorehole};
pub use model::project::{
    CoordinateSystem, NewProject, Project, ProjectId, ProjectPatch, ProjectStatus,
};
pub use model::validation::ValidationError;
pub use repo::project_store::{
    generate_borehole_code, ProjectStore, StoreError, StoreResult, STORAGE_KEY,
};
pub use service::app_state::{AppState, CurrentProject};
pub use service::filter::{BoreholeFilter, ProjectFilter};
pub use storage::{BlobStorage, FileBlobStorage, MemoryBlobStorage, StorageError};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
