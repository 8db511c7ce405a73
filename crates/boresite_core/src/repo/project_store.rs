//! Project collection store over a blob storage medium.
//!
//! # Responsibility
//! - Provide CRUD over projects and their boreholes.
//! - Persist the full collection as one versioned JSON blob per write.
//!
//! # Invariants
//! - Collection order is newest-created-first.
//! - Borehole order inside a project is creation order (append-only).
//! - Not-found is an `Ok(None)` / `Ok(false)` result and never writes.
//! - A failed write leaves the stored blob unchanged.

use crate::model::borehole::{Borehole, BoreholeId, BoreholePatch, NewBorehole};
use crate::model::project::{NewProject, Project, ProjectId, ProjectPatch};
use crate::model::timestamp::now_epoch_ms;
use crate::model::validation::ValidationError;
use crate::repo::defaults::{build_borehole, build_project};
use crate::repo::schema::{decode_collection, encode_collection, DecodeError};
use crate::storage::{BlobStorage, StorageError};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fixed key the project collection is stored under.
pub const STORAGE_KEY: &str = "geotech_projects";

const BOREHOLE_CODE_PREFIX: &str = "BH";

/// `(latitude, longitude, ground_level)` of the seeded sample boreholes.
const SAMPLE_BOREHOLES: [(f64, f64, f64); 2] =
    [(-36.8485, 174.7633, 24.0), (-36.8492, 174.7641, 22.5)];

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised at the store boundary.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    Storage(StorageError),
    Serialization(serde_json::Error),
    /// The stored blob was written by a newer version and must not be clobbered.
    UnsupportedSchemaVersion { stored: u32, latest_supported: u32 },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to serialize projects: {err}"),
            Self::UnsupportedSchemaVersion {
                stored,
                latest_supported,
            } => write!(
                f,
                "stored project data version {stored} is newer than supported {latest_supported}; refusing to overwrite"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Whole-collection store for projects and boreholes.
pub struct ProjectStore<S: BlobStorage> {
    storage: S,
    key: String,
}

impl<S: BlobStorage> ProjectStore<S> {
    /// Creates a store persisting under `STORAGE_KEY`.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Returns whether the collection key has ever been written.
    pub fn is_initialized(&self) -> StoreResult<bool> {
        Ok(self.storage.read(&self.key)?.is_some())
    }

    /// Returns the persisted collection, newest first.
    ///
    /// Absent, unreadable or malformed data yields an empty list; the cause is
    /// logged and never propagated.
    pub fn list_projects(&self) -> Vec<Project> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=projects_load module=store status=degraded error_code=read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match decode_collection(&raw) {
            Ok(projects) => projects,
            Err(err) => {
                warn!(
                    "event=projects_load module=store status=degraded error_code=decode_failed error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    pub fn get_project(&self, id: ProjectId) -> Option<Project> {
        self.list_projects()
            .into_iter()
            .find(|project| project.id == id)
    }

    /// Creates a project and stores it at the front of the collection.
    pub fn create_project(&mut self, input: NewProject) -> StoreResult<Project> {
        let project = build_project(input, Uuid::new_v4(), now_epoch_ms());
        project.validate()?;

        let mut projects = self.load_for_write()?;
        projects.insert(0, project.clone());
        self.persist(&projects)?;

        info!(
            "event=project_create module=store status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    /// Merges `patch` into the project with `id`.
    ///
    /// Returns `Ok(None)` without writing when no such project exists.
    pub fn update_project(
        &mut self,
        id: ProjectId,
        patch: &ProjectPatch,
    ) -> StoreResult<Option<Project>> {
        let mut projects = self.load_for_write()?;
        let Some(project) = projects.iter_mut().find(|project| project.id == id) else {
            return Ok(None);
        };

        patch.apply_to(project);
        project.touch(now_epoch_ms());
        project.validate_fields()?;
        let updated = project.clone();

        self.persist(&projects)?;
        info!("event=project_update module=store status=ok project_id={id}");
        Ok(Some(updated))
    }

    /// Removes a project together with all of its boreholes.
    pub fn delete_project(&mut self, id: ProjectId) -> StoreResult<bool> {
        let mut projects = self.load_for_write()?;
        let before = projects.len();
        projects.retain(|project| project.id != id);
        if projects.len() == before {
            return Ok(false);
        }

        self.persist(&projects)?;
        info!("event=project_delete module=store status=ok project_id={id}");
        Ok(true)
    }

    /// Appends a borehole to the project with `project_id`.
    pub fn add_borehole(
        &mut self,
        project_id: ProjectId,
        input: NewBorehole,
    ) -> StoreResult<Option<Borehole>> {
        let mut projects = self.load_for_write()?;
        let Some(project) = projects.iter_mut().find(|project| project.id == project_id) else {
            return Ok(None);
        };

        let now = now_epoch_ms();
        let explicit_code = input.code.is_some();
        let borehole = {
            let owner: &Project = project;
            build_borehole(input, Uuid::new_v4(), now, || generate_borehole_code(owner))
        };
        borehole.validate()?;

        if explicit_code && has_code(project, &borehole.code) {
            warn!(
                "event=borehole_create module=store status=ok warning=duplicate_code project_id={} code={}",
                project_id, borehole.code
            );
        }

        project.boreholes.push(borehole.clone());
        project.touch(now);
        self.persist(&projects)?;

        info!(
            "event=borehole_create module=store status=ok project_id={} borehole_id={}",
            project_id, borehole.id
        );
        Ok(Some(borehole))
    }

    /// Merges `patch` into one borehole and stamps both records.
    pub fn update_borehole(
        &mut self,
        project_id: ProjectId,
        borehole_id: BoreholeId,
        patch: &BoreholePatch,
    ) -> StoreResult<Option<Borehole>> {
        let mut projects = self.load_for_write()?;
        let Some(project) = projects.iter_mut().find(|project| project.id == project_id) else {
            return Ok(None);
        };
        let now = now_epoch_ms();
        let Some(borehole) = project.borehole_mut(borehole_id) else {
            return Ok(None);
        };

        patch.apply_to(borehole);
        borehole.touch(now);
        borehole.validate()?;
        let updated = borehole.clone();
        project.touch(now);

        self.persist(&projects)?;
        info!(
            "event=borehole_update module=store status=ok project_id={} borehole_id={}",
            project_id, borehole_id
        );
        Ok(Some(updated))
    }

    /// Removes one borehole from its project.
    pub fn delete_borehole(
        &mut self,
        project_id: ProjectId,
        borehole_id: BoreholeId,
    ) -> StoreResult<bool> {
        let mut projects = self.load_for_write()?;
        let Some(project) = projects.iter_mut().find(|project| project.id == project_id) else {
            return Ok(false);
        };

        let before = project.boreholes.len();
        project
            .boreholes
            .retain(|borehole| borehole.id != borehole_id);
        if project.boreholes.len() == before {
            return Ok(false);
        }
        project.touch(now_epoch_ms());

        self.persist(&projects)?;
        info!(
            "event=borehole_delete module=store status=ok project_id={} borehole_id={}",
            project_id, borehole_id
        );
        Ok(true)
    }

    /// Writes a sample project when the collection key was never written.
    ///
    /// The sample is assembled in memory and stored with one write, so a
    /// failed seed leaves the key unwritten and the next call retries.
    /// Returns whether seeding happened.
    pub fn seed_defaults(&mut self) -> StoreResult<bool> {
        if self.is_initialized()? {
            return Ok(false);
        }

        let now = now_epoch_ms();
        let mut project = build_project(
            NewProject::named("Sample Site Investigation")
                .client("Example Client Ltd")
                .location("Auckland CBD"),
            Uuid::new_v4(),
            now,
        );
        for (latitude, longitude, ground_level) in SAMPLE_BOREHOLES {
            let input = NewBorehole {
                ground_level: Some(ground_level),
                ..NewBorehole::at(latitude, longitude)
            };
            let borehole =
                build_borehole(input, Uuid::new_v4(), now, || generate_borehole_code(&project));
            project.boreholes.push(borehole);
        }
        project.validate()?;
        self.persist(std::slice::from_ref(&project))?;

        info!(
            "event=store_seed module=store status=ok project_id={}",
            project.id
        );
        Ok(true)
    }

    /// Reads the collection for a read-modify-write cycle.
    ///
    /// Malformed data is replaced on the next write, but a blob from a newer
    /// schema version aborts the mutation.
    fn load_for_write(&self) -> StoreResult<Vec<Project>> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(Vec::new());
        };

        match decode_collection(&raw) {
            Ok(projects) => Ok(projects),
            Err(DecodeError::UnsupportedVersion {
                stored,
                latest_supported,
            }) => {
                error!(
                    "event=projects_write module=store status=error error_code=unsupported_version stored={} latest={}",
                    stored, latest_supported
                );
                Err(StoreError::UnsupportedSchemaVersion {
                    stored,
                    latest_supported,
                })
            }
            Err(err @ DecodeError::Malformed(_)) => {
                warn!(
                    "event=projects_write module=store status=degraded error_code=decode_failed error={}",
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    fn persist(&mut self, projects: &[Project]) -> StoreResult<()> {
        let encoded = encode_collection(projects)?;
        if let Err(err) = self.storage.write(&self.key, &encoded) {
            error!(
                "event=projects_write module=store status=error error_code=write_failed bytes={} error={}",
                encoded.len(),
                err
            );
            return Err(err.into());
        }
        Ok(())
    }
}

/// Returns the lowest unused `BH{NN}` code in `project`.
///
/// Numbers are zero-padded to two digits and grow past that width when
/// needed (`BH99` is followed by `BH100`). Gaps are reused before the
/// sequence is extended.
pub fn generate_borehole_code(project: &Project) -> String {
    let existing: HashSet<&str> = project
        .boreholes
        .iter()
        .map(|borehole| borehole.code.as_str())
        .collect();

    (1u64..)
        .map(format_borehole_code)
        .find(|candidate| !existing.contains(candidate.as_str()))
        .unwrap_or_else(|| format_borehole_code(u64::MAX))
}

fn format_borehole_code(number: u64) -> String {
    format!("{BOREHOLE_CODE_PREFIX}{number:02}")
}

fn has_code(project: &Project, code: &str) -> bool {
    project
        .boreholes
        .iter()
        .any(|borehole| borehole.code == code)
}
