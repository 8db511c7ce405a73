//! Project domain model.
//!
//! # Responsibility
//! - Define the survey project record and its enumerated attributes.
//! - Provide the creation input and the whitelisted partial-update shape.
//!
//! # Invariants
//! - `id` and `created_at` are never changed after creation.
//! - `boreholes` keeps creation order and is only mutated through the store.
//! - `updated_at` is refreshed on every project or borehole mutation.

use crate::model::borehole::{Borehole, BoreholeId};
use crate::model::timestamp::next_stamp;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a survey project.
pub type ProjectId = Uuid;

/// Coordinate reference system for borehole positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Decimal degrees on the WGS 84 ellipsoid.
    #[default]
    #[serde(rename = "WGS84")]
    Wgs84,
}

impl CoordinateSystem {
    /// Returns the persisted/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wgs84 => "WGS84",
        }
    }
}

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Archived => "Archived",
        }
    }

    /// Parses a status label case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Survey project owning an ordered borehole sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
    #[serde(default)]
    pub coordinate_system: CoordinateSystem,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Creation order; new boreholes are appended.
    #[serde(default)]
    pub boreholes: Vec<Borehole>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Project {
    /// Validates the project and every owned borehole.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_fields()?;
        for borehole in &self.boreholes {
            borehole.validate()?;
        }
        Ok(())
    }

    /// Validates project-level fields only; owned boreholes are not inspected.
    pub fn validate_fields(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankProjectName);
        }
        Ok(())
    }

    pub fn borehole(&self, id: BoreholeId) -> Option<&Borehole> {
        self.boreholes.iter().find(|borehole| borehole.id == id)
    }

    pub(crate) fn borehole_mut(&mut self, id: BoreholeId) -> Option<&mut Borehole> {
        self.boreholes.iter_mut().find(|borehole| borehole.id == id)
    }

    /// Refreshes `updated_at`, keeping it strictly increasing.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = next_stamp(self.updated_at, now);
    }
}

/// Creation input for a project.
///
/// Missing optional fields are filled from the store's defaulting table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub client: Option<String>,
    pub location_description: Option<String>,
    pub coordinate_system: Option<CoordinateSystem>,
    pub status: Option<ProjectStatus>,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn location(mut self, location_description: impl Into<String>) -> Self {
        self.location_description = Some(location_description.into());
        self
    }
}

/// Partial update for a project.
///
/// Only client-settable fields exist here; `id`, `created_at` and
/// `boreholes` cannot be changed through this path. Nested `Option` fields
/// distinguish "leave unchanged" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub client: Option<Option<String>>,
    pub location_description: Option<Option<String>>,
    pub coordinate_system: Option<CoordinateSystem>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merges set fields into `project`. Does not touch `updated_at`.
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.trim().to_string();
        }
        if let Some(client) = &self.client {
            project.client = client.clone();
        }
        if let Some(location) = &self.location_description {
            project.location_description = location.clone();
        }
        if let Some(coordinate_system) = self.coordinate_system {
            project.coordinate_system = coordinate_system;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }
}
