//! Borehole domain model.
//!
//! # Responsibility
//! - Define the geolocated drilling record owned by a project.
//! - Provide the placement input and the partial-update shape.
//!
//! # Invariants
//! - `latitude`/`longitude` are always present and within range.
//! - `code` is unique per project only when generated; explicit codes are
//!   stored as given.

use crate::model::timestamp::next_stamp;
use crate::model::validation::{validate_coordinates, validate_optional_finite, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier unique within the owning project's borehole list.
pub type BoreholeId = Uuid;

/// Drilling lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoreholeStatus {
    #[default]
    Planned,
    Drilling,
    Completed,
    Abandoned,
}

impl BoreholeStatus {
    pub const ALL: [BoreholeStatus; 4] = [
        Self::Planned,
        Self::Drilling,
        Self::Completed,
        Self::Abandoned,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Drilling => "Drilling",
            Self::Completed => "Completed",
            Self::Abandoned => "Abandoned",
        }
    }

    /// Parses a status label case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(normalized))
    }
}

/// Single drilling record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borehole {
    pub id: BoreholeId,
    /// Short display identifier, e.g. `BH01`.
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters; `None` when not surveyed yet.
    #[serde(default)]
    pub ground_level: Option<f64>,
    /// Meters below ground level.
    #[serde(default)]
    pub total_depth: Option<f64>,
    #[serde(default)]
    pub status: BoreholeStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Borehole {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::BlankBoreholeCode);
        }
        validate_coordinates(self.latitude, self.longitude)?;
        validate_optional_finite("ground_level", self.ground_level)?;
        validate_optional_finite("total_depth", self.total_depth)?;
        if let Some(depth) = self.total_depth {
            if depth < 0.0 {
                return Err(ValidationError::NegativeDepth(depth));
            }
        }
        Ok(())
    }

    /// Refreshes `updated_at`, keeping it strictly increasing.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = next_stamp(self.updated_at, now);
    }
}

/// Placement input for a new borehole.
///
/// Only the coordinates are required; everything else falls back to the
/// store's defaulting table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBorehole {
    pub latitude: f64,
    pub longitude: f64,
    pub code: Option<String>,
    pub name: Option<String>,
    pub notes: Option<String>,
    pub ground_level: Option<f64>,
    pub total_depth: Option<f64>,
    pub status: Option<BoreholeStatus>,
}

impl NewBorehole {
    /// Builds placement input from a map click.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Self::default()
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Partial update for a borehole; `id` and `created_at` are not settable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoreholePatch {
    pub code: Option<String>,
    pub name: Option<Option<String>>,
    pub notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ground_level: Option<Option<f64>>,
    pub total_depth: Option<Option<f64>>,
    pub status: Option<BoreholeStatus>,
}

impl BoreholePatch {
    pub fn status(status: BoreholeStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Moves the borehole to a new map position.
    pub fn position(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// Merges set fields into `borehole`. Does not touch `updated_at`.
    pub fn apply_to(&self, borehole: &mut Borehole) {
        if let Some(code) = &self.code {
            borehole.code = code.trim().to_string();
        }
        if let Some(name) = &self.name {
            borehole.name = name.clone();
        }
        if let Some(notes) = &self.notes {
            borehole.notes = notes.clone();
        }
        if let Some(latitude) = self.latitude {
            borehole.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            borehole.longitude = longitude;
        }
        if let Some(ground_level) = self.ground_level {
            borehole.ground_level = ground_level;
        }
        if let Some(total_depth) = self.total_depth {
            borehole.total_depth = total_depth;
        }
        if let Some(status) = self.status {
            borehole.status = status;
        }
    }
}
