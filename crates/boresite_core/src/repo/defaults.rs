//! Defaulting table for newly created records.
//!
//! Every optional creation field is coalesced here and nowhere else:
//!
//! | record   | field                  | default when absent          |
//! |----------|------------------------|------------------------------|
//! | project  | `status`               | `Active`                     |
//! | project  | `coordinate_system`    | `WGS84`                      |
//! | project  | `client`, `location_*` | `None` (blank input → `None`)|
//! | project  | `boreholes`            | empty                        |
//! | borehole | `code`                 | next free `BH{NN}`           |
//! | borehole | `status`               | `Planned`                    |
//! | borehole | `ground_level`         | `None`                       |
//! | borehole | `total_depth`          | `None`                       |
//! | borehole | `notes`                | `""`                         |
//! | borehole | `name`                 | `None` (blank input → `None`)|

use crate::model::borehole::{Borehole, BoreholeId, BoreholeStatus, NewBorehole};
use crate::model::project::{CoordinateSystem, NewProject, Project, ProjectId, ProjectStatus};

pub const DEFAULT_PROJECT_STATUS: ProjectStatus = ProjectStatus::Active;
pub const DEFAULT_COORDINATE_SYSTEM: CoordinateSystem = CoordinateSystem::Wgs84;
pub const DEFAULT_BOREHOLE_STATUS: BoreholeStatus = BoreholeStatus::Planned;
pub const DEFAULT_GROUND_LEVEL: Option<f64> = None;
pub const DEFAULT_TOTAL_DEPTH: Option<f64> = None;
pub const DEFAULT_BOREHOLE_NOTES: &str = "";

/// Materializes a project from creation input.
pub(crate) fn build_project(input: NewProject, id: ProjectId, now: i64) -> Project {
    Project {
        id,
        name: input.name.trim().to_string(),
        client: non_blank(input.client),
        location_description: non_blank(input.location_description),
        coordinate_system: input.coordinate_system.unwrap_or(DEFAULT_COORDINATE_SYSTEM),
        status: input.status.unwrap_or(DEFAULT_PROJECT_STATUS),
        boreholes: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// Materializes a borehole from placement input.
///
/// `generate_code` is only invoked when no usable code was supplied.
pub(crate) fn build_borehole(
    input: NewBorehole,
    id: BoreholeId,
    now: i64,
    generate_code: impl FnOnce() -> String,
) -> Borehole {
    let code = non_blank(input.code).unwrap_or_else(generate_code);
    Borehole {
        id,
        code,
        name: non_blank(input.name),
        notes: input
            .notes
            .unwrap_or_else(|| DEFAULT_BOREHOLE_NOTES.to_string()),
        latitude: input.latitude,
        longitude: input.longitude,
        ground_level: input.ground_level.or(DEFAULT_GROUND_LEVEL),
        total_depth: input.total_depth.or(DEFAULT_TOTAL_DEPTH),
        status: input.status.unwrap_or(DEFAULT_BOREHOLE_STATUS),
        created_at: now,
        updated_at: now,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
