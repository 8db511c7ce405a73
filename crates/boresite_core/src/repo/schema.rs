//! Versioned envelope and migration registry for the persisted collection.
//!
//! # Responsibility
//! - Encode the collection as `{"version": N, "projects": [...]}`.
//! - Upgrade older persisted shapes in strictly increasing version order.
//!
//! # Invariants
//! - The unversioned legacy shape (a bare JSON array) is version 0.
//! - A blob newer than `latest_version()` is reported, never rewritten.

use crate::model::project::Project;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    upgrade: fn(Value) -> Result<Value, String>,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    upgrade: wrap_legacy_array,
}];

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    projects: &'a [Project],
}

#[derive(Deserialize)]
struct Envelope {
    projects: Vec<Project>,
}

/// Why a persisted blob could not be decoded.
#[derive(Debug)]
pub enum DecodeError {
    /// Not JSON, or JSON of the wrong shape.
    Malformed(String),
    /// Written by a newer binary.
    UnsupportedVersion { stored: u32, latest_supported: u32 },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(details) => write!(f, "malformed project collection: {details}"),
            Self::UnsupportedVersion {
                stored,
                latest_supported,
            } => write!(
                f,
                "project collection version {stored} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DecodeError {}

/// Returns the envelope version written by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Serializes the collection in the current envelope format.
pub fn encode_collection(projects: &[Project]) -> serde_json::Result<String> {
    serde_json::to_string(&EnvelopeRef {
        version: latest_version(),
        projects,
    })
}

/// Parses a persisted blob, applying pending migrations first.
pub fn decode_collection(raw: &str) -> Result<Vec<Project>, DecodeError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| DecodeError::Malformed(err.to_string()))?;
    let stored = stored_version(&value)?;
    let latest = latest_version();

    if stored > latest {
        return Err(DecodeError::UnsupportedVersion {
            stored,
            latest_supported: latest,
        });
    }

    let mut value = value;
    for migration in MIGRATIONS {
        if migration.version <= stored {
            continue;
        }
        value = (migration.upgrade)(value).map_err(DecodeError::Malformed)?;
    }

    let envelope: Envelope =
        serde_json::from_value(value).map_err(|err| DecodeError::Malformed(err.to_string()))?;
    Ok(envelope.projects)
}

fn stored_version(value: &Value) -> Result<u32, DecodeError> {
    match value {
        Value::Array(_) => Ok(0),
        Value::Object(map) => map
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|version| u32::try_from(version).ok())
            .ok_or_else(|| DecodeError::Malformed("missing or invalid `version`".to_string())),
        _ => Err(DecodeError::Malformed(
            "expected an array or a versioned object".to_string(),
        )),
    }
}

fn wrap_legacy_array(value: Value) -> Result<Value, String> {
    match value {
        Value::Array(projects) => Ok(json!({ "version": 1, "projects": projects })),
        other => Err(format!("legacy collection must be an array, got {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, encode_collection, latest_version, DecodeError};

    #[test]
    fn empty_collection_encodes_with_version_tag() {
        let encoded = encode_collection(&[]).unwrap();
        assert_eq!(encoded, format!(r#"{{"version":{},"projects":[]}}"#, latest_version()));
        assert!(decode_collection(&encoded).unwrap().is_empty());
    }

    #[test]
    fn legacy_bare_array_is_migrated() {
        let raw = r#"[{"id":"1b4e28ba-2fa1-4d3b-a3f5-ef19b5a7633b","name":"Legacy",
            "client":"","locationDescription":"","coordinateSystem":"WGS84",
            "status":"Active","boreholes":[],"createdAt":1,"updatedAt":2}]"#;
        let projects = decode_collection(raw).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Legacy");
    }

    #[test]
    fn newer_version_is_reported() {
        let err = decode_collection(r#"{"version":99,"projects":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedVersion { stored: 99, .. }
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        for raw in ["not json", "42", r#"{"projects":[]}"#, r#"{"version":1}"#] {
            let err = decode_collection(raw).unwrap_err();
            assert!(matches!(err, DecodeError::Malformed(_)), "raw `{raw}`");
        }
    }
}
