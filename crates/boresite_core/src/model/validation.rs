//! Field validation errors shared by project and borehole records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Valid latitude range in decimal degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Valid longitude range in decimal degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Record-level validation failure raised before any write.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Project name is empty after trim.
    BlankProjectName,
    /// Borehole code was set explicitly to an empty value.
    BlankBoreholeCode,
    /// Latitude is outside `[-90, 90]`.
    LatitudeOutOfRange(f64),
    /// Longitude is outside `[-180, 180]`.
    LongitudeOutOfRange(f64),
    /// Numeric field is NaN or infinite.
    NonFiniteValue { field: &'static str },
    /// `total_depth` is below zero.
    NegativeDepth(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankProjectName => write!(f, "project name must not be blank"),
            Self::BlankBoreholeCode => write!(f, "borehole code must not be blank"),
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} is outside [-180, 180]")
            }
            Self::NonFiniteValue { field } => write!(f, "{field} must be a finite number"),
            Self::NegativeDepth(value) => write!(f, "total_depth {value} must not be negative"),
        }
    }
}

impl Error for ValidationError {}

/// Checks a `(latitude, longitude)` pair supplied by the map surface.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if !latitude.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "latitude" });
    }
    if !longitude.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "longitude" });
    }
    if latitude < LATITUDE_RANGE.0 || latitude > LATITUDE_RANGE.1 {
        return Err(ValidationError::LatitudeOutOfRange(latitude));
    }
    if longitude < LONGITUDE_RANGE.0 || longitude > LONGITUDE_RANGE.1 {
        return Err(ValidationError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}

pub(crate) fn validate_optional_finite(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    match value {
        Some(number) if !number.is_finite() => Err(ValidationError::NonFiniteValue { field }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_coordinates, ValidationError};

    #[test]
    fn accepts_boundary_coordinates() {
        validate_coordinates(-90.0, 180.0).expect("boundaries are inclusive");
        validate_coordinates(-36.84, 174.76).expect("auckland is valid");
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert_eq!(
            validate_coordinates(91.0, 0.0),
            Err(ValidationError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            validate_coordinates(0.0, -180.5),
            Err(ValidationError::LongitudeOutOfRange(-180.5))
        );
        assert_eq!(
            validate_coordinates(f64::NAN, 0.0),
            Err(ValidationError::NonFiniteValue { field: "latitude" })
        );
    }
}
