//! Error types for extrusion operations.

use thiserror::Error;

/// Result type for extrusion operations.
pub type ExtrudeResult<T> = Result<T, ExtrudeError>;

/// Errors that can occur while building an extruded mesh.
///
/// `part` fields index into the constituent polygons of the input geometry
/// (always `0` for a single polygon).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtrudeError {
    /// Boundary has too few distinct points to enclose an area.
    #[error("polygon {part} needs at least {min} distinct points, got {actual}")]
    TooFewPoints {
        /// Index of the offending polygon.
        part: usize,
        /// Minimum required distinct points.
        min: usize,
        /// Distinct points found.
        actual: usize,
    },

    /// Boundary contains a NaN or infinite coordinate.
    #[error("polygon {part} has a non-finite coordinate at index {index}")]
    NonFiniteCoordinate {
        /// Index of the offending polygon.
        part: usize,
        /// Index of the point in the boundary.
        index: usize,
    },

    /// Ear clipping stalled, which only happens for self-intersecting rings.
    #[error("polygon {part} is self-intersecting: no ear among {remaining} remaining vertices")]
    SelfIntersecting {
        /// Index of the offending polygon.
        part: usize,
        /// Vertices left when clipping stalled.
        remaining: usize,
    },

    /// Triangulating a non-empty input produced no triangles at all.
    #[error("triangulation of {parts} polygon(s) produced no triangles")]
    EmptyTriangulation {
        /// Number of polygons in the input.
        parts: usize,
    },

    /// Extrusion height is NaN or infinite.
    #[error("extrusion height must be finite, got {0}")]
    NonFiniteHeight(f64),

    /// Point-merging tolerance is NaN, infinite or negative.
    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    /// Fragment would need vertex indices beyond `u32::MAX`.
    #[error("mesh fragment exceeds u32 index range with {vertices} vertices")]
    IndexOverflow {
        /// Vertex count that overflowed.
        vertices: usize,
    },
}

impl ExtrudeError {
    /// Whether this error describes malformed input geometry.
    ///
    /// Groups [`TooFewPoints`](Self::TooFewPoints),
    /// [`NonFiniteCoordinate`](Self::NonFiniteCoordinate),
    /// [`SelfIntersecting`](Self::SelfIntersecting) and
    /// [`EmptyTriangulation`](Self::EmptyTriangulation).
    #[must_use]
    pub const fn is_invalid_geometry(&self) -> bool {
        matches!(
            self,
            Self::TooFewPoints { .. }
                | Self::NonFiniteCoordinate { .. }
                | Self::SelfIntersecting { .. }
                | Self::EmptyTriangulation { .. }
        )
    }
}

/// Reject NaN and infinite heights.
pub(crate) fn check_height(z_top: f64) -> ExtrudeResult<()> {
    if z_top.is_finite() {
        Ok(())
    } else {
        Err(ExtrudeError::NonFiniteHeight(z_top))
    }
}

/// Reject NaN, infinite and negative tolerances.
pub(crate) fn check_tolerance(tolerance: f64) -> ExtrudeResult<()> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(())
    } else {
        Err(ExtrudeError::InvalidTolerance(tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_errors_are_grouped() {
        let too_few = ExtrudeError::TooFewPoints {
            part: 0,
            min: 3,
            actual: 2,
        };
        assert!(too_few.is_invalid_geometry());
        assert!(ExtrudeError::SelfIntersecting { part: 1, remaining: 4 }.is_invalid_geometry());
        assert!(!ExtrudeError::NonFiniteHeight(f64::NAN).is_invalid_geometry());
        assert!(!ExtrudeError::IndexOverflow { vertices: 0 }.is_invalid_geometry());
    }

    #[test]
    fn messages_name_the_part() {
        let err = ExtrudeError::TooFewPoints {
            part: 2,
            min: 3,
            actual: 1,
        };
        assert_eq!(err.to_string(), "polygon 2 needs at least 3 distinct points, got 1");
    }

    #[test]
    fn height_check() {
        assert!(check_height(0.0).is_ok());
        assert!(check_height(-4.5).is_ok());
        assert!(check_height(f64::INFINITY).is_err());
        assert!(matches!(
            check_height(f64::NAN),
            Err(ExtrudeError::NonFiniteHeight(h)) if h.is_nan()
        ));
    }

    #[test]
    fn tolerance_check() {
        assert!(check_tolerance(0.0).is_ok());
        assert!(check_tolerance(1e-6).is_ok());
        assert!(check_tolerance(-1e-9).is_err());
        assert!(check_tolerance(f64::INFINITY).is_err());
        assert!(matches!(
            check_tolerance(f64::NAN),
            Err(ExtrudeError::InvalidTolerance(t)) if t.is_nan()
        ));
        assert!(!ExtrudeError::InvalidTolerance(-1.0).is_invalid_geometry());
    }
}
