//! Extrusion configuration.

use crate::error::{ExtrudeResult, check_tolerance};

/// Options shared by the top-surface and wall builders.
///
/// # Example
///
/// ```
/// use mesh_extrude::ExtrudeConfig;
///
/// let config = ExtrudeConfig::default()
///     .with_tolerance(1e-6)
///     .without_top()
///     .with_parallel(true);
///
/// assert!(!config.top);
/// assert!(config.walls);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudeConfig {
    /// Distance below which two boundary points count as the same point.
    /// Also the minimum triangle height kept by the triangulator.
    pub tolerance: f64,
    /// Whether [`extrude`](crate::extrude) builds the top cap.
    pub top: bool,
    /// Whether [`extrude`](crate::extrude) builds the side walls.
    pub walls: bool,
    /// Whether to process polygon parts on the rayon thread pool.
    ///
    /// Output is identical to the sequential path.
    pub parallel: bool,
}

impl Default for ExtrudeConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            top: true,
            walls: true,
            parallel: false,
        }
    }
}

impl ExtrudeConfig {
    /// Set the point-merging tolerance.
    ///
    /// The tolerance must be finite and non-negative. Other values are kept
    /// here and rejected by [`validate`](Self::validate) when a builder runs.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Skip the top cap.
    #[must_use]
    pub const fn without_top(mut self) -> Self {
        self.top = false;
        self
    }

    /// Skip the side walls.
    #[must_use]
    pub const fn without_walls(mut self) -> Self {
        self.walls = false;
        self
    }

    /// Enable or disable parallel processing of parts.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the options can be used by the builders.
    ///
    /// # Errors
    ///
    /// [`ExtrudeError::InvalidTolerance`](crate::ExtrudeError::InvalidTolerance)
    /// if `tolerance` is NaN, infinite or negative.
    pub fn validate(&self) -> ExtrudeResult<()> {
        check_tolerance(self.tolerance)
    }
}
