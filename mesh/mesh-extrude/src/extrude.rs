//! Combined extrusion: top cap and side walls in one call.

use rayon::prelude::*;

use crate::config::ExtrudeConfig;
use crate::error::{ExtrudeResult, check_height};
use crate::fragment::MeshFragment;
use crate::polygon::{Polygon, PolygonParts};
use crate::top::triangulate_top_with;
use crate::walls::build_walls_with;

/// The two surfaces of an extruded footprint.
///
/// Kept apart so renderers can draw them as separate passes; use
/// [`ExtrudedSolid::merged`] for a single fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtrudedSolid {
    /// Triangulated cap at `z_top`.
    pub top: MeshFragment,
    /// Vertical skirt from `z = 0` to `z_top`.
    pub walls: MeshFragment,
}

impl ExtrudedSolid {
    /// Total triangles across both surfaces.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.top.triangle_count() + self.walls.triangle_count()
    }

    /// Concatenate the top cap and then the walls into one fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ExtrudeError::IndexOverflow`](crate::ExtrudeError::IndexOverflow)
    /// if the combined fragment is too large for `u32` indices.
    pub fn merged(self) -> ExtrudeResult<MeshFragment> {
        MeshFragment::merge([self.top, self.walls])
    }
}

/// Extrude a footprint from `z = 0` up to `z_top`.
///
/// Builds whichever surfaces `config` enables. With `config.parallel` the cap
/// and walls are built concurrently; the result is the same either way.
///
/// # Errors
///
/// Any error from [`triangulate_top_with`] or [`build_walls_with`].
///
/// # Example
///
/// ```
/// use mesh_extrude::{ExtrudeConfig, Polygon, extrude};
///
/// let square = Polygon::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
/// let solid = extrude(&square, 5.0, &ExtrudeConfig::default()).unwrap();
///
/// assert_eq!(solid.top.triangle_count(), 2);
/// assert_eq!(solid.walls.triangle_count(), 8);
///
/// let mesh = solid.merged().unwrap();
/// assert_eq!(mesh.vertex_count(), 6 + 16);
/// ```
pub fn extrude<G>(geometry: &G, z_top: f64, config: &ExtrudeConfig) -> ExtrudeResult<ExtrudedSolid>
where
    G: PolygonParts + Sync + ?Sized,
{
    check_height(z_top)?;
    config.validate()?;

    let build_top = || -> ExtrudeResult<MeshFragment> {
        if config.top {
            triangulate_top_with(geometry, z_top, config)
        } else {
            Ok(MeshFragment::new())
        }
    };
    let build_sides = || -> ExtrudeResult<MeshFragment> {
        if config.walls {
            build_walls_with(geometry, z_top, config)
        } else {
            Ok(MeshFragment::new())
        }
    };

    let (top, walls) = if config.parallel {
        rayon::join(build_top, build_sides)
    } else {
        (build_top(), build_sides())
    };

    Ok(ExtrudedSolid {
        top: top?,
        walls: walls?,
    })
}

/// Run `f` on every part, keeping input order in the output.
///
/// With `parallel` set, parts are spread over the rayon pool. If several
/// parts fail, which error is reported is unspecified.
pub(crate) fn map_parts<F>(
    parts: &[Polygon],
    parallel: bool,
    f: F,
) -> ExtrudeResult<Vec<MeshFragment>>
where
    F: Fn(usize, &Polygon) -> ExtrudeResult<MeshFragment> + Sync + Send,
{
    if parallel && parts.len() > 1 {
        parts
            .par_iter()
            .enumerate()
            .map(|(part, polygon)| f(part, polygon))
            .collect()
    } else {
        parts
            .iter()
            .enumerate()
            .map(|(part, polygon)| f(part, polygon))
            .collect()
    }
}
