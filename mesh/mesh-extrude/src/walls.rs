//! Side wall generation.

use nalgebra::Point3;
use tracing::debug;

use crate::config::ExtrudeConfig;
use crate::error::{ExtrudeResult, check_height};
use crate::extrude::map_parts;
use crate::fragment::MeshFragment;
use crate::polygon::{Polygon, PolygonParts};

/// Build the vertical skirt between `z = 0` and `z_top`.
///
/// Uses the default [`ExtrudeConfig`]. See [`build_walls_with`].
///
/// # Errors
///
/// See [`build_walls_with`].
///
/// # Example
///
/// ```
/// use mesh_extrude::{Polygon, build_walls};
///
/// let square = Polygon::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
/// let walls = build_walls(&square, 5.0).unwrap();
///
/// assert_eq!(walls.vertex_count(), 16);
/// assert_eq!(walls.triangle_count(), 8);
/// ```
pub fn build_walls<G>(geometry: &G, z_top: f64) -> ExtrudeResult<MeshFragment>
where
    G: PolygonParts + ?Sized,
{
    build_walls_with(geometry, z_top, &ExtrudeConfig::default())
}

/// Build the vertical skirt between `z = 0` and `z_top`.
///
/// For a part whose open ring has `n` points, edge `idx` joins point `idx`
/// to point `(idx + 1) % n` and contributes four fresh vertices
/// `[top1, top2, bot1, bot2]` and the triangles `(top1, top2, bot1)` and
/// `(top2, bot2, bot1)`. The ring is walked in the order given; it is not
/// reoriented, so the input winding decides which side the faces point to.
///
/// `n` is the length of [`Polygon::open_ring`], not the number of distinct
/// points: only an exactly repeated closing point is dropped, so a ring with
/// a repeated interior point still gets a (zero-area) quad for that edge.
///
/// # Errors
///
/// - [`ExtrudeError::NonFiniteHeight`](crate::ExtrudeError::NonFiniteHeight)
///   if `z_top` is NaN or infinite
/// - [`ExtrudeError::InvalidTolerance`](crate::ExtrudeError::InvalidTolerance)
///   if `config.tolerance` is NaN, infinite or negative
/// - [`ExtrudeError::TooFewPoints`](crate::ExtrudeError::TooFewPoints) if a
///   part has fewer than 3 distinct points
/// - [`ExtrudeError::NonFiniteCoordinate`](crate::ExtrudeError::NonFiniteCoordinate)
///   if a part has a NaN or infinite coordinate
pub fn build_walls_with<G>(
    geometry: &G,
    z_top: f64,
    config: &ExtrudeConfig,
) -> ExtrudeResult<MeshFragment>
where
    G: PolygonParts + ?Sized,
{
    check_height(z_top)?;
    config.validate()?;

    let parts = geometry.parts();
    let fragments = map_parts(parts, config.parallel, |part, polygon| {
        walls_for_polygon(part, polygon, z_top, config.tolerance)
    })?;
    let walls = MeshFragment::merge(fragments)?;

    debug!(
        parts = parts.len(),
        triangles = walls.triangle_count(),
        z_top,
        "built side walls"
    );
    Ok(walls)
}

fn walls_for_polygon(
    part: usize,
    polygon: &Polygon,
    z_top: f64,
    tolerance: f64,
) -> ExtrudeResult<MeshFragment> {
    polygon.validate(part, tolerance)?;

    let ring = polygon.open_ring();
    let n = ring.len();
    let mut fragment = MeshFragment::with_capacity(4 * n, 2 * n);
    for idx in 0..n {
        let p1 = ring[idx];
        let p2 = ring[(idx + 1) % n];
        fragment.push_wall_quad(
            Point3::new(p1.x, p1.y, z_top),
            Point3::new(p2.x, p2.y, z_top),
            Point3::new(p1.x, p1.y, 0.0),
            Point3::new(p2.x, p2.y, 0.0),
        )?;
    }
    Ok(fragment)
}
