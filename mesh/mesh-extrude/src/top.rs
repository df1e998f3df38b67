//! Top cap generation.

use nalgebra::Point3;
use tracing::debug;

use crate::config::ExtrudeConfig;
use crate::error::{ExtrudeError, ExtrudeResult, check_height};
use crate::extrude::map_parts;
use crate::fragment::MeshFragment;
use crate::polygon::{Polygon, PolygonParts};
use crate::triangulate::ear_clip;

/// Triangulate a footprint and lift it to `z_top`.
///
/// Uses the default [`ExtrudeConfig`]. See [`triangulate_top_with`].
///
/// # Errors
///
/// See [`triangulate_top_with`].
///
/// # Example
///
/// ```
/// use mesh_extrude::{Polygon, triangulate_top};
///
/// let square = Polygon::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
/// let top = triangulate_top(&square, 5.0).unwrap();
///
/// assert_eq!(top.triangle_count(), 2);
/// assert!(top.vertices.iter().all(|v| v.z == 5.0));
/// assert!((top.projected_area() - 1.0).abs() < 1e-12);
/// ```
pub fn triangulate_top<G>(geometry: &G, z_top: f64) -> ExtrudeResult<MeshFragment>
where
    G: PolygonParts + ?Sized,
{
    triangulate_top_with(geometry, z_top, &ExtrudeConfig::default())
}

/// Triangulate a footprint and lift it to `z_top`.
///
/// Every triangle gets three fresh vertices at exactly `z_top`, wound
/// counter-clockwise when viewed from +Z. Parts are emitted in input order.
/// Zero-area ears are dropped without failing the call.
///
/// # Errors
///
/// - [`ExtrudeError::NonFiniteHeight`] if `z_top` is NaN or infinite
/// - [`ExtrudeError::InvalidTolerance`] if `config.tolerance` is NaN,
///   infinite or negative
/// - [`ExtrudeError::TooFewPoints`] / [`ExtrudeError::NonFiniteCoordinate`]
///   for a malformed part
/// - [`ExtrudeError::SelfIntersecting`] if a part cannot be ear-clipped
/// - [`ExtrudeError::EmptyTriangulation`] if a non-empty footprint yields no
///   triangles at all
pub fn triangulate_top_with<G>(
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
        top_for_polygon(part, polygon, z_top, config.tolerance)
    })?;
    let top = MeshFragment::merge(fragments)?;

    if !parts.is_empty() && top.is_empty() {
        return Err(ExtrudeError::EmptyTriangulation { parts: parts.len() });
    }

    debug!(
        parts = parts.len(),
        triangles = top.triangle_count(),
        z_top,
        "triangulated top surface"
    );
    Ok(top)
}

fn top_for_polygon(
    part: usize,
    polygon: &Polygon,
    z_top: f64,
    tolerance: f64,
) -> ExtrudeResult<MeshFragment> {
    polygon.validate(part, tolerance)?;
    let triangulation = ear_clip(polygon.open_ring(), part, tolerance)?;

    let count = triangulation.triangles.len();
    let mut fragment = MeshFragment::with_capacity(3 * count, count);
    for [a, b, c] in triangulation.triangles {
        fragment.push_triangle(
            Point3::new(a.x, a.y, z_top),
            Point3::new(b.x, b.y, z_top),
            Point3::new(c.x, c.y, z_top),
        )?;
    }
    Ok(fragment)
}
