//! Ear-clipping triangulation of simple polygons.
//!
//! Unlike a whole-plane Delaunay pass, ear clipping only ever emits triangles
//! inside the ring, so concave footprints keep their notches.

use nalgebra::Point2;
use tracing::debug;

use crate::error::{ExtrudeError, ExtrudeResult, check_tolerance};
use crate::polygon::{Polygon, signed_area};

/// Triangles covering a polygon's interior.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    /// Triangle corners, counter-clockwise when viewed from +Z.
    pub triangles: Vec<[Point2<f64>; 3]>,
    /// Zero-area ears that were dropped instead of emitted.
    pub skipped: usize,
}

impl Triangulation {
    /// Sum of triangle areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| cross(a, b, c).abs() * 0.5)
            .sum()
    }
}

/// Triangulate a single polygon.
///
/// Consecutive points closer than `tolerance` are merged, the ring is
/// reoriented counter-clockwise, and ears whose height falls below
/// `tolerance` are dropped and counted in [`Triangulation::skipped`].
///
/// # Errors
///
/// - [`ExtrudeError::InvalidTolerance`] if `tolerance` is NaN, infinite or
///   negative
/// - [`ExtrudeError::TooFewPoints`] if fewer than 3 points survive merging
/// - [`ExtrudeError::SelfIntersecting`] if no ear can be found
///
/// # Example
///
/// ```
/// use mesh_extrude::{Polygon, triangulate_polygon};
///
/// // L-shape: a convex-hull triangulation would cover the notch.
/// let l_shape = Polygon::from_coords(&[
///     [0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 2.0], [0.0, 2.0],
/// ]);
///
/// let tri = triangulate_polygon(&l_shape, 1e-9).unwrap();
/// assert_eq!(tri.triangles.len(), 4);
/// assert!((tri.area() - 3.0).abs() < 1e-12);
/// ```
pub fn triangulate_polygon(polygon: &Polygon, tolerance: f64) -> ExtrudeResult<Triangulation> {
    check_tolerance(tolerance)?;
    ear_clip(polygon.open_ring(), 0, tolerance)
}

pub(crate) fn ear_clip(
    ring: &[Point2<f64>],
    part: usize,
    tolerance: f64,
) -> ExtrudeResult<Triangulation> {
    let mut pts = merge_close_points(ring, tolerance);
    if pts.len() < 3 {
        return Err(ExtrudeError::TooFewPoints {
            part,
            min: 3,
            actual: pts.len(),
        });
    }
    if signed_area(&pts) < 0.0 {
        pts.reverse();
    }

    let mut remaining: Vec<usize> = (0..pts.len()).collect();
    let mut out = Triangulation {
        triangles: Vec::with_capacity(pts.len() - 2),
        skipped: 0,
    };

    let mut cursor = 0;
    let mut misses = 0;
    while remaining.len() > 3 {
        let m = remaining.len();
        if misses >= m {
            return Err(ExtrudeError::SelfIntersecting { part, remaining: m });
        }

        let i = cursor % m;
        let prev = remaining[(i + m - 1) % m];
        let curr = remaining[i];
        let next = remaining[(i + 1) % m];
        let (a, b, c) = (pts[prev], pts[curr], pts[next]);

        if is_degenerate(a, b, c, tolerance) {
            out.skipped += 1;
        } else if cross(a, b, c) > 0.0
            && !contains_other(&pts, &remaining, [prev, curr, next], tolerance)
        {
            out.triangles.push([a, b, c]);
        } else {
            cursor = i + 1;
            misses += 1;
            continue;
        }

        remaining.remove(i);
        cursor = i;
        misses = 0;
    }

    let (a, b, c) = (pts[remaining[0]], pts[remaining[1]], pts[remaining[2]]);
    if is_degenerate(a, b, c, tolerance) {
        out.skipped += 1;
    } else {
        out.triangles.push([a, b, c]);
    }

    if out.skipped > 0 {
        debug!(part, skipped = out.skipped, "dropped degenerate ears");
    }
    Ok(out)
}

/// Drop consecutive points (including across the wrap) closer than `tolerance`.
fn merge_close_points(ring: &[Point2<f64>], tolerance: f64) -> Vec<Point2<f64>> {
    let mut pts: Vec<Point2<f64>> = Vec::with_capacity(ring.len());
    for &p in ring {
        if pts.last().is_none_or(|&q| (p - q).norm() > tolerance) {
            pts.push(p);
        }
    }
    while let [first, .., last] = pts.as_slice() {
        if (*first - *last).norm() > tolerance {
            break;
        }
        pts.pop();
    }
    pts
}

/// Twice the signed area of `abc`; positive when counter-clockwise.
fn cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// A triangle is degenerate when its height over the longest side is below
/// `tolerance`.
fn is_degenerate(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, tolerance: f64) -> bool {
    let longest = (b - a).norm().max((c - b).norm()).max((a - c).norm());
    longest <= tolerance || cross(a, b, c).abs() <= tolerance * longest
}

/// Whether any remaining vertex other than the ear's corners lies in the ear.
///
/// Vertices coincident with a corner are ignored so rings that touch
/// themselves at a point can still be clipped.
fn contains_other(
    pts: &[Point2<f64>],
    remaining: &[usize],
    ear: [usize; 3],
    tolerance: f64,
) -> bool {
    let [a, b, c] = ear.map(|i| pts[i]);
    remaining
        .iter()
        .copied()
        .filter(|idx| !ear.contains(idx))
        .any(|idx| {
            let p = pts[idx];
            let coincident = [a, b, c].iter().any(|&q| (p - q).norm() <= tolerance);
            !coincident && point_in_triangle(p, a, b, c)
        })
}

/// Inclusive point-in-triangle test by edge signs.
fn point_in_triangle(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    fn ring(coords: &[[f64; 2]]) -> Vec<Point2<f64>> {
        coords.iter().map(|&[x, y]| Point2::new(x, y)).collect()
    }

    fn all_ccw(tri: &Triangulation) -> bool {
        tri.triangles.iter().all(|&[a, b, c]| cross(a, b, c) > 0.0)
    }

    #[test]
    fn triangle_passes_through() {
        let tri = ear_clip(&ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]), 0, TOL).unwrap();
        assert_eq!(tri.triangles.len(), 1);
        assert_eq!(tri.skipped, 0);
        assert_relative_eq!(tri.area(), 0.5);
    }

    #[test]
    fn square_gives_two_triangles() {
        let square = ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let tri = ear_clip(&square, 0, TOL).unwrap();
        assert_eq!(tri.triangles.len(), 2);
        assert_relative_eq!(tri.area(), 1.0);
        assert!(all_ccw(&tri));
    }

    #[test]
    fn clockwise_ring_is_reoriented() {
        let clockwise = ring(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);
        let tri = ear_clip(&clockwise, 0, TOL).unwrap();
        assert_relative_eq!(tri.area(), 1.0);
        assert!(all_ccw(&tri));
    }

    #[test]
    fn concave_notch_stays_empty() {
        // U-shape opening upward; the notch is the square [1,2]x[1,3].
        let u = ring(&[
            [0.0, 0.0],
            [3.0, 0.0],
            [3.0, 3.0],
            [2.0, 3.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 3.0],
            [0.0, 3.0],
        ]);
        let tri = ear_clip(&u, 0, TOL).unwrap();
        assert_eq!(tri.triangles.len(), 6);
        assert_relative_eq!(tri.area(), 7.0, epsilon = 1e-12);

        let notch = Point2::new(1.5, 2.0);
        assert!(
            tri.triangles
                .iter()
                .all(|&[a, b, c]| !point_in_triangle(notch, a, b, c))
        );
    }

    #[test]
    fn collinear_vertex_is_skipped() {
        // Midpoint on the bottom edge adds no area.
        let tri = ear_clip(
            &ring(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]),
            0,
            TOL,
        )
        .unwrap();
        assert_relative_eq!(tri.area(), 4.0);
        assert_eq!(tri.triangles.len() + tri.skipped, 3);
    }

    #[test]
    fn all_collinear_yields_nothing() {
        let tri = ear_clip(&ring(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]), 0, TOL).unwrap();
        assert!(tri.triangles.is_empty());
        assert_eq!(tri.skipped, 1);
    }

    #[test]
    fn duplicate_points_are_merged() {
        let tri = ear_clip(
            &ring(&[[0.0, 0.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1.0, 1.0], [0.0, 0.0]]),
            0,
            TOL,
        )
        .unwrap();
        assert_eq!(tri.triangles.len(), 1);
        assert_relative_eq!(tri.area(), 0.5);
    }

    #[test]
    fn too_few_points_after_merge() {
        let err = ear_clip(&ring(&[[0.0, 0.0], [1.0, 1.0], [1.0, 1.0]]), 3, TOL).unwrap_err();
        assert_eq!(
            err,
            ExtrudeError::TooFewPoints {
                part: 3,
                min: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn self_intersecting_ring_stalls() {
        let tangled = ring(&[[4.0, 1.0], [4.0, 4.0], [1.0, 3.0], [0.0, 3.0], [2.0, 4.0]]);
        assert_eq!(
            ear_clip(&tangled, 2, TOL),
            Err(ExtrudeError::SelfIntersecting {
                part: 2,
                remaining: 4
            })
        );
    }

    #[test]
    fn public_entry_uses_open_ring() {
        let square =
            Polygon::from_coords(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]);
        let tri = triangulate_polygon(&square, TOL).unwrap();
        assert_eq!(tri.triangles.len(), 2);
        assert_relative_eq!(tri.area(), 16.0);
    }

    #[test]
    fn public_entry_rejects_nan_tolerance() {
        let square = Polygon::from_coords(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
        assert!(matches!(
            triangulate_polygon(&square, f64::NAN),
            Err(ExtrudeError::InvalidTolerance(t)) if t.is_nan()
        ));
    }
}
