//! Planar footprint types.
//!
//! Polygons are described by their exterior boundary only. Coordinates are
//! expected to be in a planar projection already; nothing here reprojects.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ExtrudeError, ExtrudeResult};

/// A simple polygon given by its exterior boundary.
///
/// The ring may be open or closed: a trailing point equal to the first one is
/// ignored by every operation in this crate.
///
/// # Example
///
/// ```
/// use mesh_extrude::Polygon;
///
/// let square = Polygon::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]);
/// assert_eq!(square.open_ring().len(), 4);
/// assert!((square.area() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    exterior: Vec<Point2<f64>>,
}

impl Polygon {
    /// Create a polygon from its boundary points.
    #[must_use]
    pub const fn new(exterior: Vec<Point2<f64>>) -> Self {
        Self { exterior }
    }

    /// Create a polygon from `[x, y]` pairs.
    #[must_use]
    pub fn from_coords(coords: &[[f64; 2]]) -> Self {
        Self::new(coords.iter().map(|&[x, y]| Point2::new(x, y)).collect())
    }

    /// The boundary exactly as supplied.
    #[must_use]
    pub fn exterior(&self) -> &[Point2<f64>] {
        &self.exterior
    }

    /// The boundary without its closing duplicate.
    ///
    /// Only an exact repeat of the first point is stripped, so each boundary
    /// vertex appears once.
    #[must_use]
    pub fn open_ring(&self) -> &[Point2<f64>] {
        match self.exterior.as_slice() {
            [first, .., last] if first == last => &self.exterior[..self.exterior.len() - 1],
            ring => ring,
        }
    }

    /// Signed shoelace area. Positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(self.open_ring())
    }

    /// Unsigned enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the boundary runs counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Count distinct boundary points, stopping once `cap` have been seen.
    ///
    /// Two points closer than `tolerance` count as one.
    #[must_use]
    pub fn distinct_points(&self, tolerance: f64, cap: usize) -> usize {
        let mut seen: Vec<Point2<f64>> = Vec::with_capacity(cap);
        for p in self.open_ring() {
            if seen.len() >= cap {
                break;
            }
            if seen.iter().all(|q| (*p - *q).norm() > tolerance) {
                seen.push(*p);
            }
        }
        seen.len()
    }

    /// Check that every coordinate is finite and at least three points are
    /// distinct.
    pub(crate) fn validate(&self, part: usize, tolerance: f64) -> ExtrudeResult<()> {
        if let Some(index) = self
            .exterior
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(ExtrudeError::NonFiniteCoordinate { part, index });
        }

        let distinct = self.distinct_points(tolerance, 3);
        if distinct < 3 {
            return Err(ExtrudeError::TooFewPoints {
                part,
                min: 3,
                actual: distinct,
            });
        }
        Ok(())
    }
}

impl From<Vec<Point2<f64>>> for Polygon {
    fn from(exterior: Vec<Point2<f64>>) -> Self {
        Self::new(exterior)
    }
}

/// A collection of independent polygons.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Create a multipolygon from its parts.
    #[must_use]
    pub const fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Whether there are no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Iterate over the parts.
    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    /// Total area of all parts.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }
}

impl FromIterator<Polygon> for MultiPolygon {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MultiPolygon {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Either a single polygon or a multipolygon.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geometry {
    /// One polygon.
    Polygon(Polygon),
    /// Several independent polygons.
    MultiPolygon(MultiPolygon),
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(multi: MultiPolygon) -> Self {
        Self::MultiPolygon(multi)
    }
}

/// Access to the constituent polygons of a footprint.
///
/// Implement this for foreign geometry types to feed them to the builders
/// without converting to [`Geometry`] first.
pub trait PolygonParts {
    /// The polygons to extrude, in output order.
    fn parts(&self) -> &[Polygon];
}

impl PolygonParts for Polygon {
    fn parts(&self) -> &[Polygon] {
        std::slice::from_ref(self)
    }
}

impl PolygonParts for MultiPolygon {
    fn parts(&self) -> &[Polygon] {
        &self.polygons
    }
}

impl PolygonParts for Geometry {
    fn parts(&self) -> &[Polygon] {
        match self {
            Self::Polygon(p) => p.parts(),
            Self::MultiPolygon(m) => m.parts(),
        }
    }
}

impl PolygonParts for [Polygon] {
    fn parts(&self) -> &[Polygon] {
        self
    }
}

/// Shoelace area of an open ring, taken relative to its first point so large
/// projected coordinates keep their precision.
pub(crate) fn signed_area(ring: &[Point2<f64>]) -> f64 {
    let [origin, rest @ ..] = ring else {
        return 0.0;
    };
    let twice: f64 = rest
        .windows(2)
        .map(|w| {
            let a = w[0] - origin;
            let b = w[1] - origin;
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice * 0.5
}
