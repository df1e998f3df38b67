//! Mesh fragments and their vertex arena.
//!
//! A fragment never shares vertices between triangles. Every triangle or wall
//! quad claims a fresh contiguous block of vertex slots, which keeps flat
//! shading crisp and makes fragments trivially concatenable.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ExtrudeError, ExtrudeResult};

/// A partial triangle surface: vertices plus index triples into them.
///
/// # Example
///
/// ```
/// use mesh_extrude::MeshFragment;
/// use nalgebra::Point3;
///
/// let mut fragment = MeshFragment::new();
/// fragment
///     .push_triangle(
///         Point3::new(0.0, 0.0, 1.0),
///         Point3::new(1.0, 0.0, 1.0),
///         Point3::new(0.0, 1.0, 1.0),
///     )
///     .unwrap();
///
/// assert_eq!(fragment.vertex_count(), 3);
/// assert_eq!(fragment.triangles, vec![[0, 1, 2]]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshFragment {
    /// Vertex positions, never deduplicated.
    pub vertices: Vec<Point3<f64>>,
    /// Triangles as indices into `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

impl MeshFragment {
    /// Create an empty fragment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create an empty fragment with room for the given counts.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the fragment holds no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append a block of fresh vertices and return the index of the first.
    ///
    /// # Errors
    ///
    /// Returns [`ExtrudeError::IndexOverflow`] if the block would not be
    /// addressable with `u32` indices.
    pub fn alloc_block<const N: usize>(&mut self, corners: [Point3<f64>; N]) -> ExtrudeResult<u32> {
        let base = self.vertices.len();
        let end = base + N;
        if u32::try_from(end).is_err() {
            return Err(ExtrudeError::IndexOverflow { vertices: end });
        }
        self.vertices.extend(corners);
        u32::try_from(base).map_err(|_| ExtrudeError::IndexOverflow { vertices: end })
    }

    /// Append one triangle with three fresh vertices.
    ///
    /// # Errors
    ///
    /// Returns [`ExtrudeError::IndexOverflow`] if the fragment is full.
    pub fn push_triangle(
        &mut self,
        a: Point3<f64>,
        b: Point3<f64>,
        c: Point3<f64>,
    ) -> ExtrudeResult<()> {
        let base = self.alloc_block([a, b, c])?;
        self.triangles.push([base, base + 1, base + 2]);
        Ok(())
    }

    /// Append one vertical wall quad as two triangles.
    ///
    /// Vertices are stored as `[top1, top2, bot1, bot2]` and the triangles are
    /// `(top1, top2, bot1)` and `(top2, bot2, bot1)`. This winding fixes the
    /// face normals and must not be reordered.
    ///
    /// # Errors
    ///
    /// Returns [`ExtrudeError::IndexOverflow`] if the fragment is full.
    pub fn push_wall_quad(
        &mut self,
        top1: Point3<f64>,
        top2: Point3<f64>,
        bot1: Point3<f64>,
        bot2: Point3<f64>,
    ) -> ExtrudeResult<()> {
        let base = self.alloc_block([top1, top2, bot1, bot2])?;
        self.triangles.push([base, base + 1, base + 2]);
        self.triangles.push([base + 1, base + 3, base + 2]);
        Ok(())
    }

    /// Append another fragment, shifting its indices past this one's vertices.
    ///
    /// # Errors
    ///
    /// Returns [`ExtrudeError::IndexOverflow`] if the combined fragment would
    /// not be addressable with `u32` indices.
    pub fn append(&mut self, other: Self) -> ExtrudeResult<()> {
        let total = self.vertices.len() + other.vertices.len();
        if u32::try_from(total).is_err() {
            return Err(ExtrudeError::IndexOverflow { vertices: total });
        }
        let offset = u32::try_from(self.vertices.len())
            .map_err(|_| ExtrudeError::IndexOverflow { vertices: total })?;

        self.vertices.extend(other.vertices);
        self.triangles.extend(
            other
                .triangles
                .into_iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
        Ok(())
    }

    /// Concatenate fragments in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtrudeError::IndexOverflow`] if the result would be too large.
    pub fn merge<I>(fragments: I) -> ExtrudeResult<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut merged = Self::new();
        for fragment in fragments {
            merged.append(fragment)?;
        }
        Ok(merged)
    }

    fn resolve(&self, [a, b, c]: [u32; 3]) -> Option<[Point3<f64>; 3]> {
        let get = |i: u32| self.vertices.get(usize::try_from(i).ok()?).copied();
        Some([get(a)?, get(b)?, get(c)?])
    }

    /// Corner positions of a triangle, or `None` if out of range.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<[Point3<f64>; 3]> {
        self.triangles.get(index).and_then(|&face| self.resolve(face))
    }

    /// Iterate over triangles with resolved corner positions.
    pub fn triangles_iter(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.triangles.iter().filter_map(|&face| self.resolve(face))
    }

    /// Unit normal of a triangle by the right-hand rule.
    ///
    /// Returns `None` for an out-of-range index or a zero-area triangle.
    #[must_use]
    pub fn face_normal(&self, index: usize) -> Option<Vector3<f64>> {
        let [a, b, c] = self.triangle(index)?;
        (b - a).cross(&(c - a)).try_normalize(f64::EPSILON)
    }

    /// Total area of all triangles projected onto the XY plane.
    #[must_use]
    pub fn projected_area(&self) -> f64 {
        self.triangles_iter()
            .map(|[a, b, c]| {
                let cross = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
                cross.abs() * 0.5
            })
            .sum()
    }

    /// Lowest and highest vertex z, or `None` when there are no vertices.
    #[must_use]
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.vertices.iter().fold(None, |acc, v| match acc {
            None => Some((v.z, v.z)),
            Some((lo, hi)) => Some((lo.min(v.z), hi.max(v.z))),
        })
    }

    /// Split into parallel coordinate and index arrays.
    #[must_use]
    pub fn to_flat(&self) -> FlatMesh {
        let mut flat = FlatMesh::with_capacity(self.vertices.len(), self.triangles.len());
        for v in &self.vertices {
            flat.x.push(v.x);
            flat.y.push(v.y);
            flat.z.push(v.z);
        }
        for &[i, j, k] in &self.triangles {
            flat.i.push(i);
            flat.j.push(j);
            flat.k.push(k);
        }
        flat
    }
}

/// A fragment laid out as parallel arrays, the shape Mesh3d-style renderers
/// take directly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlatMesh {
    /// Vertex x coordinates.
    pub x: Vec<f64>,
    /// Vertex y coordinates.
    pub y: Vec<f64>,
    /// Vertex z coordinates.
    pub z: Vec<f64>,
    /// First corner of each triangle.
    pub i: Vec<u32>,
    /// Second corner of each triangle.
    pub j: Vec<u32>,
    /// Third corner of each triangle.
    pub k: Vec<u32>,
}

impl FlatMesh {
    fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            x: Vec::with_capacity(vertex_count),
            y: Vec::with_capacity(vertex_count),
            z: Vec::with_capacity(vertex_count),
            i: Vec::with_capacity(triangle_count),
            j: Vec::with_capacity(triangle_count),
            k: Vec::with_capacity(triangle_count),
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.i.len()
    }
}

impl From<&MeshFragment> for FlatMesh {
    fn from(fragment: &MeshFragment) -> Self {
        fragment.to_flat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn triangles_claim_fresh_vertices() {
        let mut fragment = MeshFragment::new();
        fragment
            .push_triangle(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0))
            .unwrap();
        fragment
            .push_triangle(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0))
            .unwrap();

        assert_eq!(fragment.vertex_count(), 6);
        assert_eq!(fragment.triangles, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn wall_quad_layout() {
        let mut fragment = MeshFragment::new();
        fragment
            .push_wall_quad(
                p(0.0, 0.0, 2.0),
                p(1.0, 0.0, 2.0),
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
            )
            .unwrap();

        assert_eq!(fragment.vertex_count(), 4);
        assert_eq!(fragment.triangles, vec![[0, 1, 2], [1, 3, 2]]);
        assert_relative_eq!(fragment.vertices[2].z, 0.0);
        assert_relative_eq!(fragment.vertices[1].z, 2.0);
    }

    #[test]
    fn alloc_block_returns_base() {
        let mut fragment = MeshFragment::new();
        assert_eq!(fragment.alloc_block([p(0.0, 0.0, 0.0); 4]).unwrap(), 0);
        assert_eq!(fragment.alloc_block([p(0.0, 0.0, 0.0); 3]).unwrap(), 4);
        assert_eq!(fragment.vertex_count(), 7);
        assert!(fragment.is_empty());
    }

    #[test]
    fn append_rebases_indices() {
        let mut a = MeshFragment::new();
        a.push_triangle(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0))
            .unwrap();
        let mut b = MeshFragment::new();
        b.push_wall_quad(
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 1.0),
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
        )
        .unwrap();

        let merged = MeshFragment::merge([a, b]).unwrap();
        assert_eq!(merged.vertex_count(), 7);
        assert_eq!(merged.triangles, vec![[0, 1, 2], [3, 4, 5], [4, 6, 5]]);
    }

    #[test]
    fn normals_and_area() {
        let mut fragment = MeshFragment::new();
        fragment
            .push_triangle(p(0.0, 0.0, 3.0), p(2.0, 0.0, 3.0), p(0.0, 2.0, 3.0))
            .unwrap();

        let n = fragment.face_normal(0).unwrap();
        assert_relative_eq!(n, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(fragment.projected_area(), 2.0);
        assert!(fragment.face_normal(1).is_none());
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let mut fragment = MeshFragment::new();
        fragment
            .push_triangle(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0))
            .unwrap();
        assert!(fragment.face_normal(0).is_none());
    }

    #[test]
    fn z_range_spans_vertices() {
        assert!(MeshFragment::new().z_range().is_none());

        let mut fragment = MeshFragment::new();
        fragment
            .push_wall_quad(
                p(0.0, 0.0, -1.5),
                p(1.0, 0.0, -1.5),
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
            )
            .unwrap();
        assert_eq!(fragment.z_range(), Some((-1.5, 0.0)));
    }

    #[test]
    fn flat_layout_matches_fragment() {
        let mut fragment = MeshFragment::new();
        fragment
            .push_triangle(p(0.0, 1.0, 2.0), p(3.0, 4.0, 5.0), p(6.0, 7.0, 8.0))
            .unwrap();

        let flat = FlatMesh::from(&fragment);
        assert_eq!(flat.x, vec![0.0, 3.0, 6.0]);
        assert_eq!(flat.y, vec![1.0, 4.0, 7.0]);
        assert_eq!(flat.z, vec![2.0, 5.0, 8.0]);
        assert_eq!((flat.i[0], flat.j[0], flat.k[0]), (0, 1, 2));
        assert_eq!(flat.triangle_count(), 1);
    }
}
