//! Extrude 2D footprints into triangulated 3D solids.
//!
//! Given a polygon (or several) and a height, this crate produces the two
//! surfaces of a vertical extrusion as independent mesh fragments:
//!
//! - [`triangulate_top`] - the cap at `z_top`, ear-clipped so concave
//!   outlines keep their notches
//! - [`build_walls`] - one vertical quad per boundary edge from `z = 0` to
//!   `z_top`
//!
//! Both are pure functions of their input. [`extrude`] runs both and returns
//! them side by side; [`ExtrudedSolid::merged`] concatenates them.
//!
//! # Fragments
//!
//! A [`MeshFragment`] never shares vertices: each top triangle owns three and
//! each wall edge owns four. Coincident positions stay distinct entries, which
//! is what flat-shaded renderers want. [`MeshFragment::to_flat`] produces the
//! parallel `x/y/z` + `i/j/k` arrays that Mesh3d-style plotting APIs take.
//!
//! # Coordinate System
//!
//! Right-handed, Z up. The base plane is always `z = 0`. Input coordinates
//! must already be projected to a planar system.
//!
//! # Example
//!
//! ```
//! use mesh_extrude::{MultiPolygon, Polygon, build_walls, triangulate_top};
//!
//! let county = MultiPolygon::new(vec![
//!     Polygon::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
//!     Polygon::from_coords(&[[3.0, 0.0], [4.0, 0.0], [4.0, 1.0], [3.0, 1.0]]),
//! ]);
//!
//! let top = triangulate_top(&county, 12.5).unwrap();
//! let walls = build_walls(&county, 12.5).unwrap();
//!
//! assert_eq!(top.triangle_count(), 4);
//! assert_eq!(walls.triangle_count(), 16);
//! assert!((top.projected_area() - 2.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod error;
mod extrude;
mod fragment;
mod polygon;
mod top;
mod triangulate;
mod walls;

pub use config::ExtrudeConfig;
pub use error::{ExtrudeError, ExtrudeResult};
pub use extrude::{ExtrudedSolid, extrude};
pub use fragment::{FlatMesh, MeshFragment};
pub use polygon::{Geometry, MultiPolygon, Polygon, PolygonParts};
pub use top::{triangulate_top, triangulate_top_with};
pub use triangulate::{Triangulation, triangulate_polygon};
pub use walls::{build_walls, build_walls_with};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};
