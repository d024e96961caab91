//! # `mvg-core`
//!
//! This crate provides the abstractions and types shared by the `mvg` multi-view
//! geometry crates: image points, normalized image points, projection matrices,
//! homogeneous 3d points, the camera model trait, the triangulator trait, and the
//! error taxonomy. The crate is intentionally small so that algorithm crates can
//! interoperate by depending on it without pulling in each other.
//!
//! The two central conversions in this workspace are:
//!
//! * [`CameraModel::calibrate`] — taking a raw pixel-space [`KeyPoint`] to a
//!   distortion-free [`NormalizedKeyPoint`] on the virtual image plane.
//! * [`TriangulatorProjections::triangulate_pair`] — taking two calibrated views
//!   of the same normalized point back to a euclidean 3d point.
//!
//! A [`NormalizedKeyPoint`] lives on the virtual image plane at depth `1.0` in
//! front of the camera's optical center. Triangulation intersects the rays that
//! pass through the optical centers and the normalized points of two views; the
//! intersection is first recovered as a homogeneous [`WorldPoint`] and only then
//! converted to euclidean coordinates, since the homogeneous form can represent
//! points at or near infinity which euclidean coordinates cannot.

mod camera;
mod error;
mod keypoint;
mod point;
mod projection;
mod triangulation;

pub use camera::*;
pub use error::*;
pub use keypoint::*;
pub use nalgebra;
pub use point::*;
pub use projection::*;
pub use triangulation::*;
