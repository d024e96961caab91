//! # `mvg`
//!
//! Batteries-included multi-view geometry.
//!
//! This crate gathers the `mvg` workspace in one place for discoverability and
//! for quickly writing a reconstruction routine. The shared types and traits
//! from `mvg-core` are re-exported at the root; the algorithm crates live in
//! named modules. If you are making a production application, depend on the
//! member crates individually instead.
//!
//! ## Modules
//! * [`camera`] - camera models to convert pixel coordinates into normalized image coordinates (and back)
//! * [`geom`] - triangulation of 3d points from calibrated views
//!
//! ## Example
//!
//! Normalize two pixel observations of the same feature and triangulate it:
//!
//! ```
//! use mvg::camera::pinhole::CameraIntrinsicsRadTanDistortion;
//! use mvg::geom::DltTriangulator;
//! use mvg::nalgebra::{Matrix3x4, Point3};
//! use mvg::{CameraModel, ProjectionMatrix, TriangulatorProjections};
//!
//! let camera = CameraIntrinsicsRadTanDistortion::from_parameters([
//!     800.0, 800.0, 640.0, 360.0, 0.0, -0.25, 0.06, 0.0, 1e-4, -5e-5,
//! ]);
//! let p1 = ProjectionMatrix::canonical();
//! let mut second = Matrix3x4::identity();
//! second[(0, 3)] = -0.4;
//! let p2 = ProjectionMatrix(second);
//!
//! // Synthesize the pixel observations of a known point.
//! let point = Point3::new(0.2, -0.1, 3.0);
//! let pixel_a = camera.uncalibrate(p1.project(point).unwrap());
//! let pixel_b = camera.uncalibrate(p2.project(point).unwrap());
//!
//! // Recover the point from the raw pixels.
//! let a = camera.calibrate(pixel_a).unwrap();
//! let b = camera.calibrate(pixel_b).unwrap();
//! let triangulated = DltTriangulator::new().triangulate_pair(&p1, &p2, a, b).unwrap();
//! assert!((triangulated - point).norm() < 1e-4);
//! ```

pub use mvg_core::*;

/// Camera models
pub mod camera {
    /// The pinhole camera model with radial-tangential distortion
    #[cfg(feature = "mvg-pinhole")]
    pub use mvg_pinhole as pinhole;
}

/// Computational geometry
pub mod geom {
    #[cfg(feature = "mvg-geom")]
    pub use mvg_geom::*;
}
