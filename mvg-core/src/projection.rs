use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Matrix3x4, Point2, Point3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::NormalizedKeyPoint;

/// A 3×4 projection matrix mapping homogeneous 3d world coordinates to
/// homogeneous coordinates on the virtual image plane of one calibrated
/// camera. For a camera with pose `[R | t]` relative to the world frame, the
/// projection matrix is exactly that 3×4 pose matrix, since the image
/// coordinates it produces are already normalized.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ProjectionMatrix(pub Matrix3x4<f64>);

impl ProjectionMatrix {
    /// The canonical projection `[I | 0]` of a camera sitting at the world
    /// origin looking down the positive Z axis.
    pub fn canonical() -> Self {
        Self(Matrix3x4::identity())
    }

    /// Projects a world point onto the virtual image plane of this camera.
    ///
    /// Returns `None` when the point projects to zero depth, in which case it
    /// has no finite image.
    ///
    /// ```
    /// use mvg_core::ProjectionMatrix;
    /// use mvg_core::nalgebra::Point3;
    /// let projection = ProjectionMatrix::canonical();
    /// let image = projection.project(Point3::new(0.4, -0.2, 2.0)).unwrap();
    /// assert_eq!(image.x, 0.2);
    /// assert_eq!(image.y, -0.1);
    /// ```
    pub fn project(&self, point: Point3<f64>) -> Option<NormalizedKeyPoint> {
        let h = self.0 * point.to_homogeneous();
        if h.z == 0.0 {
            return None;
        }
        Some(NormalizedKeyPoint(Point2::new(h.x / h.z, h.y / h.z)))
    }
}
