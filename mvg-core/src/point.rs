use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point3, Vector4};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// This trait is implemented for homogeneous projective 3d coordinates.
pub trait Projective: From<Vector4<f64>> + Clone + Copy {
    /// Retrieve the homogeneous vector.
    ///
    /// No constraints are put on this vector. It is not normalized, and any
    /// non-zero scalar multiple of it describes the same projective point.
    fn homogeneous(self) -> Vector4<f64>;

    /// Retrieve the euclidean 3d point by dividing through by the homogeneous
    /// scale component.
    ///
    /// This may fail, as a homogeneous coordinate can exist at or near
    /// infinity (a zero scale component), whereas a euclidean point cannot.
    fn point(self) -> Option<Point3<f64>> {
        Point3::from_homogeneous(self.homogeneous())
    }

    /// Convert a euclidean 3d point into homogeneous coordinates.
    fn from_point(point: Point3<f64>) -> Self {
        point.to_homogeneous().into()
    }
}

/// A homogeneous 3d point in world coordinates, the intermediate form produced
/// by triangulation before the division back to euclidean coordinates.
///
/// The world frame is whatever frame the projection matrices of the observing
/// cameras are expressed in; triangulated points come out in that same frame.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct WorldPoint(pub Vector4<f64>);

impl Projective for WorldPoint {
    fn homogeneous(self) -> Vector4<f64> {
        self.into()
    }
}
