use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point2, Point3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Allows the retrieval of the point on the image the observation came from.
pub trait ImagePoint {
    /// Retrieves the point on the image.
    fn image_point(&self) -> Point2<f64>;
}

/// A point on an image frame in raw pixel coordinates. The point is neither
/// undistorted nor normalized; its X axis points right and its Y axis points
/// down, with the origin in the top-left corner of the image.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct KeyPoint(pub Point2<f64>);

impl ImagePoint for KeyPoint {
    fn image_point(&self) -> Point2<f64> {
        self.0
    }
}

/// A point in normalized image coordinates. The keypoint has been corrected
/// for lens distortion and normalized by the camera intrinsic matrix, so it is
/// expressed on the virtual image plane at depth `1.0` in front of the optical
/// center, in units of focal lengths.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct NormalizedKeyPoint(pub Point2<f64>);

impl NormalizedKeyPoint {
    /// Get the virtual image point as a [`Point3`].
    ///
    /// The virtual image point is the point formed on the virtual image plane
    /// at a depth of `1.0` in front of the camera.
    pub fn virtual_image_point(self) -> Point3<f64> {
        self.coords.push(1.0).into()
    }
}
