use crate::{GeometryError, ImagePoint, KeyPoint};

/// Allows conversion between a point on an image and the camera's internal
/// projection on the virtual image plane.
pub trait CameraModel {
    /// The projection type produced by calibration, typically
    /// [`NormalizedKeyPoint`](crate::NormalizedKeyPoint).
    type Projection;

    /// Takes a point from an image in pixel coordinates and converts it to the
    /// camera's projection.
    ///
    /// This is fallible: invalid intrinsics or a non-convergent distortion
    /// correction are reported as a [`GeometryError`] rather than silently
    /// producing non-finite coordinates.
    fn calibrate<P>(&self, point: P) -> Result<Self::Projection, GeometryError>
    where
        P: ImagePoint;

    /// Converts the camera's projection back into pixel coordinates.
    fn uncalibrate(&self, projection: Self::Projection) -> KeyPoint;
}
