use nalgebra::Point3;

use crate::{GeometryError, NormalizedKeyPoint, ProjectionMatrix};

/// This trait is for algorithms which recover a euclidean 3d point from the
/// observations of two calibrated views: each view contributes its
/// [`ProjectionMatrix`] and the [`NormalizedKeyPoint`] at which the point was
/// observed.
pub trait TriangulatorProjections {
    /// Triangulates a point observed at `a` in the view of `p1` and at `b` in
    /// the view of `p2`. The result is in the world frame of the projection
    /// matrices.
    ///
    /// Swapping the two views must yield the same point. Rays which do not
    /// intersect at a finite point are reported as
    /// [`GeometryError::DegenerateTriangulation`].
    fn triangulate_pair(
        &self,
        p1: &ProjectionMatrix,
        p2: &ProjectionMatrix,
        a: NormalizedKeyPoint,
        b: NormalizedKeyPoint,
    ) -> Result<Point3<f64>, GeometryError>;
}
