use thiserror::Error;

/// The failure modes of the geometric conversions in this workspace.
///
/// Both normalization and triangulation fail fast per point or per pair and
/// return one of these kinds rather than propagating non-finite coordinates.
/// A failed point in a batch never aborts processing of the remaining points.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The camera intrinsics contain a zero or non-finite focal length.
    #[error("camera intrinsics contain a zero or non-finite focal length")]
    InvalidIntrinsics,
    /// Distortion correction produced non-finite coordinates or did not
    /// converge within its iteration bound.
    #[error("distortion correction diverged or failed to converge")]
    DivergentCorrection,
    /// The homogeneous triangulation solution has a near-zero scale component
    /// (point at infinity) or the design matrix is rank deficient.
    #[error("triangulation is degenerate: the observed rays do not intersect at a finite point")]
    DegenerateTriangulation,
}
