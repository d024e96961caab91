use mvg_core::nalgebra::{Matrix4, Point3};
use mvg_core::{
    GeometryError, NormalizedKeyPoint, Projective, ProjectionMatrix, TriangulatorProjections,
    WorldPoint,
};

use crate::{HomogeneousSolver, SvdNullspace};

/// Two-view triangulation using the Linear-Eigen (homogeneous least-squares)
/// method.
///
/// Each camera contributes two rows to a 4×4 design matrix, obtained by
/// eliminating the unknown depth from its ray equations; the sought point is
/// the null-space direction of that matrix, extracted by the injected
/// [`HomogeneousSolver`] and divided through by its homogeneous scale
/// component. Rays that only meet at or near infinity, and design matrices
/// whose null direction is not well determined, are reported as
/// [`GeometryError::DegenerateTriangulation`].
///
/// ```
/// use mvg_core::nalgebra::{Matrix3x4, Point3};
/// use mvg_core::{ProjectionMatrix, TriangulatorProjections};
/// use mvg_geom::DltTriangulator;
///
/// let p1 = ProjectionMatrix::canonical();
/// let mut second = Matrix3x4::identity();
/// second[(0, 3)] = -0.5;
/// let p2 = ProjectionMatrix(second);
///
/// let point = Point3::new(0.1, -0.05, 2.0);
/// let a = p1.project(point).unwrap();
/// let b = p2.project(point).unwrap();
///
/// let triangulated = DltTriangulator::new().triangulate_pair(&p1, &p2, a, b).unwrap();
/// assert!((triangulated - point).norm() < 1e-6);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct DltTriangulator<S = SvdNullspace> {
    solver: S,
    w_epsilon: f64,
    rank_epsilon: f64,
}

impl DltTriangulator<SvdNullspace> {
    /// Creates a `DltTriangulator` backed by the default SVD solver.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for DltTriangulator<SvdNullspace> {
    fn default() -> Self {
        Self::with_solver(SvdNullspace::new())
    }
}

impl<S: HomogeneousSolver> DltTriangulator<S> {
    /// Creates a `DltTriangulator` backed by the given null-space solver.
    pub fn with_solver(solver: S) -> Self {
        Self {
            solver,
            w_epsilon: 1e-9,
            rank_epsilon: 1e-8,
        }
    }

    /// Set the tolerance below which the homogeneous scale component of the
    /// unit-norm solution is considered zero (a point at infinity).
    ///
    /// Default is `1e-9`.
    #[must_use]
    pub fn w_epsilon(self, w_epsilon: f64) -> Self {
        Self { w_epsilon, ..self }
    }

    /// Set the ratio to the largest singular value below which the
    /// second-smallest singular value marks the design matrix as rank
    /// deficient.
    ///
    /// Default is `1e-8`.
    #[must_use]
    pub fn rank_epsilon(self, rank_epsilon: f64) -> Self {
        Self {
            rank_epsilon,
            ..self
        }
    }
}

impl<S: HomogeneousSolver> TriangulatorProjections for DltTriangulator<S> {
    fn triangulate_pair(
        &self,
        p1: &ProjectionMatrix,
        p2: &ProjectionMatrix,
        a: NormalizedKeyPoint,
        b: NormalizedKeyPoint,
    ) -> Result<Point3<f64>, GeometryError> {
        // Each camera contributes the two ray equations obtained by
        // eliminating the unknown depth: x·P_row2 − P_row0 and y·P_row2 − P_row1.
        let mut design = Matrix4::zeros();
        design.row_mut(0).copy_from(&(a.x * p1.row(2) - p1.row(0)));
        design.row_mut(1).copy_from(&(a.y * p1.row(2) - p1.row(1)));
        design.row_mut(2).copy_from(&(b.x * p2.row(2) - p2.row(0)));
        design.row_mut(3).copy_from(&(b.y * p2.row(2) - p2.row(1)));

        let solution = self
            .solver
            .solve_nullspace(&design)
            .ok_or(GeometryError::DegenerateTriangulation)?;

        // A well-posed two-view problem leaves exactly one direction in the
        // null space; a second vanishing singular value means the null
        // direction itself is not determined.
        let [largest, .., second_smallest, _] = solution.singular_values;
        if !(second_smallest > self.rank_epsilon * largest) {
            return Err(GeometryError::DegenerateTriangulation);
        }

        let homogeneous = WorldPoint(solution.vector);
        if !homogeneous.homogeneous().iter().all(|n| n.is_finite()) {
            return Err(GeometryError::DegenerateTriangulation);
        }
        // The solver returns a unit-norm vector, so a vanishing scale
        // component means the rays only meet at or near infinity. The sign of
        // the vector is arbitrary and cancels in the division.
        if !(solution.vector.w.abs() > self.w_epsilon) {
            return Err(GeometryError::DegenerateTriangulation);
        }

        let point = homogeneous
            .point()
            .ok_or(GeometryError::DegenerateTriangulation)?;
        if point.coords.iter().all(|n| n.is_finite()) {
            Ok(point)
        } else {
            Err(GeometryError::DegenerateTriangulation)
        }
    }
}
