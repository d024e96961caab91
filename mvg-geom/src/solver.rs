use float_ord::FloatOrd;
use mvg_core::nalgebra::{Matrix4, Vector4};

/// The null-space direction of a homogeneous system `A·x = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullspaceSolution {
    /// The unit-norm right-singular vector paired with the smallest singular
    /// value of the design matrix. Its sign is arbitrary.
    pub vector: Vector4<f64>,
    /// The singular values of the design matrix, sorted descending.
    pub singular_values: [f64; 4],
}

/// A capability that extracts the best-fit null-space direction of an
/// over-determined homogeneous system: the right-singular vector associated
/// with the smallest singular value, which minimizes `‖A·x‖` subject to
/// `‖x‖ = 1`.
///
/// [`DltTriangulator`](crate::DltTriangulator) is generic over this trait, so
/// its degeneracy handling can be exercised against a fake solver in tests.
pub trait HomogeneousSolver {
    /// Solves for the null-space direction of the design matrix, or `None`
    /// when the decomposition itself fails.
    fn solve_nullspace(&self, design: &Matrix4<f64>) -> Option<NullspaceSolution>;
}

/// The default [`HomogeneousSolver`], backed by nalgebra's singular value
/// decomposition.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct SvdNullspace {
    epsilon: f64,
    max_iterations: usize,
}

impl SvdNullspace {
    /// Creates an [`SvdNullspace`] with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the epsilon used in the SVD solver.
    ///
    /// Default is `1e-12`.
    #[must_use]
    pub fn epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    /// Set the maximum number of iterations for the SVD solver.
    ///
    /// Default is `1000`.
    #[must_use]
    pub fn max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}

impl Default for SvdNullspace {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            max_iterations: 1000,
        }
    }
}

impl HomogeneousSolver for SvdNullspace {
    fn solve_nullspace(&self, design: &Matrix4<f64>) -> Option<NullspaceSolution> {
        let svd = design.try_svd_unordered(false, true, self.epsilon, self.max_iterations)?;
        let v_t = svd.v_t?;

        let mut order = [0, 1, 2, 3];
        order.sort_by_key(|&i| core::cmp::Reverse(FloatOrd(svd.singular_values[i])));
        let singular_values = order.map(|i| svd.singular_values[i]);

        // The sought solution is the right-singular vector corresponding to
        // the smallest singular value.
        let vector = v_t.row(order[3]).transpose();
        Some(NullspaceSolution {
            vector,
            singular_values,
        })
    }
}
