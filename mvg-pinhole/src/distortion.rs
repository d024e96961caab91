use mvg_core::nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The radial-tangential (Brown-Conrady) lens distortion model.
///
/// Radial displacement is a polynomial in the squared radial distance with
/// coefficients `k1`, `k2` and `k3`; tangential displacement from lens/sensor
/// misalignment is modeled by `p1` and `p2`. All coefficients operate on
/// normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RadialTangentialDistortion {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub p1: f64,
    pub p2: f64,
}

impl RadialTangentialDistortion {
    pub fn new(k1: f64, k2: f64, k3: f64, p1: f64, p2: f64) -> Self {
        Self { k1, k2, k3, p1, p2 }
    }

    /// The radial scale factor `1 + k1·r² + k2·r⁴ + k3·r⁶` at squared radial
    /// distance `r2`.
    pub fn radial_factor(&self, r2: f64) -> f64 {
        1.0 + r2 * (self.k1 + r2 * (self.k2 + r2 * self.k3))
    }

    /// The tangential displacement `(delta_x, delta_y)` at the undistorted
    /// normalized point `(x, y)` with squared radial distance `r2`.
    pub fn tangential_delta(&self, x: f64, y: f64, r2: f64) -> (f64, f64) {
        let delta_x = 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let delta_y = self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y;
        (delta_x, delta_y)
    }

    /// Applies the forward distortion model to an undistorted normalized
    /// point, yielding the distorted normalized point the lens would produce.
    ///
    /// ```
    /// use mvg_pinhole::RadialTangentialDistortion;
    /// use mvg_core::nalgebra::Point2;
    /// let none = RadialTangentialDistortion::default();
    /// let point = Point2::new(0.3, -0.2);
    /// assert_eq!(none.distort(point), point);
    /// ```
    pub fn distort(&self, point: Point2<f64>) -> Point2<f64> {
        let (x, y) = (point.x, point.y);
        let r2 = x * x + y * y;
        let k_radial = self.radial_factor(r2);
        let (delta_x, delta_y) = self.tangential_delta(x, y, r2);
        Point2::new(k_radial * x + delta_x, k_radial * y + delta_y)
    }
}
