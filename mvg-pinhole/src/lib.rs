//! This crate plugs into `mvg-core` and provides a pinhole camera model with
//! radial-tangential lens distortion. It converts raw pixel coordinates into
//! normalized, distortion-free image coordinates (and back), which is the form
//! the triangulation crate consumes.
//!
//! Undistortion has no closed form for the full radial-tangential model, so
//! [`CameraIntrinsicsRadTanDistortion::calibrate`] inverts the forward model
//! with a fixed-point iteration bounded by both a maximum iteration count and
//! a convergence tolerance. Points for which the iteration does not converge
//! are reported as errors rather than returned as poor approximations.

mod distortion;

pub use distortion::*;

use mvg_core::nalgebra::{Matrix3, Point2, Vector2};
use mvg_core::{CameraModel, GeometryError, ImagePoint, KeyPoint, NormalizedKeyPoint};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Intrinsic parameters of a distortion-free pinhole camera: per-axis focal
/// lengths, principal point, and skew.
///
/// For a high quality camera this may be sufficient to normalize image
/// coordinates; cameras with noticeable lens distortion need
/// [`CameraIntrinsicsRadTanDistortion`] instead.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraIntrinsics {
    pub focals: Vector2<f64>,
    pub principal_point: Point2<f64>,
    pub skew: f64,
}

impl CameraIntrinsics {
    /// Creates camera intrinsics that would create an identity intrinsic
    /// matrix: origin at `0,0`, the pixel distance unit is the focal length,
    /// square pixels, and no skew.
    pub fn identity() -> Self {
        Self {
            focals: Vector2::new(1.0, 1.0),
            principal_point: Point2::new(0.0, 0.0),
            skew: 0.0,
        }
    }

    pub fn focals(self, focals: Vector2<f64>) -> Self {
        Self { focals, ..self }
    }

    /// Sets both focal lengths to the same value.
    pub fn focal(self, focal: f64) -> Self {
        Self {
            focals: Vector2::new(focal, focal),
            ..self
        }
    }

    pub fn principal_point(self, principal_point: Point2<f64>) -> Self {
        Self {
            principal_point,
            ..self
        }
    }

    pub fn skew(self, skew: f64) -> Self {
        Self { skew, ..self }
    }

    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.focals.x,  self.skew,      self.principal_point.x,
            0.0,            self.focals.y,  self.principal_point.y,
            0.0,            0.0,            1.0,
        )
    }

    fn validate(&self) -> Result<(), GeometryError> {
        let ok = self.focals.x.is_finite()
            && self.focals.y.is_finite()
            && self.skew.is_finite()
            && self.focals.x != 0.0
            && self.focals.y != 0.0;
        if ok {
            Ok(())
        } else {
            Err(GeometryError::InvalidIntrinsics)
        }
    }
}

impl CameraModel for CameraIntrinsics {
    type Projection = NormalizedKeyPoint;

    /// Takes in a point from an image in pixel coordinates and converts it to
    /// a [`NormalizedKeyPoint`] by removing the principal-point offset, skew,
    /// and focal-length scale.
    ///
    /// ```
    /// use mvg_core::{KeyPoint, CameraModel};
    /// use mvg_core::nalgebra::{Point2, Vector2};
    /// use mvg_pinhole::CameraIntrinsics;
    /// let intrinsics = CameraIntrinsics {
    ///     focals: Vector2::new(800.0, 900.0),
    ///     principal_point: Point2::new(500.0, 600.0),
    ///     skew: 1.7,
    /// };
    /// let kp = KeyPoint(Point2::new(471.0, 322.0));
    /// let nkp = intrinsics.calibrate(kp).unwrap();
    /// let distance = (kp.to_homogeneous() - intrinsics.matrix() * nkp.to_homogeneous()).norm();
    /// assert!(distance < 1e-9);
    /// ```
    fn calibrate<P>(&self, point: P) -> Result<NormalizedKeyPoint, GeometryError>
    where
        P: ImagePoint,
    {
        self.validate()?;
        let centered = point.image_point() - self.principal_point;
        let y = centered.y / self.focals.y;
        let x = (centered.x - self.skew * y) / self.focals.x;
        Ok(NormalizedKeyPoint(Point2::new(x, y)))
    }

    /// Converts a [`NormalizedKeyPoint`] back into pixel coordinates.
    fn uncalibrate(&self, projection: NormalizedKeyPoint) -> KeyPoint {
        let y = projection.y * self.focals.y;
        let x = projection.x * self.focals.x + self.skew * projection.y;
        KeyPoint(Point2::new(x, y) + self.principal_point.coords)
    }
}

/// The full 10-parameter pinhole camera: linear intrinsics plus
/// radial-tangential lens distortion.
///
/// Calibration inverts the distortion with a fixed-point iteration. The
/// iteration stops as soon as the step between successive iterates drops below
/// [`epsilon`](Self::epsilon); if that does not happen within
/// [`max_iterations`](Self::max_iterations) rounds, or an iterate becomes
/// non-finite, the point is reported as [`GeometryError::DivergentCorrection`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraIntrinsicsRadTanDistortion {
    pub simple_intrinsics: CameraIntrinsics,
    pub distortion: RadialTangentialDistortion,
    epsilon: f64,
    max_iterations: usize,
}

impl CameraIntrinsicsRadTanDistortion {
    /// Creates the camera from linear intrinsics and distortion coefficients.
    pub fn new(
        simple_intrinsics: CameraIntrinsics,
        distortion: RadialTangentialDistortion,
    ) -> Self {
        Self {
            simple_intrinsics,
            distortion,
            epsilon: 1e-12,
            max_iterations: 100,
        }
    }

    /// Creates the camera from the ordered parameter vector
    /// `[fc1, fc2, cc1, cc2, alpha_c, k1, k2, k3, p1, p2]`.
    ///
    /// `alpha_c` is the skew entry of the intrinsic matrix and is applied
    /// consistently in both [`calibrate`](CameraModel::calibrate) and
    /// [`uncalibrate`](CameraModel::uncalibrate).
    pub fn from_parameters(parameters: [f64; 10]) -> Self {
        let [fc1, fc2, cc1, cc2, alpha_c, k1, k2, k3, p1, p2] = parameters;
        Self::new(
            CameraIntrinsics {
                focals: Vector2::new(fc1, fc2),
                principal_point: Point2::new(cc1, cc2),
                skew: alpha_c,
            },
            RadialTangentialDistortion::new(k1, k2, k3, p1, p2),
        )
    }

    /// The ordered parameter vector `[fc1, fc2, cc1, cc2, alpha_c, k1, k2, k3, p1, p2]`.
    pub fn parameters(&self) -> [f64; 10] {
        let i = &self.simple_intrinsics;
        let d = &self.distortion;
        [
            i.focals.x,
            i.focals.y,
            i.principal_point.x,
            i.principal_point.y,
            i.skew,
            d.k1,
            d.k2,
            d.k3,
            d.p1,
            d.p2,
        ]
    }

    /// Set the convergence tolerance on the norm of the step between
    /// successive undistortion iterates.
    ///
    /// Default is `1e-12`.
    #[must_use]
    pub fn epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    /// Set the maximum number of undistortion iterations.
    ///
    /// Default is `100`.
    #[must_use]
    pub fn max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Normalizes a batch of raw pixel points in place.
    ///
    /// Each successfully corrected point is written back into its slot of the
    /// slice; a point that fails leaves its slot untouched. The per-point
    /// results are returned in order, so one degenerate point never aborts
    /// processing of the others.
    pub fn normalize_in_place(
        &self,
        points: &mut [Point2<f64>],
    ) -> Vec<Result<NormalizedKeyPoint, GeometryError>> {
        points
            .iter_mut()
            .map(|point| {
                let result = self.calibrate(KeyPoint(*point));
                if let Ok(normalized) = result {
                    *point = normalized.0;
                }
                result
            })
            .collect()
    }
}

impl CameraModel for CameraIntrinsicsRadTanDistortion {
    type Projection = NormalizedKeyPoint;

    /// Takes in a point from an image in pixel coordinates, removes the linear
    /// intrinsics, and iteratively inverts the lens distortion to produce a
    /// [`NormalizedKeyPoint`].
    ///
    /// ```
    /// use mvg_core::{KeyPoint, CameraModel, NormalizedKeyPoint};
    /// use mvg_core::nalgebra::Point2;
    /// use mvg_pinhole::CameraIntrinsicsRadTanDistortion;
    /// let camera = CameraIntrinsicsRadTanDistortion::from_parameters([
    ///     800.0, 900.0, 500.0, 600.0, 0.0, -0.28, 0.07, 0.0, 1e-4, -2e-4,
    /// ]);
    /// let normalized = NormalizedKeyPoint(Point2::new(0.3, -0.2));
    /// let pixel = camera.uncalibrate(normalized);
    /// let recovered = camera.calibrate(pixel).unwrap();
    /// assert!((normalized.coords - recovered.coords).norm() < 1e-9);
    /// ```
    fn calibrate<P>(&self, point: P) -> Result<NormalizedKeyPoint, GeometryError>
    where
        P: ImagePoint,
    {
        let NormalizedKeyPoint(distorted) = self.simple_intrinsics.calibrate(point)?;

        // The distorted point is the initial guess for the undistorted point.
        let mut undistorted = distorted.coords;
        for _ in 0..self.max_iterations {
            let (x, y) = (undistorted.x, undistorted.y);
            let r2 = x * x + y * y;
            let k_radial = self.distortion.radial_factor(r2);
            if !k_radial.is_finite() || k_radial.abs() <= f64::EPSILON {
                return Err(GeometryError::DivergentCorrection);
            }
            let (delta_x, delta_y) = self.distortion.tangential_delta(x, y, r2);
            let next = Vector2::new(
                (distorted.x - delta_x) / k_radial,
                (distorted.y - delta_y) / k_radial,
            );
            if !next.x.is_finite() || !next.y.is_finite() {
                return Err(GeometryError::DivergentCorrection);
            }
            let step = (next - undistorted).norm_squared();
            undistorted = next;
            if step <= self.epsilon * self.epsilon {
                return Ok(NormalizedKeyPoint(Point2::from(undistorted)));
            }
        }

        // The iteration ran out of rounds before the step shrank below the
        // tolerance; the result would be a silently poor approximation.
        Err(GeometryError::DivergentCorrection)
    }

    /// Converts a [`NormalizedKeyPoint`] back into pixel coordinates by
    /// applying the forward distortion model and then the linear intrinsics.
    fn uncalibrate(&self, projection: NormalizedKeyPoint) -> KeyPoint {
        let distorted = self.distortion.distort(projection.0);
        self.simple_intrinsics
            .uncalibrate(NormalizedKeyPoint(distorted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn synthetic_camera() -> CameraIntrinsicsRadTanDistortion {
        CameraIntrinsicsRadTanDistortion::from_parameters([
            800.0, 900.0, 500.0, 600.0, 1.2, -0.28, 0.07, 0.0015, 1e-4, -2e-4,
        ])
    }

    #[test]
    fn identity_at_principal_point() {
        let camera = CameraIntrinsicsRadTanDistortion::from_parameters([
            1000.0, 1000.0, 320.0, 240.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ]);
        let normalized = camera
            .calibrate(KeyPoint(Point2::new(320.0, 240.0)))
            .unwrap();
        assert_eq!(normalized.coords, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn zero_distortion_reduces_to_linear_scaling() {
        let camera = CameraIntrinsicsRadTanDistortion::from_parameters([
            800.0, 900.0, 500.0, 600.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ]);
        let normalized = camera
            .calibrate(KeyPoint(Point2::new(471.0, 322.0)))
            .unwrap();
        assert_eq!(normalized.x, (471.0 - 500.0) / 800.0);
        assert_eq!(normalized.y, (322.0 - 600.0) / 900.0);
    }

    #[test]
    fn round_trip_recovers_normalized_point() {
        let camera = synthetic_camera();
        // Points within a typical field of view (r^2 < 1).
        for &(x, y) in &[(0.0, 0.0), (0.3, -0.2), (-0.45, 0.1), (0.5, 0.5)] {
            let normalized = NormalizedKeyPoint(Point2::new(x, y));
            let pixel = camera.uncalibrate(normalized);
            let recovered = camera.calibrate(pixel).unwrap();
            assert_relative_eq!(normalized.x, recovered.x, epsilon = 1e-6);
            assert_relative_eq!(normalized.y, recovered.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn skew_is_applied_consistently() {
        let with_skew = synthetic_camera();
        let without_skew = CameraIntrinsicsRadTanDistortion::new(
            with_skew.simple_intrinsics.skew(0.0),
            with_skew.distortion,
        );
        let normalized = NormalizedKeyPoint(Point2::new(0.2, -0.3));
        let skewed = with_skew.uncalibrate(normalized);
        let unskewed = without_skew.uncalibrate(normalized);
        // Skew shears x by the y coordinate and leaves y alone.
        assert_relative_eq!(
            skewed.x - unskewed.x,
            with_skew.simple_intrinsics.skew * with_skew.distortion.distort(normalized.0).y,
            epsilon = 1e-12
        );
        assert_eq!(skewed.y, unskewed.y);
        // And the round trip still holds.
        let recovered = with_skew.calibrate(skewed).unwrap();
        assert_relative_eq!(normalized.x, recovered.x, epsilon = 1e-9);
        assert_relative_eq!(normalized.y, recovered.y, epsilon = 1e-9);
    }

    #[test]
    fn zero_focal_length_is_rejected() {
        let camera = CameraIntrinsicsRadTanDistortion::from_parameters([
            0.0, 900.0, 500.0, 600.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ]);
        assert_eq!(
            camera.calibrate(KeyPoint(Point2::new(100.0, 100.0))),
            Err(GeometryError::InvalidIntrinsics)
        );
    }

    #[test]
    fn non_finite_focal_length_is_rejected() {
        let camera = CameraIntrinsicsRadTanDistortion::from_parameters([
            800.0,
            f64::NAN,
            500.0,
            600.0,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
        ]);
        assert_eq!(
            camera.calibrate(KeyPoint(Point2::new(100.0, 100.0))),
            Err(GeometryError::InvalidIntrinsics)
        );
    }

    #[test]
    fn non_finite_point_reports_divergence() {
        let camera = synthetic_camera();
        assert_eq!(
            camera.calibrate(KeyPoint(Point2::new(f64::NAN, 10.0))),
            Err(GeometryError::DivergentCorrection)
        );
    }

    #[test]
    fn batch_isolates_failed_points() {
        let camera = synthetic_camera();
        let good_a = Point2::new(500.0, 600.0);
        let bad = Point2::new(f64::NAN, 10.0);
        let good_b = Point2::new(471.0, 322.0);
        let mut points = [good_a, bad, good_b];

        let results = camera.normalize_in_place(&mut points);

        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(GeometryError::DivergentCorrection));
        assert!(results[2].is_ok());
        // Successes are written back in place, failures leave the slot alone.
        assert_eq!(points[0], results[0].unwrap().0);
        assert!(points[1].x.is_nan());
        assert_eq!(points[2], results[2].unwrap().0);
        // The principal point normalizes to the origin.
        assert_eq!(points[0], Point2::new(0.0, 0.0));
    }

    #[test]
    fn parameters_round_trip_in_fixed_order() {
        let parameters = [
            800.0, 900.0, 500.0, 600.0, 1.2, -0.28, 0.07, 0.0015, 1e-4, -2e-4,
        ];
        let camera = CameraIntrinsicsRadTanDistortion::from_parameters(parameters);
        assert_eq!(camera.parameters(), parameters);
    }
}
