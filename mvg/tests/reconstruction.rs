//! End-to-end reconstruction: project known 3d points through two distorted
//! cameras, normalize the resulting pixel batches in place, and triangulate
//! the points back.

use mvg::camera::pinhole::CameraIntrinsicsRadTanDistortion;
use mvg::geom::DltTriangulator;
use mvg::nalgebra::{Matrix3x4, Point2, Point3};
use mvg::{
    CameraModel, GeometryError, NormalizedKeyPoint, ProjectionMatrix, TriangulatorProjections,
};

fn translated_projection(tx: f64) -> ProjectionMatrix {
    let mut pose = Matrix3x4::identity();
    pose[(0, 3)] = tx;
    ProjectionMatrix(pose)
}

#[test]
fn pixels_to_spatial_points_and_back() {
    // Two cameras with different intrinsics and distortion, a half-unit apart.
    let camera_a = CameraIntrinsicsRadTanDistortion::from_parameters([
        800.0, 900.0, 640.0, 360.0, 0.0, -0.28, 0.07, 0.0015, 1e-4, -2e-4,
    ]);
    let camera_b = CameraIntrinsicsRadTanDistortion::from_parameters([
        1000.0, 1000.0, 320.0, 240.0, 0.5, -0.2, 0.04, 0.0, -5e-5, 1e-4,
    ]);
    let p1 = ProjectionMatrix::canonical();
    let p2 = translated_projection(-0.5);

    let points = [
        Point3::new(0.1, -0.05, 2.0),
        Point3::new(-0.3, 0.2, 4.0),
        Point3::new(0.6, 0.4, 3.5),
    ];

    // Synthesize the raw pixel detections each camera would produce.
    let mut pixels_a: Vec<Point2<f64>> = points
        .iter()
        .map(|&p| camera_a.uncalibrate(p1.project(p).unwrap()).0)
        .collect();
    let mut pixels_b: Vec<Point2<f64>> = points
        .iter()
        .map(|&p| camera_b.uncalibrate(p2.project(p).unwrap()).0)
        .collect();

    // Normalize both batches in place.
    let results_a = camera_a.normalize_in_place(&mut pixels_a);
    let results_b = camera_b.normalize_in_place(&mut pixels_b);
    assert!(results_a.iter().all(Result::is_ok));
    assert!(results_b.iter().all(Result::is_ok));

    // Triangulate each correspondence from the normalized coordinates now in
    // the batch storage.
    let triangulator = DltTriangulator::new();
    for (i, &expected) in points.iter().enumerate() {
        let a = NormalizedKeyPoint(pixels_a[i]);
        let b = NormalizedKeyPoint(pixels_b[i]);
        let triangulated = triangulator.triangulate_pair(&p1, &p2, a, b).unwrap();
        assert!(
            (triangulated - expected).norm() < 1e-4,
            "point {} triangulated to {} but expected {}",
            i,
            triangulated,
            expected
        );
    }
}

#[test]
fn one_bad_detection_does_not_poison_the_batch() {
    let camera = CameraIntrinsicsRadTanDistortion::from_parameters([
        800.0, 800.0, 640.0, 360.0, 0.0, -0.25, 0.06, 0.0, 0.0, 0.0,
    ]);
    let mut pixels = vec![
        Point2::new(640.0, 360.0),
        Point2::new(f64::INFINITY, 360.0),
        Point2::new(700.0, 400.0),
    ];

    let results = camera.normalize_in_place(&mut pixels);

    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(GeometryError::DivergentCorrection));
    assert!(results[2].is_ok());
    assert_eq!(pixels[0], Point2::new(0.0, 0.0));
}
