//! End-to-end properties of the cubemap and perspective projectors.

use approx::assert_abs_diff_eq;
use glam::DVec3;
use pano_core::Image;
use pano_ops::guard::{cap_dimension, cap_image, Subject};
use pano_ops::perspective::{ray_source_coordinate, Camera, ViewRotation};
use pano_ops::{
    cubemap_project, perspective_project, CubeFace, OpsError, PerspectiveParams, SizeGuard,
};

/// Panorama whose pixel (col, row) holds `[col, row, 0.5]`.
fn coordinate_pano(w: u32, h: u32) -> Image {
    let mut img = Image::new(w, h, 3);
    for y in 0..h {
        for x in 0..w {
            img.pixel_mut(x, y).copy_from_slice(&[x as f32, y as f32, 0.5]);
        }
    }
    img
}

fn centre(img: &Image) -> &[f32] {
    img.pixel(img.width() / 2, img.height() / 2)
}

// === Cubemap ===

#[test]
fn test_cubemap_six_faces_in_order() {
    let pano = coordinate_pano(64, 32);
    let cube = cubemap_project(&pano, 12, &SizeGuard::default()).unwrap();

    let order: Vec<CubeFace> = cube.faces().iter().map(|(f, _)| *f).collect();
    assert_eq!(order, CubeFace::ALL);
    for (_, face) in cube.faces() {
        assert_eq!(face.dimensions(), (12, 12));
        assert_eq!(face.channels(), 3);
    }
    assert!(cube.adjustments().is_empty());
}

#[test]
fn test_cubemap_preserves_channel_count() {
    let pano = Image::from_data(16, 8, 4, vec![1.0; 16 * 8 * 4]).unwrap();
    let cube = cubemap_project(&pano, 5, &SizeGuard::default()).unwrap();
    for (_, face) in cube.faces() {
        assert_eq!(face.channels(), 4);
        assert_eq!(face.data().len(), 5 * 5 * 4);
        assert!(face.data().iter().all(|&v| v == 1.0));
    }
}

#[test]
fn test_left_face_centre_samples_panorama_centre() {
    let (w, h) = (64, 32);
    let pano = coordinate_pano(w, h);
    let cube = cubemap_project(&pano, 9, &SizeGuard::default()).unwrap();

    let px = centre(cube.face(CubeFace::Left));
    assert!((px[0] - w as f32 / 2.0).abs() <= 1.0, "u = {}", px[0]);
    assert!((px[1] - h as f32 / 2.0).abs() <= 1.0, "v = {}", px[1]);
}

#[test]
fn test_front_face_centre_samples_quarter_turn() {
    let (w, h) = (64, 32);
    let pano = coordinate_pano(w, h);
    let cube = cubemap_project(&pano, 9, &SizeGuard::default()).unwrap();

    let px = centre(cube.face(CubeFace::Front));
    assert!((px[0] - 0.75 * w as f32).abs() <= 1.0, "u = {}", px[0]);
    assert!((px[1] - h as f32 / 2.0).abs() <= 1.0, "v = {}", px[1]);
}

#[test]
fn test_top_and_bottom_faces_hit_poles() {
    let pano = coordinate_pano(64, 32);
    let cube = cubemap_project(&pano, 9, &SizeGuard::default()).unwrap();
    assert_eq!(centre(cube.face(CubeFace::Top))[1], 0.0);
    assert_eq!(centre(cube.face(CubeFace::Bottom))[1], 31.0);
}

#[test]
fn test_cubemap_caps_source_and_face() {
    let pano = coordinate_pano(200, 100);
    let guard = SizeGuard::new(50).unwrap();
    let cube = cubemap_project(&pano, 40, &guard).unwrap();

    assert_eq!(cube.face_size(), 25);
    let subjects: Vec<Subject> = cube.adjustments().iter().map(|a| a.subject).collect();
    assert_eq!(subjects, [Subject::Source, Subject::FaceSize]);
    assert_eq!(cube.adjustments()[0].applied, (50, 25));
}

// === SizeGuard ===

#[test]
fn test_cap_dimension_contract() {
    assert_eq!(cap_dimension(512, 8000), 512);
    assert_eq!(cap_dimension(8000, 8000), 8000);
    assert_eq!(cap_dimension(9000, 8000), 8000);
}

#[test]
fn test_cap_image_contract() {
    let pano = coordinate_pano(120, 60);

    let same = cap_image(&pano, 120).unwrap();
    assert_eq!(*same, pano);

    let smaller = cap_image(&pano, 30).unwrap();
    assert_eq!(smaller.max_dimension(), 30);
    assert_eq!(smaller.dimensions(), (30, 15));
    // Area average of columns 0..4 is 1.5
    assert_abs_diff_eq!(smaller.pixel(0, 0)[0], 1.5, epsilon = 1e-4);
}

// === Perspective ===

#[test]
fn test_perspective_forward_centre() {
    let (w, h) = (64, 32);
    let pano = coordinate_pano(w, h);
    let params = PerspectiveParams::new(90.0, 90.0, 0.0, 0.0, 33, 33);
    let view = perspective_project(&pano, &params, &SizeGuard::default()).unwrap();

    let px = centre(view.image());
    assert_abs_diff_eq!(px[0], w as f32 / 2.0, epsilon = 1e-3);
    assert_abs_diff_eq!(px[1], h as f32 / 2.0, epsilon = 1e-3);
}

#[test]
fn test_perspective_back_centre_on_seam() {
    let (w, h) = (64, 32);
    let params = PerspectiveParams::new(90.0, 60.0, 180.0, 0.0, 33, 33);
    let cam = Camera::new(&params).unwrap();

    let (u, v) = cam.source_coordinate(16, 16, w, h);
    assert!(u <= 1.0 || u >= w as f64 - 1.0, "u = {}", u);
    assert_abs_diff_eq!(v, h as f64 / 2.0, epsilon = 1e-9);

    let cam = Camera::new(&params.with_orientation(-180.0, 0.0)).unwrap();
    let (u, _) = cam.source_coordinate(16, 16, w, h);
    assert!(u <= 1.0 || u >= w as f64 - 1.0, "u = {}", u);
}

#[test]
fn test_perspective_right_view_centre() {
    let (w, h) = (64, 32);
    let pano = coordinate_pano(w, h);
    let params = PerspectiveParams::new(90.0, 60.0, 90.0, 0.0, 33, 33);
    let view = perspective_project(&pano, &params, &SizeGuard::default()).unwrap();
    assert_abs_diff_eq!(centre(view.image())[0], 0.75 * w as f32, epsilon = 1e-3);
}

#[test]
fn test_perspective_near_180_fov_is_finite() {
    let pano = coordinate_pano(64, 32);
    let params = PerspectiveParams::new(179.9, 179.9, 30.0, -20.0, 41, 41);
    let view = perspective_project(&pano, &params, &SizeGuard::default()).unwrap();
    assert!(view.image().data().iter().all(|v| v.is_finite()));

    for fov in [180.0, 200.0] {
        let bad = PerspectiveParams { fov_h: fov, ..params };
        let err = perspective_project(&pano, &bad, &SizeGuard::default()).unwrap_err();
        assert!(matches!(err, OpsError::InvalidParameter(_)));
        let bad = PerspectiveParams { fov_v: fov, ..params };
        assert!(perspective_project(&pano, &bad, &SizeGuard::default()).is_err());
    }
}

#[test]
fn test_perspective_rejects_empty_source() {
    let empty = Image::from_data(0, 0, 3, Vec::new()).unwrap();
    let err = perspective_project(&empty, &PerspectiveParams::default(), &SizeGuard::default())
        .unwrap_err();
    assert!(matches!(err, OpsError::InvalidInput(_)));
}

#[test]
fn test_rotation_order_matters() {
    let (w, h) = (3600, 1800);
    let rot = ViewRotation::new(45.0, 30.0);

    let canonical = ray_source_coordinate(rot.apply(DVec3::Z), w, h);
    let reversed = ray_source_coordinate(rot.apply_heading(rot.apply_pitch(DVec3::Z)), w, h);
    assert!(
        (canonical.0 - reversed.0).abs() > 1.0 || (canonical.1 - reversed.1).abs() > 1.0,
        "{:?} vs {:?}",
        canonical,
        reversed
    );

    let params = PerspectiveParams::new(90.0, 60.0, 45.0, 30.0, 33, 33);
    let cam = Camera::new(&params).unwrap();
    let (u, v) = cam.source_coordinate(16, 16, w, h);
    assert_abs_diff_eq!(u, canonical.0, epsilon = 1e-9);
    assert_abs_diff_eq!(v, canonical.1, epsilon = 1e-9);
}

// === Both ===

#[test]
fn test_projections_are_deterministic() {
    let pano = coordinate_pano(96, 48);
    let guard = SizeGuard::default();

    let a = cubemap_project(&pano, 17, &guard).unwrap();
    let b = cubemap_project(&pano, 17, &guard).unwrap();
    assert_eq!(a.faces(), b.faces());

    let params = PerspectiveParams::new(100.0, 55.0, -37.5, 12.0, 48, 27);
    let a = perspective_project(&pano, &params, &guard).unwrap();
    let b = perspective_project(&pano, &params, &guard).unwrap();
    assert_eq!(a.image(), b.image());
}
