// Ray picking and hover highlight tests.

use app_core::constants::*;
use app_core::{
    pick_frame, ray_sphere, screen_to_ndc, SceneConfig, SceneState,
};
use glam::Vec3;

fn scene() -> SceneState {
    SceneState::new(SceneConfig::default())
}

/// Project a world point through the scene camera to NDC.
fn ndc_of(scene: &SceneState, point: Vec3) -> [f32; 2] {
    let vp = scene.camera.projection_matrix() * scene.camera.view_matrix();
    let p = vp.project_point3(point);
    [p.x, p.y]
}

#[test]
fn screen_to_ndc_maps_corners_and_center() {
    assert_eq!(screen_to_ndc(800.0, 600.0, 0.0, 0.0), [-1.0, 1.0]);
    assert_eq!(screen_to_ndc(800.0, 600.0, 800.0, 600.0), [1.0, -1.0]);
    assert_eq!(screen_to_ndc(800.0, 600.0, 400.0, 300.0), [0.0, 0.0]);
}

#[test]
fn ray_sphere_hits_and_misses() {
    let origin = Vec3::new(0.0, 0.0, 5.0);
    let dir = Vec3::new(0.0, 0.0, -1.0);
    let t = ray_sphere(origin, dir, Vec3::ZERO, 1.0).expect("straight-on hit");
    assert!((t - 4.0).abs() < 1e-5, "entry point at the near surface");

    assert!(ray_sphere(origin, dir, Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
    assert!(
        ray_sphere(origin, dir, Vec3::new(0.0, 0.0, 10.0), 1.0).is_none(),
        "spheres behind the origin do not count"
    );
}

#[test]
fn pick_frame_prefers_the_nearest_hit() {
    let centers = [Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -2.0)];
    let hit = pick_frame(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), &centers, 0.5);
    assert_eq!(hit, Some(1));

    let miss = pick_frame(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), &centers, 0.5);
    assert_eq!(miss, None);
}

#[test]
fn camera_center_ray_points_at_the_target() {
    let scene = scene();
    let (origin, dir) = scene.camera.ray_from_ndc(0.0, 0.0);
    let expect = (scene.camera.target - scene.camera.eye).normalize();
    assert!(dir.dot(expect) > 0.999, "center ray aims at the look target");
    assert!(
        (origin - scene.camera.eye).length() < CAMERA_ZNEAR * 2.0,
        "ray starts on the near plane in front of the eye"
    );
}

#[test]
fn projected_flame_position_registers_a_flame_hit() {
    let scene = scene();
    let ndc = ndc_of(&scene, scene.flame_world_position());
    assert!(scene.flame_hit(ndc[0], ndc[1]));
    assert!(!scene.flame_hit(0.9, 0.9), "sky click misses the flame");
}

#[test]
fn flame_hit_is_suppressed_once_blown_out() {
    let mut scene = scene();
    let ndc = ndc_of(&scene, scene.flame_world_position());
    let mut cues = Vec::new();
    scene.blow_out_candle(&mut cues);
    assert!(!scene.flame_hit(ndc[0], ndc[1]));
}

#[test]
fn projected_frame_center_picks_that_frame() {
    let scene = scene();
    for (i, frame) in scene.frames.iter().enumerate() {
        let ndc = ndc_of(&scene, frame.position);
        assert_eq!(
            scene.pick_frame_at(ndc[0], ndc[1]),
            Some(i),
            "frame {i} under its own projection"
        );
    }
    assert_eq!(scene.pick_frame_at(0.9, 0.9), None, "sky picks nothing");
}

#[test]
fn hover_highlight_eases_in_and_back_out() {
    let mut scene = scene();
    let mut cues = Vec::new();

    scene.update_hover(Some(1));
    assert_eq!(scene.hovered_frame(), Some(1));
    scene.tick(0.1, &mut cues);
    let mid = scene.frames[1].scale;
    assert!(mid > 1.0 && mid < 1.0 + HOVER_SCALE_GAIN, "scaling up");

    for _ in 0..5 {
        scene.tick(0.1, &mut cues);
    }
    assert!((scene.frames[1].scale - (1.0 + HOVER_SCALE_GAIN)).abs() < 1e-4);
    let highlight = Vec3::from(FRAME_HIGHLIGHT_COLOR);
    assert!((scene.frames[1].color - highlight).length() < 1e-3);

    scene.update_hover(None);
    assert_eq!(scene.hovered_frame(), None);
    for _ in 0..6 {
        scene.tick(0.1, &mut cues);
    }
    assert!((scene.frames[1].scale - 1.0).abs() < 1e-4, "eased back to rest");
}

#[test]
fn moving_the_hover_cross_fades_both_frames() {
    let mut scene = scene();
    let mut cues = Vec::new();
    scene.update_hover(Some(0));
    for _ in 0..5 {
        scene.tick(0.1, &mut cues);
    }
    scene.update_hover(Some(2));
    for _ in 0..5 {
        scene.tick(0.1, &mut cues);
    }
    assert!((scene.frames[0].scale - 1.0).abs() < 1e-4, "old target released");
    assert!(
        (scene.frames[2].scale - (1.0 + HOVER_SCALE_GAIN)).abs() < 1e-4,
        "new target fully highlighted"
    );
}

#[test]
fn out_of_range_hover_index_is_ignored() {
    let mut scene = scene();
    scene.update_hover(Some(99));
    assert_eq!(scene.hovered_frame(), None);
}
