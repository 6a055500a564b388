// Camera controller: orbit conversion, preset transitions, autorotation, zoom.

use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use showroom_core::camera::{cartesian_to_spherical, clamp_beta, spherical_to_cartesian, CameraController};
use showroom_core::constants::{BETA_EPSILON, TRANSITION_STEPS};
use showroom_core::{EngineConfig, PresetCatalog, RenderEngine, SceneError};
use std::f32::consts::PI;

const FRAME: f32 = 1.0 / 60.0;

fn setup() -> (RenderEngine, CameraController, PresetCatalog) {
    let mut engine = RenderEngine::new(EngineConfig::default());
    engine.initialize(1280, 720).expect("engine init");
    let catalog = PresetCatalog::builtin();
    let mut camera = CameraController::new();
    camera.initialize_camera(&mut engine, &catalog).expect("camera init");
    (engine, camera, catalog)
}

fn run_frames(engine: &mut RenderEngine, camera: &mut CameraController, frames: u32) {
    for _ in 0..frames {
        camera.tick(engine, FRAME);
    }
}

#[test]
fn spherical_round_trip_reproduces_position() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let target = Vec3::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-2.0..3.0),
            rng.gen_range(-5.0..5.0),
        );
        let offset = Vec3::new(
            rng.gen_range(-8.0..8.0),
            rng.gen_range(-8.0..8.0),
            rng.gen_range(-8.0..8.0),
        );
        if offset.length() < 0.01 {
            continue;
        }
        let position = target + offset;
        let pose = cartesian_to_spherical(position, target).expect("non-degenerate");
        let back = spherical_to_cartesian(&pose);
        assert!(
            back.distance(position) < 1e-3 * (1.0 + offset.length()),
            "{position:?} -> {pose:?} -> {back:?}"
        );
    }
}

#[test]
fn spherical_uses_atan2_and_acos() {
    let pose = cartesian_to_spherical(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO).unwrap();
    assert!((pose.radius - 2.0).abs() < 1e-6);
    assert!((pose.alpha - PI / 2.0).abs() < 1e-6);
    assert!((pose.beta - PI / 2.0).abs() < 1e-6);

    let up = cartesian_to_spherical(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO).unwrap();
    assert!(up.beta.abs() < 1e-6);
    assert!((clamp_beta(up.beta) - BETA_EPSILON).abs() < 1e-6);
}

#[test]
fn zero_radius_is_rejected() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(cartesian_to_spherical(p, p), Err(SceneError::DegenerateOrbit));
}

#[test]
fn initialize_places_static_camera_at_default_preset() {
    let (engine, camera, _) = setup();
    let cam = engine.camera().expect("camera");
    assert!(!cam.inputs_attached());
    assert!(cam.position().distance(Vec3::new(4.0, 3.0, 4.0)) < 1e-3);
    assert!((cam.fov - 52f32.to_radians()).abs() < 1e-5);
    assert_eq!(camera.active_preset(), Some("default"));
    let published = camera.settings().expect("published");
    assert!(published.current_zoom.is_some());
}

#[test]
fn beta_stays_clamped_for_every_preset() {
    let (mut engine, mut camera, catalog) = setup();
    for preset in catalog.camera_presets() {
        camera.apply_preset(&mut engine, &catalog, preset.id).unwrap();
        run_frames(&mut engine, &mut camera, TRANSITION_STEPS + 5);
        let beta = engine.camera().unwrap().pose.beta;
        assert!(
            (BETA_EPSILON - 1e-6..=PI - BETA_EPSILON + 1e-6).contains(&beta),
            "{} produced beta {}",
            preset.id,
            beta
        );
    }
}

#[test]
fn transition_takes_sixty_steps() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "bedroom-suite").unwrap();
    assert!(camera.is_animating());

    run_frames(&mut engine, &mut camera, TRANSITION_STEPS - 1);
    assert!(camera.is_animating());
    run_frames(&mut engine, &mut camera, 1);
    assert!(!camera.is_animating());

    let expected = Vec3::new(4.8, 3.2, 4.8);
    let pos = engine.camera().unwrap().position();
    assert!(pos.distance(expected) < 1e-2, "{pos:?}");
}

#[test]
fn large_frame_delta_finishes_transition() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "living-standard").unwrap();
    camera.tick(&mut engine, 5.0);
    assert!(!camera.is_animating());
}

#[test]
fn huge_frame_delta_mid_transition_finishes_cleanly() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "overhead").unwrap();
    camera.tick(&mut engine, FRAME);
    assert!(camera.is_animating());
    camera.tick(&mut engine, 1e12);
    assert!(!camera.is_animating());
    let pose = engine.camera().unwrap().pose;
    assert!(pose.alpha.is_finite() && pose.beta.is_finite() && pose.radius.is_finite());
    assert!(engine.camera().unwrap().position().is_finite());
}

#[test]
fn new_preset_supersedes_running_transition() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "bathroom-modern").unwrap();
    run_frames(&mut engine, &mut camera, 20);
    let mid = engine.camera().unwrap().pose;

    camera.apply_preset(&mut engine, &catalog, "living-commercial").unwrap();
    camera.tick(&mut engine, 0.0);
    let start = engine.camera().unwrap().pose;
    assert!((start.radius - mid.radius).abs() < 1e-4);
    assert!(start.target.distance(mid.target) < 1e-4);

    run_frames(&mut engine, &mut camera, TRANSITION_STEPS);
    let pos = engine.camera().unwrap().position();
    assert!(pos.distance(Vec3::new(5.2, 3.2, 3.8)) < 1e-2);
}

#[test]
fn unknown_preset_leaves_camera_untouched() {
    let (mut engine, mut camera, catalog) = setup();
    let before = engine.camera().unwrap().pose;
    let err = camera.apply_preset(&mut engine, &catalog, "nope").unwrap_err();
    assert!(matches!(err, SceneError::PresetNotFound { .. }));
    assert_eq!(engine.camera().unwrap().pose, before);
    assert!(!camera.is_animating());
    assert_eq!(camera.active_preset(), Some("default"));
}

#[test]
fn zoom_in_never_passes_min_zoom() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "showcase-orbit").unwrap();
    run_frames(&mut engine, &mut camera, TRANSITION_STEPS);
    for _ in 0..50 {
        camera.zoom_in(&mut engine, 0.7);
        assert!(camera.zoom(&engine).unwrap() >= 3.0 - 1e-6);
    }
    assert!((camera.zoom(&engine).unwrap() - 3.0).abs() < 1e-6);
}

#[test]
fn zoom_out_never_passes_max_zoom() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "showcase-orbit").unwrap();
    for _ in 0..50 {
        camera.zoom_out(&mut engine, 1.3);
        assert!(camera.zoom(&engine).unwrap() <= 10.0 + 1e-6);
    }
    camera.set_zoom(&mut engine, 250.0);
    assert!((camera.zoom(&engine).unwrap() - 10.0).abs() < 1e-6);
}

#[test]
fn zoom_during_transition_sticks() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "bedroom-kids").unwrap();
    run_frames(&mut engine, &mut camera, 10);
    camera.set_zoom(&mut engine, 5.0);
    run_frames(&mut engine, &mut camera, TRANSITION_STEPS);
    assert!((camera.zoom(&engine).unwrap() - 5.0).abs() < 1e-4);
}

#[test]
fn autorotation_runs_after_transition_and_stops_on_next_preset() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "showcase-orbit").unwrap();
    assert!(camera.is_auto_rotating());
    run_frames(&mut engine, &mut camera, TRANSITION_STEPS);
    let a0 = engine.camera().unwrap().pose.alpha;

    camera.tick(&mut engine, 1.0);
    let a1 = engine.camera().unwrap().pose.alpha;
    let delta = (a1 - a0).rem_euclid(2.0 * PI);
    assert!((delta - 0.25).abs() < 1e-4, "delta {delta}");

    camera.apply_preset(&mut engine, &catalog, "default").unwrap();
    assert!(!camera.is_auto_rotating());
}

#[test]
fn alpha_takes_the_short_way_round() {
    let (mut engine, mut camera, _) = setup();
    camera
        .look_at(&mut engine, Vec3::new(-4.0, 1.0, 0.1), Vec3::ZERO)
        .unwrap();
    run_frames(&mut engine, &mut camera, TRANSITION_STEPS);
    camera
        .look_at(&mut engine, Vec3::new(-4.0, 1.0, -0.1), Vec3::ZERO)
        .unwrap();
    let start = engine.camera().unwrap().pose.alpha;
    camera.tick(&mut engine, FRAME * 30.0);
    let half = engine.camera().unwrap().pose.alpha;
    assert!((half - start).abs() < 0.1, "swung {} rad", half - start);
}

#[test]
fn overhead_preset_is_clamped_off_the_pole() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "overhead").unwrap();
    run_frames(&mut engine, &mut camera, TRANSITION_STEPS);
    let pose = engine.camera().unwrap().pose;
    assert!((pose.beta - BETA_EPSILON).abs() < 1e-5);
    assert!((pose.radius - 7.0).abs() < 1e-4);
}

#[test]
fn set_target_cancels_transition() {
    let (mut engine, mut camera, catalog) = setup();
    camera.apply_preset(&mut engine, &catalog, "bathroom-spa").unwrap();
    camera.set_target(&mut engine, Vec3::new(1.0, 1.0, 1.0));
    assert!(!camera.is_animating());
    assert_eq!(camera.target(&engine), Some(Vec3::new(1.0, 1.0, 1.0)));
}

#[test]
fn subscribers_see_current_and_later_settings() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let (mut engine, mut camera, catalog) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    camera.subscribe(move |s| sink.borrow_mut().push(s.fov_degrees));
    camera.apply_preset(&mut engine, &catalog, "bedroom-suite").unwrap();
    assert_eq!(*seen.borrow(), vec![52.0, 75.0]);
}

#[test]
fn dispose_removes_camera() {
    let (mut engine, mut camera, _) = setup();
    camera.dispose(&mut engine);
    assert!(engine.camera().is_none());
    assert!(camera.settings().is_none());
    assert_eq!(camera.zoom(&engine), None);
}
