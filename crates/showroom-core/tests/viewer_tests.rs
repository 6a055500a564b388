// Viewer facade: the host-facing flow from start-up to teardown.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use showroom_core::constants::TRANSITION_STEPS;
use showroom_core::state::Published;
use showroom_core::{EngineConfig, Product3D, SceneError, Viewer};

fn started() -> Viewer {
    let mut viewer = Viewer::new(EngineConfig::default());
    viewer.initialize(1280, 720).expect("viewer init");
    viewer
}

#[test]
fn environment_load_moves_camera_to_suggested_shot() {
    let mut viewer = started();
    let state = viewer.load_environment("living-room").unwrap();
    let shot = state.suggested_camera.unwrap();
    assert!(viewer.camera().is_animating());
    for _ in 0..TRANSITION_STEPS {
        assert!(viewer.frame(1.0 / 60.0));
    }
    let cam = viewer.engine().camera().unwrap();
    assert!(cam.pose.target.distance(shot.target) < 1e-4);
    assert!(cam.position().distance(shot.position) < 1e-2);
}

#[test]
fn full_session_then_dispose() {
    let mut viewer = started();
    viewer.load_environment("bedroom").unwrap();
    assert_eq!(viewer.apply_lighting("natural").unwrap(), 3);
    viewer.apply_camera("bedroom-suite").unwrap();
    viewer.set_intensity_percent(150.0);
    viewer.place_product(&Product3D::new("lamp", Vec3::new(0.0, 0.0, 1.0))).unwrap();

    let info = viewer.performance_info();
    assert!(info.meshes > 6);
    assert_eq!(info.lights, 3);
    assert!(info.triangles > 0);

    viewer.dispose();
    assert!(viewer.is_disposed());
    assert!(!viewer.frame(0.016));
    assert_eq!(viewer.performance_info().meshes, 0);
    assert!(matches!(viewer.apply_lighting("warm"), Err(SceneError::Disposed)));
    viewer.dispose();
}

#[test]
fn bad_ids_leave_scene_alone() {
    let mut viewer = started();
    viewer.load_environment("bathroom").unwrap();
    viewer.apply_lighting("neutral").unwrap();
    let nodes = viewer.engine().node_count();
    assert!(viewer.load_environment("attic").is_err());
    assert!(viewer.apply_lighting("strobe").is_err());
    assert!(viewer.apply_camera("drone").is_err());
    assert_eq!(viewer.engine().node_count(), nodes);
    assert_eq!(viewer.lighting().tracked_light_count(), 2);
}

#[test]
fn lighting_state_is_published() {
    let mut viewer = started();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    viewer
        .lighting_mut()
        .subscribe(move |s| sink.borrow_mut().push((s.preset_id.clone(), s.light_count)));
    viewer.apply_lighting("warm").unwrap();
    viewer.apply_lighting("dramatic").unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![(Some("warm".to_string()), 2), (Some("dramatic".to_string()), 3)]
    );
}

#[test]
fn toggling_and_light_info_through_facade() {
    let mut viewer = started();
    viewer.apply_lighting("neutral").unwrap();
    assert!(!viewer.toggle_lights());
    let info = viewer.light_info("key_light").unwrap();
    assert!(!info.enabled);
    assert_eq!(info.color, "#FFFFFF");
    assert!(viewer.light_info("nope").is_none());
}

#[test]
fn published_replays_latest_and_unsubscribes() {
    let mut p: Published<u32> = Published::new();
    p.publish(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let id = p.subscribe(move |v| sink.borrow_mut().push(*v));
    p.publish(2);
    assert!(p.unsubscribe(id));
    p.publish(3);
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(p.get(), Some(&3));
    assert_eq!(p.version(), 3);
    assert_eq!(p.subscriber_count(), 0);
}

#[test]
fn look_at_and_retarget_through_facade() {
    let mut viewer = started();
    viewer.apply_lighting("natural").unwrap();
    assert_eq!(viewer.all_light_info().len(), viewer.lighting().tracked_light_count());

    viewer
        .look_at(Vec3::new(0.0, 2.0, 6.0), Vec3::new(0.0, 1.0, 0.0))
        .unwrap();
    for _ in 0..TRANSITION_STEPS {
        viewer.frame(1.0 / 60.0);
    }
    let cam = viewer.engine().camera().unwrap();
    assert!(cam.position().distance(Vec3::new(0.0, 2.0, 6.0)) < 1e-2);

    viewer.set_camera_target(Vec3::new(1.0, 0.5, 0.0));
    assert_eq!(viewer.camera().target(viewer.engine()), Some(Vec3::new(1.0, 0.5, 0.0)));
    assert!(viewer.look_at(Vec3::ONE, Vec3::ONE).is_err());
}
