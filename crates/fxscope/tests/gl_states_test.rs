//! Integration tests for the GL-states showcase.
//!
//! The display loop runs with a zero tick interval and a small window so the
//! full 1000-frame animation finishes quickly.

use fxscope::gl_states::{
    self, BindingChange, GlStatesDemo, Phase, ADDITIVE_BLENDING, AZIMUTH_STEP_DEGREES,
    LAST_FRAME, NORMAL_BLENDING, NO_DEPTH_TEST, SWAP_FRAME,
};
use fxscope::{BlendFactor, FxscopeError, ObserverId, Options, ShowManager, Vec3};

fn fast_manager() -> ShowManager {
    let scene = gl_states::build_scene().expect("scene");
    let options = Options::default()
        .with_window_size(48, 48)
        .with_tick_interval_ms(0);
    ShowManager::new(scene, options).expect("show manager")
}

fn observer_ids(showm: &ShowManager, actor: &str) -> Vec<ObserverId> {
    showm.scene().actor(actor).expect("actor").observers().ids()
}

fn effect_names(showm: &ShowManager, actor: &str) -> Vec<Vec<String>> {
    showm
        .scene()
        .actor(actor)
        .expect("actor")
        .observers()
        .iter()
        .map(|o| o.effects().names().into_iter().map(String::from).collect())
        .collect()
}

/// Heading of the camera around the vertical axis, in degrees.
fn camera_heading(showm: &ShowManager) -> f32 {
    let offset: Vec3 = showm.camera().position - showm.camera().target;
    offset.x.atan2(offset.z).to_degrees()
}

/// Helper: check that a pixel buffer is not uniform.
fn has_nontrivial_content(pixels: &[u8]) -> bool {
    let first = &pixels[0..4];
    !pixels.chunks(4).all(|px| px == first)
}

#[test]
fn loop_stops_at_last_frame() {
    let mut showm = fast_manager();
    let mut demo = GlStatesDemo::bind(&mut showm).unwrap();

    let mut seen = Vec::new();
    let ticks = showm
        .start(|m| {
            demo.tick(m)?;
            seen.push(demo.counter());
            Ok(())
        })
        .unwrap();

    assert_eq!(ticks, LAST_FRAME);
    assert_eq!(demo.counter(), LAST_FRAME);
    assert_eq!(demo.phase(), Phase::Done);
    assert_eq!(showm.frames_rendered(), LAST_FRAME);
    assert!(showm.exit_requested());
    assert!(seen.iter().copied().eq(1..=LAST_FRAME));
}

#[test]
fn swap_happens_once_at_swap_frame() {
    let mut showm = fast_manager();
    let mut demo = GlStatesDemo::bind(&mut showm).unwrap();

    let original = demo.no_depth_observer();
    assert_eq!(
        effect_names(&showm, NORMAL_BLENDING),
        vec![vec!["gl_set_normal_blending".to_string()]]
    );
    assert_eq!(
        effect_names(&showm, NO_DEPTH_TEST),
        vec![vec![
            "gl_reset_blend".to_string(),
            "gl_disable_blend".to_string(),
            "gl_disable_depth".to_string(),
        ]]
    );
    let normal_before = observer_ids(&showm, NORMAL_BLENDING);
    let additive_before = observer_ids(&showm, ADDITIVE_BLENDING);
    assert_eq!(observer_ids(&showm, NO_DEPTH_TEST), vec![original]);

    for _ in 1..SWAP_FRAME {
        demo.tick(&mut showm).unwrap();
        assert_eq!(demo.phase(), Phase::Running);
    }
    assert!(demo.changes().is_empty());

    demo.tick(&mut showm).unwrap();
    assert_eq!(demo.counter(), SWAP_FRAME);
    assert_eq!(demo.phase(), Phase::Swapping);

    let replacement = demo.no_depth_observer();
    assert_ne!(replacement, original);
    assert_eq!(
        demo.changes(),
        &[
            BindingChange::Detached {
                actor: NO_DEPTH_TEST.to_string(),
                id: original,
            },
            BindingChange::Attached {
                actor: NO_DEPTH_TEST.to_string(),
                id: replacement,
            },
        ]
    );

    let no_depth = showm.scene().actor(NO_DEPTH_TEST).unwrap();
    assert_eq!(no_depth.observers().ids(), vec![replacement]);
    let bound = no_depth.observers().iter().next().unwrap();
    assert_eq!(bound.effects().names(), vec!["gl_set_additive_blending"]);

    assert_eq!(observer_ids(&showm, NORMAL_BLENDING), normal_before);
    assert_eq!(observer_ids(&showm, ADDITIVE_BLENDING), additive_before);

    demo.tick(&mut showm).unwrap();
    assert_eq!(demo.phase(), Phase::Running);
    assert_eq!(demo.changes().len(), 2);
}

#[test]
fn additive_group_ends_frame_with_depth_and_additive_blend() {
    let mut showm = fast_manager();
    let mut demo = GlStatesDemo::bind(&mut showm).unwrap();
    demo.tick(&mut showm).unwrap();

    // The additive group draws last, so its state is what the frame ends with.
    let state = showm.renderer().state();
    assert!(state.blend_enabled);
    assert!(state.depth_test_enabled);
    assert_eq!(state.blend.color.src_factor, BlendFactor::SrcAlpha);
    assert_eq!(state.blend.color.dst_factor, BlendFactor::One);
}

#[test]
fn tick_turns_camera_by_azimuth_step() {
    let mut showm = fast_manager();
    let mut demo = GlStatesDemo::bind(&mut showm).unwrap();
    let distance = showm.camera().distance();
    let height = showm.camera().position.y;

    for _ in 0..3 {
        let before = camera_heading(&showm);
        demo.tick(&mut showm).unwrap();
        let turned = camera_heading(&showm) - before;
        assert!(
            (turned - AZIMUTH_STEP_DEGREES).abs() < 1e-3,
            "turned {turned} degrees"
        );
    }
    assert!((AZIMUTH_STEP_DEGREES - 1.0).abs() < f32::EPSILON);
    assert!((showm.camera().distance() - distance).abs() < 1e-3);
    assert!((showm.camera().position.y - height).abs() < 1e-4);
}

#[test]
fn tick_after_done_is_an_error() {
    let mut showm = fast_manager();
    let mut demo = GlStatesDemo::bind(&mut showm).unwrap();
    showm.start(|m| demo.tick(m)).unwrap();
    assert!(matches!(
        demo.tick(&mut showm),
        Err(FxscopeError::AnimationFinished(LAST_FRAME))
    ));
    assert_eq!(demo.counter(), LAST_FRAME);
}

#[test]
fn bind_requires_showcase_scene() {
    let mut showm = ShowManager::new(
        fxscope::Scene::new(),
        Options::default().with_window_size(8, 8),
    )
    .unwrap();
    assert!(matches!(
        GlStatesDemo::bind(&mut showm),
        Err(fxscope::FxscopeError::ActorNotFound(_))
    ));
}

#[test]
fn end_to_end_writes_screenshot() {
    let mut showm = fast_manager();
    let mut demo = GlStatesDemo::bind(&mut showm).unwrap();
    showm.start(|m| demo.tick(m)).unwrap();

    let dir = std::env::temp_dir().join(format!("fxscope_e2e_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    assert_eq!(gl_states::OUTPUT_PATH, "viz_fine_tuning_gl_context.png");
    let path = dir.join(gl_states::OUTPUT_PATH);
    let (width, height) = gl_states::OUTPUT_SIZE;

    fxscope::record(showm.scene(), showm.camera(), &path, width, height).unwrap();

    assert_eq!(image::image_dimensions(&path).unwrap(), (600, 600));
    let pixels = image::open(&path).unwrap().to_rgba8().into_raw();
    assert!(has_nontrivial_content(&pixels));

    std::fs::remove_dir_all(&dir).ok();
}
