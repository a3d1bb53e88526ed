//! Headless rendering integration tests.

use fxscope::*;

fn squares() -> Scene {
    let mut scene = Scene::new();
    scene
        .add_actor(
            MarkerActor::new(
                "squares",
                vec![Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0)],
                vec![Vec3::X, Vec3::Y],
                MarkerShape::Square,
                0.5,
                0.2,
            )
            .unwrap(),
        )
        .unwrap();
    scene
}

fn fitted_camera(scene: &Scene) -> Camera {
    let mut camera = Camera::default();
    let (min, max) = scene.bounding_box().unwrap();
    camera.look_at_box(min, max);
    camera
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("fxscope_{}_{name}", std::process::id()))
}

#[test]
fn empty_scene_is_uniform_background() {
    let options = Options::default().with_background_color(Vec3::new(0.0, 0.0, 1.0));
    let pixels = render_to_image(&Scene::new(), &Camera::default(), 20, 10, &options).unwrap();
    assert_eq!(pixels.len(), 20 * 10 * 4);
    assert!(pixels.chunks(4).all(|px| px == [0, 0, 255, 0]));
}

#[test]
fn markers_change_the_image() {
    let scene = squares();
    let camera = fitted_camera(&scene);
    let pixels = render_to_image(&scene, &camera, 64, 64, &Options::default()).unwrap();
    assert!(pixels.chunks(4).any(|px| px[0] > 0 || px[1] > 0));
}

#[test]
fn effects_change_the_image() {
    let mut scene = squares();
    let camera = fitted_camera(&scene);
    let before = render_to_image(&scene, &camera, 64, 64, &Options::default()).unwrap();

    scene
        .attach_effects(
            "squares",
            [effects::gl_reset_blend, effects::gl_disable_blend],
        )
        .unwrap();
    let after = render_to_image(&scene, &camera, 64, 64, &Options::default()).unwrap();
    assert_ne!(before, after);
}

#[test]
fn record_writes_png_and_jpeg() {
    let scene = squares();
    let camera = fitted_camera(&scene);

    let png = temp_path("record.png");
    record(&scene, &camera, &png, 40, 30).unwrap();
    assert_eq!(image::image_dimensions(&png).unwrap(), (40, 30));

    let jpg = temp_path("record.jpg");
    record(&scene, &camera, &jpg, 40, 30).unwrap();
    assert_eq!(image::image_dimensions(&jpg).unwrap(), (40, 30));

    std::fs::remove_file(png).ok();
    std::fs::remove_file(jpg).ok();
}

#[test]
fn record_rejects_bad_requests() {
    let scene = squares();
    let camera = fitted_camera(&scene);
    assert!(matches!(
        record(&scene, &camera, temp_path("zero.png"), 0, 10),
        Err(FxscopeError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        record(&scene, &camera, temp_path("image.tga"), 10, 10),
        Err(FxscopeError::RenderError(_))
    ));
}

#[test]
fn show_manager_screenshot_matches_window_size() {
    let options = Options::default()
        .with_window_size(24, 16)
        .with_tick_interval_ms(0)
        .with_max_frames(2);
    let mut showm = ShowManager::new(squares(), options).unwrap();
    apply_effects(
        &mut showm,
        "squares",
        [effects::gl_reset_blend, effects::gl_enable_depth, effects::gl_set_additive_blending],
    )
    .unwrap();
    showm
        .start(|m| {
            m.render();
            Ok(())
        })
        .unwrap();
    assert_eq!(showm.snapshot().len(), 24 * 16 * 4);

    let path = temp_path("show.png");
    showm.screenshot(&path).unwrap();
    assert_eq!(image::image_dimensions(&path).unwrap(), (24, 16));
    std::fs::remove_file(path).ok();
}

#[test]
fn options_load_from_file() {
    let path = temp_path("options.json");
    let options = Options::default().with_window_size(32, 32).with_max_frames(3);
    std::fs::write(&path, options.to_json().unwrap()).unwrap();
    assert_eq!(Options::load(&path).unwrap(), options);
    std::fs::remove_file(path).ok();
}
