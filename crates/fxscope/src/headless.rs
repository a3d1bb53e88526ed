//! Headless rendering API for fxscope-rs.
//!
//! Renders a scene to an image buffer or file without running the display
//! loop. The demo uses it for its final screenshot; it is also handy for tests
//! and batch processing.

use std::path::Path;

use fxscope_core::{FxscopeError, Options, Result, Scene};
use fxscope_render::{save_image, Camera, Framebuffer, MarkerRenderer, ScreenshotOptions};

/// Renders the scene to a raw RGBA pixel buffer.
///
/// Uses a fresh framebuffer and GL state, and a copy of `camera` with its
/// aspect ratio adapted to `width / height`.
///
/// The returned buffer has `width * height * 4` bytes, row by row from the
/// top-left pixel.
pub fn render_to_image(
    scene: &Scene,
    camera: &Camera,
    width: u32,
    height: u32,
    options: &Options,
) -> Result<Vec<u8>> {
    let mut framebuffer = Framebuffer::new(width, height)?;
    let mut camera = camera.clone();
    camera.set_aspect_ratio(framebuffer.aspect_ratio());

    let stats = MarkerRenderer::new().render(scene, &camera, &mut framebuffer, options);
    log::debug!("headless frame {width}x{height}: {stats:?}");
    Ok(framebuffer.to_rgba8())
}

/// Renders the scene and saves it as a PNG or JPEG file.
///
/// # Example
/// ```no_run
/// use fxscope::*;
///
/// let mut scene = Scene::new();
/// scene.add_actor(MarkerActor::new(
///     "pts",
///     vec![Vec3::ZERO, Vec3::X],
///     vec![Vec3::ONE],
///     MarkerShape::Square,
///     0.5,
///     0.2,
/// )?)?;
/// record(&scene, &Camera::default(), "output.png", 600, 600)?;
/// # Ok::<(), FxscopeError>(())
/// ```
pub fn record(
    scene: &Scene,
    camera: &Camera,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<()> {
    record_with_options(scene, camera, path, width, height, &Options::default())
}

/// Like [`record`], with explicit render options.
pub fn record_with_options(
    scene: &Scene,
    camera: &Camera,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    options: &Options,
) -> Result<()> {
    let pixels = render_to_image(scene, camera, width, height, options)?;
    save_image(
        path.as_ref(),
        &pixels,
        width,
        height,
        &ScreenshotOptions::default(),
    )
    .map_err(|e| FxscopeError::RenderError(format!("Failed to save image: {e}")))
}
