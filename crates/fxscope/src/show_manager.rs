//! Timer-driven display loop.
//!
//! [`ShowManager`] owns the scene, the camera and the render target, and calls
//! a tick callback at a fixed interval on the current thread until the callback
//! asks it to stop.

use std::path::{Path, PathBuf};
use std::thread;

use fxscope_core::{Effects, FxscopeError, ObserverId, Options, Result, Scene};
use fxscope_render::{
    save_image, Camera, FrameStats, Framebuffer, MarkerRenderer, ScreenshotOptions,
};

/// Owns everything needed to display a scene.
pub struct ShowManager {
    scene: Scene,
    camera: Camera,
    renderer: MarkerRenderer,
    framebuffer: Framebuffer,
    options: Options,
    frames_rendered: u64,
    exit_requested: bool,
}

impl ShowManager {
    /// Creates a show manager with a camera fitted to the scene.
    pub fn new(scene: Scene, options: Options) -> Result<Self> {
        let (width, height) = options.window_size;
        let framebuffer = Framebuffer::new(width, height)?;
        let camera = Camera::new(framebuffer.aspect_ratio());

        let mut manager = Self {
            scene,
            camera,
            renderer: MarkerRenderer::new(),
            framebuffer,
            options,
            frames_rendered: 0,
            exit_requested: false,
        };
        manager.reset_camera();
        Ok(manager)
    }

    /// Returns the scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the scene for modification (adding actors, binding effects).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Returns the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Returns the camera for modification.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Returns the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the render target.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Returns the renderer (and with it the current GL state).
    pub fn renderer(&self) -> &MarkerRenderer {
        &self.renderer
    }

    /// Binds effects to an actor; they fire against this manager's GL state
    /// right before the actor draws.
    pub fn attach_effects(
        &mut self,
        actor: &str,
        effects: impl Into<Effects>,
    ) -> Result<ObserverId> {
        self.scene.attach_effects(actor, effects)
    }

    /// Removes one effect binding from an actor.
    pub fn detach_effects(&mut self, actor: &str, id: ObserverId) -> Result<()> {
        self.scene.detach_effects(actor, id)
    }

    /// Fits the camera to the scene bounds, if the scene has any.
    pub fn reset_camera(&mut self) {
        if let Some((min, max)) = self.scene.bounding_box() {
            self.camera.look_at_box(min, max);
        }
    }

    /// Renders one frame into the render target.
    pub fn render(&mut self) -> FrameStats {
        let stats = self.renderer.render(
            &self.scene,
            &self.camera,
            &mut self.framebuffer,
            &self.options,
        );
        self.frames_rendered += 1;
        stats
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Asks the loop to stop after the current tick.
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    /// Returns true once [`exit`](Self::exit) was called.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Runs the display loop.
    ///
    /// Calls `tick` every `options.tick_interval_ms` until it calls
    /// [`exit`](Self::exit), returns an error, or `options.max_frames` ticks
    /// have run. Returns the number of ticks.
    pub fn start<F>(&mut self, mut tick: F) -> Result<u64>
    where
        F: FnMut(&mut ShowManager) -> Result<()>,
    {
        let interval = self.options.tick_interval();
        self.exit_requested = false;
        let mut ticks = 0u64;

        log::info!(
            "display loop started ({} actors, {:?} interval)",
            self.scene.len(),
            interval
        );
        while !self.exit_requested {
            if self.options.max_frames.is_some_and(|max| ticks >= max) {
                log::info!("display loop closed after {ticks} ticks");
                break;
            }
            tick(self)?;
            ticks += 1;
            if !interval.is_zero() && !self.exit_requested {
                thread::sleep(interval);
            }
        }
        log::info!("display loop stopped after {ticks} ticks");
        Ok(ticks)
    }

    /// Returns the current render target as RGBA8.
    pub fn snapshot(&self) -> Vec<u8> {
        self.framebuffer.to_rgba8()
    }

    /// Saves the current render target.
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<()> {
        save_image(
            path.as_ref(),
            &self.snapshot(),
            self.framebuffer.width(),
            self.framebuffer.height(),
            &ScreenshotOptions::default(),
        )
        .map_err(|e| FxscopeError::RenderError(format!("Failed to save image: {e}")))
    }

    /// Saves the current render target under a timestamped name in the
    /// working directory and returns the path.
    pub fn screenshot_auto(&self) -> Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = PathBuf::from(format!("screenshot_{timestamp}.png"));
        self.screenshot(&path)?;
        Ok(path)
    }
}
