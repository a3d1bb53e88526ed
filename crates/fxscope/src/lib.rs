//! fxscope-rs: per-actor GL state effects for 3D marker scenes.
//!
//! Actors are drawn one after another against a shared, GL-style draw state.
//! Effects are small functions that mutate that state; binding a list of them
//! to an actor makes them fire right before the actor draws, so each actor can
//! choose its own blending mode and depth testing.
//!
//! # Quick Start
//!
//! ```no_run
//! use fxscope::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut scene = Scene::new();
//!     scene.add_actor(MarkerActor::new(
//!         "squares",
//!         vec![Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0)],
//!         vec![Vec3::X, Vec3::Y],
//!         MarkerShape::Square,
//!         0.5,
//!         0.2,
//!     )?)?;
//!
//!     let mut showm = ShowManager::new(scene, Options::default())?;
//!     showm.attach_effects(
//!         "squares",
//!         [effects::GL_RESET_BLEND, effects::GL_ENABLE_DEPTH, effects::GL_SET_ADDITIVE_BLENDING],
//!     )?;
//!
//!     showm.start(|m| {
//!         m.render();
//!         m.camera_mut().azimuth(1.0);
//!         if m.frames_rendered() == 100 {
//!             m.exit();
//!         }
//!         Ok(())
//!     })?;
//!     showm.screenshot("out.png")
//! }
//! ```
//!
//! # Crates
//!
//! - `fxscope-core`: GL state, effects, actors, scene, options, errors
//! - `fxscope-render`: camera, software rasterizer, screenshots
//! - this crate: display loop, headless recording, the GL-states showcase

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod gl_states;
mod headless;
mod show_manager;

// Re-export core types
pub use fxscope_core::{
    effects,
    error::{FxscopeError, Result},
    BlendComponent, BlendFactor, BlendOperation, BlendState, Capability, CompareFunction, Effect, Effects, GlState, MarkerActor, MarkerShape, ObserverId, ObserverList,
    Options, Preset, RenderObserver, Scene, Mat4, Vec2, Vec3, Vec4,
};

// Re-export render types
pub use fxscope_render::{
    Camera, FrameStats, Framebuffer, MarkerRenderer, ProjectionMode, ScreenshotOptions,
};

pub use headless::{record, record_with_options, render_to_image};
pub use show_manager::ShowManager;

/// Initializes `env_logger` once; later calls are no-ops.
///
/// Verbosity follows `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Binds effects to an actor of the manager's scene.
///
/// Shorthand for [`ShowManager::attach_effects`].
pub fn apply_effects(
    showm: &mut ShowManager,
    actor: &str,
    effects: impl Into<Effects>,
) -> Result<ObserverId> {
    showm.attach_effects(actor, effects)
}
