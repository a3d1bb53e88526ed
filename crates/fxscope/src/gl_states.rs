//! The GL-states showcase: three groups of translucent squares, each drawn
//! under a different per-actor GL state, stacked bottom to top:
//!
//! - `no_depth_test`: blending and depth test off
//! - `normal_blending`: straight alpha blending with depth test
//! - `additive_blending`: additive blending with depth test
//!
//! The camera turns one degree every tick. At tick [`SWAP_FRAME`] the
//! `no_depth_test` group swaps its effects for additive blending, and at tick
//! [`LAST_FRAME`] the loop stops.

use fxscope_core::effects::{
    GL_DISABLE_BLEND, GL_DISABLE_DEPTH, GL_ENABLE_DEPTH, GL_RESET_BLEND,
    GL_SET_ADDITIVE_BLENDING, GL_SET_NORMAL_BLENDING,
};
use fxscope_core::{FxscopeError, MarkerActor, MarkerShape, ObserverId, Result, Scene, Vec3};

use crate::show_manager::ShowManager;

/// Tick at which the `no_depth_test` group switches to additive blending.
pub const SWAP_FRAME: u64 = 400;
/// Tick at which the loop stops.
pub const LAST_FRAME: u64 = 1000;
/// Delay between ticks in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 5;
/// Camera rotation per tick, in degrees.
pub const AZIMUTH_STEP_DEGREES: f32 = 1.0;
/// Size of the display loop's render target.
pub const WINDOW_SIZE: (u32, u32) = (900, 768);
/// Where the final screenshot goes.
pub const OUTPUT_PATH: &str = "viz_fine_tuning_gl_context.png";
/// Final screenshot size in pixels.
pub const OUTPUT_SIZE: (u32, u32) = (600, 600);

/// Translation from one group to the next; each sits above the previous.
pub const GROUP_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 0.0);
/// Opacity shared by every marker.
pub const MARKER_OPACITY: f32 = 0.5;
/// Glyph size shared by every marker.
pub const MARKER_SCALE: f32 = 0.2;

/// Actor names, bottom group first.
pub const NO_DEPTH_TEST: &str = "no_depth_test";
pub const NORMAL_BLENDING: &str = "normal_blending";
pub const ADDITIVE_BLENDING: &str = "additive_blending";
pub const ACTOR_NAMES: [&str; 3] = [NO_DEPTH_TEST, NORMAL_BLENDING, ADDITIVE_BLENDING];

/// Centers of the first group.
pub const BASE_CENTERS: [Vec3; 3] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(-0.1, 0.0, 0.0),
    Vec3::new(0.1, 0.0, 0.0),
];

/// Colors shared by all three groups: red, green, blue.
pub const COLORS: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

/// Returns the three center sets, each one [`GROUP_OFFSET`] above the previous.
pub fn marker_centers() -> [[Vec3; 3]; 3] {
    let mut sets = [BASE_CENTERS; 3];
    for i in 1..sets.len() {
        sets[i] = sets[i - 1].map(|c| c + GROUP_OFFSET);
    }
    sets
}

/// Builds the scene with the three marker groups (no effects bound yet).
pub fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new();
    for (name, centers) in ACTOR_NAMES.iter().zip(marker_centers()) {
        let actor = MarkerActor::new(
            *name,
            centers.to_vec(),
            COLORS.to_vec(),
            MarkerShape::Square,
            MARKER_OPACITY,
            MARKER_SCALE,
        )?;
        scene.add_actor(actor)?;
    }
    Ok(scene)
}

/// Where the animation driver is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Rendering and turning the camera.
    Running,
    /// The tick that swapped the `no_depth_test` effects.
    Swapping,
    /// The loop was asked to stop.
    Done,
}

/// One change to an effect binding made by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingChange {
    /// An observer was removed.
    Detached { actor: String, id: ObserverId },
    /// An observer was added.
    Attached { actor: String, id: ObserverId },
}

/// Per-tick animation driver. Owns the frame counter.
#[derive(Debug)]
pub struct GlStatesDemo {
    counter: u64,
    phase: Phase,
    no_depth_observer: ObserverId,
    changes: Vec<BindingChange>,
}

impl GlStatesDemo {
    /// Binds the initial effects to the three groups.
    ///
    /// Fails with `ActorNotFound` if the manager's scene was not built with
    /// [`build_scene`].
    pub fn bind(showm: &mut ShowManager) -> Result<Self> {
        showm.attach_effects(NORMAL_BLENDING, GL_SET_NORMAL_BLENDING)?;
        let no_depth_observer = showm.attach_effects(
            NO_DEPTH_TEST,
            [GL_RESET_BLEND, GL_DISABLE_BLEND, GL_DISABLE_DEPTH],
        )?;
        showm.attach_effects(
            ADDITIVE_BLENDING,
            [GL_RESET_BLEND, GL_ENABLE_DEPTH, GL_SET_ADDITIVE_BLENDING],
        )?;

        Ok(Self {
            counter: 0,
            phase: Phase::Running,
            no_depth_observer,
            changes: Vec::new(),
        })
    }

    /// Number of ticks so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Observer currently bound to the `no_depth_test` group.
    pub fn no_depth_observer(&self) -> ObserverId {
        self.no_depth_observer
    }

    /// Binding changes made so far, oldest first.
    pub fn changes(&self) -> &[BindingChange] {
        &self.changes
    }

    /// Advances the animation by one frame.
    pub fn tick(&mut self, showm: &mut ShowManager) -> Result<()> {
        if self.phase == Phase::Done {
            return Err(FxscopeError::AnimationFinished(self.counter));
        }

        self.counter += 1;
        showm.render();
        showm.camera_mut().azimuth(AZIMUTH_STEP_DEGREES);

        self.phase = match self.counter {
            SWAP_FRAME => {
                self.swap_no_depth_effects(showm)?;
                Phase::Swapping
            }
            LAST_FRAME => {
                showm.exit();
                Phase::Done
            }
            _ => Phase::Running,
        };
        Ok(())
    }

    fn swap_no_depth_effects(&mut self, showm: &mut ShowManager) -> Result<()> {
        let old = self.no_depth_observer;
        showm.detach_effects(NO_DEPTH_TEST, old)?;
        self.changes.push(BindingChange::Detached {
            actor: NO_DEPTH_TEST.to_string(),
            id: old,
        });

        let new = showm.attach_effects(NO_DEPTH_TEST, GL_SET_ADDITIVE_BLENDING)?;
        self.changes.push(BindingChange::Attached {
            actor: NO_DEPTH_TEST.to_string(),
            id: new,
        });
        self.no_depth_observer = new;

        log::info!(
            "frame {}: '{NO_DEPTH_TEST}' switched to additive blending (observer {old} -> {new})",
            self.counter
        );
        Ok(())
    }
}
