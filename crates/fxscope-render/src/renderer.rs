//! Marker rasterizer driven by the GL state.
//!
//! Every frame starts from the default [`GlState`]. Actors draw in scene
//! order; right before each one draws, its render observers fire and mutate
//! the state, which then stays in effect for the following actors until
//! something changes it again.

use fxscope_core::{GlState, MarkerActor, Options, Scene};
use glam::{Mat4, Vec3, Vec4};

use crate::blend::{blend, depth_passes};
use crate::camera::Camera;
use crate::framebuffer::Framebuffer;

/// Counters collected while rendering one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Actors that were drawn (visible ones).
    pub actors_drawn: usize,
    /// Markers that landed at least partly inside the view.
    pub markers_drawn: usize,
    /// Fragments written to the color target.
    pub fragments_written: usize,
    /// Fragments discarded by the depth test.
    pub fragments_rejected: usize,
}

/// Software renderer for marker actors.
#[derive(Debug, Default)]
pub struct MarkerRenderer {
    state: GlState,
    last_stats: FrameStats,
}

/// Per-frame projection data shared by every marker.
struct View {
    view_proj: Mat4,
    /// Pixels per world unit at clip-space `w == 1`.
    pixel_scale: f32,
    width: f32,
    height: f32,
}

impl MarkerRenderer {
    /// Creates a renderer with the default GL state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the GL state as the last draw left it.
    pub fn state(&self) -> &GlState {
        &self.state
    }

    /// Returns the counters of the last rendered frame.
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Draws every visible actor of the scene into the framebuffer.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        target: &mut Framebuffer,
        options: &Options,
    ) -> FrameStats {
        target.clear(options.background_color.extend(0.0));
        if options.reset_state_each_frame {
            self.state = GlState::default();
        }

        let height = target.height() as f32;
        let view = View {
            view_proj: camera.view_projection_matrix(),
            pixel_scale: camera.projection_matrix().y_axis.y * height * 0.5,
            width: target.width() as f32,
            height,
        };

        let mut stats = FrameStats::default();
        for actor in scene.actors().iter().filter(|a| a.is_visible()) {
            actor.observers().fire(&mut self.state);
            self.draw_actor(actor, &view, target, &mut stats);
            stats.actors_drawn += 1;
        }

        log::trace!("frame rendered: {stats:?}");
        self.last_stats = stats;
        stats
    }

    fn draw_actor(
        &self,
        actor: &MarkerActor,
        view: &View,
        target: &mut Framebuffer,
        stats: &mut FrameStats,
    ) {
        let half_size = actor.scale() * 0.5;
        for (center, color) in actor.centers().iter().zip(actor.colors()) {
            if self.draw_marker(actor, *center, *color, half_size, view, target, stats) {
                stats.markers_drawn += 1;
            }
        }
    }

    /// Rasterizes one glyph. Returns false if it was clipped away entirely.
    #[allow(
        clippy::too_many_arguments,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn draw_marker(
        &self,
        actor: &MarkerActor,
        center: Vec3,
        color: Vec3,
        half_size: f32,
        view: &View,
        target: &mut Framebuffer,
        stats: &mut FrameStats,
    ) -> bool {
        let clip = view.view_proj * center.extend(1.0);
        if clip.w <= 0.0 {
            return false;
        }
        let ndc = clip.truncate() / clip.w;
        let depth = ndc.z;
        if !(0.0..=1.0).contains(&depth) {
            return false;
        }

        let sx = (ndc.x * 0.5 + 0.5) * view.width;
        let sy = (0.5 - ndc.y * 0.5) * view.height;
        let half_px = half_size * view.pixel_scale / clip.w;
        if half_px <= 0.0 {
            return false;
        }

        let x0 = (sx - half_px).floor().max(0.0);
        let x1 = (sx + half_px).ceil().min(view.width);
        let y0 = (sy - half_px).floor().max(0.0);
        let y1 = (sy + half_px).ceil().min(view.height);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        let source = color.extend(actor.opacity());
        for py in y0 as u32..y1 as u32 {
            for px in x0 as u32..x1 as u32 {
                let u = (px as f32 + 0.5 - sx) / half_px;
                let v = (sy - (py as f32 + 0.5)) / half_px;
                if !actor.shape().covers(u, v) {
                    continue;
                }
                self.shade_fragment(px, py, depth, source, target, stats);
            }
        }
        true
    }

    fn shade_fragment(
        &self,
        x: u32,
        y: u32,
        depth: f32,
        source: Vec4,
        target: &mut Framebuffer,
        stats: &mut FrameStats,
    ) {
        let state = &self.state;
        let stored = target.depth(x, y).unwrap_or(1.0);
        if state.depth_test_enabled && !depth_passes(state.depth_compare, depth, stored) {
            stats.fragments_rejected += 1;
            return;
        }
        if state.writes_depth() {
            target.set_depth(x, y, depth);
        }

        let out = match state.pipeline_blend() {
            Some(blend_state) => {
                let dst = target.pixel(x, y).unwrap_or(Vec4::ZERO);
                blend(&blend_state, state.blend_constant, source, dst)
            }
            None => source.clamp(Vec4::ZERO, Vec4::ONE),
        };
        target.set_pixel(x, y, out);
        stats.fragments_written += 1;
    }
}
