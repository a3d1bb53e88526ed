//! GL-style draw state.
//!
//! [`GlState`] is the mutable state the renderer consults for every fragment:
//! whether blending and depth testing are on, and how. Effects mutate it right
//! before an actor draws, and it persists across actors within a frame the way
//! a GL context does.
//!
//! The factor, operation and compare vocabulary is wgpu's, so a state can be
//! handed to a GPU pipeline descriptor unchanged.

use glam::Vec4;
use wgpu::{BlendComponent, BlendFactor, BlendOperation, BlendState, CompareFunction};

/// A toggleable capability, as in `glEnable`/`glDisable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Color blending.
    Blend,
    /// Depth testing.
    DepthTest,
}

/// Default color component: straight alpha blending.
pub const DEFAULT_COLOR_BLEND: BlendComponent = BlendComponent {
    src_factor: BlendFactor::SrcAlpha,
    dst_factor: BlendFactor::OneMinusSrcAlpha,
    operation: BlendOperation::Add,
};

/// Default alpha component.
pub const DEFAULT_ALPHA_BLEND: BlendComponent = BlendComponent {
    src_factor: BlendFactor::One,
    dst_factor: BlendFactor::OneMinusSrcAlpha,
    operation: BlendOperation::Add,
};

/// The current draw state of a render target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlState {
    /// Whether blending is enabled.
    pub blend_enabled: bool,
    /// Blend function and equation for the color and alpha channels.
    pub blend: BlendState,
    /// Constant color used by `BlendFactor::Constant`.
    pub blend_constant: Vec4,
    /// Whether the depth test is enabled.
    pub depth_test_enabled: bool,
    /// Whether passing fragments write their depth (the depth mask).
    pub depth_write_enabled: bool,
    /// Depth comparison used when the depth test is enabled.
    pub depth_compare: CompareFunction,
}

impl Default for GlState {
    fn default() -> Self {
        Self {
            blend_enabled: true,
            blend: BlendState {
                color: DEFAULT_COLOR_BLEND,
                alpha: DEFAULT_ALPHA_BLEND,
            },
            blend_constant: Vec4::ZERO,
            depth_test_enabled: true,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
        }
    }
}

impl GlState {
    /// Creates a state with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables a capability.
    pub fn enable(&mut self, capability: Capability) {
        self.set_enabled(capability, true);
    }

    /// Disables a capability.
    pub fn disable(&mut self, capability: Capability) {
        self.set_enabled(capability, false);
    }

    /// Sets a capability on or off.
    pub fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        match capability {
            Capability::Blend => self.blend_enabled = enabled,
            Capability::DepthTest => self.depth_test_enabled = enabled,
        }
    }

    /// Returns whether a capability is enabled.
    pub fn is_enabled(&self, capability: Capability) -> bool {
        match capability {
            Capability::Blend => self.blend_enabled,
            Capability::DepthTest => self.depth_test_enabled,
        }
    }

    /// Sets the same source and destination factors for color and alpha.
    pub fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.blend_func_separate(src, dst, src, dst);
    }

    /// Sets separate factors for the color and alpha channels.
    pub fn blend_func_separate(
        &mut self,
        src_color: BlendFactor,
        dst_color: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    ) {
        self.blend.color.src_factor = src_color;
        self.blend.color.dst_factor = dst_color;
        self.blend.alpha.src_factor = src_alpha;
        self.blend.alpha.dst_factor = dst_alpha;
    }

    /// Sets the blend operation for both channels.
    pub fn blend_equation(&mut self, operation: BlendOperation) {
        self.blend_equation_separate(operation, operation);
    }

    /// Sets separate blend operations for color and alpha.
    pub fn blend_equation_separate(&mut self, color: BlendOperation, alpha: BlendOperation) {
        self.blend.color.operation = color;
        self.blend.alpha.operation = alpha;
    }

    /// Restores the default blend operation.
    pub fn reset_blend_equation(&mut self) {
        self.blend_equation_separate(DEFAULT_COLOR_BLEND.operation, DEFAULT_ALPHA_BLEND.operation);
    }

    /// Restores the default blend factors.
    pub fn reset_blend_func(&mut self) {
        self.blend_func_separate(
            DEFAULT_COLOR_BLEND.src_factor,
            DEFAULT_COLOR_BLEND.dst_factor,
            DEFAULT_ALPHA_BLEND.src_factor,
            DEFAULT_ALPHA_BLEND.dst_factor,
        );
    }

    /// Sets the depth mask.
    pub fn depth_mask(&mut self, write: bool) {
        self.depth_write_enabled = write;
    }

    /// Sets the depth comparison function.
    pub fn depth_func(&mut self, compare: CompareFunction) {
        self.depth_compare = compare;
    }

    /// Sets the blend constant color.
    pub fn set_blend_constant(&mut self, color: Vec4) {
        self.blend_constant = color;
    }

    /// Returns the blend state a pipeline should use, or `None` when blending is off.
    pub fn pipeline_blend(&self) -> Option<BlendState> {
        self.blend_enabled.then_some(self.blend)
    }

    /// Returns the effective depth comparison, `Always` when the depth test is off.
    pub fn effective_depth_compare(&self) -> CompareFunction {
        if self.depth_test_enabled {
            self.depth_compare
        } else {
            CompareFunction::Always
        }
    }

    /// Whether a passing fragment writes its depth.
    ///
    /// As in GL, depth writes only happen while the depth test is enabled.
    pub fn writes_depth(&self) -> bool {
        self.depth_test_enabled && self.depth_write_enabled
    }
}
