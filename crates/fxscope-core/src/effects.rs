//! Effects: named functions that mutate the [`GlState`] before an actor draws.
//!
//! An [`Effects`] list is applied in order, so later effects override earlier
//! ones. Presets cover the usual blending and depth configurations. Each one
//! is a plain function plus a named [`Preset`] constant; bind the constants
//! when the effect names matter (logs, [`Effects::names`]):
//!
//! ```
//! use fxscope_core::effects::{self, Effects};
//! use fxscope_core::GlState;
//!
//! let list = Effects::from([
//!     effects::GL_RESET_BLEND,
//!     effects::GL_ENABLE_DEPTH,
//!     effects::GL_SET_ADDITIVE_BLENDING,
//! ]);
//! let mut state = GlState::default();
//! list.apply(&mut state);
//! assert!(state.depth_test_enabled);
//! assert_eq!(list.names(), ["gl_reset_blend", "gl_enable_depth", "gl_set_additive_blending"]);
//! ```

use std::fmt;
use std::sync::Arc;

use wgpu::BlendFactor;

use crate::gl_state::{Capability, GlState};

/// A single named state mutation.
#[derive(Clone)]
pub struct Effect {
    name: String,
    apply: Arc<dyn Fn(&mut GlState) + Send + Sync>,
}

impl Effect {
    /// Wraps a closure as an effect.
    pub fn new(
        name: impl Into<String>,
        apply: impl Fn(&mut GlState) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }

    /// Returns the effect name (used in logs).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the effect to a state.
    pub fn apply(&self, state: &mut GlState) {
        (self.apply)(state);
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Effect").field(&self.name).finish()
    }
}

/// Bare functions carry no name of their own.
impl From<fn(&mut GlState)> for Effect {
    fn from(f: fn(&mut GlState)) -> Self {
        Self::new("custom", f)
    }
}

/// A built-in effect: a state function and the name it is logged under.
#[derive(Clone, Copy)]
pub struct Preset {
    name: &'static str,
    apply: fn(&mut GlState),
}

impl Preset {
    const fn new(name: &'static str, apply: fn(&mut GlState)) -> Self {
        Self { name, apply }
    }

    /// Returns the preset name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies the preset to a state.
    pub fn apply(&self, state: &mut GlState) {
        (self.apply)(state);
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Preset").field(&self.name).finish()
    }
}

impl From<Preset> for Effect {
    fn from(preset: Preset) -> Self {
        Self::new(preset.name, preset.apply)
    }
}

/// An ordered list of effects. Composition order is call order.
#[derive(Clone, Debug, Default)]
pub struct Effects(Vec<Effect>);

impl Effects {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an effect.
    #[must_use]
    pub fn then(mut self, effect: impl Into<Effect>) -> Self {
        self.0.push(effect.into());
        self
    }

    /// Applies every effect in order.
    pub fn apply(&self, state: &mut GlState) {
        for effect in &self.0 {
            effect.apply(state);
        }
    }

    /// Returns the number of effects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the effects in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.0.iter()
    }

    /// Returns the effect names in application order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(Effect::name).collect()
    }
}

impl From<Effect> for Effects {
    fn from(effect: Effect) -> Self {
        Self(vec![effect])
    }
}

impl From<fn(&mut GlState)> for Effects {
    fn from(f: fn(&mut GlState)) -> Self {
        Self(vec![f.into()])
    }
}

impl From<Preset> for Effects {
    fn from(preset: Preset) -> Self {
        Self(vec![preset.into()])
    }
}

impl<const N: usize> From<[Preset; N]> for Effects {
    fn from(presets: [Preset; N]) -> Self {
        Self(presets.into_iter().map(Effect::from).collect())
    }
}

impl From<Vec<Effect>> for Effects {
    fn from(effects: Vec<Effect>) -> Self {
        Self(effects)
    }
}

impl From<Vec<fn(&mut GlState)>> for Effects {
    fn from(fns: Vec<fn(&mut GlState)>) -> Self {
        Self(fns.into_iter().map(Effect::from).collect())
    }
}

impl<const N: usize> From<[fn(&mut GlState); N]> for Effects {
    fn from(fns: [fn(&mut GlState); N]) -> Self {
        Self(fns.into_iter().map(Effect::from).collect())
    }
}

impl FromIterator<Effect> for Effects {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resets the blend equation and blend function to their defaults.
pub fn gl_reset_blend(state: &mut GlState) {
    state.reset_blend_equation();
    state.reset_blend_func();
}

/// Enables the depth test.
pub fn gl_enable_depth(state: &mut GlState) {
    state.enable(Capability::DepthTest);
}

/// Disables the depth test.
pub fn gl_disable_depth(state: &mut GlState) {
    state.disable(Capability::DepthTest);
}

/// Enables blending.
pub fn gl_enable_blend(state: &mut GlState) {
    state.enable(Capability::Blend);
}

/// Disables blending.
pub fn gl_disable_blend(state: &mut GlState) {
    state.disable(Capability::Blend);
}

/// Enables depth writes.
pub fn gl_enable_depth_write(state: &mut GlState) {
    state.depth_mask(true);
}

/// Disables depth writes; the depth test still runs.
pub fn gl_disable_depth_write(state: &mut GlState) {
    state.depth_mask(false);
}

/// Straight alpha blending with the depth test on.
pub fn gl_set_normal_blending(state: &mut GlState) {
    state.enable(Capability::Blend);
    state.enable(Capability::DepthTest);
    state.blend_func_separate(
        BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha,
        BlendFactor::One,
        BlendFactor::OneMinusSrcAlpha,
    );
}

/// Additive blending. Depth state is left as it is.
pub fn gl_set_additive_blending(state: &mut GlState) {
    gl_reset_blend(state);
    state.enable(Capability::Blend);
    state.blend_func(BlendFactor::SrcAlpha, BlendFactor::One);
}

/// Additive color blending that keeps the destination alpha out of the sum.
pub fn gl_set_additive_blending_white_background(state: &mut GlState) {
    gl_reset_blend(state);
    state.enable(Capability::Blend);
    state.blend_func_separate(
        BlendFactor::SrcAlpha,
        BlendFactor::One,
        BlendFactor::One,
        BlendFactor::Zero,
    );
}

/// Multiplies the destination by the source color.
pub fn gl_set_multiplicative_blending(state: &mut GlState) {
    gl_reset_blend(state);
    state.enable(Capability::Blend);
    state.blend_func(BlendFactor::Zero, BlendFactor::Src);
}

/// Scales the destination by the inverse source color.
pub fn gl_set_subtractive_blending(state: &mut GlState) {
    gl_reset_blend(state);
    state.enable(Capability::Blend);
    state.blend_func(BlendFactor::Zero, BlendFactor::OneMinusSrc);
}

pub const GL_RESET_BLEND: Preset = Preset::new("gl_reset_blend", gl_reset_blend);
pub const GL_ENABLE_DEPTH: Preset = Preset::new("gl_enable_depth", gl_enable_depth);
pub const GL_DISABLE_DEPTH: Preset = Preset::new("gl_disable_depth", gl_disable_depth);
pub const GL_ENABLE_BLEND: Preset = Preset::new("gl_enable_blend", gl_enable_blend);
pub const GL_DISABLE_BLEND: Preset = Preset::new("gl_disable_blend", gl_disable_blend);
pub const GL_ENABLE_DEPTH_WRITE: Preset =
    Preset::new("gl_enable_depth_write", gl_enable_depth_write);
pub const GL_DISABLE_DEPTH_WRITE: Preset =
    Preset::new("gl_disable_depth_write", gl_disable_depth_write);
pub const GL_SET_NORMAL_BLENDING: Preset =
    Preset::new("gl_set_normal_blending", gl_set_normal_blending);
pub const GL_SET_ADDITIVE_BLENDING: Preset =
    Preset::new("gl_set_additive_blending", gl_set_additive_blending);
pub const GL_SET_ADDITIVE_BLENDING_WHITE_BACKGROUND: Preset = Preset::new(
    "gl_set_additive_blending_white_background",
    gl_set_additive_blending_white_background,
);
pub const GL_SET_MULTIPLICATIVE_BLENDING: Preset =
    Preset::new("gl_set_multiplicative_blending", gl_set_multiplicative_blending);
pub const GL_SET_SUBTRACTIVE_BLENDING: Preset =
    Preset::new("gl_set_subtractive_blending", gl_set_subtractive_blending);

const PRESETS: &[Preset] = &[
    GL_RESET_BLEND,
    GL_ENABLE_DEPTH,
    GL_DISABLE_DEPTH,
    GL_ENABLE_BLEND,
    GL_DISABLE_BLEND,
    GL_ENABLE_DEPTH_WRITE,
    GL_DISABLE_DEPTH_WRITE,
    GL_SET_NORMAL_BLENDING,
    GL_SET_ADDITIVE_BLENDING,
    GL_SET_ADDITIVE_BLENDING_WHITE_BACKGROUND,
    GL_SET_MULTIPLICATIVE_BLENDING,
    GL_SET_SUBTRACTIVE_BLENDING,
];

/// Looks up a preset by name.
pub fn preset(name: &str) -> Option<Preset> {
    PRESETS.iter().copied().find(|p| p.name == name)
}

/// Returns the names of all presets.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(Preset::name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl_state::{DEFAULT_ALPHA_BLEND, DEFAULT_COLOR_BLEND};
    use proptest::prelude::*;
    use wgpu::{BlendOperation, CompareFunction};

    fn blend_factor() -> impl Strategy<Value = BlendFactor> {
        prop_oneof![
            Just(BlendFactor::Zero),
            Just(BlendFactor::One),
            Just(BlendFactor::Src),
            Just(BlendFactor::OneMinusSrc),
            Just(BlendFactor::SrcAlpha),
            Just(BlendFactor::OneMinusSrcAlpha),
            Just(BlendFactor::Dst),
            Just(BlendFactor::DstAlpha),
            Just(BlendFactor::Constant),
        ]
    }

    fn blend_operation() -> impl Strategy<Value = BlendOperation> {
        prop_oneof![
            Just(BlendOperation::Add),
            Just(BlendOperation::Subtract),
            Just(BlendOperation::ReverseSubtract),
            Just(BlendOperation::Min),
            Just(BlendOperation::Max),
        ]
    }

    prop_compose! {
        fn any_state()(
            blend_enabled in any::<bool>(),
            depth_test_enabled in any::<bool>(),
            depth_write_enabled in any::<bool>(),
            factors in (blend_factor(), blend_factor(), blend_factor(), blend_factor()),
            ops in (blend_operation(), blend_operation()),
        ) -> GlState {
            let mut state = GlState {
                blend_enabled,
                depth_test_enabled,
                depth_write_enabled,
                ..GlState::default()
            };
            state.blend_func_separate(factors.0, factors.1, factors.2, factors.3);
            state.blend_equation_separate(ops.0, ops.1);
            state
        }
    }

    proptest! {
        #[test]
        fn additive_with_depth_from_any_state(mut state in any_state()) {
            let list = Effects::from([gl_reset_blend, gl_enable_depth, gl_set_additive_blending]);
            list.apply(&mut state);

            prop_assert!(state.blend_enabled);
            prop_assert!(state.depth_test_enabled);
            prop_assert_eq!(state.blend.color.src_factor, BlendFactor::SrcAlpha);
            prop_assert_eq!(state.blend.color.dst_factor, BlendFactor::One);
            prop_assert_eq!(state.blend.color.operation, BlendOperation::Add);
            prop_assert_eq!(state.blend.alpha.operation, BlendOperation::Add);
        }

        #[test]
        fn normal_blending_from_any_state(mut state in any_state()) {
            let list = Effects::from([gl_reset_blend, gl_enable_depth, gl_set_normal_blending]);
            list.apply(&mut state);

            prop_assert!(state.blend_enabled);
            prop_assert!(state.depth_test_enabled);
            prop_assert_eq!(state.blend.color, DEFAULT_COLOR_BLEND);
            prop_assert_eq!(state.blend.alpha, DEFAULT_ALPHA_BLEND);
        }

        #[test]
        fn no_depth_list_from_any_state(mut state in any_state()) {
            let list = Effects::from([gl_reset_blend, gl_disable_blend, gl_disable_depth]);
            list.apply(&mut state);

            prop_assert!(!state.blend_enabled);
            prop_assert!(!state.depth_test_enabled);
            prop_assert_eq!(state.effective_depth_compare(), CompareFunction::Always);
        }
    }

    #[test]
    fn test_order_matters() {
        let mut state = GlState::default();
        Effects::from([gl_enable_depth, gl_disable_depth]).apply(&mut state);
        assert!(!state.depth_test_enabled);

        let mut state = GlState::default();
        Effects::from([gl_disable_depth, gl_enable_depth]).apply(&mut state);
        assert!(state.depth_test_enabled);
    }

    #[test]
    fn test_single_function_converts() {
        let list = Effects::from(gl_set_additive_blending as fn(&mut GlState));
        assert_eq!(list.len(), 1);
        let mut state = GlState::default();
        list.apply(&mut state);
        assert_eq!(state.blend.color.dst_factor, BlendFactor::One);
    }

    #[test]
    fn test_custom_effect_and_builder() {
        let list = Effects::new()
            .then(GL_RESET_BLEND)
            .then(Effect::new("max blend", |s: &mut GlState| {
                s.blend_equation(BlendOperation::Max);
            }));
        let mut state = GlState::default();
        list.apply(&mut state);
        assert_eq!(list.names(), vec!["gl_reset_blend", "max blend"]);
        assert_eq!(state.blend.color.operation, BlendOperation::Max);
    }

    #[test]
    fn test_multiplicative_and_subtractive() {
        let mut state = GlState::default();
        gl_set_multiplicative_blending(&mut state);
        assert_eq!(state.blend.color.src_factor, BlendFactor::Zero);
        assert_eq!(state.blend.color.dst_factor, BlendFactor::Src);

        gl_set_subtractive_blending(&mut state);
        assert_eq!(state.blend.color.dst_factor, BlendFactor::OneMinusSrc);
    }

    #[test]
    fn test_blending_presets_turn_blending_on() {
        for preset in [
            GL_SET_NORMAL_BLENDING,
            GL_SET_ADDITIVE_BLENDING,
            GL_SET_ADDITIVE_BLENDING_WHITE_BACKGROUND,
            GL_SET_MULTIPLICATIVE_BLENDING,
            GL_SET_SUBTRACTIVE_BLENDING,
        ] {
            let mut state = GlState::default();
            gl_disable_blend(&mut state);
            preset.apply(&mut state);
            assert!(state.blend_enabled, "{} left blending off", preset.name());
            assert!(state.pipeline_blend().is_some());
        }
    }

    #[test]
    fn test_white_background_keeps_alpha() {
        let mut state = GlState::default();
        gl_set_additive_blending_white_background(&mut state);
        assert_eq!(state.blend.color.dst_factor, BlendFactor::One);
        assert_eq!(state.blend.alpha.src_factor, BlendFactor::One);
        assert_eq!(state.blend.alpha.dst_factor, BlendFactor::Zero);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            preset("gl_disable_depth").map(|p| p.name()),
            Some(GL_DISABLE_DEPTH.name())
        );
        assert!(preset("nope").is_none());
        assert_eq!(preset_names().count(), PRESETS.len());
    }

    #[test]
    fn test_preset_names_are_stable() {
        let list = Effects::from([GL_RESET_BLEND, GL_DISABLE_BLEND, GL_DISABLE_DEPTH]);
        assert_eq!(
            list.names(),
            vec!["gl_reset_blend", "gl_disable_blend", "gl_disable_depth"]
        );
        assert_eq!(
            Effects::from(GL_SET_NORMAL_BLENDING).names(),
            vec!["gl_set_normal_blending"]
        );
        for name in preset_names() {
            assert_eq!(Effect::from(preset(name).unwrap()).name(), name);
        }
    }

    #[test]
    fn test_bare_function_is_custom() {
        let list = Effects::from([gl_reset_blend, gl_enable_depth]);
        assert_eq!(list.names(), vec!["custom", "custom"]);
    }
}
