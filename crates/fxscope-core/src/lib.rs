//! Core abstractions for fxscope-rs.
//!
//! This crate provides the types every other fxscope crate builds on:
//! - [`GlState`], the GL-style draw state consulted while rasterizing
//! - [`Effect`]/[`Effects`], ordered state mutations with the usual presets
//! - [`MarkerActor`] and the [`Scene`] registry that binds effects to actors
//! - Configuration [`Options`] and the crate-wide error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod effects;
pub mod error;
pub mod gl_state;
pub mod observer;
pub mod options;
pub mod scene;

pub use actor::{MarkerActor, MarkerShape};
pub use effects::{Effect, Effects, Preset};
pub use error::{FxscopeError, Result};
pub use gl_state::{Capability, GlState};
pub use observer::{ObserverId, ObserverList, RenderObserver};
pub use options::Options;
pub use scene::Scene;

// Blend and depth vocabulary shared with wgpu pipelines
pub use wgpu::{BlendComponent, BlendFactor, BlendOperation, BlendState, CompareFunction};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
