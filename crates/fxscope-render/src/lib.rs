//! Rendering backend for fxscope-rs.
//!
//! This crate turns a [`fxscope_core::Scene`] into pixels:
//! - [`Camera`] with look-at, azimuth/elevation and projection handling
//! - [`MarkerRenderer`], a software rasterizer honoring the GL state that
//!   effects leave behind (blending, depth test, depth writes)
//! - [`Framebuffer`] color and depth targets
//! - Screenshot encoding to PNG/JPEG

pub mod blend;
pub mod camera;
pub mod framebuffer;
pub mod renderer;
pub mod screenshot;

pub use camera::{Camera, ProjectionMode};
pub use framebuffer::Framebuffer;
pub use renderer::{FrameStats, MarkerRenderer};
pub use screenshot::{save_image, save_to_buffer, ScreenshotError, ScreenshotOptions};
