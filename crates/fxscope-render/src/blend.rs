//! Software evaluation of wgpu blend and depth-compare state.

use glam::{Vec3, Vec4};
use wgpu::{BlendComponent, BlendFactor, BlendOperation, BlendState, CompareFunction};

/// Returns the per-channel weight a blend factor selects.
fn factor_weights(factor: BlendFactor, src: Vec4, dst: Vec4, constant: Vec4) -> Vec4 {
    match factor {
        BlendFactor::Zero => Vec4::ZERO,
        BlendFactor::One => Vec4::ONE,
        BlendFactor::Src | BlendFactor::Src1 => src,
        BlendFactor::OneMinusSrc | BlendFactor::OneMinusSrc1 => Vec4::ONE - src,
        BlendFactor::SrcAlpha | BlendFactor::Src1Alpha => Vec4::splat(src.w),
        BlendFactor::OneMinusSrcAlpha | BlendFactor::OneMinusSrc1Alpha => {
            Vec4::splat(1.0 - src.w)
        }
        BlendFactor::Dst => dst,
        BlendFactor::OneMinusDst => Vec4::ONE - dst,
        BlendFactor::DstAlpha => Vec4::splat(dst.w),
        BlendFactor::OneMinusDstAlpha => Vec4::splat(1.0 - dst.w),
        BlendFactor::SrcAlphaSaturated => {
            let f = src.w.min(1.0 - dst.w);
            Vec4::new(f, f, f, 1.0)
        }
        BlendFactor::Constant => constant,
        BlendFactor::OneMinusConstant => Vec4::ONE - constant,
    }
}

fn combine(operation: BlendOperation, src: Vec4, dst: Vec4, src_w: Vec4, dst_w: Vec4) -> Vec4 {
    match operation {
        BlendOperation::Add => src * src_w + dst * dst_w,
        BlendOperation::Subtract => src * src_w - dst * dst_w,
        BlendOperation::ReverseSubtract => dst * dst_w - src * src_w,
        // Min and max ignore the factors.
        BlendOperation::Min => src.min(dst),
        BlendOperation::Max => src.max(dst),
    }
}

fn apply_component(component: BlendComponent, src: Vec4, dst: Vec4, constant: Vec4) -> Vec4 {
    let src_w = factor_weights(component.src_factor, src, dst, constant);
    let dst_w = factor_weights(component.dst_factor, src, dst, constant);
    combine(component.operation, src, dst, src_w, dst_w)
}

/// Blends a source fragment over a destination pixel.
///
/// Color channels use `state.color`, the alpha channel uses `state.alpha`.
/// The result is clamped to `[0, 1]` like a unorm target.
#[must_use]
pub fn blend(state: &BlendState, constant: Vec4, src: Vec4, dst: Vec4) -> Vec4 {
    let color = apply_component(state.color, src, dst, constant);
    let alpha = apply_component(state.alpha, src, dst, constant);
    Vec3::new(color.x, color.y, color.z)
        .extend(alpha.w)
        .clamp(Vec4::ZERO, Vec4::ONE)
}

/// Returns whether a fragment at `depth` passes against the stored depth.
#[must_use]
pub fn depth_passes(compare: CompareFunction, depth: f32, stored: f32) -> bool {
    match compare {
        CompareFunction::Never => false,
        CompareFunction::Less => depth < stored,
        CompareFunction::Equal => (depth - stored).abs() <= f32::EPSILON,
        CompareFunction::LessEqual => depth <= stored,
        CompareFunction::Greater => depth > stored,
        CompareFunction::NotEqual => (depth - stored).abs() > f32::EPSILON,
        CompareFunction::GreaterEqual => depth >= stored,
        CompareFunction::Always => true,
    }
}
