//! Marker actors.
//!
//! A [`MarkerActor`] draws one screen-facing glyph per center. Its geometry is
//! fixed at construction; only the render observers bound to it change.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{FxscopeError, Result};
use crate::observer::ObserverList;

/// Glyph drawn at each marker center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerShape {
    /// Filled square.
    #[default]
    Square,
    /// Filled disk.
    Disk,
    /// Square rotated by 45 degrees.
    Diamond,
    /// Plus sign.
    Cross,
}

impl MarkerShape {
    /// Returns true if the point `(u, v)`, in glyph-local coordinates
    /// spanning `[-1, 1]` on both axes, is covered by the glyph.
    pub fn covers(self, u: f32, v: f32) -> bool {
        if u.abs() > 1.0 || v.abs() > 1.0 {
            return false;
        }
        match self {
            MarkerShape::Square => true,
            MarkerShape::Disk => u * u + v * v <= 1.0,
            MarkerShape::Diamond => u.abs() + v.abs() <= 1.0,
            MarkerShape::Cross => u.abs() <= 0.25 || v.abs() <= 0.25,
        }
    }

    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            MarkerShape::Square => "square",
            MarkerShape::Disk => "disk",
            MarkerShape::Diamond => "diamond",
            MarkerShape::Cross => "cross",
        }
    }
}

/// A set of markers sharing shape, opacity and scale.
#[derive(Debug, Clone)]
pub struct MarkerActor {
    name: String,
    centers: Vec<Vec3>,
    colors: Vec<Vec3>,
    shape: MarkerShape,
    opacity: f32,
    scale: f32,
    visible: bool,
    observers: ObserverList,
}

impl MarkerActor {
    /// Creates a marker actor.
    ///
    /// `colors` holds either one color per center or a single color shared by
    /// all of them.
    pub fn new(
        name: impl Into<String>,
        centers: Vec<Vec3>,
        colors: Vec<Vec3>,
        shape: MarkerShape,
        opacity: f32,
        scale: f32,
    ) -> Result<Self> {
        let colors = match colors.len() {
            1 => vec![colors[0]; centers.len()],
            n if n == centers.len() => colors,
            n => {
                return Err(FxscopeError::SizeMismatch {
                    expected: centers.len(),
                    actual: n,
                })
            }
        };
        if !(0.0..=1.0).contains(&opacity) {
            return Err(FxscopeError::InvalidParameter {
                name: "opacity",
                reason: format!("{opacity} is outside [0, 1]"),
            });
        }
        if scale.is_nan() || scale <= 0.0 {
            return Err(FxscopeError::InvalidParameter {
                name: "scale",
                reason: format!("{scale} is not positive"),
            });
        }

        Ok(Self {
            name: name.into(),
            centers,
            colors,
            shape,
            opacity,
            scale,
            visible: true,
            observers: ObserverList::new(),
        })
    }

    /// Returns the actor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the marker centers.
    pub fn centers(&self) -> &[Vec3] {
        &self.centers
    }

    /// Returns one color per center.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Returns the glyph shape.
    pub fn shape(&self) -> MarkerShape {
        self.shape
    }

    /// Returns the opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Returns the glyph size in world units.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the number of markers.
    pub fn num_markers(&self) -> usize {
        self.centers.len()
    }

    /// Returns whether the actor is drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the actor.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Returns the render observers bound to this actor.
    pub fn observers(&self) -> &ObserverList {
        &self.observers
    }

    pub(crate) fn observers_mut(&mut self) -> &mut ObserverList {
        &mut self.observers
    }

    /// Axis-aligned bounds of the marker centers padded by half a glyph.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.centers.first()?;
        let (min, max) = self
            .centers
            .iter()
            .fold((first, first), |(min, max), c| (min.min(*c), max.max(*c)));
        let pad = Vec3::splat(self.scale * 0.5);
        Some((min - pad, max + pad))
    }
}
