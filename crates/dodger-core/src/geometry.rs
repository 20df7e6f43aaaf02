use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Axis-aligned bounding box in world-space pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    /// Build a box, rejecting non-finite components and non-positive sizes.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::NonPositiveSize { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self, other)
    }

    /// Shrink the box by `inset`. The inset is validated at construction
    /// against the box size, so the result stays non-degenerate.
    pub fn inset(&self, inset: &HitboxInset) -> Aabb {
        Aabb {
            x: self.x + inset.left,
            y: self.y + inset.top,
            width: self.width - inset.left - inset.right,
            height: self.height - inset.top - inset.bottom,
        }
    }
}

/// The single collision primitive shared by every entity pair check.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Margins trimmed from a sprite's bounds to get its collision hitbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxInset {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl HitboxInset {
    pub const NONE: HitboxInset = HitboxInset {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Check that the inset is non-negative and leaves a positive box of
    /// `width` x `height`.
    pub fn validate_for(&self, width: f32, height: f32) -> Result<(), GeometryError> {
        let margins = [self.left, self.top, self.right, self.bottom];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(GeometryError::InvalidInset(*self));
        }
        if self.left + self.right >= width || self.top + self.bottom >= height {
            return Err(GeometryError::InsetTooLarge {
                inset: *self,
                width,
                height,
            });
        }
        Ok(())
    }
}
