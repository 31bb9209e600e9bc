//! Per-frame motion and decay rules
//!
//! Pure functions; the tick driver applies them to entity capabilities.

use glam::Vec2;

use super::geometry::Viewport;
use crate::consts::FADE_THRESHOLD;

/// Result of one fade step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeOutcome {
    /// Still visible at the new opacity
    Visible(f32),
    /// Dropped below the threshold; the entity must be destroyed
    Expired(f32),
}

impl FadeOutcome {
    pub fn opacity(self) -> f32 {
        match self {
            FadeOutcome::Visible(a) | FadeOutcome::Expired(a) => a,
        }
    }
}

/// `opacity' = max(opacity - rate, 0)`, clamped to [0, 1]
pub fn fade(opacity: f32, rate: f32) -> FadeOutcome {
    let next = (opacity - rate).clamp(0.0, 1.0);
    if next < FADE_THRESHOLD {
        FadeOutcome::Expired(next)
    } else {
        FadeOutcome::Visible(next)
    }
}

/// Unbounded angle accumulation (degrees)
#[inline]
pub fn rotate(angle: f32, rate: f32) -> f32 {
    angle + rate
}

/// Result of one leftward drift step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriftOutcome {
    Moved(f32),
    /// Right edge has passed the left screen edge
    OffScreen,
}

/// `x' = x - speed`; off-screen once `x' + width < 0`
pub fn drift(x: f32, width: f32, speed: f32) -> DriftOutcome {
    let next = x - speed;
    if next + width < 0.0 {
        DriftOutcome::OffScreen
    } else {
        DriftOutcome::Moved(next)
    }
}

/// Hard revert: keep `new` only if the whole box stays inside the viewport
pub fn revert_if_outside(viewport: &Viewport, old: Vec2, new: Vec2, size: Vec2) -> Vec2 {
    if viewport.contains_box(new, size) { new } else { old }
}
