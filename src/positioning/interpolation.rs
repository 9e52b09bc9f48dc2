//! Easing for the evasive target's glide

use super::ViewportPosition;

/// Ease out cubic - fast start, slow end
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Eased interpolation between positions
pub fn smooth_lerp(from: &ViewportPosition, to: &ViewportPosition, t: f32) -> ViewportPosition {
    from.lerp(to, ease_out_cubic(t))
}
