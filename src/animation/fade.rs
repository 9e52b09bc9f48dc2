use std::time::Duration;

/// Ease out quadratic
fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Opacity of content that started fading in `elapsed` ago
pub fn fade_in_opacity(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
    ease_out_quad(progress.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_bounds() {
        let d = Duration::from_secs(3);
        assert_eq!(fade_in_opacity(Duration::ZERO, d), 0.0);
        assert_eq!(fade_in_opacity(d, d), 1.0);
        assert_eq!(fade_in_opacity(Duration::from_secs(10), d), 1.0);
        let mid = fade_in_opacity(Duration::from_millis(1500), d);
        assert!(mid > 0.5 && mid < 1.0);
    }

    #[test]
    fn test_zero_duration_is_fully_visible() {
        assert_eq!(fade_in_opacity(Duration::ZERO, Duration::ZERO), 1.0);
    }
}
