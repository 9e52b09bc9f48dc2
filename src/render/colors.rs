//! Colors for the proposal screens.
//!
//! This module provides:
//! - The rose/blush theme used by text, buttons, and the mascot
//! - Tile tints for the photo wall
//! - Color manipulation utilities (dimming, hue to RGB via `palette`)

use palette::{FromColor, Hsv, Srgb};
use ratatui::style::Color;

/// Screen background
pub const BACKGROUND: Color = Color::Rgb(22, 14, 20);

/// Headline text
pub const TEXT: Color = Color::Rgb(250, 232, 240);

/// Secondary text (footer, hints)
pub const MUTED: Color = Color::Rgb(150, 120, 135);

/// Accept button gradient ends (pink-500 → rose-500)
pub const ACCEPT_FROM: Color = Color::Rgb(236, 72, 153);
pub const ACCEPT_TO: Color = Color::Rgb(244, 63, 94);

/// Decline button gradient ends (gray-500 → gray-600)
pub const DECLINE_FROM: Color = Color::Rgb(107, 114, 128);
pub const DECLINE_TO: Color = Color::Rgb(75, 85, 99);

/// Mascot fur
pub const MASCOT: Color = Color::Rgb(230, 190, 150);

/// Heart accents
pub const HEART: Color = Color::Rgb(255, 90, 130);

/// Warm tints cycled across photo tiles
pub const PHOTO_TINTS: [Color; 6] = [
    Color::Rgb(214, 130, 150),
    Color::Rgb(190, 150, 200),
    Color::Rgb(230, 170, 120),
    Color::Rgb(150, 180, 210),
    Color::Rgb(200, 120, 120),
    Color::Rgb(170, 200, 160),
];

/// Dim a color by a factor (0.0 = black, 1.0 = unchanged)
///
/// For non-RGB colors, returns the original color unchanged.
pub fn dim_color(color: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}

/// Tint for the photo tile at `index`, wrapping around the palette
pub fn photo_tint(index: usize) -> Color {
    PHOTO_TINTS[index % PHOTO_TINTS.len()]
}

/// Saturated color for a hue in degrees, scaled by `value` (0.0..=1.0)
pub fn hue_color(hue: f32, value: f32) -> Color {
    let hsv = Hsv::new(hue.rem_euclid(360.0), 0.75, value.clamp(0.0, 1.0));
    let (r, g, b) = Srgb::from_color(hsv).into_format::<u8>().into_components();
    Color::Rgb(r, g, b)
}
