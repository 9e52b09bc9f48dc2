pub mod buttons;
pub mod colors;
pub mod fireworks;
pub mod headline;
pub mod mascot;
pub mod photo_grid;
pub mod scene;
pub mod ui;

use ratatui::style::Color;

pub use buttons::{ButtonId, ButtonWidget};
pub use scene::{RenderState, SceneLayout, SceneRenderer};

/// Interpolate between two colors
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);

    let (r1, g1, b1) = match from {
        Color::Rgb(r, g, b) => (r as f32, g as f32, b as f32),
        _ => (0.0, 0.0, 0.0),
    };

    let (r2, g2, b2) = match to {
        Color::Rgb(r, g, b) => (r as f32, g as f32, b as f32),
        _ => (255.0, 255.0, 255.0),
    };

    Color::Rgb(
        (r1 + (r2 - r1) * t) as u8,
        (g1 + (g2 - g1) * t) as u8,
        (b1 + (b2 - b1) * t) as u8,
    )
}
