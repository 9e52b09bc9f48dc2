use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::animation::pulse::{breathing, heartbeat, hop};

use super::colors::{dim_color, HEART, MASCOT};

/// Hamster waiting for an answer
const SAD: [&str; 5] = [
    r"  ()_()  ",
    r" ( ;_; ) ",
    r" (  ~  ) ",
    r"  U   U  ",
    r"         ",
];

/// Hamster after a yes
const HAPPY: [&str; 5] = [
    r" \()_()/ ",
    r"  (^o^)  ",
    r"  ( ♥ )  ",
    r"  /   \  ",
    r"         ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Sad,
    Happy,
}

/// The mascot in the middle of the screen
pub struct MascotWidget {
    mood: Mood,
    /// Seconds, drives breathing and hopping
    time: f32,
    opacity: f32,
}

impl MascotWidget {
    pub fn new(mood: Mood, time: f32) -> Self {
        Self {
            mood,
            time,
            opacity: 1.0,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Size of the art in cells
    pub fn size() -> (u16, u16) {
        (SAD[0].chars().count() as u16, SAD.len() as u16)
    }
}

impl Widget for MascotWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (art, brightness, offset) = match self.mood {
            Mood::Sad => (&SAD, breathing(self.time, 0.4), 0),
            // The happy one hops: drawn one row higher every other half-beat
            Mood::Happy => (&HAPPY, 1.0, hop(self.time, 2.0)),
        };

        let body = Style::default().fg(dim_color(MASCOT, brightness * self.opacity));
        let heart_glow = 0.6 + 0.4 * heartbeat(self.time, 72.0);
        let heart = Style::default().fg(dim_color(HEART, heart_glow * self.opacity));

        // Never trust the area to lie inside the buffer
        let area = area.intersection(buf.area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (width, _) = Self::size();
        let x0 = area.x + area.width.saturating_sub(width) / 2;
        // Leave a spare row above the art so the hop stays inside the area
        let y0 = area.y + 1;

        for (row, line) in art.iter().enumerate() {
            let Some(y) = (y0 + row as u16).checked_sub(offset) else {
                continue;
            };
            if y < area.y || y >= area.bottom() {
                continue;
            }
            for (col, ch) in line.chars().enumerate() {
                let x = x0 + col as u16;
                if x >= area.right() || ch == ' ' {
                    continue;
                }
                let style = if ch == '♥' { heart } else { body };
                buf[(x, y)].set_char(ch).set_style(style);
            }
        }
    }
}
