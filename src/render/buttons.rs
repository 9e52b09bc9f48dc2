use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use super::colors::{dim_color, ACCEPT_FROM, ACCEPT_TO, DECLINE_FROM, DECLINE_TO, TEXT};
use super::lerp_color;

/// Which button a cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Accept,
    Decline,
}

impl ButtonId {
    fn gradient(self) -> (Color, Color) {
        match self {
            ButtonId::Accept => (ACCEPT_FROM, ACCEPT_TO),
            ButtonId::Decline => (DECLINE_FROM, DECLINE_TO),
        }
    }
}

/// Horizontal padding on each side of a label
const PADDING: u16 = 2;

/// Button height: a padded row above and below the label
pub const BUTTON_HEIGHT: u16 = 3;

/// Cell width a button needs for `label`
pub fn button_width(label: &str) -> u16 {
    label.chars().count() as u16 + PADDING * 2
}

/// Filled button with a left-to-right gradient
pub struct ButtonWidget<'a> {
    id: ButtonId,
    label: &'a str,
    hovered: bool,
    opacity: f32,
}

impl<'a> ButtonWidget<'a> {
    pub fn new(id: ButtonId, label: &'a str) -> Self {
        Self {
            id,
            label,
            hovered: false,
            opacity: 1.0,
        }
    }

    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

impl Widget for ButtonWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (from, to) = self.id.gradient();
        // Hover darkens the gradient a step
        let shade = (if self.hovered { 0.85 } else { 1.0 }) * self.opacity;

        for x in area.x..area.x + area.width {
            let t = (x - area.x) as f32 / area.width.max(2).saturating_sub(1) as f32;
            let bg = dim_color(lerp_color(from, to, t), shade);
            for y in area.y..area.y + area.height {
                buf[(x, y)].set_char(' ').set_style(Style::default().bg(bg));
            }
        }

        let label_y = area.y + area.height / 2;
        let len = self.label.chars().count() as u16;
        let mut x = area.x + area.width.saturating_sub(len) / 2;
        for ch in self.label.chars() {
            if x >= area.x + area.width {
                break;
            }
            let fg = dim_color(TEXT, self.opacity.max(0.3));
            let cell = &mut buf[(x, label_y)];
            cell.set_char(ch)
                .set_style(Style::default().fg(fg).add_modifier(Modifier::BOLD));
            x += 1;
        }
    }
}
