use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use super::colors::{BACKGROUND, TEXT};
use super::lerp_color;

/// Greedy word wrap to at most `width` characters per line
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let line_len = line.chars().count();

        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        if word_len > width {
            // A single overlong word gets hard-cut
            let cut: String = word.chars().take(width).collect();
            line.push_str(&cut);
        } else {
            line.push_str(word);
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Centred text block that fades in from the background color
pub struct HeadlineWidget<'a> {
    text: &'a str,
    opacity: f32,
    color: Color,
    bold: bool,
}

impl<'a> HeadlineWidget<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            opacity: 1.0,
            color: TEXT,
            bold: true,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Rows the text needs at a given width
    pub fn height(text: &str, width: u16) -> u16 {
        wrap_words(text, width.saturating_sub(4) as usize).len() as u16
    }
}

impl Widget for HeadlineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut style = Style::default().fg(lerp_color(BACKGROUND, self.color, self.opacity));
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }

        let lines = wrap_words(self.text, area.width.saturating_sub(4) as usize);
        for (i, line) in lines.iter().enumerate().take(area.height as usize) {
            let len = line.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(len) / 2;
            buf.set_string(x, area.y + i as u16, line, style);
        }
    }
}
