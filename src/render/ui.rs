use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::state::Step;

use super::colors::{HEART, MUTED};

/// Key hints for a step
pub fn step_hint(step: Step) -> &'static str {
    match step {
        Step::Congratulations | Step::Warning => "→/space: skip",
        Step::Question => "enter/y: yes  n: no",
        Step::Celebration => "",
    }
}

/// Bottom bar: step progress, countdown, key hints
pub struct HintBar {
    step: Step,
    time_left: Option<Duration>,
    dodges: Option<u64>,
}

impl HintBar {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            time_left: None,
            dodges: None,
        }
    }

    pub fn time_left(mut self, time_left: Option<Duration>) -> Self {
        self.time_left = time_left;
        self
    }

    pub fn dodges(mut self, dodges: Option<u64>) -> Self {
        self.dodges = dodges;
        self
    }
}

/// Write `text` at `x`, stopping before the last column. Returns the next free x.
fn put(buf: &mut Buffer, area: Rect, mut x: u16, text: &str, style: Style) -> u16 {
    for ch in text.chars() {
        if x >= area.x + area.width.saturating_sub(1) {
            break;
        }
        buf[(x, area.y)].set_char(ch).set_style(style);
        x += 1;
    }
    x
}

impl Widget for HintBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Background
        let bg_style = Style::default().bg(Color::Rgb(35, 22, 32));
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(bg_style);
        }

        let accent_style = Style::default().fg(HEART).add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(MUTED);

        let mut x = put(buf, area, area.x + 1, "♥ PROPOSAL", accent_style) + 2;

        // Step progress dots
        for i in 0..Step::ALL.len() {
            let (dot, style) = if i <= self.step.index() {
                ("●", accent_style)
            } else {
                ("○", label_style)
            };
            x = put(buf, area, x, dot, style) + 1;
        }
        x += 1;

        if let Some(left) = self.time_left {
            let text = format!("next in {:.1}s", left.as_secs_f32());
            x = put(buf, area, x, &text, label_style) + 2;
        }

        if let Some(dodges) = self.dodges {
            if dodges > 0 {
                let text = format!("dodged {dodges}x");
                x = put(buf, area, x, &text, label_style) + 2;
            }
        }

        let hint = step_hint(self.step);
        if !hint.is_empty() {
            x = put(buf, area, x, hint, label_style) + 2;
        }

        // Right-aligned quit hint
        let quit = "q: quit";
        let quit_x = (area.x + area.width).saturating_sub(quit.len() as u16 + 1);
        if quit_x > x {
            put(buf, area, quit_x, quit, label_style);
        }
    }
}
