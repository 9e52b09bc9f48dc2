//! Scene composition for the proposal screens.
//!
//! [`SceneLayout`] decides where everything goes for a frame; the app keeps
//! the last one around for mouse hit-testing. [`SceneRenderer`] draws the
//! widgets back to front:
//!
//! 1. Background fill
//! 2. Photo wall (question only)
//! 3. Headline
//! 4. Mascot
//! 5. Buttons (the evasive one last, so it floats above everything)
//! 6. Footer
//! 7. Fireworks
//! 8. Hint bar

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::animation::{fade_in_opacity, Particle};
use crate::config::Messages;
use crate::positioning::{CellSize, ForbiddenZone, TargetBounds, ViewportPosition};
use crate::state::Step;

use super::buttons::{button_width, ButtonId, ButtonWidget, BUTTON_HEIGHT};
use super::colors::{BACKGROUND, MUTED};
use super::fireworks::FireworksWidget;
use super::headline::HeadlineWidget;
use super::mascot::{MascotWidget, Mood};
use super::photo_grid::PhotoGridWidget;
use super::ui::HintBar;

/// Gap between the two buttons when they sit side by side
const BUTTON_GAP: u16 = 4;

/// Where every element of a frame goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneLayout {
    /// Everything above the hint bar
    pub scene: Rect,
    pub hint: Rect,
    pub headline: Rect,
    pub mascot: Rect,
    pub accept: Option<Rect>,
    pub decline: Option<Rect>,
    pub footer: Option<Rect>,
}

impl SceneLayout {
    /// Lay out a frame.
    ///
    /// `evasive` is the decline button's viewport position once it has
    /// started fleeing; before that it sits next to the accept button.
    /// Every rect is trimmed to the scene, so a short terminal clips
    /// content instead of drawing past the buffer.
    pub fn compute(
        area: Rect,
        step: Step,
        messages: &Messages,
        evasive: Option<ViewportPosition>,
        zone: &ForbiddenZone,
    ) -> Self {
        let hint = Rect::new(area.x, area.y + area.height.saturating_sub(1), area.width, area.height.min(1));
        let scene = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));

        let headline_text = match step {
            Step::Congratulations => &messages.congratulations,
            Step::Warning => &messages.warning,
            Step::Question => &messages.question,
            Step::Celebration => &messages.celebration,
        };
        let headline_rows = HeadlineWidget::height(headline_text, scene.width).max(1);
        let (mascot_w, mascot_h) = MascotWidget::size();
        // One spare row above the art for the hop
        let mascot_h = mascot_h + 1;

        // Stack: headline, gap, mascot, gap, buttons/footer; centred vertically
        let has_mascot = matches!(step, Step::Question | Step::Celebration);
        let below = match step {
            Step::Question => BUTTON_HEIGHT + 1,
            Step::Celebration => 2,
            _ => 0,
        };
        let block = headline_rows + if has_mascot { 1 + mascot_h + 1 + below } else { 0 };
        let top = scene.y + scene.height.saturating_sub(block) / 2;

        let headline = Rect::new(scene.x, top, scene.width, headline_rows).intersection(scene);

        let mascot_y = top + headline_rows + 1;
        let mascot = if has_mascot {
            Rect::new(
                scene.x + scene.width.saturating_sub(mascot_w) / 2,
                mascot_y,
                mascot_w.min(scene.width),
                mascot_h,
            )
            .intersection(scene)
        } else {
            Rect::new(scene.x, mascot_y, 0, 0)
        };
        let below_y = mascot_y + mascot_h + 1;

        let (accept, decline) = if step == Step::Question {
            let accept_w = button_width(&messages.accept_label);
            let decline_w = button_width(&messages.decline_label);
            let row_w = accept_w + BUTTON_GAP + decline_w;
            let row_x = scene.x + scene.width.saturating_sub(row_w) / 2;

            let accept = Rect::new(row_x, below_y, accept_w, BUTTON_HEIGHT);
            let decline = match evasive {
                Some(pos) => Self::place(scene, pos, zone, decline_w, BUTTON_HEIGHT),
                None => Rect::new(row_x + accept_w + BUTTON_GAP, below_y, decline_w, BUTTON_HEIGHT),
            };
            (Some(accept.intersection(scene)), Some(decline.intersection(scene)))
        } else {
            (None, None)
        };

        let footer = (step == Step::Celebration)
            .then(|| Rect::new(scene.x, below_y, scene.width, 2).intersection(scene));

        Self {
            scene,
            hint,
            headline,
            mascot,
            accept,
            decline,
            footer,
        }
    }

    /// Rect of a `width`×`height` element anchored at a viewport position,
    /// pulled back inside the scene if it would overflow.
    ///
    /// Pulling back can drag the anchor into the forbidden zone on a narrow
    /// or short scene; it then keeps going left past the zone, or up when
    /// the zone starts at the left edge.
    fn place(scene: Rect, pos: ViewportPosition, zone: &ForbiddenZone, width: u16, height: u16) -> Rect {
        let (col, row) = pos.to_terminal(scene.width, scene.height);
        let mut col = col.min(scene.width.saturating_sub(width));
        let mut row = row.min(scene.height.saturating_sub(height));

        if zone.contains(percent_of(col, scene.width), percent_of(row, scene.height)) {
            if zone.left_min > 0.0 {
                col = col.min(cells_before(zone.left_min, scene.width));
            } else if zone.top_min > 0.0 {
                row = row.min(cells_before(zone.top_min, scene.height));
            }
        }

        Rect::new(scene.x + col, scene.y + row, width, height)
    }

    /// Which button is under a cell. The decline button is drawn on top, so it wins.
    pub fn button_at(&self, x: u16, y: u16) -> Option<ButtonId> {
        let hit = |r: &Rect| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height;
        if self.decline.as_ref().is_some_and(hit) {
            return Some(ButtonId::Decline);
        }
        if self.accept.as_ref().is_some_and(hit) {
            return Some(ButtonId::Accept);
        }
        None
    }

    /// Pixel-space bounds of the evasive button, if it is on screen
    pub fn decline_bounds(&self, cell: CellSize) -> Option<TargetBounds> {
        let r = self.decline?;
        if r.width == 0 || r.height == 0 {
            return None;
        }
        Some(TargetBounds::from_cells(r.x, r.y, r.width, r.height, cell))
    }
}

/// Share of `total` cells that `cells` covers, in percent
fn percent_of(cells: u16, total: u16) -> f32 {
    if total == 0 {
        return 0.0;
    }
    cells as f32 * 100.0 / total as f32
}

/// Last cell index that lies strictly below `percent` of `total`
fn cells_before(percent: f32, total: u16) -> u16 {
    let mut cell = (percent / 100.0 * total as f32).floor() as u16;
    while cell > 0 && percent_of(cell, total) >= percent {
        cell -= 1;
    }
    cell
}

/// Everything the renderer needs for one frame
pub struct RenderState<'a> {
    pub step: Step,
    pub step_elapsed: Duration,
    pub time_left: Option<Duration>,
    pub messages: &'a Messages,
    /// Photo list and column count, when the wall is enabled
    pub photos: Option<(&'a [String], u16)>,
    pub fireworks: Option<&'a [Particle]>,
    pub hovered: Option<ButtonId>,
    pub dodges: Option<u64>,
    pub accepted_at: Option<String>,
    /// Seconds since start, for looping animations
    pub clock: f32,
}

/// Draws a [`RenderState`] into a buffer using a precomputed layout
pub struct SceneRenderer<'a> {
    layout: &'a SceneLayout,
}

impl<'a> SceneRenderer<'a> {
    pub fn new(layout: &'a SceneLayout) -> Self {
        Self { layout }
    }

    pub fn render_all(&self, buf: &mut Buffer, state: &RenderState<'_>) {
        let layout = self.layout;
        let opacity = fade_in_opacity(state.step_elapsed, state.step.fade_in());

        let bg = Style::default().bg(BACKGROUND);
        for y in layout.scene.y..layout.scene.y + layout.scene.height {
            for x in layout.scene.x..layout.scene.x + layout.scene.width {
                buf[(x, y)].set_char(' ').set_style(bg);
            }
        }

        if state.step == Step::Question {
            if let Some((photos, columns)) = state.photos {
                PhotoGridWidget::new(photos, columns)
                    .fade(opacity)
                    .render(layout.scene, buf);
            }
        }

        let headline_text = match state.step {
            Step::Congratulations => &state.messages.congratulations,
            Step::Warning => &state.messages.warning,
            Step::Question => &state.messages.question,
            Step::Celebration => &state.messages.celebration,
        };
        HeadlineWidget::new(headline_text)
            .opacity(opacity)
            .render(layout.headline, buf);

        match state.step {
            Step::Question => {
                MascotWidget::new(Mood::Sad, state.clock)
                    .opacity(opacity)
                    .render(layout.mascot, buf);
            }
            Step::Celebration => {
                MascotWidget::new(Mood::Happy, state.clock)
                    .opacity(opacity)
                    .render(layout.mascot, buf);
            }
            _ => {}
        }

        if let Some(rect) = layout.accept {
            ButtonWidget::new(ButtonId::Accept, &state.messages.accept_label)
                .hovered(state.hovered == Some(ButtonId::Accept))
                .opacity(opacity)
                .render(rect, buf);
        }
        if let Some(rect) = layout.decline {
            ButtonWidget::new(ButtonId::Decline, &state.messages.decline_label)
                .hovered(state.hovered == Some(ButtonId::Decline))
                .opacity(opacity)
                .render(rect, buf);
        }

        if let Some(rect) = layout.footer {
            let footer = Rect::new(rect.x, rect.y, rect.width, rect.height.min(1));
            HeadlineWidget::new(&state.messages.footer)
                .bold(false)
                .opacity(opacity)
                .render(footer, buf);
            if let (Some(at), true) = (&state.accepted_at, rect.height > 1) {
                let line = Rect::new(rect.x, rect.y + 1, rect.width, 1);
                HeadlineWidget::new(at)
                    .bold(false)
                    .color(MUTED)
                    .opacity(opacity)
                    .render(line, buf);
            }
        }

        if let Some(particles) = state.fireworks {
            FireworksWidget::new(particles, state.clock).render(layout.scene, buf);
        }

        HintBar::new(state.step)
            .time_left(state.time_left)
            .dodges(state.dodges)
            .render(layout.hint, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 80, 25)
    }

    fn zone() -> ForbiddenZone {
        ForbiddenZone::default()
    }

    fn inside(rect: Rect, outer: Rect) -> bool {
        rect.x >= outer.x && rect.y >= outer.y && rect.right() <= outer.right() && rect.bottom() <= outer.bottom()
    }

    #[test]
    fn test_buttons_only_on_question() {
        let messages = Messages::default();
        for step in [Step::Congratulations, Step::Warning, Step::Celebration] {
            let layout = SceneLayout::compute(area(), step, &messages, None, &zone());
            assert!(layout.accept.is_none());
            assert!(layout.decline.is_none());
        }
        let layout = SceneLayout::compute(area(), Step::Question, &messages, None, &zone());
        assert!(layout.accept.is_some());
        assert!(layout.decline.is_some());
    }

    #[test]
    fn test_inline_decline_sits_right_of_accept() {
        let messages = Messages::default();
        let layout = SceneLayout::compute(area(), Step::Question, &messages, None, &zone());
        let accept = layout.accept.unwrap();
        let decline = layout.decline.unwrap();
        assert_eq!(accept.y, decline.y);
        assert_eq!(decline.x, accept.x + accept.width + BUTTON_GAP);
        assert_eq!(layout.hint.y, 24);
    }

    #[test]
    fn test_evasive_decline_follows_position() {
        let messages = Messages::default();
        let layout = SceneLayout::compute(area(), Step::Question, &messages, Some(ViewportPosition::new(10.0, 5.0)), &zone());
        let decline = layout.decline.unwrap();
        // 5% of 80 cols, 10% of 24 rows
        assert_eq!((decline.x, decline.y), (4, 2));
    }

    #[test]
    fn test_evasive_decline_stays_inside_scene() {
        let messages = Messages::default();
        let layout = SceneLayout::compute(area(), Step::Question, &messages, Some(ViewportPosition::new(90.0, 90.0)), &zone());
        let decline = layout.decline.unwrap();
        assert!(decline.x + decline.width <= layout.scene.width);
        assert!(decline.y + decline.height <= layout.scene.height);
        assert_eq!(decline.width, button_width(&messages.decline_label));
    }

    #[test]
    fn test_button_hit_testing() {
        let messages = Messages::default();
        let layout = SceneLayout::compute(area(), Step::Question, &messages, None, &zone());
        let accept = layout.accept.unwrap();
        let decline = layout.decline.unwrap();

        assert_eq!(layout.button_at(accept.x, accept.y), Some(ButtonId::Accept));
        assert_eq!(layout.button_at(decline.x + 1, decline.y + 1), Some(ButtonId::Decline));
        assert_eq!(layout.button_at(0, 0), None);
    }

    #[test]
    fn test_decline_on_top_when_overlapping() {
        let messages = Messages::default();
        let inline = SceneLayout::compute(area(), Step::Question, &messages, None, &zone());
        let accept = inline.accept.unwrap();

        // Put the decline button right over the accept button
        let mut layout = inline.clone();
        layout.decline = Some(accept);
        assert_eq!(layout.button_at(accept.x, accept.y), Some(ButtonId::Decline));
    }

    #[test]
    fn test_decline_bounds_in_pixels() {
        let messages = Messages::default();
        let layout = SceneLayout::compute(area(), Step::Question, &messages, Some(ViewportPosition::new(10.0, 5.0)), &zone());
        let bounds = layout.decline_bounds(CellSize::default()).unwrap();
        assert_eq!((bounds.x, bounds.y), (32.0, 32.0));
        assert_eq!(bounds.height, 48.0);
    }

    #[test]
    fn test_render_question_frame() {
        let messages = Messages::default();
        let layout = SceneLayout::compute(area(), Step::Question, &messages, None, &zone());
        let photos: Vec<String> = (1..=36).map(|i| format!("/game-photos/{i}.jpeg")).collect();
        let state = RenderState {
            step: Step::Question,
            step_elapsed: Duration::from_secs(10),
            time_left: None,
            messages: &messages,
            photos: Some((&photos, 6)),
            fireworks: None,
            hovered: None,
            dodges: Some(0),
            accepted_at: None,
            clock: 0.0,
        };
        let mut buf = Buffer::empty(area());
        SceneRenderer::new(&layout).render_all(&mut buf, &state);

        let headline_row: String = (0..80)
            .map(|x| buf[(x, layout.headline.y)].symbol().to_string())
            .collect();
        assert!(headline_row.contains("Will you be my Valentine?"));

        let accept = layout.accept.unwrap();
        let label_row: String = (accept.x..accept.x + accept.width)
            .map(|x| buf[(x, accept.y + 1)].symbol().to_string())
            .collect();
        assert!(label_row.contains("Yes, I will!"));
    }

    #[test]
    fn test_small_terminals_render_every_step() {
        use crate::animation::ParticleKind;

        let messages = Messages::default();
        let photos: Vec<String> = (1..=36).map(|i| format!("/game-photos/{i}.jpeg")).collect();
        let sparks = [Particle {
            x: 0.5,
            y: 0.5,
            vx: 0.0,
            vy: 0.0,
            life: 1.0,
            decay: 1.0,
            hue: 330.0,
            kind: ParticleKind::Spark,
        }];

        let mut sizes: Vec<(u16, u16)> = (1..=8).map(|h| (80, h)).collect();
        sizes.extend([(1, 1), (3, 3), (20, 4), (40, 12)]);

        for (width, height) in sizes {
            let area = Rect::new(0, 0, width, height);
            for step in Step::ALL {
                for evasive in [
                    None,
                    Some(ViewportPosition::new(90.0, 90.0)),
                    Some(ViewportPosition::new(50.0, 0.0)),
                ] {
                    let layout = SceneLayout::compute(area, step, &messages, evasive, &zone());
                    let rects = [layout.headline, layout.mascot]
                        .into_iter()
                        .chain(layout.accept)
                        .chain(layout.decline)
                        .chain(layout.footer);
                    for rect in rects.filter(|r| r.width > 0 && r.height > 0) {
                        assert!(inside(rect, layout.scene), "{rect:?} outside {:?} at {width}x{height}", layout.scene);
                    }

                    let state = RenderState {
                        step,
                        step_elapsed: Duration::from_secs(10),
                        time_left: Some(Duration::from_secs(1)),
                        messages: &messages,
                        photos: Some((&photos, 6)),
                        fireworks: Some(&sparks),
                        hovered: Some(ButtonId::Decline),
                        dodges: Some(3),
                        accepted_at: Some("Said yes on Friday, February 14 at 20:00".to_string()),
                        clock: 0.1,
                    };
                    let mut buf = Buffer::empty(area);
                    SceneRenderer::new(&layout).render_all(&mut buf, &state);
                }
            }
        }
    }

    #[test]
    fn test_clamped_decline_stays_out_of_zone() {
        let messages = Messages::default();
        let area = Rect::new(0, 0, 40, 25);
        // Far right, halfway down: clamping a 15-wide button pulls it to col 25 (62.5%)
        let layout = SceneLayout::compute(area, Step::Question, &messages, Some(ViewportPosition::new(50.0, 90.0)), &zone());
        let decline = layout.decline.unwrap();

        let left = decline.x as f32 * 100.0 / layout.scene.width as f32;
        let top = decline.y as f32 * 100.0 / layout.scene.height as f32;
        assert!(!zone().contains(left, top), "anchor at ({left}, {top})");
        assert_eq!(decline.x, 13);
        assert_eq!(decline.width, button_width(&messages.decline_label));
    }

    #[test]
    fn test_unclamped_decline_is_not_moved() {
        let messages = Messages::default();
        let layout = SceneLayout::compute(area(), Step::Question, &messages, Some(ViewportPosition::new(50.0, 20.0)), &zone());
        // 20% of 80 cols, 50% of 24 rows
        assert_eq!(layout.decline.map(|r| (r.x, r.y)), Some((16, 12)));
    }
}
