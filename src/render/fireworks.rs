use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::animation::pulse::flicker;
use crate::animation::Particle;

use super::colors::hue_color;

/// Spark symbols from freshest to nearly gone
const SPARK_SYMBOLS: [&str; 4] = ["✸", "*", "+", "·"];

/// Symbol for a spark with the given remaining life
pub fn spark_symbol(life: f32) -> &'static str {
    let life = life.clamp(0.0, 1.0);
    let index = ((1.0 - life) * SPARK_SYMBOLS.len() as f32) as usize;
    SPARK_SYMBOLS[index.min(SPARK_SYMBOLS.len() - 1)]
}

/// Draws rockets and sparks over whatever is already in the buffer
pub struct FireworksWidget<'a> {
    particles: &'a [Particle],
    time: f32,
}

impl<'a> FireworksWidget<'a> {
    pub fn new(particles: &'a [Particle], time: f32) -> Self {
        Self { particles, time }
    }
}

impl Widget for FireworksWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for (i, p) in self.particles.iter().enumerate() {
            if !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
                continue;
            }
            let x = area.x + (p.x * (area.width - 1) as f32).round() as u16;
            let y = area.y + (p.y * (area.height - 1) as f32).round() as u16;

            let (symbol, value) = if p.is_rocket() {
                ("|", 0.9)
            } else {
                let twinkle = flicker(self.time + i as f32 * 0.37, 1.0);
                (spark_symbol(p.life), (p.life * twinkle).max(0.25))
            };

            buf[(x, y)]
                .set_symbol(symbol)
                .set_style(Style::default().fg(hue_color(p.hue, value)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ParticleKind;

    fn spark(x: f32, y: f32, life: f32) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            life,
            decay: 1.0,
            hue: 330.0,
            kind: ParticleKind::Spark,
        }
    }

    #[test]
    fn test_spark_symbol_fades() {
        assert_eq!(spark_symbol(1.0), "✸");
        assert_eq!(spark_symbol(0.1), "·");
        assert_eq!(spark_symbol(0.0), "·");
    }

    #[test]
    fn test_particles_map_to_cells() {
        let area = Rect::new(0, 0, 11, 11);
        let mut buf = Buffer::empty(area);
        let particles = [spark(0.5, 0.5, 1.0), spark(0.0, 1.0, 0.1)];
        FireworksWidget::new(&particles, 0.0).render(area, &mut buf);
        assert_eq!(buf[(5, 5)].symbol(), "✸");
        assert_eq!(buf[(0, 10)].symbol(), "·");
    }

    #[test]
    fn test_offscreen_particles_skipped() {
        let area = Rect::new(0, 0, 5, 5);
        let mut buf = Buffer::empty(area);
        let particles = [spark(-0.05, 0.5, 1.0), spark(0.5, 1.05, 1.0)];
        FireworksWidget::new(&particles, 0.0).render(area, &mut buf);
        assert!((0..5).all(|y| (0..5).all(|x| buf[(x, y)].symbol() == " ")));
    }
}
