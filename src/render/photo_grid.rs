use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use super::colors::{dim_color, photo_tint};

/// How visible the wall is behind the question (the photos sit at 10% opacity)
pub const PHOTO_OPACITY: f32 = 0.1;

/// Short label for a photo path: its file stem
pub fn photo_label(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
}

/// Faded wall of photo tiles, laid out row-major in a fixed number of columns
pub struct PhotoGridWidget<'a> {
    photos: &'a [String],
    columns: u16,
    opacity: f32,
}

impl<'a> PhotoGridWidget<'a> {
    pub fn new(photos: &'a [String], columns: u16) -> Self {
        Self {
            photos,
            columns: columns.max(1),
            opacity: PHOTO_OPACITY,
        }
    }

    /// Multiplies the wall's base opacity (used while the question fades in)
    pub fn fade(mut self, factor: f32) -> Self {
        self.opacity = PHOTO_OPACITY * factor.clamp(0.0, 1.0);
        self
    }

    /// Cell rectangle of the tile at `index`
    pub fn tile_rect(&self, area: Rect, index: usize) -> Option<Rect> {
        if index >= self.photos.len() || area.width == 0 || area.height == 0 {
            return None;
        }
        let columns = self.columns.min(area.width).max(1);
        let rows = self.photos.len().div_ceil(columns as usize) as u16;
        let tile_w = area.width / columns;
        let tile_h = (area.height / rows.max(1)).max(1);

        let col = index as u16 % columns;
        let row = index as u16 / columns;
        let y = area.y + row * tile_h;
        if y >= area.y + area.height {
            return None;
        }

        // The last column absorbs the width remainder
        let width = if col == columns - 1 {
            area.width - col * tile_w
        } else {
            tile_w
        };
        let height = tile_h.min(area.y + area.height - y);
        Some(Rect::new(area.x + col * tile_w, y, width, height))
    }
}

impl Widget for PhotoGridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Tiles at 10% barely register on a dark background; lift them a little
        let brightness = (self.opacity * 2.5).min(1.0);

        for (index, path) in self.photos.iter().enumerate() {
            let Some(tile) = self.tile_rect(area, index) else {
                continue;
            };

            let tint = dim_color(photo_tint(index), brightness);
            let fill = Style::default().bg(tint);
            for y in tile.y..tile.y + tile.height {
                for x in tile.x..tile.x + tile.width {
                    buf[(x, y)].set_char(' ').set_style(fill);
                }
            }

            // Label in the top-left corner of the tile
            let label_style = Style::default()
                .fg(dim_color(photo_tint(index), (brightness * 3.0).min(1.0)))
                .bg(tint);
            let label: String = photo_label(path)
                .chars()
                .take(tile.width.saturating_sub(1) as usize)
                .collect();
            if !label.is_empty() {
                buf.set_string(tile.x + 1.min(tile.width - 1), tile.y, &label, label_style);
            }
        }
    }
}
