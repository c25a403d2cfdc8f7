//! Left-to-right flow layout that wraps items onto new rows.
//!
//! The layout never owns the items it arranges. Callers hand in the
//! intrinsic sizes (or anything implementing [`FlowItem`]) and get back
//! positions plus the height the rows consume. Every pass starts from
//! scratch, so calling it twice with the same inputs gives the same answer.

use eframe::egui;

/// Something the flow layout can place.
pub trait FlowItem {
    fn size_hint(&self) -> egui::Vec2;
    fn set_geometry(&mut self, rect: egui::Rect);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Only compute the height; no positions are produced.
    Measure,
    /// Produce a position for every item.
    Commit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowArrangement {
    pub positions: Vec<egui::Pos2>,
    pub total_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    pub margin: f32,
    pub spacing: f32,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self { margin: 0.0, spacing: 0.0 }
    }
}

impl FlowLayout {
    pub fn new(margin: f32, spacing: f32) -> Self {
        Self { margin: margin.max(0.0), spacing: spacing.max(0.0) }
    }

    /// Rows depend on the width they are given, so callers have to ask
    /// [`Self::height_for_width`] instead of using a fixed height.
    pub fn has_height_for_width(&self) -> bool { true }

    /// The layout never grows past what its rows need in either direction.
    pub fn expanding(&self) -> egui::Vec2b { egui::Vec2b::FALSE }

    /// Height needed to show every item inside `width`, margins included.
    pub fn height_for_width(&self, sizes: &[egui::Vec2], width: f32) -> f32 {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(width, 0.0));
        let inner = self.arrange(sizes, rect, LayoutMode::Measure).total_height;
        inner + self.margin * 2.0
    }

    /// Lays the items out inside `rect` and applies the geometry to each one.
    /// Returns the consumed height of the rows (margins excluded).
    pub fn set_geometry<T: FlowItem>(&self, items: &mut [T], rect: egui::Rect) -> f32 {
        let sizes: Vec<egui::Vec2> = items.iter().map(|item| item.size_hint()).collect();
        let arrangement = self.arrange(&sizes, rect, LayoutMode::Commit);
        for ((item, pos), size) in items.iter_mut().zip(&arrangement.positions).zip(&sizes) {
            item.set_geometry(egui::Rect::from_min_size(*pos, *size));
        }
        arrangement.total_height
    }

    /// The smallest box any single item fits in, plus margins.
    pub fn minimum_size(&self, sizes: &[egui::Vec2]) -> egui::Vec2 {
        let size = sizes.iter().fold(egui::Vec2::ZERO, |acc, s| acc.max(*s));
        if sizes.is_empty() {
            return size;
        }
        size + egui::Vec2::splat(self.margin * 2.0)
    }

    pub fn arrange(&self, sizes: &[egui::Vec2], rect: egui::Rect, mode: LayoutMode) -> FlowArrangement {
        let area = rect.shrink(self.margin);
        let origin = egui::pos2(area.min.x, rect.min.y + self.margin);
        let right = area.max.x;

        let mut x = origin.x;
        let mut y = origin.y;
        let mut line_height = 0.0_f32;
        let mut positions = match mode {
            LayoutMode::Commit => Vec::with_capacity(sizes.len()),
            LayoutMode::Measure => Vec::new(),
        };

        for size in sizes {
            if x + size.x > right && line_height > 0.0 {
                x = origin.x;
                y += line_height + self.spacing;
                line_height = 0.0;
            }
            if mode == LayoutMode::Commit {
                positions.push(egui::pos2(x, y));
            }
            x += size.x + self.spacing;
            line_height = line_height.max(size.y);
        }

        FlowArrangement { positions, total_height: y + line_height - origin.y }
    }
}
