use eframe::egui;
use crate::modules::preset_selector::TagSource;
use crate::style::{self, ThemeMode};
use super::td_main::TagDocker;

impl TagDocker {
    pub fn ui(&mut self, ui: &mut egui::Ui, host: Option<&mut dyn TagSource>, theme: ThemeMode) -> egui::Response {
        if self.buttons.is_empty() {
            let hint = if self.is_attached() { "No brush tags." } else { "Waiting for the brush preset selector..." };
            return ui.weak(hint);
        }

        self.measure_buttons(ui);
        let sizes: Vec<egui::Vec2> = self.buttons.iter().map(|b| b.size).collect();
        let minimum = self.layout.minimum_size(&sizes);
        let width = ui.available_width().max(minimum.x);
        let mut height = if self.layout.has_height_for_width() {
            self.layout.height_for_width(&sizes, width)
        } else {
            minimum.y
        };
        if self.layout.expanding().y {
            height = height.max(ui.available_height());
        }

        let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
        self.layout.set_geometry(&mut self.buttons, rect);

        let mut clicked = None;
        for (i, button) in self.buttons.iter().enumerate() {
            if !ui.is_rect_visible(button.rect) {
                continue;
            }
            if style::tag_button(ui, button.rect, &button.label, button.checked, theme).clicked() {
                clicked = Some(i);
            }
        }
        if let Some(i) = clicked {
            self.on_button_clicked(i, host);
        }
        response
    }

    fn measure_buttons(&mut self, ui: &egui::Ui) {
        let font_id = egui::TextStyle::Button.resolve(ui.style());
        let padding = ui.spacing().button_padding;
        let min_height = ui.spacing().interact_size.y;
        for button in &mut self.buttons {
            let job = egui::text::LayoutJob::simple_singleline(button.label.clone(), font_id.clone(), egui::Color32::PLACEHOLDER);
            let text = ui.fonts_mut(|f: &mut egui::epaint::FontsView<'_>| f.layout_job(job)).size();
            button.size = egui::vec2(text.x + padding.x * 2.0, (text.y + padding.y * 2.0).max(min_height));
        }
    }
}
