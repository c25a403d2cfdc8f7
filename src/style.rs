use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_system(theme: egui::Theme) -> Self {
        match theme {
            egui::Theme::Dark => ThemeMode::Dark,
            egui::Theme::Light => ThemeMode::Light,
        }
    }
}

pub struct ColorPalette;

impl ColorPalette {
    pub const BLUE_400: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
    pub const BLUE_500: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
    pub const BLUE_600: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);

    pub const SLATE_100: egui::Color32 = egui::Color32::from_rgb(241, 245, 249);
    pub const SLATE_200: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
    pub const SLATE_300: egui::Color32 = egui::Color32::from_rgb(203, 213, 225);

    pub const GRAY_50: egui::Color32 = egui::Color32::from_rgb(249, 250, 251);
    pub const GRAY_100: egui::Color32 = egui::Color32::from_rgb(243, 244, 246);
    pub const GRAY_200: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);
    pub const GRAY_300: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);
    pub const GRAY_400: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);
    pub const GRAY_500: egui::Color32 = egui::Color32::from_rgb(107, 114, 128);
    pub const GRAY_700: egui::Color32 = egui::Color32::from_rgb(55, 65, 81);
    pub const GRAY_800: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
    pub const GRAY_900: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);

    pub const ZINC_200: egui::Color32 = egui::Color32::from_rgb(228, 228, 231);
    pub const ZINC_400: egui::Color32 = egui::Color32::from_rgb(161, 161, 170);
    pub const ZINC_500: egui::Color32 = egui::Color32::from_rgb(113, 113, 122);
    pub const ZINC_600: egui::Color32 = egui::Color32::from_rgb(82, 82, 91);
    pub const ZINC_700: egui::Color32 = egui::Color32::from_rgb(63, 63, 70);
    pub const ZINC_800: egui::Color32 = egui::Color32::from_rgb(39, 39, 42);
    pub const ZINC_900: egui::Color32 = egui::Color32::from_rgb(24, 24, 27);
}

/// Fill, border and text colours for one widget state.
struct WidgetColors { bg: egui::Color32, weak_bg: egui::Color32, stroke: egui::Color32, fg: egui::Color32 }

fn paint_widget(w: &mut egui::style::WidgetVisuals, c: WidgetColors) {
    w.bg_fill = c.bg;
    w.weak_bg_fill = c.weak_bg;
    w.bg_stroke = egui::Stroke::new(1.0, c.stroke);
    w.fg_stroke = egui::Stroke::new(1.0, c.fg);
}

pub fn apply_theme(ctx: &egui::Context, theme: ThemeMode) {
    let mut style = (*ctx.style()).clone();

    for w in [
        &mut style.visuals.widgets.noninteractive,
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
        &mut style.visuals.widgets.active,
    ] {
        w.corner_radius = egui::CornerRadius::same(4);
    }

    style.spacing.item_spacing = egui::vec2(6.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    style.spacing.window_margin = egui::Margin::same(8);

    let v = &mut style.visuals;
    match theme {
        ThemeMode::Dark => {
            v.dark_mode = true;
            v.panel_fill = ColorPalette::ZINC_900;
            v.window_fill = ColorPalette::ZINC_900;
            v.faint_bg_color = ColorPalette::ZINC_800;
            v.extreme_bg_color = egui::Color32::from_rgb(12, 12, 15);
            paint_widget(&mut v.widgets.noninteractive, WidgetColors { bg: ColorPalette::ZINC_800, weak_bg: egui::Color32::from_rgb(22, 22, 26), stroke: ColorPalette::ZINC_700, fg: ColorPalette::SLATE_300 });
            paint_widget(&mut v.widgets.inactive, WidgetColors { bg: egui::Color32::from_rgb(30, 30, 35), weak_bg: ColorPalette::ZINC_800, stroke: ColorPalette::ZINC_600, fg: ColorPalette::SLATE_200 });
            paint_widget(&mut v.widgets.hovered, WidgetColors { bg: egui::Color32::from_rgb(40, 40, 48), weak_bg: egui::Color32::from_rgb(35, 35, 42), stroke: ColorPalette::ZINC_500, fg: ColorPalette::SLATE_100 });
            paint_widget(&mut v.widgets.active, WidgetColors { bg: egui::Color32::from_rgb(50, 50, 60), weak_bg: egui::Color32::from_rgb(45, 45, 55), stroke: ColorPalette::ZINC_400, fg: egui::Color32::WHITE });
            v.selection.bg_fill = egui::Color32::from_rgba_premultiplied(60, 120, 240, 100);
            v.selection.stroke = egui::Stroke::new(1.0, ColorPalette::BLUE_400);
            v.hyperlink_color = ColorPalette::BLUE_400;
        }
        ThemeMode::Light => {
            v.dark_mode = false;
            v.panel_fill = ColorPalette::GRAY_50;
            v.window_fill = ColorPalette::GRAY_50;
            v.faint_bg_color = ColorPalette::GRAY_100;
            v.extreme_bg_color = egui::Color32::WHITE;
            paint_widget(&mut v.widgets.noninteractive, WidgetColors { bg: egui::Color32::WHITE, weak_bg: ColorPalette::GRAY_50, stroke: ColorPalette::GRAY_300, fg: ColorPalette::GRAY_700 });
            paint_widget(&mut v.widgets.inactive, WidgetColors { bg: ColorPalette::GRAY_50, weak_bg: ColorPalette::GRAY_100, stroke: ColorPalette::GRAY_300, fg: ColorPalette::GRAY_800 });
            paint_widget(&mut v.widgets.hovered, WidgetColors { bg: ColorPalette::GRAY_100, weak_bg: ColorPalette::GRAY_200, stroke: ColorPalette::GRAY_400, fg: ColorPalette::GRAY_900 });
            paint_widget(&mut v.widgets.active, WidgetColors { bg: ColorPalette::GRAY_200, weak_bg: ColorPalette::GRAY_300, stroke: ColorPalette::GRAY_500, fg: egui::Color32::BLACK });
            v.selection.bg_fill = egui::Color32::from_rgba_premultiplied(60, 120, 240, 80);
            v.selection.stroke = egui::Stroke::new(1.0, ColorPalette::BLUE_600);
            v.hyperlink_color = ColorPalette::BLUE_600;
        }
    }

    ctx.set_style(style);
}

/// Checkable tag button drawn at a rect chosen by the flow layout.
pub fn tag_button(ui: &mut egui::Ui, rect: egui::Rect, label: &str, checked: bool, theme: ThemeMode) -> egui::Response {
    let (bg, border, text, hover_bg) = match (theme, checked) {
        (_, true) => (ColorPalette::BLUE_600, ColorPalette::BLUE_500, egui::Color32::WHITE, ColorPalette::BLUE_500),
        (ThemeMode::Dark, false) => (ColorPalette::ZINC_800, ColorPalette::ZINC_600, ColorPalette::ZINC_200, ColorPalette::ZINC_700),
        (ThemeMode::Light, false) => (ColorPalette::GRAY_200, ColorPalette::GRAY_400, ColorPalette::GRAY_800, ColorPalette::GRAY_300),
    };

    ui.scope(|ui| {
        let s = ui.style_mut();
        s.visuals.widgets.inactive.bg_fill = bg;
        s.visuals.widgets.inactive.weak_bg_fill = bg;
        s.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, border);
        s.visuals.widgets.hovered.bg_fill = hover_bg;
        s.visuals.widgets.hovered.weak_bg_fill = hover_bg;
        s.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ColorPalette::BLUE_400);
        s.visuals.widgets.active.bg_fill = hover_bg;
        s.visuals.widgets.active.weak_bg_fill = hover_bg;

        let button = egui::Button::new(egui::RichText::new(label).color(text)).selected(checked);
        ui.put(rect, button)
    }).inner
}

pub fn panel_heading(ui: &mut egui::Ui, text: &str, theme: ThemeMode) {
    let color = match theme {
        ThemeMode::Dark => ColorPalette::ZINC_400,
        ThemeMode::Light => ColorPalette::GRAY_500,
    };
    ui.add_space(4.0);
    ui.label(egui::RichText::new(text.to_uppercase()).size(11.0).strong().color(color));
    ui.separator();
}
