use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use crate::modules::preset_selector::{DEFAULT_TAGS, PresetSelector, TagSource};
use crate::modules::tag_docker::{DOCKER_TITLE, TagDocker};
use crate::modules::tag_mirror::TAGS_FILENAME;
use crate::settings::{AppSettings, DockSide, ThemePreference};
use crate::style::{self, ColorPalette, ThemeMode};

pub struct BrushTagApp {
    settings: AppSettings,
    theme_mode: ThemeMode,
    presets: PresetSelector,
    docker: TagDocker,
    attach_at: Option<Instant>,
    new_tag_name: String,
}

impl BrushTagApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();
        let theme_mode = Self::resolve_theme(settings.theme_preference, &cc.egui_ctx);
        style::apply_theme(&cc.egui_ctx, theme_mode);

        let docker = TagDocker::new(&settings.docker);
        tracing::info!(mirror = %docker.mirror().path().display(), restored = docker.buttons().len(), "tag docker created");
        let attach_at = settings.docker.visible
            .then(|| Instant::now() + Duration::from_millis(settings.docker.startup_delay_ms));

        Self {
            settings,
            theme_mode,
            presets: PresetSelector::default(),
            docker,
            attach_at,
            new_tag_name: String::new(),
        }
    }

    fn resolve_theme(preference: ThemePreference, ctx: &egui::Context) -> ThemeMode {
        match preference {
            ThemePreference::System => ThemeMode::from_system(ctx.theme()),
            ThemePreference::Light => ThemeMode::Light,
            ThemePreference::Dark => ThemeMode::Dark,
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            tracing::error!("could not save settings: {e}");
        }
    }

    fn set_theme(&mut self, ctx: &egui::Context, preference: ThemePreference) {
        self.settings.theme_preference = preference;
        self.theme_mode = Self::resolve_theme(preference, ctx);
        style::apply_theme(ctx, self.theme_mode);
        self.save_settings();
    }

    fn set_docker_visible(&mut self, visible: bool) {
        self.settings.docker.visible = visible;
        if visible {
            if !self.docker.is_attached() {
                self.attach_at = Some(Instant::now());
            }
        } else {
            self.docker.detach();
            self.attach_at = None;
        }
        self.save_settings();
    }

    fn set_mirror_path(&mut self, path: Option<PathBuf>) {
        self.settings.docker.mirror_path = path;
        self.docker.apply_settings(&self.settings.docker);
        self.save_settings();
    }

    fn poll_attach(&mut self, ctx: &egui::Context) {
        let Some(at) = self.attach_at else { return };
        let now = Instant::now();
        if now < at {
            ctx.request_repaint_after(at - now);
            return;
        }
        self.attach_at = None;
        self.docker.attach(Some(&mut self.presets));
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut visible = self.settings.docker.visible;
                    if ui.checkbox(&mut visible, format!("Show {DOCKER_TITLE}")).changed() {
                        self.set_docker_visible(visible);
                    }

                    ui.separator();
                    ui.label("Dock Side:");
                    let mut side = self.settings.docker.dock_side;
                    let left = ui.radio_value(&mut side, DockSide::Left, "Left").clicked();
                    let right = ui.radio_value(&mut side, DockSide::Right, "Right").clicked();
                    if left || right {
                        self.settings.docker.dock_side = side;
                        self.save_settings();
                    }

                    ui.separator();
                    ui.label("Theme:");
                    for (preference, label) in [
                        (ThemePreference::System, "System"),
                        (ThemePreference::Light, "Light"),
                        (ThemePreference::Dark, "Dark"),
                    ] {
                        if ui.selectable_label(self.settings.theme_preference == preference, label).clicked() {
                            self.set_theme(ctx, preference);
                            ui.close();
                        }
                    }
                });

                ui.menu_button("Tags", |ui| {
                    if ui.button("Mirror File Location...").clicked() {
                        let start_dir = self.docker.mirror().path().parent().map(|p| p.to_path_buf());
                        let mut dialog = rfd::FileDialog::new()
                            .add_filter("Text", &["txt"])
                            .set_file_name(TAGS_FILENAME);
                        if let Some(dir) = start_dir {
                            dialog = dialog.set_directory(dir);
                        }
                        if let Some(path) = dialog.save_file() {
                            self.set_mirror_path(Some(path));
                        }
                        ui.close();
                    }
                    if ui.add_enabled(self.settings.docker.mirror_path.is_some(), egui::Button::new("Use Default Location")).clicked() {
                        self.set_mirror_path(None);
                        ui.close();
                    }
                    ui.separator();
                    if ui.add_enabled(self.docker.is_attached(), egui::Button::new("Resync From Presets")).clicked() {
                        self.docker.sync_tags_from_host(&self.presets);
                        self.docker.rebuild_buttons(self.presets.current_text());
                        ui.close();
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn preset_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme_mode;
        egui::SidePanel::left("brush_presets")
            .resizable(true)
            .default_width(220.0)
            .min_width(180.0)
            .show(ctx, |ui| {
                style::panel_heading(ui, "Brush Presets", theme);
                ui.label(format!("Tag ({} total)", self.presets.count()));
                self.presets.ui(ui);
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let field = ui.add(egui::TextEdit::singleline(&mut self.new_tag_name)
                        .desired_width(120.0)
                        .hint_text("New tag..."));
                    let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Add").clicked() || submitted {
                        if self.presets.push_tag(&self.new_tag_name) {
                            self.new_tag_name.clear();
                        }
                    }
                });

                let current = self.presets.current_text().map(str::to_owned);
                if ui.add_enabled(current.is_some(), egui::Button::new("Remove Current Tag")).clicked() {
                    if let Some(tag) = current {
                        self.presets.remove_tag(&tag);
                    }
                }
                if ui.button("Restore Default Tags").clicked() {
                    self.presets.reset(DEFAULT_TAGS.iter().map(|t| t.to_string()).collect());
                }
            });
    }

    fn docker_panel(&mut self, ctx: &egui::Context) {
        if !self.settings.docker.visible { return; }

        let theme = self.theme_mode;
        let panel = match self.settings.docker.dock_side {
            DockSide::Left => egui::SidePanel::left("tag_docker"),
            DockSide::Right => egui::SidePanel::right("tag_docker"),
        };
        panel
            .resizable(true)
            .default_width(240.0)
            .min_width(120.0)
            .show(ctx, |ui| {
                style::panel_heading(ui, DOCKER_TITLE, theme);
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let host: Option<&mut dyn TagSource> = if self.docker.is_attached() {
                            Some(&mut self.presets)
                        } else {
                            None
                        };
                        self.docker.ui(ui, host, theme);
                    });
            });
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        let text_color = match self.theme_mode {
            ThemeMode::Dark => ColorPalette::ZINC_500,
            ThemeMode::Light => ColorPalette::GRAY_400,
        };
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                let tag = self.presets.current_text().unwrap_or("none");
                ui.label(egui::RichText::new(format!("Canvas  |  brush tag: {tag}")).size(16.0).color(text_color));
            });
        });
    }
}

impl eframe::App for BrushTagApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_attach(ctx);
        if self.docker.is_attached() {
            self.docker.process_events(&mut self.presets);
        }

        self.top_bar(ctx);
        self.preset_panel(ctx);
        self.docker_panel(ctx);
        self.canvas(ctx);
    }
}
