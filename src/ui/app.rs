use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;

use crate::controller::ConversationController;
use crate::ui::center_panel::{chat_input_id, draw_center_panel};
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::{AppSettings, UI_SCALE_RANGE};
use crate::ui::settings_io::save_settings;

/* =========================
   Theme
   ========================= */

#[derive(Clone)]
pub struct Theme {
    pub user: egui::Color32,
    pub narrator: egui::Color32,
    pub error: egui::Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            user: egui::Color32::from_rgb(40, 70, 120),
            narrator: egui::Color32::from_rgb(80, 80, 80),
            error: egui::Color32::from_rgb(200, 60, 60),
        }
    }
}

/* =========================
   App
   ========================= */

pub struct StoryApp {
    pub(super) controller: ConversationController,
    pub(super) input_text: String,
    pub(super) theme: Theme,

    /// Effective settings for this run (file values plus CLI overrides)
    settings: AppSettings,
    /// What is on disk; only the UI scale is ever written back
    persisted: AppSettings,
    settings_path: PathBuf,
    /// Scale the slider last settled on; only a change from this is written
    saved_scale: f32,

    rendered_turns: usize,
    was_busy: bool,
}

impl StoryApp {
    pub fn new(
        controller: ConversationController,
        settings: AppSettings,
        persisted: AppSettings,
        settings_path: PathBuf,
    ) -> Self {
        let saved_scale = settings.ui_scale;
        let mut app = Self {
            controller,
            input_text: String::new(),
            theme: Theme::default(),
            settings,
            persisted,
            settings_path,
            saved_scale,
            rendered_turns: 0,
            was_busy: false,
        };

        app.controller.start();
        app
    }

    fn draw_top_bar(&mut self, ctx: &egui::Context) {
        let busy = self.controller.state().is_busy();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Story Chat");
                ui.separator();

                if ui
                    .add_enabled(!busy, egui::Button::new("New adventure"))
                    .clicked()
                {
                    self.input_text.clear();
                    self.controller.restart();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.settings.ui_scale, UI_SCALE_RANGE).text("UI scale"));
            });
        });

        if let Some(err) = self.controller.state().error() {
            egui::TopBottomPanel::top("error_banner").show(ctx, |ui| {
                ui.colored_label(self.theme.error, format!("⚠ {err}"));
            });
        }
    }

    fn persist_ui_scale(&mut self, ctx: &egui::Context) {
        if self.settings.ui_scale == self.saved_scale || ctx.input(|i| i.pointer.any_down()) {
            return;
        }

        self.saved_scale = self.settings.ui_scale;
        self.persisted.ui_scale = self.settings.ui_scale;
        if let Err(err) = save_settings(&self.settings_path, &self.persisted) {
            tracing::warn!("could not save settings: {err:#}");
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for StoryApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        self.controller.poll();

        let turns = self.controller.state().transcript().len();
        let scroll_to_bottom = turns != self.rendered_turns;
        self.rendered_turns = turns;

        let busy = self.controller.state().is_busy();
        if self.was_busy && !busy {
            ctx.memory_mut(|m| m.request_focus(chat_input_id()));
        }
        self.was_busy = busy;

        self.draw_top_bar(ctx);

        if let Some(character) = self.controller.state().character() {
            draw_right_panel(ctx, character);
        }

        draw_center_panel(ctx, self, scroll_to_bottom);

        self.persist_ui_scale(ctx);

        if busy {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
