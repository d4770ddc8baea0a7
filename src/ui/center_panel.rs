use eframe::egui;
use egui::Layout;

use super::app::{StoryApp, Theme};
use crate::model::message::{Role, Turn};

pub fn chat_input_id() -> egui::Id {
    egui::Id::new("chat_input_box")
}

pub fn draw_center_panel(ctx: &egui::Context, app: &mut StoryApp, scroll_to_bottom: bool) {
    let busy = app.controller.state().is_busy();

    // ---------- Input bar ----------
    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        let mut send_now = false;

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let response = ui.add_enabled(
                !busy,
                egui::TextEdit::singleline(&mut app.input_text)
                    .id(chat_input_id())
                    .hint_text("What do you do?")
                    .desired_width(ui.available_width() - 60.0),
            );

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                send_now = true;
            }

            if ui.add_enabled(!busy, egui::Button::new("Send")).clicked() {
                send_now = true;
            }
        });
        ui.add_space(4.0);

        if send_now && app.controller.submit(&app.input_text) {
            app.input_text.clear();
        }
    });

    // ---------- Transcript ----------
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for turn in app.controller.state().transcript() {
                    draw_turn(ui, &app.theme, turn);
                }

                if busy {
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("The storyteller is thinking…");
                    });
                }

                if scroll_to_bottom {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });
    });
}

fn draw_turn(ui: &mut egui::Ui, theme: &Theme, turn: &Turn) {
    ui.add_space(6.0);

    match turn.role {
        Role::User => {
            ui.with_layout(Layout::right_to_left(egui::Align::TOP), |ui| {
                bubble(ui, theme.user, &turn.content);
            });
        }
        Role::Assistant => bubble(ui, theme.narrator, &turn.content),
    }
}

fn bubble(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
        });
}
