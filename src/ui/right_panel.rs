use eframe::egui;

use crate::model::character::Character;

/// One labeled row of the character sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetRow {
    Field { label: &'static str, value: String },
    List { label: &'static str, items: Vec<String> },
}

/// What the sheet shows for `c`. Relationships and completed quests are
/// tracked on the model but not displayed.
pub fn sheet_sections(c: &Character) -> Vec<SheetRow> {
    let field = |label, value: &Option<String>| SheetRow::Field {
        label,
        value: value.clone().unwrap_or_else(|| "Unknown".into()),
    };
    let list = |label, items: &Vec<String>| SheetRow::List {
        label,
        items: items.clone(),
    };

    vec![
        field("Name", &c.name),
        field("Class", &c.class),
        list("Goals", &c.goals),
        list("Inventory", &c.inventory),
        field("Location", &c.current_location),
        list("Active Quests", &c.active_quests),
    ]
}

pub fn draw_right_panel(ctx: &egui::Context, character: &Character) {
    egui::SidePanel::right("character_sheet")
        .resizable(true)
        .default_width(280.0)
        .min_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Character");
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for row in sheet_sections(character) {
                    match row {
                        SheetRow::Field { label, value } => {
                            ui.label(egui::RichText::new(label).strong());
                            ui.label(value);
                            ui.add_space(4.0);
                        }
                        SheetRow::List { label, items } => list(ui, label, &items),
                    }
                }
            });
        });
}

fn list(ui: &mut egui::Ui, label: &str, items: &[String]) {
    ui.collapsing(label, |ui| {
        if items.is_empty() {
            ui.label("None");
        } else {
            for i in items {
                ui.label(format!("• {i}"));
            }
        }
    });
}
