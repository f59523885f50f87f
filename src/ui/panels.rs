use std::path::PathBuf;

use eframe::egui::{self, Color32, DragValue, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – input form
// ---------------------------------------------------------------------------

/// Render the year / station form and the Predict button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Water Pollutants Predictor");
    ui.label("Predict the water pollutants based on Year and Station ID");
    ui.separator();

    ui.strong("Enter Year");
    ui.add(
        DragValue::new(&mut state.year_input)
            .range(state.form.year_min..=state.form.year_max)
            .speed(1.0),
    );
    ui.add_space(6.0);

    ui.strong("Enter Station ID");
    ui.text_edit_singleline(&mut state.station_input);
    ui.add_space(10.0);

    let predict = ui.add_enabled(state.is_ready(), egui::Button::new("Predict"));
    if predict.clicked() {
        state.run_prediction();
    }

    if let Some(predictor) = &state.predictor {
        ui.add_space(10.0);
        ui.separator();
        let n_stations = predictor.schema().station_vocabulary().count();
        ui.label(format!("{n_stations} known stations"));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open model…").clicked() {
                if let Some(path) = pick_file("Open model artifact", &["json"]) {
                    state.set_model_path(path);
                }
                ui.close_menu();
            }
            if ui.button("Open column schema…").clicked() {
                if let Some(path) = pick_file("Open training column schema", &["json", "csv"]) {
                    state.set_columns_path(path);
                }
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(msg) = &state.status_message {
            let color = if state.is_ready() {
                ui.visuals().text_color()
            } else {
                Color32::RED
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn pick_file(title: &str, extensions: &[&str]) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", extensions)
        .pick_file()
}
