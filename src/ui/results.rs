use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, Outcome};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Output area (central panel)
// ---------------------------------------------------------------------------

/// Render the outcome of the last prediction.
pub fn results_view(ui: &mut Ui, state: &AppState) {
    let outcome = match &state.outcome {
        Some(o) => o,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Enter a year and station, then press Predict");
            });
            return;
        }
    };

    match outcome {
        Outcome::Warning(msg) => {
            ui.label(RichText::new(format!("⚠ {msg}")).color(Color32::YELLOW));
        }
        Outcome::Error(msg) => {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        Outcome::Success(prediction) => {
            ui.heading(prediction.heading());
            ui.add_space(6.0);

            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(80.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Pollutant");
                    });
                    header.col(|ui| {
                        ui.strong("Predicted level");
                    });
                })
                .body(|mut body| {
                    for &(p, v) in &prediction.values {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(RichText::new(p.label()).color(state.colors.color_for(p)));
                            });
                            row.col(|ui| {
                                ui.label(format!("{v:.2}"));
                            });
                        });
                    }
                });

            ui.add_space(10.0);
            plot::pollutant_chart(ui, prediction, &state.colors);
        }
    }
}
