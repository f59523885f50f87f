use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::PollutantColors;
use crate::predict::{Pollutant, Prediction};

// ---------------------------------------------------------------------------
// Pollutant bar chart
// ---------------------------------------------------------------------------

/// One bar per pollutant, in model output order.
pub fn pollutant_chart(ui: &mut Ui, prediction: &Prediction, colors: &PollutantColors) {
    let bars: Vec<Bar> = prediction
        .values
        .iter()
        .enumerate()
        .map(|(i, &(p, v))| {
            Bar::new(i as f64, v)
                .name(p.label())
                .fill(colors.color_for(p))
                .width(0.6)
        })
        .collect();

    let chart = BarChart::new(bars).name("Predicted level");

    Plot::new("pollutant_chart")
        .legend(egui_plot::Legend::default())
        .y_axis_label("Predicted level")
        .x_axis_formatter(|mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            Pollutant::ALL
                .get(idx as usize)
                .map(|p| p.label().to_string())
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
