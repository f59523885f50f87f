use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::predict::Pollutant;

// ---------------------------------------------------------------------------
// Pollutant → Color32
// ---------------------------------------------------------------------------

/// One fixed colour per pollutant, shared by the table and the chart.
///
/// Hues are spread evenly around the wheel in output order.
#[derive(Debug, Clone)]
pub struct PollutantColors {
    colors: [Color32; 6],
}

impl Default for PollutantColors {
    fn default() -> Self {
        let n = Pollutant::ALL.len() as f32;
        let mut colors = [Color32::GRAY; 6];
        for (i, slot) in colors.iter_mut().enumerate() {
            *slot = hue_to_color32(i as f32 / n * 360.0);
        }
        Self { colors }
    }
}

impl PollutantColors {
    pub fn color_for(&self, pollutant: Pollutant) -> Color32 {
        let idx = Pollutant::ALL
            .iter()
            .position(|&p| p == pollutant)
            .unwrap_or(0);
        self.colors[idx]
    }
}

fn hue_to_color32(hue: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
    let [r, g, b] = [rgb.red, rgb.green, rgb.blue].map(|c| (c * 255.0).round() as u8);
    Color32::from_rgb(r, g, b)
}
