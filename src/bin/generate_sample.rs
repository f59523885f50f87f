use serde_json::json;

/// SplitMix64 stream, seeded per station so adding stations keeps earlier offsets stable.
struct StationRng {
    state: u64,
}

impl StationRng {
    fn for_station(station: usize, target: usize) -> Self {
        StationRng {
            state: 0x5EED_u64 ^ ((station as u64) << 32) ^ target as u64,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform offset in `[-spread, spread)`.
    fn offset(&mut self, spread: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * spread
    }
}

const N_STATIONS: usize = 22;
const BASE_YEAR: f64 = 2000.0;

fn main() {
    let targets = ["O2", "NO3", "NO2", "SO4", "PO4", "CL"];
    // (level in BASE_YEAR, yearly drift, station spread)
    let profiles = [
        (8.5, -0.02, 1.2),
        (4.0, 0.05, 1.5),
        (0.15, 0.002, 0.05),
        (60.0, 0.4, 15.0),
        (0.4, 0.004, 0.15),
        (90.0, 0.8, 30.0),
    ];

    let columns: Vec<String> = std::iter::once("year".to_string())
        .chain((1..=N_STATIONS).map(|i| format!("id_{i}")))
        .collect();

    // year enters linearly; intercept absorbs the BASE_YEAR offset.
    let mut coefficients = Vec::with_capacity(targets.len());
    let mut intercepts = Vec::with_capacity(targets.len());
    for (t, &(level, drift, spread)) in profiles.iter().enumerate() {
        let mut row = Vec::with_capacity(columns.len());
        row.push(drift);
        for station in 1..=N_STATIONS {
            row.push(StationRng::for_station(station, t).offset(spread));
        }
        coefficients.push(row);
        intercepts.push(level - drift * BASE_YEAR);
    }

    let model = json!({
        "kind": "linear",
        "feature_names": &columns,
        "target_names": targets,
        "coefficients": coefficients,
        "intercepts": intercepts,
    });

    let columns_path = "model_columns.json";
    let model_path = "pollution_model.json";
    std::fs::write(
        columns_path,
        serde_json::to_string_pretty(&columns).expect("Failed to serialize columns"),
    )
    .expect("Failed to write column schema");
    std::fs::write(
        model_path,
        serde_json::to_string_pretty(&model).expect("Failed to serialize model"),
    )
    .expect("Failed to write model");

    println!(
        "Wrote {} columns to {columns_path} and a {}-target linear model to {model_path}",
        columns.len(),
        targets.len()
    );
}
