/// Data layer: artifact loading, schema, encoding and the model seam.
///
/// Architecture:
/// ```text
///  model_columns.json / .csv        pollution_model.json
///        │                                 │
///        ▼                                 ▼
///   ┌──────────┐                     ┌──────────┐
///   │  loader   │ → TrainingSchema    │  loader   │ → ModelArtifact
///   └──────────┘                     └──────────┘
///        │                                 │
///        ▼                                 ▼
///   ┌──────────┐  {year, station_id}  ┌───────────┐
///   │ encoder  │ ───── Vec<f64> ────▶ │ Regressor │ → 6 × f64
///   └──────────┘                      └───────────┘
/// ```

pub mod encoder;
pub mod loader;
pub mod model;
pub mod schema;
