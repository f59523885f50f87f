use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::color::PollutantColors;
use crate::config::{AppConfig, FormConfig};
use crate::data::encoder::RawInput;
use crate::data::loader::{load_model, load_schema};
use crate::predict::{PredictError, Prediction, Predictor};

// ---------------------------------------------------------------------------
// Outcome of the last "Predict" click
// ---------------------------------------------------------------------------

/// What the output area shows; rendering is left to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Prediction),
    Warning(String),
    Error(String),
}

impl From<Result<Prediction, PredictError>> for Outcome {
    fn from(result: Result<Prediction, PredictError>) -> Self {
        match result {
            Ok(p) => Outcome::Success(p),
            Err(e) if e.is_warning() => Outcome::Warning(e.to_string()),
            Err(e) => Outcome::Error(format!("Error during prediction: {e:#}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Schema + model pair (None until both artifacts load).
    pub predictor: Option<Predictor>,

    /// Artifact paths currently in use.
    pub model_path: PathBuf,
    pub columns_path: PathBuf,

    /// Form bounds and defaults.
    pub form: FormConfig,

    /// Form inputs.
    pub year_input: i64,
    pub station_input: String,

    /// Result of the last prediction request.
    pub outcome: Option<Outcome>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub colors: PollutantColors,
}

impl AppState {
    /// Fresh form state; artifacts are not loaded yet.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            predictor: None,
            model_path: config.model_path.clone(),
            columns_path: config.columns_path.clone(),
            form: config.form.clone(),
            year_input: config.form.default_year,
            station_input: config.form.default_station_id.clone(),
            outcome: None,
            status_message: None,
            colors: PollutantColors::default(),
        }
    }

    /// Build the state and try to load the configured artifacts.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut state = Self::new(config);
        state.reload();
        state
    }

    /// (Re)load schema and model from the current paths.
    ///
    /// On failure the previous predictor is dropped so stale pairs are never served.
    pub fn reload(&mut self) {
        self.outcome = None;
        match build_predictor(&self.columns_path, &self.model_path) {
            Ok(predictor) => {
                self.status_message = Some(format!(
                    "Model {} with {} columns",
                    self.model_path.display(),
                    predictor.schema().len()
                ));
                self.predictor = Some(predictor);
            }
            Err(e) => {
                log::error!("Failed to load artifacts: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.predictor = None;
            }
        }
    }

    pub fn set_model_path(&mut self, path: PathBuf) {
        self.model_path = path;
        self.reload();
    }

    pub fn set_columns_path(&mut self, path: PathBuf) {
        self.columns_path = path;
        self.reload();
    }

    pub fn is_ready(&self) -> bool {
        self.predictor.is_some()
    }

    /// Handle a "Predict" click with the current form inputs.
    pub fn run_prediction(&mut self) {
        let Some(predictor) = &self.predictor else {
            self.outcome = Some(Outcome::Error("No model loaded.".to_string()));
            return;
        };
        let input = RawInput::new(self.year_input, self.station_input.clone());
        let outcome = Outcome::from(predictor.predict(&input));
        match &outcome {
            Outcome::Success(p) => log::info!("{}", p.to_string().trim_end()),
            Outcome::Warning(msg) | Outcome::Error(msg) => log::warn!("{msg}"),
        }
        self.outcome = Some(outcome);
    }
}

fn build_predictor(columns_path: &Path, model_path: &Path) -> Result<Predictor> {
    let schema = load_schema(columns_path)?;
    let artifact = load_model(model_path)?;
    Ok(Predictor::from_artifact(schema, artifact)?)
}
