use std::fmt;

use thiserror::Error;

use crate::data::encoder::{RawInput, encode};
use crate::data::model::{ModelArtifact, ModelError, Regressor};
use crate::data::schema::TrainingSchema;

// ---------------------------------------------------------------------------
// Pollutant labels
// ---------------------------------------------------------------------------

/// Model targets, in the order the model emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pollutant {
    O2,
    No3,
    No2,
    So4,
    Po4,
    Cl,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::O2,
        Pollutant::No3,
        Pollutant::No2,
        Pollutant::So4,
        Pollutant::Po4,
        Pollutant::Cl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Pollutant::O2 => "O2",
            Pollutant::No3 => "NO3",
            Pollutant::No2 => "NO2",
            Pollutant::So4 => "SO4",
            Pollutant::Po4 => "PO4",
            Pollutant::Cl => "CL",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an artifact pair cannot be served.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model expects {model} features but schema has {schema} columns")]
    WidthMismatch { model: usize, schema: usize },
    #[error("model has {0} targets, expected 6")]
    TargetCount(usize),
    #[error("model feature names do not match the training column schema")]
    FeatureNames,
    #[error("model targets {0:?} do not match [O2, NO3, NO2, SO4, PO4, CL]")]
    TargetNames(Vec<String>),
}

/// Why a single request produced no prediction.
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("Please enter a valid Station ID.")]
    EmptyStationId,
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model returned {0} values, expected 6")]
    OutputWidth(usize),
}

impl PredictError {
    /// A warning is a rejected input; everything else is a prediction failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, PredictError::EmptyStationId)
    }
}

// ---------------------------------------------------------------------------
// Prediction – one successful result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub input: RawInput,
    pub values: [(Pollutant, f64); 6],
}

impl Prediction {
    pub fn heading(&self) -> String {
        format!(
            "Predicted pollutant levels for Station ID '{}' in {}:",
            self.input.station_id, self.input.year
        )
    }

    /// `"<label>: <value>"` lines, two decimals.
    pub fn lines(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|(p, v)| format!("{p}: {v:.2}"))
            .collect()
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading())?;
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Predictor – read-only schema + model pair
// ---------------------------------------------------------------------------

/// Loaded once, then only borrowed by request handling.
pub struct Predictor {
    schema: TrainingSchema,
    model: Box<dyn Regressor>,
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("columns", &self.schema.len())
            .field("targets", &self.model.n_targets())
            .finish()
    }
}

impl Predictor {
    pub fn new(schema: TrainingSchema, model: Box<dyn Regressor>) -> Result<Self, SetupError> {
        if model.n_features() != schema.len() {
            return Err(SetupError::WidthMismatch {
                model: model.n_features(),
                schema: schema.len(),
            });
        }
        if model.n_targets() != Pollutant::ALL.len() {
            return Err(SetupError::TargetCount(model.n_targets()));
        }
        Ok(Self { schema, model })
    }

    /// Build from a parsed artifact, checking any names it declares.
    pub fn from_artifact(schema: TrainingSchema, artifact: ModelArtifact) -> Result<Self, SetupError> {
        if let Some(names) = &artifact.feature_names {
            if names.as_slice() != schema.columns() {
                return Err(SetupError::FeatureNames);
            }
        }
        if let Some(names) = artifact.target_names {
            let expected = Pollutant::ALL.iter().map(|p| p.label());
            if !names.iter().map(String::as_str).eq(expected) {
                return Err(SetupError::TargetNames(names));
            }
        }
        Self::new(schema, artifact.model.into_regressor()?)
    }

    pub fn schema(&self) -> &TrainingSchema {
        &self.schema
    }

    /// Validate, encode, infer, and label one request.
    pub fn predict(&self, input: &RawInput) -> Result<Prediction, PredictError> {
        if input.station_is_blank() {
            return Err(PredictError::EmptyStationId);
        }
        let features = encode(&self.schema, input);
        let raw = self.model.predict(&features)?;
        let values: [f64; 6] = raw
            .as_slice()
            .try_into()
            .map_err(|_| PredictError::OutputWidth(raw.len()))?;

        let mut labelled = [(Pollutant::O2, 0.0); 6];
        for ((slot, p), v) in labelled.iter_mut().zip(Pollutant::ALL).zip(values) {
            *slot = (p, v);
        }
        Ok(Prediction {
            input: input.clone(),
            values: labelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::data::model::{LinearModel, ModelKind};

    fn schema() -> TrainingSchema {
        TrainingSchema::new(vec!["year".into(), "id_1".into(), "id_2".into()]).unwrap()
    }

    /// Echoes its input into the outputs and counts calls.
    struct Echo {
        targets: usize,
        /// Values actually returned; differs from `targets` to fake a broken model.
        emits: usize,
        calls: Rc<Cell<usize>>,
    }

    impl Regressor for Echo {
        fn n_features(&self) -> usize {
            3
        }
        fn n_targets(&self) -> usize {
            self.targets
        }
        fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
            self.check_width(features)?;
            self.calls.set(self.calls.get() + 1);
            Ok((0..self.emits).map(|i| features[i % 3] + i as f64).collect())
        }
    }

    fn echo(targets: usize, emits: usize) -> (Result<Predictor, SetupError>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let model = Echo {
            targets,
            emits,
            calls: Rc::clone(&calls),
        };
        (Predictor::new(schema(), Box::new(model)), calls)
    }

    fn six_target_echo() -> (Predictor, Rc<Cell<usize>>) {
        let (p, calls) = echo(6, 6);
        (p.unwrap(), calls)
    }

    #[test]
    fn labels_outputs_in_fixed_order() {
        let (p, calls) = six_target_echo();
        let pred = p.predict(&RawInput::new(2022, "1")).unwrap();
        let labels: Vec<&str> = pred.values.iter().map(|(p, _)| p.label()).collect();
        assert_eq!(labels, ["O2", "NO3", "NO2", "SO4", "PO4", "CL"]);
        // features = [2022, 1, 0]
        assert_eq!(pred.values[0].1, 2022.0);
        assert_eq!(pred.values[1].1, 2.0);
        assert_eq!(pred.values[2].1, 2.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn blank_station_never_reaches_model() {
        let (p, calls) = six_target_echo();
        for id in ["", "   ", "\t\n"] {
            let err = p.predict(&RawInput::new(2022, id)).unwrap_err();
            assert_eq!(err, PredictError::EmptyStationId);
            assert!(err.is_warning());
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn rejects_model_with_wrong_target_count() {
        let (p, calls) = echo(5, 5);
        assert_eq!(p.unwrap_err(), SetupError::TargetCount(5));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn wrong_output_width_is_a_failure() {
        let (p, _) = echo(6, 5);
        let p = p.unwrap();
        let err = p.predict(&RawInput::new(2022, "1")).unwrap_err();
        assert_eq!(err, PredictError::OutputWidth(5));
        assert!(!err.is_warning());
    }

    #[test]
    fn rejects_model_schema_width_mismatch() {
        let model = LinearModel {
            coefficients: vec![vec![0.0; 2]; 6],
            intercepts: vec![0.0; 6],
        };
        let err = Predictor::new(schema(), Box::new(model)).unwrap_err();
        assert_eq!(err, SetupError::WidthMismatch { model: 2, schema: 3 });
    }

    fn linear_artifact(targets: Option<Vec<&str>>, features: Option<Vec<&str>>) -> ModelArtifact {
        ModelArtifact {
            feature_names: features.map(|v| v.into_iter().map(String::from).collect()),
            target_names: targets.map(|v| v.into_iter().map(String::from).collect()),
            model: ModelKind::Linear(LinearModel {
                coefficients: vec![vec![0.001, 1.0, 2.0]; 6],
                intercepts: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            }),
        }
    }

    #[test]
    fn artifact_names_are_checked() {
        let ok = linear_artifact(
            Some(vec!["O2", "NO3", "NO2", "SO4", "PO4", "CL"]),
            Some(vec!["year", "id_1", "id_2"]),
        );
        assert!(Predictor::from_artifact(schema(), ok).is_ok());

        let swapped = linear_artifact(Some(vec!["NO3", "O2", "NO2", "SO4", "PO4", "CL"]), None);
        assert!(matches!(
            Predictor::from_artifact(schema(), swapped),
            Err(SetupError::TargetNames(_))
        ));

        let reordered = linear_artifact(None, Some(vec!["id_1", "year", "id_2"]));
        assert_eq!(
            Predictor::from_artifact(schema(), reordered).unwrap_err(),
            SetupError::FeatureNames
        );
    }

    #[test]
    fn unseen_station_still_predicts() {
        let p = Predictor::from_artifact(schema(), linear_artifact(None, None)).unwrap();
        let pred = p.predict(&RawInput::new(2000, "unknown_station_999")).unwrap();
        // Only the year contributes: 1 + 0.001 * 2000.
        assert!((pred.values[0].1 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn formats_two_decimals() {
        let p = Predictor::from_artifact(schema(), linear_artifact(None, None)).unwrap();
        let pred = p.predict(&RawInput::new(2000, "2")).unwrap();
        assert_eq!(
            pred.heading(),
            "Predicted pollutant levels for Station ID '2' in 2000:"
        );
        // 0.001 * 2000 + 2 * id_2 + intercept, intercepts step by 1.
        assert_eq!(pred.lines()[0], "O2: 5.00");
        assert_eq!(pred.lines()[5], "CL: 10.00");
        assert!(pred.to_string().starts_with("Predicted"));
    }
}
