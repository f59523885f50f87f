use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("model expects {expected} features but got {actual}")]
    FeatureWidth { expected: usize, actual: usize },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Regressor – the opaque inference seam
// ---------------------------------------------------------------------------

/// A fitted multi-output regressor: one feature row in, one value per target out.
pub trait Regressor {
    fn n_features(&self) -> usize;
    fn n_targets(&self) -> usize;
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;

    fn check_width(&self, features: &[f64]) -> Result<(), ModelError> {
        if features.len() != self.n_features() {
            return Err(ModelError::FeatureWidth {
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ModelArtifact – the on-disk JSON document
// ---------------------------------------------------------------------------

/// Serialized model, tagged by `"kind"`:
///
/// ```json
/// { "kind": "linear",
///   "target_names": ["O2", "NO3", "NO2", "SO4", "PO4", "CL"],
///   "coefficients": [[...], ...],
///   "intercepts": [...] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    /// Column names the model was fit against, if the exporter recorded them.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// Output labels in prediction order, if the exporter recorded them.
    #[serde(default)]
    pub target_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub model: ModelKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Linear(LinearModel),
    Forest(Forest),
}

impl ModelKind {
    /// Check internal consistency and hand back a boxed regressor.
    pub fn into_regressor(self) -> Result<Box<dyn Regressor>, ModelError> {
        match self {
            ModelKind::Linear(m) => {
                m.validate()?;
                Ok(Box::new(m))
            }
            ModelKind::Forest(f) => {
                f.validate()?;
                Ok(Box::new(f))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Linear multi-output regression
// ---------------------------------------------------------------------------

/// `y[t] = intercepts[t] + Σ coefficients[t][j] · x[j]`
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    /// One row of weights per target.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearModel {
    fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::Invalid("linear model has no targets".into()));
        }
        if self.coefficients.len() != self.intercepts.len() {
            return Err(ModelError::Invalid(format!(
                "{} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        let width = self.coefficients[0].len();
        if let Some((t, row)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != width)
        {
            return Err(ModelError::Invalid(format!(
                "coefficient row {t} has {} weights, expected {width}",
                row.len()
            )));
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn n_targets(&self) -> usize {
        self.intercepts.len()
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        self.check_width(features)?;
        Ok(self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| b + row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>())
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tree ensemble (random-forest style, averaged)
// ---------------------------------------------------------------------------

/// Marker used in `children_left` / `children_right` for leaves.
pub const LEAF: i64 = -1;

/// One regression tree stored as parallel node arrays.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    /// Split feature per node (ignored on leaves).
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node output, one value per target.
    pub value: Vec<Vec<f64>>,
}

impl Tree {
    fn validate(&self, n_features: usize, n_targets: usize) -> Result<(), ModelError> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(ModelError::Invalid("tree has no nodes".into()));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(ModelError::Invalid("tree node arrays differ in length".into()));
        }
        for node in 0..n {
            let (l, r) = (self.children_left[node], self.children_right[node]);
            if l == LEAF {
                if self.value[node].len() != n_targets {
                    return Err(ModelError::Invalid(format!(
                        "leaf {node} has {} outputs, expected {n_targets}",
                        self.value[node].len()
                    )));
                }
                continue;
            }
            for child in [l, r] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ModelError::Invalid(format!(
                        "node {node} has out-of-range child {child}"
                    )));
                }
            }
            let f = self.feature[node];
            if f < 0 || f as usize >= n_features {
                return Err(ModelError::Invalid(format!(
                    "node {node} splits on feature {f}, model has {n_features}"
                )));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf; `x[feature] <= threshold` goes left.
    fn leaf_value(&self, features: &[f64]) -> &[f64] {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if features[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forest {
    pub n_features: usize,
    pub n_targets: usize,
    pub trees: Vec<Tree>,
}

impl Forest {
    fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("forest has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.n_targets)
                .map_err(|e| ModelError::Invalid(format!("tree {i}: {e}")))?;
        }
        Ok(())
    }
}

impl Regressor for Forest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_targets(&self) -> usize {
        self.n_targets
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        self.check_width(features)?;
        let mut out = vec![0.0; self.n_targets];
        for tree in &self.trees {
            for (acc, v) in out.iter_mut().zip(tree.leaf_value(features)) {
                *acc += v;
            }
        }
        let n = self.trees.len() as f64;
        out.iter_mut().for_each(|v| *v /= n);
        Ok(out)
    }
}
