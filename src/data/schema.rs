use std::collections::BTreeSet;

use thiserror::Error;

/// Name of the numeric year column.
pub const YEAR_COLUMN: &str = "year";

/// Prefix of one-hot station indicator columns (`id_<station>`).
pub const STATION_PREFIX: &str = "id_";

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("training column schema is empty")]
    Empty,
    #[error("duplicate column '{0}' in training column schema")]
    Duplicate(String),
}

// ---------------------------------------------------------------------------
// TrainingSchema – ordered column names the model was fit against
// ---------------------------------------------------------------------------

/// The fixed, ordered list of feature names a model was trained on.
///
/// Immutable once built; it defines both the station vocabulary and the
/// order of every encoded feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSchema {
    columns: Vec<String>,
}

impl TrainingSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                return Err(SchemaError::Duplicate(col.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns (= width of every encoded vector).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Station ids known to the model, in schema order.
    pub fn station_vocabulary(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter_map(|c| c.strip_prefix(STATION_PREFIX))
    }

    pub fn knows_station(&self, station_id: &str) -> bool {
        self.station_vocabulary().any(|s| s == station_id)
    }

    pub fn has_year(&self) -> bool {
        self.columns.iter().any(|c| c == YEAR_COLUMN)
    }
}
