use std::collections::BTreeMap;

use super::schema::{STATION_PREFIX, TrainingSchema, YEAR_COLUMN};

// ---------------------------------------------------------------------------
// RawInput – one user request
// ---------------------------------------------------------------------------

/// A single prediction request as entered in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    pub year: i64,
    /// Matched verbatim against `id_<value>` columns.
    pub station_id: String,
}

impl RawInput {
    pub fn new(year: i64, station_id: impl Into<String>) -> Self {
        Self {
            year,
            station_id: station_id.into(),
        }
    }

    /// Whether the station id is empty or whitespace only.
    pub fn station_is_blank(&self) -> bool {
        self.station_id.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Sparse one-hot form of a single record: only the columns this record
/// actually produces (`year` and `id_<station>`).
pub fn one_hot(input: &RawInput) -> BTreeMap<String, f64> {
    let mut sparse = BTreeMap::new();
    sparse.insert(YEAR_COLUMN.to_string(), input.year as f64);
    sparse.insert(format!("{STATION_PREFIX}{}", input.station_id), 1.0);
    sparse
}

/// Densify a sparse record against the schema.
///
/// Missing schema columns become 0; columns absent from the schema are
/// dropped. The result always has `schema.len()` entries in schema order.
pub fn align(schema: &TrainingSchema, sparse: &BTreeMap<String, f64>) -> Vec<f64> {
    schema
        .columns()
        .iter()
        .map(|col| sparse.get(col).copied().unwrap_or(0.0))
        .collect()
}

/// Encode a request into the feature vector the model was trained on.
///
/// A station id outside the schema vocabulary yields all-zero indicators.
pub fn encode(schema: &TrainingSchema, input: &RawInput) -> Vec<f64> {
    if !schema.knows_station(&input.station_id) {
        log::debug!(
            "station id '{}' not in training vocabulary, encoding as all-zero",
            input.station_id
        );
    }
    align(schema, &one_hot(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> TrainingSchema {
        TrainingSchema::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn known_station_sets_its_indicator() {
        let s = schema(&["year", "id_1", "id_2"]);
        assert_eq!(encode(&s, &RawInput::new(2022, "1")), vec![2022.0, 1.0, 0.0]);
    }

    #[test]
    fn unseen_station_encodes_all_zero() {
        let s = schema(&["year", "id_1", "id_2"]);
        assert_eq!(encode(&s, &RawInput::new(2022, "3")), vec![2022.0, 0.0, 0.0]);

        let v = encode(&s, &RawInput::new(2030, "unknown_station_999"));
        assert_eq!(v.len(), s.len());
        assert!(v[1..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn follows_schema_order_not_record_order() {
        let s = schema(&["id_b", "id_a", "year", "extra"]);
        assert_eq!(
            encode(&s, &RawInput::new(2001, "a")),
            vec![0.0, 1.0, 2001.0, 0.0]
        );
    }

    #[test]
    fn station_id_is_matched_verbatim() {
        let s = schema(&["year", "id_1"]);
        assert_eq!(encode(&s, &RawInput::new(2022, " 1")), vec![2022.0, 0.0]);
    }

    #[test]
    fn width_matches_schema_for_every_station() {
        let names: Vec<String> = std::iter::once("year".to_string())
            .chain((1..=22).map(|i| format!("id_{i}")))
            .collect();
        let s = TrainingSchema::new(names).unwrap();
        for station in ["1", "7", "22", "23", "x"] {
            let v = encode(&s, &RawInput::new(2022, station));
            assert_eq!(v.len(), 23);
            let ones = v[1..].iter().filter(|&&x| x == 1.0).count();
            assert_eq!(ones, usize::from(s.knows_station(station)));
        }
    }

    #[test]
    fn blank_station_detection() {
        assert!(RawInput::new(2022, "").station_is_blank());
        assert!(RawInput::new(2022, "  \t").station_is_blank());
        assert!(!RawInput::new(2022, " 1 ").station_is_blank());
    }
}
