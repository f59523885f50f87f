use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::ModelArtifact;
use super::schema::TrainingSchema;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the training column schema.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `["year", "id_1", "id_2", ...]`
/// * `.csv`  – the header row is the column list; data rows are ignored
///
/// Column names are trimmed in both formats.
pub fn load_schema(path: &Path) -> Result<TrainingSchema> {
    let columns = match extension(path).as_str() {
        "json" => load_schema_json(path)?,
        "csv" => load_schema_csv(path)?,
        other => bail!("Unsupported schema file extension: .{other}"),
    };
    let schema = TrainingSchema::new(columns)
        .with_context(|| format!("invalid schema in {}", path.display()))?;
    if !schema.has_year() {
        log::warn!("Schema in {} has no 'year' column", path.display());
    }
    log::info!(
        "Loaded schema with {} columns ({} stations) from {}",
        schema.len(),
        schema.station_vocabulary().count(),
        path.display()
    );
    Ok(schema)
}

/// Load a JSON model artifact (see [`ModelArtifact`]).
pub fn load_model(path: &Path) -> Result<ModelArtifact> {
    match extension(path).as_str() {
        "json" => {}
        other => bail!("Unsupported model file extension: .{other}"),
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading model file {}", path.display()))?;
    let artifact: ModelArtifact = serde_json::from_str(&text).context("parsing model JSON")?;
    log::info!("Loaded model artifact from {}", path.display());
    Ok(artifact)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Schema readers
// ---------------------------------------------------------------------------

fn load_schema_json(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).context("reading schema JSON file")?;
    let columns: Vec<String> =
        serde_json::from_str(&text).context("Expected a JSON array of column names")?;
    Ok(columns.into_iter().map(|c| c.trim().to_string()).collect())
}

fn load_schema_csv(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).context("opening schema CSV")?;
    let headers = reader.headers().context("reading CSV headers")?;
    Ok(headers.iter().map(|h| h.trim().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::{TempDir, tempdir};

    use super::*;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_json_schema() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "cols.json", r#"["year", "id_1", "id_2"]"#);
        let schema = load_schema(&path).unwrap();
        assert_eq!(schema.columns(), ["year", "id_1", "id_2"]);
    }

    #[test]
    fn loads_csv_schema_from_header() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "cols.csv", "year,id_1,id_2\n2022,1,0\n");
        let schema = load_schema(&path).unwrap();
        assert_eq!(schema.columns(), ["year", "id_1", "id_2"]);
    }

    #[test]
    fn json_and_csv_trim_alike() {
        let dir = tempdir().unwrap();
        let json = write_file(&dir, "cols.json", r#"[" year", "id_1 ", "id_2"]"#);
        let csv = write_file(&dir, "cols.csv", " year,id_1 ,id_2\n");
        let from_json = load_schema(&json).unwrap();
        let from_csv = load_schema(&csv).unwrap();
        assert_eq!(from_json, from_csv);
        assert_eq!(from_json.columns(), ["year", "id_1", "id_2"]);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_schema(Path::new("columns.pkl")).unwrap_err();
        assert!(err.to_string().contains(".pkl"));
        assert!(load_model(Path::new("pollution_model.pkl")).is_err());
    }

    #[test]
    fn duplicate_columns_fail_with_context() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "dup.json", r#"["year", "year"]"#);
        let err = load_schema(&path).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate column 'year'"));
    }

    #[test]
    fn loads_model_artifact() {
        let dir = tempdir().unwrap();
        let path = write_file(
            &dir,
            "model.json",
            r#"{"kind": "linear", "coefficients": [[0.5, 1.0]], "intercepts": [2.0]}"#,
        );
        let art = load_model(&path).unwrap();
        let reg = art.model.into_regressor().unwrap();
        assert_eq!(reg.n_features(), 2);
    }

    #[test]
    fn missing_model_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_model(&dir.path().join("pollution_model.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading model file"));
    }
}
