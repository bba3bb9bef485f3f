//! Microstructure save/load.
//!
//! Records are compact JSON objects with the keys `cols`, `rows`,
//! `orientations` and `grid`, in that order. `grid` holds `cols` arrays of
//! `rows` labels each.
//!
//! # Example
//!
//! ```ignore
//! use grain_core::{load_microstructure, save_microstructure_timestamped};
//!
//! let path = save_microstructure_timestamped(&microstructure, "out")?;
//! let loaded = load_microstructure(&path)?;
//! ```

use crate::grid::{Grid, Label};
use crate::microstructure::{LoadedMicrostructure, Microstructure};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Errors that can occur while persisting or reloading a microstructure.
#[derive(Debug)]
pub enum RecordError {
    /// File system error
    Io(std::io::Error),
    /// Malformed JSON or missing field
    Json(String),
    /// Well-formed record with inconsistent contents
    InvalidFormat(String),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::Io(e) => write!(f, "IO error: {}", e),
            RecordError::Json(e) => write!(f, "JSON error: {}", e),
            RecordError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        RecordError::Io(e)
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Json(e.to_string())
    }
}

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Persisted form of a microstructure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrostructureRecord {
    pub cols: usize,
    pub rows: usize,
    pub orientations: u32,
    pub grid: Vec<Vec<Label>>,
}

impl TryFrom<MicrostructureRecord> for LoadedMicrostructure {
    type Error = RecordError;

    fn try_from(record: MicrostructureRecord) -> RecordResult<Self> {
        if record.cols == 0 || record.rows == 0 || record.orientations == 0 {
            return Err(RecordError::InvalidFormat(format!(
                "cols, rows and orientations must be positive (got {}, {}, {})",
                record.cols, record.rows, record.orientations
            )));
        }

        let grid = Grid::from_columns(record.cols, record.rows, &record.grid)
            .map_err(|e| RecordError::InvalidFormat(e.to_string()))?;

        if let Some(&label) = grid.labels().iter().find(|&&l| l > record.orientations) {
            return Err(RecordError::InvalidFormat(format!(
                "label {} exceeds orientation count {}",
                label, record.orientations
            )));
        }

        Ok(LoadedMicrostructure {
            orientations: record.orientations,
            grid,
        })
    }
}

/// Reference file name for a save made at `unix_timestamp`.
pub fn timestamped_file_name(unix_timestamp: i64) -> String {
    format!("grid_{}.json", unix_timestamp)
}

/// Serialize to compact JSON.
pub fn to_json_string(microstructure: &Microstructure) -> RecordResult<String> {
    Ok(serde_json::to_string(&microstructure.to_record())?)
}

/// Parse and validate a JSON record.
pub fn from_json_str(json: &str) -> RecordResult<Microstructure> {
    let record: MicrostructureRecord = serde_json::from_str(json)?;
    Microstructure::from_record(record)
}

/// Save a microstructure as compact JSON at `path`.
pub fn save_microstructure<P: AsRef<Path>>(
    microstructure: &Microstructure,
    path: P,
) -> RecordResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, &microstructure.to_record())?;

    writer.flush()?;
    Ok(())
}

/// Save into `dir` as `grid_<unix_timestamp>.json` and return the path.
pub fn save_microstructure_timestamped<P: AsRef<Path>>(
    microstructure: &Microstructure,
    dir: P,
) -> RecordResult<PathBuf> {
    let path = dir
        .as_ref()
        .join(timestamped_file_name(chrono::Utc::now().timestamp()));
    save_microstructure(microstructure, &path)?;
    info!("Microstructure data saved as: {}", path.display());
    Ok(path)
}

/// Load a microstructure snapshot from a JSON file.
pub fn load_microstructure<P: AsRef<Path>>(path: P) -> RecordResult<Microstructure> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let record: MicrostructureRecord = serde_json::from_reader(reader)?;
    Microstructure::from_record(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GrainConfig, SeedMethod};
    use grain_sampling::StdRandom;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn create_test_microstructure() -> Microstructure {
        let config = GrainConfig::new(9, 5, 4, SeedMethod::Sobol);
        Microstructure::create(&config, &mut StdRandom::from_u64_seed(2024)).unwrap()
    }

    #[test]
    fn test_save_load_roundtrip() {
        let m = create_test_microstructure();
        let temp_file = NamedTempFile::with_suffix(".json").unwrap();

        save_microstructure(&m, temp_file.path()).unwrap();
        let loaded = load_microstructure(temp_file.path()).unwrap();

        assert_eq!(loaded.cols(), m.cols());
        assert_eq!(loaded.rows(), m.rows());
        assert_eq!(loaded.orientations(), m.orientations());
        assert_eq!(loaded.grid(), m.grid());
        assert!(matches!(loaded, Microstructure::Loaded(_)));
    }

    #[test]
    fn test_compact_key_order() {
        let grid = Grid::from_columns(2, 1, &[vec![1], vec![2]]).unwrap();
        let m = Microstructure::Loaded(LoadedMicrostructure {
            orientations: 2,
            grid,
        });
        assert_eq!(
            to_json_string(&m).unwrap(),
            r#"{"cols":2,"rows":1,"orientations":2,"grid":[[1],[2]]}"#
        );
    }

    #[test]
    fn test_timestamped_save() {
        let m = create_test_microstructure();
        let dir = TempDir::new().unwrap();

        let path = save_microstructure_timestamped(&m, dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("grid_") && name.ends_with(".json"));
        assert_eq!(load_microstructure(&path).unwrap().grid(), m.grid());
    }

    #[test]
    fn test_timestamped_file_name() {
        assert_eq!(timestamped_file_name(1700000000), "grid_1700000000.json");
    }

    #[test]
    fn test_missing_field() {
        let result = from_json_str(r#"{"cols":1,"rows":1,"grid":[[1]]}"#);
        assert!(matches!(result, Err(RecordError::Json(_))));
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = from_json_str(r#"{"cols":2,"rows":2,"orientations":1,"grid":[[1,1]]}"#);
        assert!(matches!(result, Err(RecordError::InvalidFormat(_))));

        let result = from_json_str(r#"{"cols":2,"rows":2,"orientations":1,"grid":[[1,1],[1]]}"#);
        assert!(matches!(result, Err(RecordError::InvalidFormat(_))));
    }

    #[test]
    fn test_label_out_of_range() {
        let result = from_json_str(r#"{"cols":1,"rows":2,"orientations":1,"grid":[[1,2]]}"#);
        assert!(matches!(result, Err(RecordError::InvalidFormat(_))));
    }

    #[test]
    fn test_zero_dimensions() {
        let result = from_json_str(r#"{"cols":0,"rows":0,"orientations":1,"grid":[]}"#);
        assert!(matches!(result, Err(RecordError::InvalidFormat(_))));
    }

    #[test]
    fn test_unassigned_cells_are_valid() {
        let m = from_json_str(r#"{"cols":1,"rows":2,"orientations":3,"grid":[[0,3]]}"#).unwrap();
        assert_eq!(m.grid().unassigned_count(), 1);
    }

    #[test]
    fn test_invalid_json_file() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        temp_file.write_all(b"not json").unwrap();

        let result = load_microstructure(temp_file.path());
        assert!(matches!(result, Err(RecordError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_microstructure(dir.path().join("absent.json"));
        assert!(matches!(result, Err(RecordError::Io(_))));
    }
}
