//! Artifact loading from a run's `files` directory

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::record_batch::RecordBatch;
use flate2::read::GzDecoder;
use tracing::{info, warn};

use super::{MetricTable, MetricTables, RunDirectory};
use crate::Result;

/// JSON artifacts keyed by file stem.
pub type JsonArtifacts = BTreeMap<String, serde_json::Value>;

const CSV_SUFFIX: &str = ".csv";
const GZ_SUFFIX: &str = ".gz";
const JSON_SUFFIX: &str = ".json";

/// How a CSV artifact is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CsvEncoding {
    Plain,
    Gzip,
}

/// Load every `*.csv` and `*.csv.gz` artifact of `run` as a metric table.
///
/// Files that fail to parse are logged and skipped. A run without a `files`
/// directory yields an empty collection.
///
/// # Errors
///
/// Returns an IO error only if the `files` directory exists but cannot be
/// listed.
pub fn load_metric_tables(run: &RunDirectory) -> Result<MetricTables> {
    info!("Loading data from: {}", run.path().display());
    let mut tables = MetricTables::new();

    for path in list_files(&run.files_dir())? {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.contains(CSV_SUFFIX) {
            continue;
        }
        info!("  Found: {file_name}");

        let Some((name, encoding)) = csv_table_name(file_name) else {
            warn!("  Skipping {file_name}: not a .csv or .csv.gz file");
            continue;
        };

        match read_csv(&path, encoding) {
            Ok(batch) => {
                tables.insert(MetricTable::new(name, batch));
            }
            Err(err) => warn!("  Error loading {file_name}: {err}"),
        }
    }

    Ok(tables)
}

/// Load every `*.json` artifact of `run`.
///
/// A file that cannot be read or parsed is logged and skipped without
/// aborting the rest of the load.
///
/// # Errors
///
/// Returns an IO error only if the `files` directory exists but cannot be
/// listed.
pub fn load_json_artifacts(run: &RunDirectory) -> Result<JsonArtifacts> {
    let mut artifacts = JsonArtifacts::new();

    for path in list_files(&run.files_dir())? {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(stem) = file_name.strip_suffix(JSON_SUFFIX) else {
            continue;
        };

        match read_json(&path) {
            Ok(value) => {
                info!("  Loaded JSON: {file_name}");
                artifacts.insert(stem.to_string(), value);
            }
            Err(err) => warn!("  Error loading {file_name}: {err}"),
        }
    }

    Ok(artifacts)
}

/// Table name and encoding for a CSV artifact file name.
///
/// `train__advantages.csv.gz` and `train__advantages.csv` both map to
/// `train__advantages`.
fn csv_table_name(file_name: &str) -> Option<(String, CsvEncoding)> {
    if let Some(stem) = file_name
        .strip_suffix(GZ_SUFFIX)
        .and_then(|s| s.strip_suffix(CSV_SUFFIX))
    {
        return Some((stem.to_string(), CsvEncoding::Gzip));
    }
    file_name
        .strip_suffix(CSV_SUFFIX)
        .map(|stem| (stem.to_string(), CsvEncoding::Plain))
}

/// Regular files in `dir`, sorted by path; empty if `dir` does not exist.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_csv(path: &Path, encoding: CsvEncoding) -> Result<RecordBatch> {
    let mut bytes = Vec::new();
    match encoding {
        CsvEncoding::Plain => {
            File::open(path)?.read_to_end(&mut bytes)?;
        }
        CsvEncoding::Gzip => {
            GzDecoder::new(File::open(path)?).read_to_end(&mut bytes)?;
        }
    }
    parse_csv(&bytes)
}

/// Parse CSV bytes with a header row, inferring column types.
pub(crate) fn parse_csv(bytes: &[u8]) -> Result<RecordBatch> {
    let format = Format::default().with_header(true);
    let (schema, _) = format.infer_schema(Cursor::new(bytes), None)?;
    let schema = Arc::new(schema);

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .build(Cursor::new(bytes))?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }
    Ok(concat_batches(&schema, &batches)?)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_table_name() {
        assert_eq!(
            csv_table_name("advantages__iter_0.csv.gz"),
            Some(("advantages__iter_0".to_string(), CsvEncoding::Gzip))
        );
        assert_eq!(
            csv_table_name("values__iter_0.csv"),
            Some(("values__iter_0".to_string(), CsvEncoding::Plain))
        );
        assert_eq!(csv_table_name("values.csv.bak"), None);
        assert_eq!(csv_table_name("notes.txt"), None);
    }

    #[test]
    fn test_parse_csv_infers_numbers() {
        let batch = parse_csv(b"advantage,step\n0.5,1\n-0.25,2\n1.0,3\n").unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.schema().field(0).name(), "advantage");
    }

    #[test]
    fn test_parse_csv_header_only() {
        let batch = parse_csv(b"value\n").unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 1);
    }

    #[test]
    fn test_missing_files_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let run = RunDirectory::from_path(tmp.path()).unwrap();
        assert!(load_metric_tables(&run).unwrap().is_empty());
        assert!(load_json_artifacts(&run).unwrap().is_empty());
    }
}
