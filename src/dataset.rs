//! Reference dataset: previously observed categorical records, used only as
//! an encoding scaffold.
//!
//! The file format is a delimited table whose header names the categorical
//! columns. The first column is the class label from the training pipeline
//! and is discarded; the remaining cells are single-character feature codes.
//! The dataset is loaded once and immutable for the process lifetime.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use log::info;

use crate::classifier::{ClassifierError, UserRecord};

/// Ordered frame of observed feature records (codes only).
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    valid_codes: HashMap<String, BTreeSet<String>>,
}

impl ReferenceDataset {
    /// Loads the dataset from a CSV file.
    ///
    /// Fails with [`ClassifierError::DataLoad`] if the file is missing,
    /// malformed, or contains no feature columns or no data rows.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();

        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            ClassifierError::DataLoad(format!(
                "failed to open reference dataset {}: {}",
                path.display(),
                e
            ))
        })?;

        let headers = reader
            .headers()
            .map_err(|e| ClassifierError::DataLoad(format!("failed to read header row: {}", e)))?
            .clone();

        // Header column 0 is the class label, not an encodable feature.
        let columns: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();
        if columns.is_empty() {
            return Err(ClassifierError::DataLoad(
                "reference dataset has no feature columns".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                ClassifierError::DataLoad(format!("failed to read data row {}: {}", i + 2, e))
            })?;
            if record.len() != columns.len() + 1 {
                return Err(ClassifierError::DataLoad(format!(
                    "row {} has {} fields, expected {}",
                    i + 2,
                    record.len(),
                    columns.len() + 1
                )));
            }
            rows.push(
                record
                    .iter()
                    .skip(1)
                    .map(|cell| cell.trim().to_string())
                    .collect(),
            );
        }

        if rows.is_empty() {
            return Err(ClassifierError::DataLoad(format!(
                "reference dataset {} has zero data rows",
                path.display()
            )));
        }

        info!(
            "Loaded reference dataset {}: {} rows, {} feature columns",
            path.display(),
            rows.len(),
            columns.len()
        );

        Ok(Self::build(columns, rows))
    }

    /// Constructs a dataset from already-parsed records.
    ///
    /// `columns` names the feature columns (no class column); each row must
    /// have one code per column. Same emptiness rules as [`Self::load`].
    pub fn from_records(
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, ClassifierError> {
        if columns.is_empty() {
            return Err(ClassifierError::DataLoad(
                "reference dataset has no feature columns".to_string(),
            ));
        }
        if rows.is_empty() {
            return Err(ClassifierError::DataLoad(
                "reference dataset has zero data rows".to_string(),
            ));
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(ClassifierError::DataLoad(format!(
                "row {} has {} fields, expected {}",
                i + 1,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self::build(columns, rows))
    }

    fn build(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut valid_codes: HashMap<String, BTreeSet<String>> = columns
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();
        for row in &rows {
            for (column, code) in columns.iter().zip(row) {
                if let Some(set) = valid_codes.get_mut(column) {
                    set.insert(code.clone());
                }
            }
        }
        Self {
            columns,
            rows,
            valid_codes,
        }
    }

    /// Feature column names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The distinct codes observed for one feature column.
    pub fn valid_codes(&self, feature: &str) -> Option<&BTreeSet<String>> {
        self.valid_codes.get(feature)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The i-th reference row as a `feature name -> code` record.
    pub fn record(&self, index: usize) -> Option<UserRecord> {
        self.rows.get(index).map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    #[test]
    fn test_load_discards_class_column() {
        let file = fixture("class,odor,gill-size\np,f,n\ne,n,b\ne,a,b\n");
        let dataset = ReferenceDataset::load(file.path()).unwrap();
        assert_eq!(dataset.columns(), &["odor", "gill-size"]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.rows()[0], vec!["f", "n"]);
    }

    #[test]
    fn test_valid_codes_are_distinct_observed_codes() {
        let file = fixture("class,odor\np,f\ne,n\ne,n\np,p\n");
        let dataset = ReferenceDataset::load(file.path()).unwrap();
        let codes = dataset.valid_codes("odor").unwrap();
        let expected: BTreeSet<String> =
            ["f", "n", "p"].iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, &expected);
        assert!(dataset.valid_codes("cap-shape").is_none());
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let err = ReferenceDataset::load("/nonexistent/mushrooms.csv").unwrap_err();
        assert!(matches!(err, ClassifierError::DataLoad(_)));
    }

    #[test]
    fn test_zero_rows_is_data_load_error() {
        let file = fixture("class,odor,gill-size\n");
        let err = ReferenceDataset::load(file.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::DataLoad(_)));
    }

    #[test]
    fn test_ragged_row_is_data_load_error() {
        let file = fixture("class,odor,gill-size\np,f\n");
        let err = ReferenceDataset::load(file.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::DataLoad(_)));
    }

    #[test]
    fn test_record_reassembles_row() {
        let file = fixture("class,odor,gill-size\np,f,n\n");
        let dataset = ReferenceDataset::load(file.path()).unwrap();
        let record = dataset.record(0).unwrap();
        assert_eq!(record.get("odor").map(String::as_str), Some("f"));
        assert_eq!(record.get("gill-size").map(String::as_str), Some("n"));
        assert!(dataset.record(5).is_none());
    }

    #[test]
    fn test_from_records_rejects_empty_frames() {
        assert!(matches!(
            ReferenceDataset::from_records(vec![], vec![]),
            Err(ClassifierError::DataLoad(_))
        ));
        assert!(matches!(
            ReferenceDataset::from_records(vec!["odor".to_string()], vec![]),
            Err(ClassifierError::DataLoad(_))
        ));
    }
}
