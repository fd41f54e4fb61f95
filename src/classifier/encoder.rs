//! Schema alignment: reproducing the trained model's one-hot column space.
//!
//! The training pipeline encoded its categorical frame with the usual
//! drop-first convention: for each feature with *k* observed codes it emitted
//! *k - 1* indicator columns, dropping the lexicographically first code as
//! the reference level. The schema is therefore a deterministic function of
//! (column order, sorted per-column code sets), which means it can be rebuilt
//! from the reference dataset alone, once, at build time. Each incoming
//! record is then encoded against that fixed column list.
//!
//! A code never observed in the reference data has no indicator column; the
//! encoded row simply carries an all-zero block for that feature and the
//! feature name is reported back in [`EncodedRecord::off_schema`]. No column
//! the model has never seen is ever fabricated.

use ndarray::Array1;
use std::collections::BTreeSet;

use super::error::ClassifierError;
use super::UserRecord;
use crate::dataset::ReferenceDataset;

/// One indicator column of the trained schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorColumn {
    pub feature: String,
    pub code: String,
}

#[derive(Debug, Clone)]
struct FeatureLevels {
    name: String,
    /// All observed codes, lexicographically sorted; `codes[0]` is the
    /// dropped reference level.
    codes: Vec<String>,
}

/// The fixed indicator-column space derived from a reference dataset.
#[derive(Debug, Clone)]
pub struct OneHotSchema {
    features: Vec<FeatureLevels>,
    columns: Vec<IndicatorColumn>,
}

/// A user record encoded into the schema's column space.
#[derive(Debug, Clone)]
pub struct EncodedRecord {
    /// 0/1 indicator row, one entry per schema column.
    pub values: Array1<f32>,
    /// Features whose supplied code was never observed in the reference
    /// dataset. Their indicator block is all zeros.
    pub off_schema: Vec<String>,
}

impl OneHotSchema {
    /// Derives the schema from the reference dataset.
    ///
    /// Deterministic: the same dataset always yields the same column list,
    /// regardless of any record later encoded against it.
    pub fn from_dataset(dataset: &ReferenceDataset) -> Self {
        let mut features = Vec::with_capacity(dataset.columns().len());
        let mut columns = Vec::new();

        for name in dataset.columns() {
            let codes: Vec<String> = dataset
                .valid_codes(name)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default();
            for code in codes.iter().skip(1) {
                columns.push(IndicatorColumn {
                    feature: name.clone(),
                    code: code.clone(),
                });
            }
            features.push(FeatureLevels {
                name: name.clone(),
                codes,
            });
        }

        Self { features, columns }
    }

    /// Number of indicator columns (the model's expected input width).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The schema's indicator columns, in model input order.
    pub fn columns(&self) -> &[IndicatorColumn] {
        &self.columns
    }

    /// Feature names covered by the schema, in column order.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.features.iter().map(|f| f.name.as_str())
    }

    /// Encodes one record into the schema's column space.
    ///
    /// The record must supply exactly the schema's feature names: a missing
    /// feature is a [`ClassifierError::SchemaMismatch`] (never a silent
    /// default), as is an unrecognized feature name. Empty values are
    /// [`ClassifierError::Encoding`] failures.
    pub fn encode(&self, record: &UserRecord) -> Result<EncodedRecord, ClassifierError> {
        for feature in &self.features {
            let value = record.get(&feature.name).ok_or_else(|| {
                ClassifierError::SchemaMismatch(format!(
                    "record is missing required feature '{}'",
                    feature.name
                ))
            })?;
            if value.trim().is_empty() {
                return Err(ClassifierError::Encoding(format!(
                    "feature '{}' has an empty value",
                    feature.name
                )));
            }
        }

        if record.len() != self.features.len() {
            let known: BTreeSet<&str> = self.features.iter().map(|f| f.name.as_str()).collect();
            let extra = record
                .keys()
                .find(|name| !known.contains(name.as_str()))
                .cloned()
                .unwrap_or_default();
            return Err(ClassifierError::SchemaMismatch(format!(
                "record names unknown feature '{}'",
                extra
            )));
        }

        let mut values = Array1::zeros(self.columns.len());
        let mut off_schema = Vec::new();

        let mut offset = 0usize;
        for feature in &self.features {
            let code = record[&feature.name].trim();
            let block_width = feature.codes.len().saturating_sub(1);
            match feature.codes.iter().position(|c| c == code) {
                // Position 0 is the dropped reference level: all-zero block.
                Some(0) => {}
                Some(pos) => values[offset + pos - 1] = 1.0,
                None => off_schema.push(feature.name.clone()),
            }
            offset += block_width;
        }

        Ok(EncodedRecord { values, off_schema })
    }
}
