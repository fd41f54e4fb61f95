use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub mod builder;
mod classifier;
mod encoder;
mod error;
mod infer;

pub use builder::ClassifierBuilder;
pub use classifier::Classifier;
pub use encoder::{EncodedRecord, IndicatorColumn, OneHotSchema};
pub use error::ClassifierError;

/// One inference request: a single-character code for every feature column
/// of the reference dataset.
pub type UserRecord = HashMap<String, String>;

/// Binary edibility outcome.
///
/// The polarity is safety-relevant and fixed: class id `0` is the edible
/// class, any nonzero id is poisonous/unsafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MushroomClass {
    Edible,
    Poisonous,
}

impl MushroomClass {
    pub fn from_class_id(class_id: i64) -> Self {
        if class_id == 0 {
            Self::Edible
        } else {
            Self::Poisonous
        }
    }

    pub fn is_edible(self) -> bool {
        self == Self::Edible
    }
}

impl fmt::Display for MushroomClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edible => write!(f, "edible"),
            Self::Poisonous => write!(f, "poisonous"),
        }
    }
}

/// Result of classifying one record.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Raw class id from the model; `0` denotes the edible class.
    pub class_id: i64,
    pub class: MushroomClass,
    /// Per-class probabilities when the artifact exposes them.
    pub probabilities: Option<Vec<f32>>,
    /// Features whose supplied code was never observed in the reference
    /// dataset; their indicator block was encoded as all zeros.
    pub off_schema: Vec<String>,
}

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model artifact
    pub model_path: String,
    /// Path to the reference dataset
    pub dataset_path: String,
    /// Number of indicator columns the model consumes
    pub schema_width: usize,
    /// Feature column names, in reference dataset order
    pub feature_names: Vec<String>,
}
