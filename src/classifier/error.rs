use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur in the edibility
/// classifier.
///
/// Load-time errors (`DataLoad`, `ModelLoad`) are terminal for the process:
/// the service refuses all inference until restarted. The remaining variants
/// are per-request and leave the process available.
#[derive(Debug, Clone)]
pub enum ClassifierError {
    /// Reference dataset was missing, unreadable, or empty
    DataLoad(String),
    /// Model artifact was missing, unreadable, or incompatible at load time
    ModelLoad(String),
    /// Request is missing a required feature, or names an unknown one
    SchemaMismatch(String),
    /// A supplied value could not be encoded
    Encoding(String),
    /// Model rejected the encoded row at predict time
    Inference(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataLoad(msg) => write!(f, "Data load error: {}", msg),
            Self::ModelLoad(msg) => write!(f, "Model load error: {}", msg),
            Self::SchemaMismatch(msg) => write!(f, "Schema mismatch: {}", msg),
            Self::Encoding(msg) => write!(f, "Encoding error: {}", msg),
            Self::Inference(msg) => write!(f, "Inference error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::ModelLoad(err.to_string())
    }
}
