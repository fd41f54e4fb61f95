use ndarray::Array1;
use ort::session::Session;
use std::sync::Arc;

use log::{error, info};

use super::classifier::Classifier;
use super::encoder::OneHotSchema;
use super::error::ClassifierError;
use super::infer::ModelInference;
use crate::artifacts::ArtifactStore;
use crate::dataset::ReferenceDataset;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// A builder for constructing a Classifier with a fluent interface.
///
/// Set the runtime configuration first if a non-default one is wanted; the
/// ONNX session is created when the model file is supplied.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    dataset_path: Option<String>,
    dataset: Option<ReferenceDataset>,
    session: Option<Session>,
    input_name: Option<String>,
    output_count: usize,
    runtime_config: RuntimeConfig,
}

impl ModelInference for ClassifierBuilder {
    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn input_name(&self) -> Option<&str> {
        self.input_name.as_deref()
    }

    fn output_count(&self) -> usize {
        self.output_count
    }
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default
    /// configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration for ONNX model execution
    ///
    /// # Example
    /// ```
    /// use amanita::{ClassifierBuilder, RuntimeConfig};
    ///
    /// let config = RuntimeConfig::default();
    /// let builder = ClassifierBuilder::new()
    ///     .with_runtime_config(config);
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Points the builder at the model artifact and reference dataset an
    /// [`ArtifactStore`] resolves.
    pub fn with_artifacts(self, store: &ArtifactStore) -> Result<Self, ClassifierError> {
        let model_path = store.model_path();
        let dataset_path = store.dataset_path();
        self.with_model_file(model_path.to_string_lossy().as_ref())?
            .with_reference_data(dataset_path.to_string_lossy().as_ref())
    }

    /// Loads the pre-trained ONNX model artifact.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if
    ///   successful, or [`ClassifierError::ModelLoad`] if:
    ///   - The model path is already set
    ///   - The file does not exist
    ///   - The session could not be created from the artifact
    ///   - The model's input/output structure is unusable
    pub fn with_model_file(mut self, model_path: &str) -> Result<Self, ClassifierError> {
        if model_path.is_empty() {
            return Err(ClassifierError::ModelLoad(
                "Model path cannot be empty".to_string(),
            ));
        }
        if self.model_path.is_some() {
            return Err(ClassifierError::ModelLoad(
                "Model path already set".to_string(),
            ));
        }
        if !std::path::Path::new(model_path).exists() {
            return Err(ClassifierError::ModelLoad(format!(
                "Model file not found: {}",
                model_path
            )));
        }

        // Create session using the singleton environment
        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(model_path)
            .map_err(|e| {
                error!("Failed to load model artifact: {}", e);
                ClassifierError::ModelLoad(format!("Failed to load model artifact: {}", e))
            })?;

        let (input_name, output_count) = Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        self.model_path = Some(model_path.to_string());
        self.input_name = Some(input_name);
        self.output_count = output_count;
        self.session = Some(session);
        Ok(self)
    }

    /// Loads the reference dataset the encoding schema is derived from.
    ///
    /// Fails with [`ClassifierError::DataLoad`] if the file is missing,
    /// malformed, or empty, and with [`ClassifierError::ModelLoad`] if the
    /// path was already set.
    pub fn with_reference_data(mut self, dataset_path: &str) -> Result<Self, ClassifierError> {
        if self.dataset_path.is_some() {
            return Err(ClassifierError::ModelLoad(
                "Reference dataset path already set".to_string(),
            ));
        }

        let dataset = ReferenceDataset::load(dataset_path)?;
        self.dataset_path = Some(dataset_path.to_string());
        self.dataset = Some(dataset);
        Ok(self)
    }

    /// Builds and returns the final Classifier instance
    ///
    /// Derives the one-hot schema from the reference dataset and runs one
    /// all-zero probe row through the session, so an artifact whose input
    /// width disagrees with the derived schema fails here with
    /// [`ClassifierError::ModelLoad`] instead of on the first request.
    pub fn build(mut self) -> Result<Classifier, ClassifierError> {
        if self.model_path.is_none() {
            return Err(ClassifierError::ModelLoad(
                "Model path must be set".to_string(),
            ));
        }
        let dataset = self.dataset.take().ok_or_else(|| {
            ClassifierError::DataLoad("Reference dataset must be set".to_string())
        })?;

        let schema = OneHotSchema::from_dataset(&dataset);
        info!(
            "Derived one-hot schema: {} indicator columns over {} features",
            schema.width(),
            dataset.columns().len()
        );

        // Probe with the all-zero row (every feature at its dropped
        // reference level) to surface a width mismatch at load time.
        let probe: Array1<f32> = Array1::zeros(schema.width());
        self.run_row(&probe).map_err(|e| {
            ClassifierError::ModelLoad(format!(
                "Model rejected a {}-column probe row; artifact and reference dataset \
                 disagree on the encoding schema: {}",
                schema.width(),
                e
            ))
        })?;

        let session = Arc::new(
            self.session
                .take()
                .ok_or_else(|| ClassifierError::ModelLoad("No ONNX model loaded".into()))?,
        );

        Ok(Classifier {
            model_path: self.model_path.take().unwrap_or_default(),
            dataset_path: self.dataset_path.take().unwrap_or_default(),
            input_name: self
                .input_name
                .take()
                .ok_or_else(|| ClassifierError::ModelLoad("Model input name not captured".into()))?,
            output_count: self.output_count,
            session,
            schema: Arc::new(schema),
            dataset: Arc::new(dataset),
        })
    }

    /// Validates that the model has the expected input/output structure and
    /// returns the input tensor name and output count.
    fn validate_model(session: &Session) -> Result<(String, usize), ClassifierError> {
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(ClassifierError::ModelLoad(format!(
                "Model must have exactly 1 input (the encoded feature row), found {}",
                inputs.len()
            )));
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(ClassifierError::ModelLoad(
                "Model must have at least 1 output for the class label".to_string(),
            ));
        }

        Ok((inputs[0].name.clone(), outputs.len()))
    }
}
