use ndarray::{Array1, Array2};
use ort::session::Session;
use ort::value::Tensor;
use std::collections::HashMap;

use super::error::ClassifierError;

/// Runs an encoded feature row through the ONNX model.
///
/// The model is treated as a black box with the contract:
/// - Input: one f32 tensor of shape `[batch_size, schema_width]`
/// - Output 0: class label tensor of shape `[batch_size]` (`i64`)
/// - Output 1 (optional): per-class probabilities; ignored when absent or
///   not extractable as a plain f32 tensor (some exporters emit it as a
///   sequence of maps)
pub(crate) trait ModelInference {
    /// Returns the initialized ONNX session if available
    fn session(&self) -> Option<&Session>;

    /// Name of the model's input tensor, captured at load time
    fn input_name(&self) -> Option<&str>;

    /// Number of outputs the model declares, captured at load time
    fn output_count(&self) -> usize;

    /// Runs one encoded row and returns `(class id, probabilities)`.
    ///
    /// # Errors
    /// - `ModelLoad` if the session was never initialized
    /// - `Inference` if tensor construction, the model run, or label
    ///   extraction fails (including a row width the model rejects)
    fn run_row(&self, row: &Array1<f32>) -> Result<(i64, Option<Vec<f32>>), ClassifierError> {
        let session = self
            .session()
            .ok_or_else(|| ClassifierError::ModelLoad("Session not initialized".into()))?;
        let input_name = self
            .input_name()
            .ok_or_else(|| ClassifierError::ModelLoad("Model input name not captured".into()))?;

        let input_array = Array2::from_shape_vec((1, row.len()), row.to_vec())
            .map_err(|e| ClassifierError::Inference(format!("Failed to create input array: {}", e)))?;
        let input_dyn = input_array.into_dyn();
        let input_row = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            input_name,
            Tensor::from_array(&input_row).map_err(|e| {
                ClassifierError::Inference(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = session
            .run(input_tensors)
            .map_err(|e| ClassifierError::Inference(format!("Failed to run model: {}", e)))?;

        let labels = outputs[0].try_extract_tensor::<i64>().map_err(|e| {
            ClassifierError::Inference(format!("Failed to extract label tensor: {}", e))
        })?;
        let class_id = labels.iter().copied().next().ok_or_else(|| {
            ClassifierError::Inference("Model returned an empty label tensor".into())
        })?;

        let probabilities = if self.output_count() > 1 {
            outputs[1]
                .try_extract_tensor::<f32>()
                .ok()
                .map(|tensor| tensor.iter().copied().collect())
        } else {
            None
        };

        Ok((class_id, probabilities))
    }
}
