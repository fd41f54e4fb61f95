use ort::session::Session;
use std::sync::Arc;

use log::warn;

use super::encoder::{EncodedRecord, OneHotSchema};
use super::error::ClassifierError;
use super::infer::ModelInference;
use super::{MushroomClass, Prediction, UserRecord};
use crate::catalog::FeatureCatalog;
use crate::dataset::ReferenceDataset;

/// A thread-safe edibility classifier over a pre-trained ONNX model.
///
/// Holds the loaded session, the one-hot schema derived from the reference
/// dataset, and the dataset itself (kept as the encoding scaffold and for
/// presenting selectable options). Everything is immutable after build.
///
/// # Thread Safety
///
/// This type is automatically `Send + Sync` because all of its fields are
/// thread-safe: `String` and `usize` trivially, and the session, schema, and
/// dataset are behind `Arc`.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use amanita::Classifier;
/// use std::sync::Arc;
/// use std::thread;
///
/// let classifier = Arc::new(
///     Classifier::builder()
///         .with_model_file("data/mushroom_rf.onnx")?
///         .with_reference_data("data/mushrooms_mini.csv")?
///         .build()?,
/// );
///
/// let shared = Arc::clone(&classifier);
/// thread::spawn(move || {
///     let record = shared.reference().record(0).unwrap();
///     shared.predict(&record).unwrap();
/// });
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Classifier {
    pub(crate) model_path: String,
    pub(crate) dataset_path: String,
    pub(crate) session: Arc<Session>,
    pub(crate) input_name: String,
    pub(crate) output_count: usize,
    pub(crate) schema: Arc<OneHotSchema>,
    pub(crate) dataset: Arc<ReferenceDataset>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl ModelInference for Classifier {
    fn session(&self) -> Option<&Session> {
        Some(&self.session)
    }

    fn input_name(&self) -> Option<&str> {
        Some(&self.input_name)
    }

    fn output_count(&self) -> usize {
        self.output_count
    }
}

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            dataset_path: self.dataset_path.clone(),
            schema_width: self.schema.width(),
            feature_names: self.dataset.columns().to_vec(),
        }
    }

    /// The reference dataset the schema was derived from.
    pub fn reference(&self) -> &ReferenceDataset {
        &self.dataset
    }

    /// The derived one-hot schema.
    pub fn schema(&self) -> &OneHotSchema {
        &self.schema
    }

    /// Feature column names, in reference dataset order.
    pub fn feature_names(&self) -> &[String] {
        self.dataset.columns()
    }

    /// Selectable options per feature, for a presentation layer: each entry
    /// is `(feature name, ordered (display label, code) pairs)`, restricted
    /// to the codes the reference dataset actually contains.
    pub fn options(&self) -> Vec<(String, Vec<(String, String)>)> {
        let catalog = FeatureCatalog::standard();
        self.dataset
            .columns()
            .iter()
            .map(|name| {
                let valid = self
                    .dataset
                    .valid_codes(name)
                    .cloned()
                    .unwrap_or_default();
                (name.clone(), catalog.labels_for(name, &valid))
            })
            .collect()
    }

    /// Classifies one record.
    ///
    /// The record must carry a code for every reference column; see
    /// [`OneHotSchema::encode`] for the failure modes. A code never observed
    /// in the reference data is accepted but reported in
    /// [`Prediction::off_schema`]; the model then sees an all-zero block
    /// for that feature rather than a fabricated column.
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # use amanita::Classifier;
    /// # let classifier = Classifier::builder()
    /// #     .with_model_file("data/mushroom_rf.onnx")?
    /// #     .with_reference_data("data/mushrooms_mini.csv")?
    /// #     .build()?;
    /// let record = classifier.reference().record(0).unwrap();
    /// let prediction = classifier.predict(&record)?;
    /// println!("{} (class id {})", prediction.class, prediction.class_id);
    /// # Ok(())
    /// # }
    /// ```
    pub fn predict(&self, record: &UserRecord) -> Result<Prediction, ClassifierError> {
        let encoded = self.schema.encode(record)?;
        if !encoded.off_schema.is_empty() {
            warn!(
                "Record carries codes outside the reference schema for: {}",
                encoded.off_schema.join(", ")
            );
        }

        let (class_id, probabilities) = self.run_row(&encoded.values)?;

        Ok(Prediction {
            class_id,
            class: MushroomClass::from_class_id(class_id),
            probabilities,
            off_schema: encoded.off_schema,
        })
    }

    /// Encodes a record without running the model. Exposed so callers can
    /// inspect the aligned row (and its off-schema flags) directly.
    pub fn encode(&self, record: &UserRecord) -> Result<EncodedRecord, ClassifierError> {
        self.schema.encode(record)
    }
}
