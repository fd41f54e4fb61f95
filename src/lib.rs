//! Inference core for a mushroom edibility classifier.
//!
//! The hard problem this crate solves is *schema alignment*: a pre-trained
//! model expects a one-hot encoded feature row, but the training-time encoder
//! is gone. The crate rebuilds the exact indicator-column space from a
//! reference dataset of previously observed records and encodes each incoming
//! record against that fixed schema, so the model always sees the column
//! layout it was trained on.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use amanita::{Classifier, MushroomClass, UserRecord};
//!
//! let classifier = Classifier::builder()
//!     .with_model_file("data/mushroom_rf.onnx")?
//!     .with_reference_data("data/mushrooms_mini.csv")?
//!     .build()?;
//!
//! let mut record = UserRecord::new();
//! for name in classifier.feature_names() {
//!     record.insert(name.to_string(), "n".to_string());
//! }
//! record.insert("odor".to_string(), "a".to_string());
//!
//! let prediction = classifier.predict(&record)?;
//! if prediction.class == MushroomClass::Poisonous {
//!     println!("do not eat this");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! `Classifier` is `Send + Sync`; share it across threads with `Arc`. For a
//! process-wide, load-once instance see the [`service`] module.

pub mod artifacts;
pub mod catalog;
pub mod classifier;
pub mod dataset;
mod runtime;
pub mod service;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use catalog::{CategoricalFeature, FeatureCatalog};
pub use classifier::{
    Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, EncodedRecord, MushroomClass,
    OneHotSchema, Prediction, UserRecord,
};
pub use dataset::ReferenceDataset;
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
