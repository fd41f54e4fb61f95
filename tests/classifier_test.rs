//! Builder and end-to-end classifier tests.
//!
//! The end-to-end cases need the deployed artifacts (model + reference
//! dataset); they are skipped when the default artifact store is empty, the
//! same way the upstream model-dependent suites assume a downloaded model.

use amanita::{ArtifactStore, Classifier, ClassifierError, MushroomClass, UserRecord};
use std::io::Write;
use std::sync::Arc;
use std::thread;

fn fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

fn deployed_store() -> Option<ArtifactStore> {
    let store = ArtifactStore::new_default();
    store.is_present().then_some(store)
}

fn build_deployed() -> Option<Classifier> {
    let store = deployed_store()?;
    Some(
        Classifier::builder()
            .with_artifacts(&store)
            .expect("artifacts load")
            .build()
            .expect("classifier builds against deployed artifacts"),
    )
}

#[test]
fn test_missing_model_artifact_is_model_load_error() {
    let dataset = fixture("class,odor\ne,n\np,f\n");
    let result = Classifier::builder()
        .with_model_file("/nonexistent/mushroom_rf.onnx")
        .and_then(|b| b.with_reference_data(dataset.path().to_str().unwrap()));
    assert!(matches!(result, Err(ClassifierError::ModelLoad(_))));
}

#[test]
fn test_missing_dataset_is_data_load_error() {
    let result = Classifier::builder().with_reference_data("/nonexistent/mushrooms.csv");
    assert!(matches!(result, Err(ClassifierError::DataLoad(_))));
}

#[test]
fn test_classifier_info() {
    let Some(classifier) = build_deployed() else {
        return;
    };
    let info = classifier.info();
    assert!(info.schema_width > 0);
    assert_eq!(info.feature_names, classifier.feature_names());
    assert!(info.model_path.ends_with("mushroom_rf.onnx"));
}

#[test]
fn test_predict_reference_row_round_trip() {
    let Some(classifier) = build_deployed() else {
        return;
    };
    let record = classifier.reference().record(0).unwrap();
    let prediction = classifier.predict(&record).unwrap();
    assert!(prediction.off_schema.is_empty());
    assert_eq!(
        prediction.class,
        MushroomClass::from_class_id(prediction.class_id)
    );
}

#[test]
fn test_predict_rejects_incomplete_record() {
    let Some(classifier) = build_deployed() else {
        return;
    };
    let mut record = classifier.reference().record(0).unwrap();
    let feature = classifier.feature_names()[0].clone();
    record.remove(&feature);
    let err = classifier.predict(&record).unwrap_err();
    assert!(matches!(err, ClassifierError::SchemaMismatch(_)));
}

#[test]
fn test_predict_flags_off_schema_code() {
    let Some(classifier) = build_deployed() else {
        return;
    };
    let mut record = classifier.reference().record(0).unwrap();
    record.insert("odor".to_string(), "@".to_string());
    let prediction = classifier.predict(&record).unwrap();
    assert_eq!(prediction.off_schema, vec!["odor".to_string()]);
}

#[test]
fn test_options_cover_all_columns() {
    let Some(classifier) = build_deployed() else {
        return;
    };
    let options = classifier.options();
    assert_eq!(options.len(), classifier.feature_names().len());
    for (feature, labels) in &options {
        assert!(
            !labels.is_empty(),
            "feature '{}' offers no options",
            feature
        );
    }
}

#[test]
fn test_concurrent_predictions() {
    let Some(classifier) = build_deployed() else {
        return;
    };
    let classifier = Arc::new(classifier);

    let mut handles = vec![];
    for i in 0..4 {
        let classifier = Arc::clone(&classifier);
        handles.push(thread::spawn(move || {
            let record: UserRecord = classifier
                .reference()
                .record(i % classifier.reference().len())
                .unwrap();
            classifier.predict(&record).unwrap()
        }));
    }

    for handle in handles {
        let prediction = handle.join().unwrap();
        assert!(prediction.probabilities.is_none() || !prediction.probabilities.unwrap().is_empty());
    }
}
