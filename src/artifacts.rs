//! Resolves where the deployed model artifact and reference dataset live.
//!
//! Both files arrive by deployment and are read-only inputs; the store only
//! answers "where are they" and "are they present", it never fetches or
//! mutates anything.

use std::env;
use std::path::{Path, PathBuf};

pub const MODEL_FILE: &str = "mushroom_rf.onnx";
pub const DATASET_FILE: &str = "mushrooms_mini.csv";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model artifact not found at {0}")]
    ModelMissing(PathBuf),
    #[error("Reference dataset not found at {0}")]
    DatasetMissing(PathBuf),
}

/// Locates the model artifact and reference dataset on disk.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    data_dir: PathBuf,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new_default()
    }
}

impl ArtifactStore {
    /// Creates a store rooted at the default data directory.
    pub fn new_default() -> Self {
        Self::new(Self::get_default_data_dir())
    }

    /// Returns the default data directory path
    pub fn get_default_data_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("AMANITA_DATA") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("amanita");
        }

        // 3. Fallback to a data directory next to the process
        PathBuf::from("data")
    }

    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn model_path(&self) -> PathBuf {
        self.data_dir.join(MODEL_FILE)
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(DATASET_FILE)
    }

    pub fn is_present(&self) -> bool {
        let model_path = self.model_path();
        let dataset_path = self.dataset_path();
        log::info!("Checking deployed artifacts:");
        log::info!(
            "  Model path: {:?} (exists: {})",
            model_path,
            model_path.exists()
        );
        log::info!(
            "  Dataset path: {:?} (exists: {})",
            dataset_path,
            dataset_path.exists()
        );
        model_path.exists() && dataset_path.exists()
    }

    /// Fails with a descriptive error naming the first missing artifact.
    pub fn ensure_present(&self) -> Result<(), ArtifactError> {
        let model_path = self.model_path();
        if !model_path.exists() {
            return Err(ArtifactError::ModelMissing(model_path));
        }
        let dataset_path = self.dataset_path();
        if !dataset_path.exists() {
            return Err(ArtifactError::DatasetMissing(dataset_path));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_rooted_in_data_dir() {
        let store = ArtifactStore::new("/srv/amanita-data");
        assert!(store.model_path().ends_with("mushroom_rf.onnx"));
        assert!(store.dataset_path().ends_with("mushrooms_mini.csv"));
        assert_eq!(store.data_dir(), Path::new("/srv/amanita-data"));
    }

    #[test]
    fn test_ensure_present_names_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let err = store.ensure_present().unwrap_err();
        assert!(matches!(err, ArtifactError::ModelMissing(_)));

        std::fs::write(store.model_path(), b"stub").unwrap();
        let err = store.ensure_present().unwrap_err();
        assert!(matches!(err, ArtifactError::DatasetMissing(_)));

        std::fs::write(store.dataset_path(), b"stub").unwrap();
        assert!(store.ensure_present().is_ok());
        assert!(store.is_present());
    }

    #[test]
    fn test_env_override_wins() {
        env::set_var("AMANITA_DATA", "/tmp/amanita-test-data");
        let path = ArtifactStore::get_default_data_dir();
        assert_eq!(path, PathBuf::from("/tmp/amanita-test-data"));
        env::remove_var("AMANITA_DATA");
    }
}
