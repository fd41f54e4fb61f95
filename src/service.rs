//! Process-wide, load-once inference context.
//!
//! Loading the reference dataset and the model artifact is expensive and
//! must happen at most once per process. The service keeps the built
//! [`Classifier`] behind a mutex-guarded cell: the first caller performs the
//! load while holding the lock (single-flight), later callers get the cached
//! `Arc`. A failed load is cached just as terminally as a successful one;
//! every subsequent call short-circuits with the original error and nothing
//! is retried until the process restarts.
//!
//! State machine: `Uninitialized -> Loading -> Ready | Failed`, no further
//! transitions.

use lazy_static::lazy_static;
use std::sync::{Arc, Mutex};

use log::{error, info};

use crate::artifacts::ArtifactStore;
use crate::classifier::{Classifier, ClassifierError};
use crate::runtime::RuntimeConfig;

/// Where the service finds its artifacts and how it configures the runtime.
#[derive(Debug, Default, Clone)]
pub struct ServiceConfig {
    pub store: Option<ArtifactStore>,
    pub runtime: RuntimeConfig,
}

#[derive(Debug)]
enum ServiceState {
    Ready(Arc<Classifier>),
    Failed(ClassifierError),
}

lazy_static! {
    static ref STATE: Mutex<Option<ServiceState>> = Mutex::new(None);
}

/// Returns the process-wide classifier, initializing it on first call with
/// the default artifact locations.
pub fn context() -> Result<Arc<Classifier>, ClassifierError> {
    init_with(ServiceConfig::default())
}

/// Returns the process-wide classifier, initializing it on first call with
/// the given configuration. A configuration passed after initialization has
/// no effect; the cached outcome wins.
pub fn init_with(config: ServiceConfig) -> Result<Arc<Classifier>, ClassifierError> {
    let mut state = STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if state.is_none() {
        // Loading happens under the lock: concurrent first callers queue up
        // here and all observe the one outcome.
        *state = Some(match load(config) {
            Ok(classifier) => {
                info!("Inference service ready");
                ServiceState::Ready(Arc::new(classifier))
            }
            Err(e) => {
                error!("Inference service failed to initialize: {}", e);
                ServiceState::Failed(e)
            }
        });
    }

    match state.as_ref() {
        Some(ServiceState::Ready(classifier)) => Ok(Arc::clone(classifier)),
        Some(ServiceState::Failed(e)) => Err(e.clone()),
        None => unreachable!("service state initialized above"),
    }
}

fn load(config: ServiceConfig) -> Result<Classifier, ClassifierError> {
    let store = config.store.unwrap_or_default();
    Classifier::builder()
        .with_runtime_config(config.runtime)
        .with_artifacts(&store)?
        .build()
}

/// Clears the cached state so a test process can exercise initialization
/// more than once. The production lifecycle has no reset: a failed load is
/// terminal until restart.
#[doc(hidden)]
pub fn reset() {
    let mut state = STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *state = None;
}
