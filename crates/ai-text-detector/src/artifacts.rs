//! Loading the classifier and vectorizer artifacts, and the once-per-process
//! cache that hands them to every request.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use detector_preprocessing::pre_processor::TfidfVectorizer;
use parking_lot::Mutex;
use tracing::info;

use crate::{
    error::LoadError,
    model::{LogisticRegression, TextClassifier},
    pipeline::Detector,
};

pub const DEFAULT_MODEL_PATH: &str = "ai_detector_model.onnx";
pub const DEFAULT_VECTORIZER_PATH: &str = "tfidf_vectorizer.bin";

/// Where the two artifacts live. Paths are relative to the working directory
/// unless absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            vectorizer_path: PathBuf::from(DEFAULT_VECTORIZER_PATH),
        }
    }
}

fn ensure_exists(artifact: &'static str, path: &Path) -> Result<(), LoadError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(LoadError::Missing {
            artifact,
            path: path.to_path_buf(),
        })
    }
}

pub fn load_vectorizer(path: &Path) -> Result<TfidfVectorizer, LoadError> {
    ensure_exists("vectorizer", path)?;
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let vectorizer =
        TfidfVectorizer::from_bytes(&bytes).map_err(|source| LoadError::Vectorizer {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        num_features = vectorizer.num_features(),
        "Loaded vectorizer"
    );
    Ok(vectorizer)
}

/// Load the classifier; `.onnx` files go through ONNX Runtime, anything else
/// is read as a bincode logistic regression.
pub fn load_classifier(path: &Path) -> Result<Box<dyn TextClassifier>, LoadError> {
    ensure_exists("classifier", path)?;
    let is_onnx = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"));

    let classifier: Box<dyn TextClassifier> = if is_onnx {
        load_onnx(path)?
    } else {
        Box::new(LogisticRegression::load(path)?)
    };
    info!(
        path = %path.display(),
        num_features = classifier.num_features(),
        model = classifier.describe(),
        "Loaded classifier"
    );
    Ok(classifier)
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> Result<Box<dyn TextClassifier>, LoadError> {
    Ok(Box::new(crate::model::OnnxClassifier::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> Result<Box<dyn TextClassifier>, LoadError> {
    Err(LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}

type Loader = Box<dyn Fn() -> Result<Detector, LoadError> + Send + Sync>;

/// Initialise-once holder for the loaded [`Detector`].
///
/// Every successful [`ArtifactCache::get_or_load`] on the same cache returns
/// the same `Arc`. A failed load leaves the cache empty.
pub struct ArtifactCache {
    loader: Loader,
    slot: OnceLock<Arc<Detector>>,
    init: Mutex<()>,
}

impl ArtifactCache {
    /// Cache that reads the artifacts named in `config` on first use.
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_loader(move || Detector::load(&config))
    }

    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Detector, LoadError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            slot: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    pub fn get_or_load(&self) -> Result<Arc<Detector>, LoadError> {
        if let Some(detector) = self.slot.get() {
            return Ok(Arc::clone(detector));
        }

        let _guard = self.init.lock();
        if let Some(detector) = self.slot.get() {
            return Ok(Arc::clone(detector));
        }
        let detector = Arc::new((self.loader)()?);
        // Only this thread can set the slot while `init` is held.
        let _ = self.slot.set(Arc::clone(&detector));
        Ok(detector)
    }

    /// The loaded detector, if a load has already succeeded.
    pub fn get(&self) -> Option<Arc<Detector>> {
        self.slot.get().cloned()
    }
}
