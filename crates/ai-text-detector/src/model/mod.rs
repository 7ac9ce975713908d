//! Capability interfaces for the two model artifacts, plus their concrete
//! implementations.

use detector_preprocessing::pre_processor::TfidfVectorizer;
use sprs::CsMat;

use crate::error::InferenceError;

mod linear;
#[cfg(feature = "onnx")]
mod onnx;

pub use linear::LogisticRegression;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

/// Maps raw text to the feature vector a classifier was trained on.
pub trait TextVectorizer: Send + Sync {
    /// Returns a `1 x num_features` row.
    fn transform(&self, text: &str) -> CsMat<f64>;

    fn num_features(&self) -> usize;
}

/// Maps a feature vector to a class label and a probability per class.
pub trait TextClassifier: Send + Sync {
    fn predict(&self, features: &CsMat<f64>) -> Result<RawPrediction, InferenceError>;

    /// Width of the feature vector this classifier accepts.
    fn num_features(&self) -> usize;

    /// Short model description for logs and the page footer.
    fn describe(&self) -> &str;
}

/// Unvalidated classifier output: label 0 = Human, 1 = AI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPrediction {
    pub label: i64,
    pub probabilities: [f32; 2],
}

impl TextVectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> CsMat<f64> {
        TfidfVectorizer::transform(self, text)
    }

    fn num_features(&self) -> usize {
        TfidfVectorizer::num_features(self)
    }
}

pub(crate) fn check_width(
    features: &CsMat<f64>,
    expected: usize,
) -> Result<(), InferenceError> {
    if features.cols() == expected && features.rows() == 1 {
        Ok(())
    } else {
        Err(InferenceError::DimensionMismatch {
            expected,
            actual: features.cols(),
        })
    }
}
