//! Error types for artifact loading and inference.

use std::path::PathBuf;

use detector_preprocessing::pre_processor::VectorizerError;
use thiserror::Error;

/// Failure to bring the model artifacts into memory.
///
/// Fatal: without both artifacts no request can be served.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{artifact} artifact not found at {}", path.display())]
    Missing {
        artifact: &'static str,
        path: PathBuf,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid vectorizer artifact {}", path.display())]
    Vectorizer {
        path: PathBuf,
        #[source]
        source: VectorizerError,
    },

    #[error("failed to decode classifier artifact {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::error::DecodeError,
    },

    #[error("failed to load ONNX model {}: {message}", path.display())]
    Onnx { path: PathBuf, message: String },

    #[error("invalid classifier artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("ONNX support is disabled; cannot load {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error(
        "vectorizer produces {vectorizer} features but the classifier expects {classifier}"
    )]
    DimensionMismatch { vectorizer: usize, classifier: usize },
}

/// Failure of a single prediction. Never affects other requests or the
/// loaded artifacts.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("classifier returned label {0}, expected 0 or 1")]
    InvalidLabel(i64),

    #[error("classifier returned invalid probability {0}")]
    InvalidProbability(f32),

    #[error("class probabilities sum to {0}, expected 1.0")]
    ProbabilitiesDoNotSumToOne(f32),

    #[error("classifier predicted label {label} but probabilities are {probabilities:?}")]
    LabelProbabilityMismatch { label: i64, probabilities: [f32; 2] },

    #[error("feature vector has {actual} columns, classifier expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("unexpected model output: {0}")]
    UnexpectedOutput(String),

    #[error("ONNX runtime error: {0}")]
    Onnx(String),
}

