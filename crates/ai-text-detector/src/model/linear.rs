use std::path::Path;

use detector_preprocessing::pre_processor::ARTIFACT_DECODE_LIMIT;
use sprs::CsMat;

use super::{check_width, RawPrediction, TextClassifier};
use crate::error::{InferenceError, LoadError};

/// Binary logistic regression evaluated directly on the sparse TF-IDF row.
///
/// `P(AI) = sigmoid(coef . x + intercept)`; ties go to Human.
#[derive(bincode::Encode, bincode::Decode, Clone, Debug, PartialEq)]
pub struct LogisticRegression {
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    #[must_use]
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }

    /// Decode a bincode artifact from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = bincode::config::standard().with_limit::<ARTIFACT_DECODE_LIMIT>();
        let (model, read): (Self, usize) = bincode::decode_from_slice(&bytes, config)
            .map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        let invalid = |reason: String| LoadError::InvalidArtifact {
            path: path.to_path_buf(),
            reason,
        };
        if read != bytes.len() {
            return Err(invalid(format!(
                "{} trailing bytes after model payload",
                bytes.len() - read
            )));
        }
        if model.coef.is_empty() {
            return Err(invalid("model has no coefficients".to_string()));
        }
        if !model.intercept.is_finite() || model.coef.iter().any(|c| !c.is_finite()) {
            return Err(invalid("model weights must be finite".to_string()));
        }
        Ok(model)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    fn decision_function(&self, features: &CsMat<f64>) -> f64 {
        features
            .outer_iterator()
            .next()
            .map(|row| {
                row.iter()
                    .map(|(col, &value)| value * self.coef[col])
                    .sum::<f64>()
            })
            .unwrap_or_default()
            + self.intercept
    }
}

impl TextClassifier for LogisticRegression {
    fn predict(&self, features: &CsMat<f64>) -> Result<RawPrediction, InferenceError> {
        check_width(features, self.coef.len())?;

        let z = self.decision_function(features);
        let ai = 1.0 / (1.0 + (-z).exp());
        Ok(RawPrediction {
            label: i64::from(ai > 0.5),
            probabilities: [(1.0 - ai) as f32, ai as f32],
        })
    }

    fn num_features(&self) -> usize {
        self.coef.len()
    }

    fn describe(&self) -> &str {
        "Logistic Regression + TF-IDF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[(usize, f64)], width: usize) -> CsMat<f64> {
        let (indices, data): (Vec<_>, Vec<_>) = values.iter().copied().unzip();
        CsMat::new((1, width), vec![0, indices.len()], indices, data)
    }

    #[test]
    fn test_positive_score_predicts_ai() {
        let model = LogisticRegression::new(vec![2.0, -1.0, 0.5], 0.0);
        let raw = model.predict(&row(&[(0, 1.0)], 3)).unwrap();

        assert_eq!(raw.label, 1);
        assert!(raw.probabilities[1] > raw.probabilities[0]);
        assert!((raw.probabilities[0] + raw.probabilities[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_score_predicts_human() {
        let model = LogisticRegression::new(vec![2.0, -1.0, 0.5], -0.25);
        let raw = model.predict(&row(&[(1, 1.0)], 3)).unwrap();

        assert_eq!(raw.label, 0);
        assert!(raw.probabilities[0] > raw.probabilities[1]);
    }

    #[test]
    fn test_zero_score_goes_to_human() {
        let model = LogisticRegression::new(vec![1.0], 0.0);
        let raw = model.predict(&row(&[], 1)).unwrap();

        assert_eq!(raw.label, 0);
        assert_eq!(raw.probabilities, [0.5, 0.5]);
    }

    #[test]
    fn test_wrong_width_is_an_inference_error() {
        let model = LogisticRegression::new(vec![1.0, 1.0], 0.0);
        let err = model.predict(&row(&[(0, 1.0)], 3)).unwrap_err();

        assert!(matches!(
            err,
            InferenceError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_load_rejects_truncated_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let bytes = LogisticRegression::new(vec![1.0, 2.0, 3.0], 0.5)
            .to_bytes()
            .unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 4]).unwrap();

        assert!(matches!(
            LogisticRegression::load(&path),
            Err(LoadError::Decode { .. })
        ));
    }

    #[test]
    fn test_load_rejects_oversized_length_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        for len in [u64::MAX / 2, 1 << 40] {
            let mut bytes = vec![253];
            bytes.extend_from_slice(&len.to_le_bytes());
            std::fs::write(&path, &bytes).unwrap();

            assert!(matches!(
                LogisticRegression::load(&path),
                Err(LoadError::Decode { .. })
            ));
        }
    }

    #[test]
    fn test_load_reads_written_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let model = LogisticRegression::new(vec![0.25, -0.75], 0.1);
        std::fs::write(&path, model.to_bytes().unwrap()).unwrap();

        assert_eq!(LogisticRegression::load(&path).unwrap(), model);
    }
}
