use std::path::Path;

use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::{Tensor, TensorElementType, ValueType},
};
use parking_lot::Mutex;
use sprs::CsMat;
use tracing::debug;

use super::{check_width, RawPrediction, TextClassifier};
use crate::error::{InferenceError, LoadError};

/// A classifier exported to ONNX (e.g. a converted scikit-learn logistic
/// regression). Output 0 is the label, output 1 the `[rows, 2]` probability
/// matrix.
pub struct OnnxClassifier {
    // `Session::run` needs `&mut`.
    session: Mutex<Session>,
    input_name: String,
    num_features: usize,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let onnx_err = |err: &dyn std::fmt::Display| LoadError::Onnx {
            path: path.to_path_buf(),
            message: err.to_string(),
        };

        let session = Session::builder()
            .map_err(|e| onnx_err(&e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| onnx_err(&e))?
            .with_intra_threads(4)
            .map_err(|e| onnx_err(&e))?
            .commit_from_file(path)
            .map_err(|e| onnx_err(&e))?;

        let invalid = |reason: String| LoadError::InvalidArtifact {
            path: path.to_path_buf(),
            reason,
        };

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| invalid("model declares no inputs".to_string()))?;
        let input_name = input.name().to_string();
        let num_features = tensor_parts(input.dtype())
            .filter(|(ty, _)| *ty == TensorElementType::Float32)
            .and_then(|(_, shape)| feature_width(shape))
            .ok_or_else(|| {
                invalid(format!("input {input_name:?} must be a float [N, features] tensor"))
            })?;

        let [label_output, proba_output, ..] = session.outputs() else {
            return Err(invalid(
                "model must output a label and class probabilities".to_string(),
            ));
        };
        let label_ok = tensor_parts(label_output.dtype())
            .is_some_and(|(ty, shape)| is_label_output(ty, shape));
        if !label_ok {
            return Err(invalid(format!(
                "output {:?} must be an int64 label tensor",
                label_output.name()
            )));
        }
        // skl2onnx wraps probabilities in a ZipMap (a sequence of maps) unless
        // exported with `zipmap=False`.
        let proba_ok = tensor_parts(proba_output.dtype())
            .is_some_and(|(ty, shape)| is_probability_output(ty, shape));
        if !proba_ok {
            return Err(invalid(format!(
                "output {:?} must be a float [N, 2] probability tensor",
                proba_output.name()
            )));
        }
        debug!(input = %input_name, num_features, "ONNX classifier signature checked");

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            num_features,
        })
    }
}

fn tensor_parts(value_type: &ValueType) -> Option<(TensorElementType, &[i64])> {
    match value_type {
        ValueType::Tensor { ty, shape, .. } => Some((*ty, &shape[..])),
        _ => None,
    }
}

/// Last dimension of a 2-d tensor input, if fixed.
fn feature_width(shape: &[i64]) -> Option<usize> {
    match shape {
        [_, width] if *width > 0 => Some(*width as usize),
        _ => None,
    }
}

/// One int64 label per row. Dynamic dimensions are negative.
fn is_label_output(ty: TensorElementType, shape: &[i64]) -> bool {
    ty == TensorElementType::Int64 && matches!(shape, [_] | [_, 1])
}

/// A float `[rows, 2]` matrix; the class axis may be left dynamic.
fn is_probability_output(ty: TensorElementType, shape: &[i64]) -> bool {
    ty == TensorElementType::Float32
        && matches!(shape, [_, classes] if *classes == 2 || *classes < 0)
}

fn prepare_input_for_inference(features: &CsMat<f64>) -> Result<Tensor<f32>, InferenceError> {
    let dense = features.map(|x| *x as f32).to_dense();
    let shape = [dense.nrows() as i64, dense.ncols() as i64];
    let data = dense.into_raw_vec_and_offset().0.into_boxed_slice();

    Tensor::from_array((shape, data)).map_err(|e| InferenceError::Onnx(e.to_string()))
}

impl TextClassifier for OnnxClassifier {
    fn predict(&self, features: &CsMat<f64>) -> Result<RawPrediction, InferenceError> {
        check_width(features, self.num_features)?;
        let input = prepare_input_for_inference(features)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| InferenceError::Onnx(e.to_string()))?;

        // First output: class labels (e.g., [1])
        let (_, labels) = outputs[0]
            .try_extract_tensor::<i64>()
            .map_err(|e| InferenceError::Onnx(e.to_string()))?;
        let label = labels
            .first()
            .copied()
            .ok_or_else(|| InferenceError::UnexpectedOutput("empty label tensor".to_string()))?;

        // Second output: class probabilities (e.g., [[0.2, 0.8]])
        let (shape, probs) = outputs[1]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Onnx(e.to_string()))?;
        let dims: &[i64] = shape;
        if dims.last() != Some(&2) || probs.len() < 2 {
            return Err(InferenceError::UnexpectedOutput(format!(
                "probability tensor has shape {dims:?}, expected [1, 2]"
            )));
        }

        debug!(label, p_human = probs[0], p_ai = probs[1], "ONNX inference complete");
        Ok(RawPrediction {
            label,
            probabilities: [probs[0], probs[1]],
        })
    }

    fn num_features(&self) -> usize {
        self.num_features
    }

    fn describe(&self) -> &str {
        "ONNX classifier + TF-IDF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_width_reads_fixed_column_count() {
        assert_eq!(feature_width(&[1, 9]), Some(9));
        assert_eq!(feature_width(&[-1, 50_000]), Some(50_000));
    }

    #[test]
    fn test_feature_width_rejects_dynamic_or_misshapen_inputs() {
        assert_eq!(feature_width(&[-1, -1]), None);
        assert_eq!(feature_width(&[9]), None);
        assert_eq!(feature_width(&[1, 1, 9]), None);
        assert_eq!(feature_width(&[]), None);
    }

    #[test]
    fn test_label_output_must_be_int64_per_row() {
        assert!(is_label_output(TensorElementType::Int64, &[-1]));
        assert!(is_label_output(TensorElementType::Int64, &[1, 1]));
        assert!(!is_label_output(TensorElementType::Float32, &[-1]));
        assert!(!is_label_output(TensorElementType::Int64, &[-1, 2]));
    }

    #[test]
    fn test_probability_output_must_be_float_pairs() {
        assert!(is_probability_output(TensorElementType::Float32, &[-1, 2]));
        assert!(is_probability_output(TensorElementType::Float32, &[1, -1]));
        assert!(!is_probability_output(TensorElementType::Float32, &[-1, 3]));
        assert!(!is_probability_output(TensorElementType::Float64, &[-1, 2]));
        assert!(!is_probability_output(TensorElementType::Float32, &[2]));
    }
}
