use core::fmt;

use tracing::debug;

use crate::{
    artifacts::{self, DetectorConfig},
    error::{InferenceError, LoadError},
    model::{RawPrediction, TextClassifier, TextVectorizer},
};

/// Largest accepted deviation of `P(Human) + P(AI)` from 1.0 before
/// renormalisation. Loose enough for f32 model outputs.
const PROBABILITY_SUM_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Classification {
    Human,
    AI,
}

impl Classification {
    /// Position of this class in a probability pair.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Human => 0,
            Self::AI => 1,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "Human"),
            Self::AI => write!(f, "AI"),
        }
    }
}

impl From<Classification> for i64 {
    fn from(class: Classification) -> Self {
        match class {
            Classification::Human => 0,
            Classification::AI => 1,
        }
    }
}

impl TryFrom<i64> for Classification {
    type Error = InferenceError;

    fn try_from(label: i64) -> Result<Self, Self::Error> {
        match label {
            0 => Ok(Self::Human),
            1 => Ok(Self::AI),
            other => Err(InferenceError::InvalidLabel(other)),
        }
    }
}

/// A validated prediction: the predicted class plus P(Human) and P(AI).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Prediction {
    classification: Classification,
    human: f32,
    ai: f32,
}

impl Prediction {
    /// Check a raw classifier output against the label/probability contract.
    pub fn from_raw(raw: RawPrediction) -> Result<Self, InferenceError> {
        let classification = Classification::try_from(raw.label)?;
        let [human, ai] = raw.probabilities;

        for p in [human, ai] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(InferenceError::InvalidProbability(p));
            }
        }
        let sum = human + ai;
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(InferenceError::ProbabilitiesDoNotSumToOne(sum));
        }

        let argmax_disagrees = match classification {
            Classification::Human => ai > human,
            Classification::AI => human > ai,
        };
        if argmax_disagrees {
            return Err(InferenceError::LabelProbabilityMismatch {
                label: raw.label,
                probabilities: raw.probabilities,
            });
        }

        // Renormalise in f64 so the exposed pair sums to 1 within f32 rounding.
        let total = f64::from(human) + f64::from(ai);
        let ai = (f64::from(ai) / total) as f32;
        Ok(Self {
            classification,
            human: 1.0 - ai,
            ai,
        })
    }

    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub fn human_probability(&self) -> f32 {
        self.human
    }

    #[must_use]
    pub fn ai_probability(&self) -> f32 {
        self.ai
    }

    /// `[P(Human), P(AI)]`
    #[must_use]
    pub fn probabilities(&self) -> [f32; 2] {
        [self.human, self.ai]
    }

    /// Probability the classifier assigned to its own prediction.
    #[must_use]
    pub fn confidence(&self) -> f32 {
        self.probabilities()[self.classification.index()]
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (P(Human)={:.3}, P(AI)={:.3})",
            self.classification, self.human, self.ai
        )
    }
}

/// Outcome of analysing one user submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Analysis {
    /// Blank input; no model was consulted.
    EmptyInput,
    Predicted(Prediction),
}

/// Holds the loaded artifact pair. Built once and shared by reference across
/// requests; nothing mutates it after construction.
pub struct Detector {
    vectorizer: Box<dyn TextVectorizer>,
    classifier: Box<dyn TextClassifier>,
}

impl Detector {
    /// Pair a vectorizer with a classifier, rejecting mismatched widths.
    pub fn new(
        vectorizer: Box<dyn TextVectorizer>,
        classifier: Box<dyn TextClassifier>,
    ) -> Result<Self, LoadError> {
        if vectorizer.num_features() != classifier.num_features() {
            return Err(LoadError::DimensionMismatch {
                vectorizer: vectorizer.num_features(),
                classifier: classifier.num_features(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Deserialize both artifacts named by `config`.
    pub fn load(config: &DetectorConfig) -> Result<Self, LoadError> {
        let vectorizer = artifacts::load_vectorizer(&config.vectorizer_path)?;
        let classifier = artifacts::load_classifier(&config.model_path)?;
        Self::new(Box::new(vectorizer), classifier)
    }

    /// Predict for non-empty text. Callers wanting the blank-input check use
    /// [`Self::analyze`].
    pub fn predict(&self, text: &str) -> Result<Prediction, InferenceError> {
        let features = self.vectorizer.transform(text);
        let raw = self.classifier.predict(&features)?;
        debug!(
            label = raw.label,
            p_human = raw.probabilities[0],
            p_ai = raw.probabilities[1],
            "Raw prediction"
        );
        Prediction::from_raw(raw)
    }

    pub fn analyze(&self, text: &str) -> Result<Analysis, InferenceError> {
        if text.trim().is_empty() {
            return Ok(Analysis::EmptyInput);
        }
        self.predict(text).map(Analysis::Predicted)
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.vectorizer.num_features()
    }

    #[must_use]
    pub fn model_description(&self) -> &str {
        self.classifier.describe()
    }
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("num_features", &self.num_features())
            .field("model", &self.model_description())
            .finish()
    }
}
