//! What the user sees after each trigger: a warning, a result, or an error.
//!
//! Both front-ends (web page and terminal) render [`View`]; neither formats
//! predictions on its own.

use serde::Serialize;

use crate::{
    error::InferenceError,
    pipeline::{Analysis, Classification, Detector, Prediction},
};

pub const EMPTY_INPUT_WARNING: &str = "Please enter some text to analyze.";

/// Styling hint for the status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    Idle,
    Warning {
        message: String,
    },
    Result {
        label: String,
        style: Style,
        confidence: String,
        human: String,
        ai: String,
    },
    Error {
        message: String,
    },
}

/// Human-facing name of a class.
#[must_use]
pub fn label_for(class: Classification) -> &'static str {
    match class {
        Classification::AI => "AI Generated",
        Classification::Human => "Human Written",
    }
}

/// `0.873` -> `"87.3%"`
#[must_use]
pub fn format_percent(probability: f32) -> String {
    format!("{:.1}%", probability * 100.0)
}

impl View {
    #[must_use]
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let class = prediction.classification();
        Self::Result {
            label: label_for(class).to_string(),
            style: match class {
                Classification::AI => Style::Error,
                Classification::Human => Style::Success,
            },
            confidence: format_percent(prediction.confidence()),
            human: format_percent(prediction.human_probability()),
            ai: format_percent(prediction.ai_probability()),
        }
    }

    #[must_use]
    pub fn from_analysis(result: Result<Analysis, InferenceError>) -> Self {
        match result {
            Ok(Analysis::EmptyInput) => Self::Warning {
                message: EMPTY_INPUT_WARNING.to_string(),
            },
            Ok(Analysis::Predicted(prediction)) => Self::from_prediction(&prediction),
            Err(err) => Self::Error {
                message: format!("Analysis failed: {err}"),
            },
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Run one trigger action against `detector` and describe the outcome.
pub fn present(detector: &Detector, text: &str) -> View {
    let result = detector.analyze(text);
    if let Err(err) = &result {
        tracing::warn!(error = %err, "Inference failed");
    }
    View::from_analysis(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ResultDisplayed,
}

/// One user's interaction loop: Idle until a submission succeeds, then
/// ResultDisplayed until the next trigger.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    view: View,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            view: View::Idle,
        }
    }

    pub fn submit(&mut self, detector: &Detector, text: &str) -> &View {
        self.view = present(detector, text);
        self.state = match self.view {
            View::Result { .. } => SessionState::ResultDisplayed,
            _ => SessionState::Idle,
        };
        &self.view
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
