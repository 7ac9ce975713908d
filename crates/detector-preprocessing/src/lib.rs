//! Pre-processing for ai-text-detector.
//!
//! Holds the fitted TF-IDF transform that turns raw text into the feature
//! vector the classifier was trained on. Vocabulary and IDF weights come from
//! a serialized artifact; nothing here re-fits at inference time.

pub mod pre_processor;
