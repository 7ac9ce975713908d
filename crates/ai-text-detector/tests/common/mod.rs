#![allow(dead_code)]

use std::path::Path;

use ai_text_detector::{model::LogisticRegression, DetectorConfig};
use detector_preprocessing::pre_processor::{TfidfVectorizer, VectorizerParams};

/// Vocabulary entries with their IDF weight and the logistic-regression
/// coefficient for that column. Positive coefficients push towards AI.
const VOCABULARY: &[(&str, f64, f64)] = &[
    (" delve", 3.1, 4.0),
    (" tapestry", 3.4, 3.5),
    (" furthermore", 2.6, 2.5),
    (" crucial", 2.2, 2.0),
    (" powerhouse", 2.8, 0.5),
    (" cell", 1.9, -0.5),
    (" lol", 3.0, -4.0),
    (" gonna", 2.9, -3.0),
    (" the", 1.1, 0.0),
];

pub const AI_TEXT: &str =
    "Furthermore, it is crucial to delve into the rich tapestry of ideas.";
pub const HUMAN_TEXT: &str = "ok lol i'm gonna be late again, the bus never shows up";

pub fn vectorizer() -> TfidfVectorizer {
    TfidfVectorizer::from_vocabulary(
        VectorizerParams::new(1..=4, true),
        VOCABULARY.iter().map(|(text, idf, _)| (*text, *idf)),
    )
    .expect("fixture vocabulary is valid")
}

pub fn classifier(vectorizer: &TfidfVectorizer) -> LogisticRegression {
    let vocab = vectorizer.vocabulary();
    let mut coef = vec![0.0; vectorizer.num_features()];
    for (text, _, weight) in VOCABULARY {
        coef[vocab[*text]] = *weight;
    }
    LogisticRegression::new(coef, -0.1)
}

/// Write a matching artifact pair into `dir` and return its config.
pub fn write_artifacts(dir: &Path) -> DetectorConfig {
    let config = DetectorConfig {
        model_path: dir.join("ai_detector_model.bin"),
        vectorizer_path: dir.join("tfidf_vectorizer.bin"),
    };
    let vectorizer = vectorizer();
    let classifier = classifier(&vectorizer);
    std::fs::write(&config.vectorizer_path, vectorizer.to_bytes().unwrap()).unwrap();
    std::fs::write(&config.model_path, classifier.to_bytes().unwrap()).unwrap();
    config
}
