mod common;

use ai_text_detector::{
    Analysis, ArtifactCache, Classification, Detector, DetectorConfig, LoadError, Session,
    SessionState, View,
};

fn load() -> (tempfile::TempDir, Detector) {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_artifacts(dir.path());
    let detector = Detector::load(&config).expect("fixture artifacts load");
    (dir, detector)
}

#[test]
fn test_probability_pair_is_well_formed_for_varied_inputs() {
    let (_dir, detector) = load();
    let repeated = "the ".repeat(500);
    let inputs = [
        "The mitochondria is the powerhouse of the cell.",
        common::AI_TEXT,
        common::HUMAN_TEXT,
        "x",
        "完全に無関係な日本語の文章です。",
        "🤖🤖🤖",
        repeated.as_str(),
    ];

    for text in inputs {
        let prediction = detector.predict(text).expect("prediction succeeds");
        let [human, ai] = prediction.probabilities();

        assert!((0.0..=1.0).contains(&human), "{text:?}: human={human}");
        assert!((0.0..=1.0).contains(&ai), "{text:?}: ai={ai}");
        assert!(
            (f64::from(human) + f64::from(ai) - 1.0).abs() < 1e-6,
            "{text:?}: sum={}",
            human + ai
        );

        let expected = if ai > human {
            Classification::AI
        } else {
            Classification::Human
        };
        assert_eq!(prediction.classification(), expected, "{text:?}");
        assert_eq!(
            prediction.confidence(),
            prediction.probabilities()[prediction.classification().index()]
        );
    }
}

#[test]
fn test_fixture_separates_ai_and_human_text() {
    let (_dir, detector) = load();

    let ai = detector.predict(common::AI_TEXT).unwrap();
    assert_eq!(ai.classification(), Classification::AI);
    assert!(ai.confidence() > 0.5);

    let human = detector.predict(common::HUMAN_TEXT).unwrap();
    assert_eq!(human.classification(), Classification::Human);
    assert!(human.confidence() > 0.5);
}

#[test]
fn test_mitochondria_example_renders_a_result() {
    let (_dir, detector) = load();
    let mut session = Session::new();

    let view = session.submit(&detector, "The mitochondria is the powerhouse of the cell.");
    let View::Result {
        label,
        confidence,
        human,
        ai,
        ..
    } = view
    else {
        panic!("expected a result, got {view:?}");
    };
    assert!(label == "AI Generated" || label == "Human Written");
    for pct in [confidence, human, ai] {
        assert!(pct.ends_with('%'), "{pct}");
    }
    assert_eq!(session.state(), SessionState::ResultDisplayed);
}

#[test]
fn test_whitespace_input_shows_warning_only() {
    let (_dir, detector) = load();
    assert_eq!(detector.analyze("   ").unwrap(), Analysis::EmptyInput);

    let mut session = Session::new();
    let view = session.submit(&detector, "   ");
    assert!(matches!(view, View::Warning { .. }));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_missing_artifacts_fail_before_serving() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ArtifactCache::new(DetectorConfig {
        model_path: dir.path().join("ai_detector_model.onnx"),
        vectorizer_path: dir.path().join("tfidf_vectorizer.bin"),
    });

    assert!(matches!(
        cache.get_or_load(),
        Err(LoadError::Missing { .. })
    ));
    assert!(cache.get().is_none());
}

#[test]
fn test_corrupt_classifier_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_artifacts(dir.path());
    std::fs::write(&config.model_path, b"\xff not a model").unwrap();

    assert!(matches!(
        Detector::load(&config),
        Err(LoadError::Decode { .. })
    ));
}

#[test]
fn test_cache_reuses_loaded_artifacts_after_files_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_artifacts(dir.path());
    let cache = ArtifactCache::new(config.clone());

    let first = cache.get_or_load().unwrap();
    std::fs::remove_file(&config.model_path).unwrap();
    std::fs::remove_file(&config.vectorizer_path).unwrap();
    let second = cache.get_or_load().expect("served from cache");

    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
