//! # ai-text-detector
//!
//! Classify whether a piece of text was written by AI or a human, using a
//! pre-trained classifier over TF-IDF features.
//!
//! The two model artifacts are loaded once into a [`Detector`], which is then
//! shared by every request. The web page and the terminal front-end both turn
//! a [`Detector`] result into a [`View`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_text_detector::{Analysis, Detector, DetectorConfig};
//!
//! let detector = Detector::load(&DetectorConfig::default())?;
//!
//! match detector.analyze("Some text to analyze")? {
//!     Analysis::Predicted(prediction) => println!(
//!         "{} ({:.1}% confident)",
//!         prediction.classification(),
//!         prediction.confidence() * 100.0
//!     ),
//!     Analysis::EmptyInput => println!("nothing to analyze"),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Sharing across requests
//!
//! ```rust,no_run
//! use ai_text_detector::{ArtifactCache, DetectorConfig};
//!
//! let cache = ArtifactCache::new(DetectorConfig::default());
//! let first = cache.get_or_load()?;
//! let second = cache.get_or_load()?;
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod artifacts;
pub mod cli;
pub mod error;
pub mod model;
mod pipeline;
pub mod presentation;
pub mod server;

pub use artifacts::{ArtifactCache, DetectorConfig};
pub use error::{InferenceError, LoadError};
pub use pipeline::{Analysis, Classification, Detector, Prediction};
pub use presentation::{Session, SessionState, View};
