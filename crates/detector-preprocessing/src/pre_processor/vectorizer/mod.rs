mod count_vectorizer;
mod error;
mod ngrams;
mod params;
mod tfidf_vectorizer;
mod tokenizer;

pub use error::VectorizerError;
pub use ngrams::NgramKey;
pub use params::{DEFAULT_MAX_NGRAM, DEFAULT_MIN_NGRAM, VectorizerParams};
pub use tfidf_vectorizer::{ARTIFACT_DECODE_LIMIT, TfidfVectorizer};
