//! Text vectorization using TF-IDF over token-level n-grams.

mod vectorizer;

pub use vectorizer::{
    ARTIFACT_DECODE_LIMIT, DEFAULT_MAX_NGRAM, DEFAULT_MIN_NGRAM, NgramKey, TfidfVectorizer,
    VectorizerError, VectorizerParams,
};
