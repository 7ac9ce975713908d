use thiserror::Error;

/// Errors raised while decoding or assembling a fitted vectorizer.
#[derive(Debug, Error)]
pub enum VectorizerError {
    #[error("failed to decode vectorizer: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("failed to encode vectorizer: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("{trailing} trailing bytes after vectorizer payload")]
    TrailingBytes { trailing: usize },

    #[error("idf has {idf} weights but the vocabulary has {vocab} entries")]
    IdfLength { idf: usize, vocab: usize },

    #[error("vocabulary column {column} is out of range for {num_features} features")]
    ColumnOutOfRange { column: usize, num_features: usize },

    #[error("vocabulary column {0} is assigned more than once")]
    DuplicateColumn(usize),

    #[error("idf weight for column {column} is not a finite positive number: {weight}")]
    InvalidIdf { column: usize, weight: f64 },

    #[error("n-gram {text:?} has {len} tokens, expected one of {sizes:?}")]
    NgramSize {
        text: String,
        len: usize,
        sizes: Vec<usize>,
    },

    #[error("vocabulary entry {0:?} duplicates an existing n-gram")]
    DuplicateEntry(String),

    #[error("invalid vectorizer parameters: {0}")]
    Params(String),
}
