use ahash::HashMap;
use sprs::CsMat;
use tracing::debug;

use super::{
    count_vectorizer::CountVectorizer, error::VectorizerError, params::VectorizerParams,
    tokenizer,
};

/// Upper bound on the memory a decoded artifact may claim. Without it bincode
/// sizes its allocations from untrusted length prefixes.
pub const ARTIFACT_DECODE_LIMIT: usize = 256 << 20;

/// A fitted TF-IDF transform: n-gram counts weighted by IDF, then L2-normalised.
#[derive(bincode::Encode, bincode::Decode, Clone, Debug)]
pub struct TfidfVectorizer {
    count_vectorizer: CountVectorizer,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Build a vectorizer from `(ngram text, idf weight)` pairs.
    ///
    /// Each entry is tokenized with the same encoder `transform` uses, so an
    /// entry like `" powerhouse"` matches wherever that word appears
    /// mid-sentence.
    pub fn from_vocabulary<I, S>(
        params: VectorizerParams,
        entries: I,
    ) -> Result<Self, VectorizerError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let (keys, weights): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .map(|(text, weight)| {
                let text = text.as_ref();
                ((text.to_string(), tokenizer::tokenize(text)), weight)
            })
            .unzip();

        let (count_vectorizer, columns) = CountVectorizer::from_keys(params, &keys)?;
        let mut idf = vec![0.0; count_vectorizer.num_features()];
        for (column, weight) in columns.into_iter().zip(weights) {
            idf[column] = weight;
        }

        let vectorizer = Self {
            count_vectorizer,
            idf,
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Decode a vectorizer artifact and check its internal consistency.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VectorizerError> {
        let (vectorizer, read): (Self, usize) =
            bincode::decode_from_slice(
                bytes,
                bincode::config::standard().with_limit::<ARTIFACT_DECODE_LIMIT>(),
            )?;
        if read != bytes.len() {
            return Err(VectorizerError::TrailingBytes {
                trailing: bytes.len() - read,
            });
        }
        vectorizer.validate()?;
        debug!(
            num_features = vectorizer.num_features(),
            "Decoded TfidfVectorizer"
        );
        Ok(vectorizer)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, VectorizerError> {
        Ok(bincode::encode_to_vec(self, bincode::config::standard())?)
    }

    fn validate(&self) -> Result<(), VectorizerError> {
        self.count_vectorizer.validate()?;
        let vocab = self.count_vectorizer.num_features();
        if self.idf.len() != vocab {
            return Err(VectorizerError::IdfLength {
                idf: self.idf.len(),
                vocab,
            });
        }
        if let Some((column, &weight)) = self
            .idf
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(VectorizerError::InvalidIdf { column, weight });
        }
        Ok(())
    }

    /// Transform one text into a `1 x num_features` TF-IDF row.
    pub fn transform(&self, text: &str) -> CsMat<f64> {
        let mut tf_matrix = self.count_vectorizer.transform(text);
        let sublinear = self.count_vectorizer.params().sublinear_tf();

        for mut row_vec in tf_matrix.outer_iterator_mut() {
            for (col_idx, val) in row_vec.iter_mut() {
                if sublinear {
                    *val = 1.0 + val.ln();
                }
                *val *= self.idf[col_idx];
            }
            // Normalize row vector (L2 norm)
            let norm = row_vec.iter().map(|(_, &v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, val) in row_vec.iter_mut() {
                    *val /= norm;
                }
            }
        }
        tf_matrix
    }

    pub fn num_features(&self) -> usize {
        self.count_vectorizer.num_features()
    }

    pub fn params(&self) -> &VectorizerParams {
        self.count_vectorizer.params()
    }

    pub fn vocabulary(&self) -> HashMap<String, usize> {
        self.count_vectorizer.vocabulary()
    }
}
