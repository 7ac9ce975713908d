use ahash::{HashMap, HashMapExt};
use sprs::CsMat;
use tracing::debug;

use super::{
    error::VectorizerError,
    ngrams::{self, NgramKey},
    params::VectorizerParams,
    tokenizer::{self, reverse_tokenize},
};

#[derive(bincode::Encode, bincode::Decode, Clone, Debug)]
pub struct CountVectorizer {
    params: VectorizerParams,
    /// Vocabulary mapping n-gram token ids to feature index
    vocab: HashMap<NgramKey, usize>,
}

impl CountVectorizer {
    /// Assemble a vectorizer from already-tokenized vocabulary entries.
    ///
    /// Columns are assigned in sorted key order so the same vocabulary always
    /// produces the same feature layout. Returns the column chosen for each
    /// entry, in input order.
    pub fn from_keys(
        params: VectorizerParams,
        keys: &[(String, NgramKey)],
    ) -> Result<(Self, Vec<usize>), VectorizerError> {
        let sizes = params.ngram_sizes();
        for (text, key) in keys {
            if !sizes.contains(&key.len()) {
                return Err(VectorizerError::NgramSize {
                    text: text.clone(),
                    len: key.len(),
                    sizes: sizes.to_vec(),
                });
            }
        }

        let mut sorted = keys.iter().map(|(_, key)| key.clone()).collect::<Vec<_>>();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(VectorizerError::DuplicateEntry(reverse_tokenize(&pair[0])));
        }

        let vocab = sorted
            .into_iter()
            .enumerate()
            .map(|(idx, key)| (key, idx))
            .collect::<HashMap<NgramKey, usize>>();
        let columns = keys.iter().map(|(_, key)| vocab[key]).collect();

        debug!(vocab_size = vocab.len(), "CountVectorizer assembled");
        Ok((Self { params, vocab }, columns))
    }

    /// Check that every column index is unique and below `num_features`.
    pub fn validate(&self) -> Result<(), VectorizerError> {
        self.params.validate()?;
        let num_features = self.num_features();
        let mut seen = vec![false; num_features];
        for &column in self.vocab.values() {
            let slot = seen
                .get_mut(column)
                .ok_or(VectorizerError::ColumnOutOfRange {
                    column,
                    num_features,
                })?;
            if *slot {
                return Err(VectorizerError::DuplicateColumn(column));
            }
            *slot = true;
        }
        Ok(())
    }

    /// Count in-vocabulary n-grams of `text` as a single-row CSR matrix.
    pub fn transform(&self, text: &str) -> CsMat<f64> {
        let tokens = tokenizer::tokenize(text);
        let ngrams = ngrams::count_ngrams(&tokens, self.params.ngram_sizes());

        let mut row_entries = ngrams
            .iter()
            .filter_map(|(ngram_key, &count)| {
                self.vocab
                    .get(ngram_key)
                    .map(|&col_idx| (col_idx, count as f64))
            })
            .collect::<Vec<_>>();
        row_entries.sort_by_key(|(col_idx, _)| *col_idx);

        let (indices, data): (Vec<usize>, Vec<f64>) = row_entries.into_iter().unzip();
        let indptr = vec![0, indices.len()];

        debug!(
            tokens = tokens.len(),
            non_zero_entries = data.len(),
            "Text transformation complete"
        );
        CsMat::new((1, self.num_features()), indptr, indices, data)
    }

    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    /// Get the vocabulary as a mapping of human-readable text to feature index.
    pub fn vocabulary(&self) -> HashMap<String, usize> {
        let mut decoded = HashMap::with_capacity(self.vocab.len());
        for (ngram_key, &idx) in &self.vocab {
            decoded.insert(reverse_tokenize(ngram_key), idx);
        }
        decoded
    }

    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }
}
