use std::ops::RangeInclusive;

use super::error::VectorizerError;

/// Smallest n-gram size counted by default.
pub const DEFAULT_MIN_NGRAM: usize = 1;
/// Largest n-gram size counted by default.
pub const DEFAULT_MAX_NGRAM: usize = 3;

#[derive(bincode::Encode, bincode::Decode, Clone, Debug, PartialEq, Eq)]
pub struct VectorizerParams {
    /// Every n-gram size counted over the token stream, ascending.
    ngram_range: Vec<usize>,
    /// Apply sublinear tf scaling: replace term frequency `tf` with `1 + ln(tf)`.
    /// This reduces the impact of terms that occur many times in a document.
    sublinear_tf: bool,
}

impl VectorizerParams {
    pub fn new(ngram_range: impl Into<RangeInclusive<usize>>, sublinear_tf: bool) -> Self {
        let n_sizes = ngram_range.into().collect::<Vec<_>>();
        assert!(
            !n_sizes.is_empty(),
            "ngram_range must contain at least one value"
        );
        assert!(n_sizes[0] > 0, "ngram sizes must be positive");
        Self {
            ngram_range: n_sizes,
            sublinear_tf,
        }
    }

    /// Checks parameters that arrived through deserialization rather than [`Self::new`].
    pub(crate) fn validate(&self) -> Result<(), VectorizerError> {
        if self.ngram_range.is_empty() {
            return Err(VectorizerError::Params(
                "ngram_range must contain at least one value".to_string(),
            ));
        }
        if self.ngram_range.contains(&0) {
            return Err(VectorizerError::Params(
                "ngram sizes must be positive".to_string(),
            ));
        }
        if self.ngram_range.windows(2).any(|w| w[0] >= w[1]) {
            return Err(VectorizerError::Params(format!(
                "ngram sizes must be strictly ascending, got {:?}",
                self.ngram_range
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn ngram_sizes(&self) -> &[usize] {
        &self.ngram_range
    }

    #[must_use]
    pub fn ngram_range(&self) -> (usize, usize) {
        // Both constructors guarantee at least one size.
        (
            self.ngram_range.first().copied().unwrap_or(DEFAULT_MIN_NGRAM),
            self.ngram_range.last().copied().unwrap_or(DEFAULT_MAX_NGRAM),
        )
    }

    #[must_use]
    pub fn sublinear_tf(&self) -> bool {
        self.sublinear_tf
    }
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_NGRAM..=DEFAULT_MAX_NGRAM, false)
    }
}
