use ahash::{HashMap, HashMapExt};

/// A contiguous run of token ids; the vocabulary is keyed on these directly
/// so transform never converts tokens back to text.
pub type NgramKey = Vec<u32>;

pub fn count_ngrams(tokens: &[u32], ngram_sizes: &[usize]) -> HashMap<NgramKey, usize> {
    let mut ngram_counter = HashMap::new();

    for &n in ngram_sizes {
        for window in tokens.windows(n) {
            *ngram_counter.entry(window.to_vec()).or_insert(0) += 1;
        }
    }
    ngram_counter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_each_requested_size() {
        let counts = count_ngrams(&[1, 2, 1, 2], &[1, 2]);

        assert_eq!(counts[&vec![1]], 2);
        assert_eq!(counts[&vec![2]], 2);
        assert_eq!(counts[&vec![1, 2]], 2);
        assert_eq!(counts[&vec![2, 1]], 1);
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn test_sizes_longer_than_input_produce_nothing() {
        let counts = count_ngrams(&[7, 8], &[3]);
        assert!(counts.is_empty());
    }
}
