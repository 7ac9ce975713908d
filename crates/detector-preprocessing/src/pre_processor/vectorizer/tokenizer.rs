use tiktoken_rs::o200k_base_singleton;
use tracing::trace;

/// Encode text into `o200k_base` BPE token ids, ignoring special tokens.
pub fn tokenize(text: &str) -> Vec<u32> {
    let bpe = o200k_base_singleton();
    let tokens = bpe.encode_ordinary(text);
    trace!(chars = text.len(), tokens = tokens.len(), "Tokenized text");
    tokens
}

pub fn reverse_tokenize(tokens: &[u32]) -> String {
    let bpe = o200k_base_singleton();

    bpe.decode(tokens.to_vec()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_round_trips_plain_text() {
        let text = "The mitochondria is the powerhouse of the cell.";
        let tokens = tokenize(text);
        assert!(!tokens.is_empty());
        assert_eq!(reverse_tokenize(&tokens), text);
    }

    #[test]
    fn test_empty_text_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }
}
