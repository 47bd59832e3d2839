//! Tokenizer abstraction.
//!
//! The benchmark treats the tokenizer as an injected collaborator with a
//! minimal interface: encode text to token IDs, decode IDs back to text, and
//! expose a well-known end-of-sequence ID. Tests substitute stubs through the
//! same trait.

use crate::error::{Error, Result};

/// Text encoding/decoding collaborator.
///
/// Implementations are read-only and shared by all concurrent generation
/// tasks, so they must be `Send + Sync`.
pub trait Tokenizer: Send + Sync {
    /// Encode text into token IDs.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decode token IDs back into text.
    fn decode(&self, token_ids: &[u32]) -> Result<String>;

    /// Get the EOS (End of Sequence) token ID.
    fn eos_token_id(&self) -> u32;

    /// Get the vocabulary size, including the EOS token.
    fn vocab_size(&self) -> usize;
}

/// Character set covered by [`CharTokenizer`].
const CHAR_VOCAB: &str = "abcdefghijklmnopqrstuvwxyz .,!?";

/// Character-level tokenizer for the built-in demo model.
///
/// One token per character from a fixed vocabulary, plus a dedicated EOS
/// token at the end of the ID space. The empty string encodes to an empty
/// sequence.
pub struct CharTokenizer {
    chars: Vec<char>,
    eos_token_id: u32,
}

impl CharTokenizer {
    /// Create the tokenizer over the built-in character vocabulary.
    pub fn new() -> Self {
        let chars: Vec<char> = CHAR_VOCAB.chars().collect();
        let eos_token_id = chars.len() as u32;
        Self {
            chars,
            eos_token_id,
        }
    }
}

impl Default for CharTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for CharTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        text.chars()
            .map(|ch| {
                let lower = ch.to_ascii_lowercase();
                self.chars
                    .iter()
                    .position(|&c| c == lower)
                    .map(|i| i as u32)
                    .ok_or_else(|| {
                        Error::Tokenization(format!("character {ch:?} not in vocabulary"))
                    })
            })
            .collect()
    }

    fn decode(&self, token_ids: &[u32]) -> Result<String> {
        let mut text = String::with_capacity(token_ids.len());
        for &id in token_ids {
            if id == self.eos_token_id {
                // EOS carries no text.
                continue;
            }
            let ch = self
                .chars
                .get(id as usize)
                .ok_or_else(|| Error::Tokenization(format!("token id {id} out of range")))?;
            text.push(*ch);
        }
        Ok(text)
    }

    fn eos_token_id(&self) -> u32 {
        self.eos_token_id
    }

    fn vocab_size(&self) -> usize {
        self.chars.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let tokenizer = CharTokenizer::new();
        let tokens = tokenizer.encode("hello world").unwrap();
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "hello world");
    }

    #[test]
    fn empty_string_encodes_to_empty_sequence() {
        let tokenizer = CharTokenizer::new();
        assert!(tokenizer.encode("").unwrap().is_empty());
        assert_eq!(tokenizer.decode(&[]).unwrap(), "");
    }

    #[test]
    fn rejects_unknown_character() {
        let tokenizer = CharTokenizer::new();
        assert!(matches!(
            tokenizer.encode("héllo"),
            Err(Error::Tokenization(_))
        ));
    }

    #[test]
    fn eos_decodes_to_nothing() {
        let tokenizer = CharTokenizer::new();
        let mut tokens = tokenizer.encode("ok").unwrap();
        tokens.push(tokenizer.eos_token_id());
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "ok");
    }

    #[test]
    fn eos_is_last_vocab_entry() {
        let tokenizer = CharTokenizer::new();
        assert_eq!(
            tokenizer.eos_token_id() as usize,
            tokenizer.vocab_size() - 1
        );
    }
}
