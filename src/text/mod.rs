//! Text normalization applied to keywords and scanned text.
//!
//! The automaton matches literal characters, so phrases from the keyword
//! catalog and the texts being scanned must be brought into the same
//! canonical form before they meet. Normalizers are pluggable; the default
//! lowercases and re-tokenizes, and a lemmatizing normalizer can be
//! substituted through [`TextNormalizer`].

/// Converts raw text into the canonical form the automaton is built over.
#[cfg_attr(test, mockall::automock)]
pub trait TextNormalizer: Send + Sync {
    /// Returns the normalized form of `text`.
    fn normalize(&self, text: &str) -> String;
}

/// Lowercasing tokenizer.
///
/// Splits on whitespace, emits each punctuation character as its own token
/// and joins tokens with a single space, so `"Free   BITCOIN!!"` becomes
/// `"free bitcoin ! !"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleNormalizer;

impl SimpleNormalizer {
    /// Creates a new normalizer.
    pub fn new() -> Self {
        Self
    }
}

impl TextNormalizer for SimpleNormalizer {
    fn normalize(&self, text: &str) -> String {
        let mut tokens: Vec<String> = Vec::new();

        for word in text.split_whitespace() {
            let mut current = String::new();
            for c in word.chars() {
                if is_separate_token(c) {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                    tokens.push(c.to_string());
                } else {
                    current.extend(c.to_lowercase());
                }
            }
            if !current.is_empty() {
                tokens.push(current);
            }
        }

        tokens.join(" ")
    }
}

/// Punctuation that is split into its own token. Apostrophes and hyphens
/// stay inside words ("don't", "e-mail").
fn is_separate_token(c: char) -> bool {
    (c.is_ascii_punctuation() && c != '\'' && c != '-') || matches!(c, '“' | '”' | '…' | '¡' | '¿')
}
