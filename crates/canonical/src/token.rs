use serde::{Deserialize, Serialize};

/// A word with its UTF-8 byte offsets in the analyzed text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the analyzed text.
    pub start: usize,
    /// Byte offset (exclusive) in the analyzed text.
    pub end: usize,
}

impl Token {
    /// Number of Unicode scalar values in the token.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Word characters: Unicode alphanumerics plus underscore.
#[inline]
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Splits text into words and records their byte offsets.
///
/// A word is a maximal run of word characters; whitespace, punctuation and
/// symbols all delimit. No length or stop-word filtering happens here, see
/// [`analyze`](crate::analyze) for that.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if !is_word_char(ch) {
            if let Some(token_start) = start.take() {
                tokens.push(Token {
                    text: text[token_start..idx].to_string(),
                    start: token_start,
                    end: idx,
                });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(token_start) = start {
        tokens.push(Token {
            text: text[token_start..].to_string(),
            start: token_start,
            end: text.len(),
        });
    }

    tokens
}
