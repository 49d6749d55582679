use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::AnalyzerConfig;
use crate::error::CanonicalError;
use crate::token::tokenize;

/// Normalizes text according to `cfg`: NFKC first (it can change character
/// boundaries), then lowercasing.
///
/// Borrows the input when neither transform is enabled.
pub fn normalize<'a>(text: &'a str, cfg: &AnalyzerConfig) -> Cow<'a, str> {
    let normalized: Cow<'a, str> = if cfg.normalize_unicode {
        Cow::Owned(text.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };

    if cfg.lowercase {
        // Lowercasing can expand a single character (e.g. 'İ' -> "i̇").
        Cow::Owned(normalized.to_lowercase())
    } else {
        normalized
    }
}

/// Main entry point. Turns a free-text ingredient list into the ordered list
/// of terms used for vectorization. Repeated terms are kept so callers can
/// count term frequency.
///
/// Empty or all-filtered input yields an empty list, not an error.
pub fn analyze(text: &str, cfg: &AnalyzerConfig) -> Result<Vec<String>, CanonicalError> {
    cfg.validate()?;
    Ok(analyze_unchecked(text, cfg))
}

/// [`analyze`] without re-validating the config. For hot loops that already
/// validated `cfg` once per call.
pub fn analyze_unchecked(text: &str, cfg: &AnalyzerConfig) -> Vec<String> {
    let normalized = normalize(text, cfg);
    tokenize(normalized.as_ref())
        .into_iter()
        .filter(|token| token.char_len() >= cfg.min_token_chars)
        .filter(|token| !cfg.is_stop_word(&token.text))
        .map(|token| token.text)
        .collect()
}
