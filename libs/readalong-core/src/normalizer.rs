//! Text normalization into comparison tokens.

use crate::types::Token;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Split text into tokens in reading order.
///
/// Splits on Unicode whitespace and trims leading/trailing punctuation from each
/// piece. Internal punctuation is kept, so `"well-known"` stays a single token.
/// Pieces with nothing left after trimming are dropped.
pub fn normalize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(trim_punctuation)
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(index, word)| token(index, word))
        .collect()
}

/// Build one token per pre-split word, so token indices equal slice indices.
///
/// Words are trimmed of surrounding whitespace and punctuation but never split
/// or dropped. A word made only of punctuation becomes an empty token, which
/// matches only another empty token.
pub fn tokens_from_words<S: AsRef<str>>(words: &[S]) -> Vec<Token> {
    words
        .iter()
        .enumerate()
        .map(|(index, word)| token(index, trim_punctuation(word.as_ref().trim())))
        .collect()
}

fn token(index: usize, word: &str) -> Token {
    Token {
        index,
        raw_text: word.to_string(),
        normalized_text: case_fold(word),
        folded_text: fold_diacritics(word),
    }
}

/// Lowercase and recompose (NFC), keeping every diacritic.
pub fn case_fold(word: &str) -> String {
    word.to_lowercase().nfc().collect()
}

/// Lowercase, decompose and drop combining marks.
///
/// `đ` has no decomposition and is mapped to `d` explicitly.
pub fn fold_diacritics(word: &str) -> String {
    word.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect()
}

fn trim_punctuation(piece: &str) -> &str {
    piece.trim_matches(|c: char| !(c.is_alphanumeric() || is_combining_mark(c)))
}
