//! Logos-based tokenizer for video filenames.
//!
//! Filenames are split on runs of space, underscore, dot or hyphen. The
//! lexer itself is case-sensitive; callers lowercase the input first so the
//! vocabulary lookups only ever see lowercase ASCII.

use logos::Logos;

/// Token types emitted by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ _.\-]+")]
pub enum Token<'src> {
    /// Any run of characters between separators.
    #[regex(r"[^ _.\-]+")]
    Word(&'src str),
}

impl<'src> Token<'src> {
    pub fn as_str(&self) -> &'src str {
        match self {
            Token::Word(text) => text,
        }
    }
}

/// Tokenize a filename into its words, in order.
pub fn tokenize(input: &str) -> Vec<&str> {
    Token::lexer(input)
        .filter_map(|result| result.ok().map(|token| token.as_str()))
        .collect()
}

/// The last path component of a URL or filesystem path.
///
/// Both `/` and `\` are treated as separators and trailing separators are
/// ignored, so `"/media/VR/"` yields `"VR"`.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
