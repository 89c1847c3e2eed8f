//! Punctuation tokenizer for reference words
//!
//! A word such as `origin/main:fea` is split at its last delimiter so that
//! only the trailing segment is matched against reference names while the
//! text before it is reproduced untouched.

/// Result of splitting a partial word at its last delimiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceToken<'a> {
    /// Verbatim text up to and including the last delimiter
    pub literal_prefix: &'a str,
    /// Text after the last delimiter, matched against reference names
    pub match_segment: &'a str,
}

/// Split `word` after the last occurrence of any character in `delimiters`
///
/// When no delimiter is present the whole word is the match segment.
pub fn tokenize<'a>(word: &'a str, delimiters: &[char]) -> ReferenceToken<'a> {
    match word.rfind(|c: char| delimiters.contains(&c)) {
        Some(idx) => {
            // rfind returns the byte offset of the delimiter itself
            let split = idx + word[idx..].chars().next().map_or(0, char::len_utf8);
            let (literal_prefix, match_segment) = word.split_at(split);
            ReferenceToken {
                literal_prefix,
                match_segment,
            }
        }
        None => ReferenceToken {
            literal_prefix: "",
            match_segment: word,
        },
    }
}
