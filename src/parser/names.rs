/// Return the identifier without surrounding double quotes.
pub fn unquote_identifier(ident: &str) -> &str {
    ident
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(ident)
}

/// Split text into uppercase words, treating parentheses as separators.
///
/// `PRIMARY KEY(ID)` yields `["PRIMARY", "KEY", "ID"]`.
pub fn keyword_tokens(text: &str) -> Vec<String> {
    text.split(|ch: char| ch.is_whitespace() || ch == '(' || ch == ')')
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

/// True when `phrase` appears in `text` as a contiguous run of whole words.
///
/// Matching ignores case and the amount of whitespace between words, so
/// `unique   index` matches `UNIQUE INDEX` but `UNIQUE_INDEX_ID` does not.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let words = keyword_tokens(text);
    let wanted = keyword_tokens(phrase);
    if wanted.is_empty() {
        return false;
    }
    words.windows(wanted.len()).any(|window| window == wanted.as_slice())
}
