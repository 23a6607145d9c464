/// Returns `true` for characters allowed after the first one in an identifier.
#[must_use]
pub const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Returns `true` if `text` is a complete identifier, `[A-Za-z_][A-Za-z0-9_-]*`.
///
/// # Example
/// ```
/// use abapi::interpreter::parser::utils::is_identifier;
///
/// assert!(is_identifier("lv_num"));
/// assert!(is_identifier("gv-total"));
/// assert!(!is_identifier("1abc"));
/// assert!(!is_identifier("a b"));
/// ```
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(is_identifier_char),
        _ => false,
    }
}

/// Returns `true` for the two characters that open and close literals.
#[must_use]
pub const fn is_quote(c: char) -> bool {
    c == '\'' || c == '`'
}

/// Splits off the leading keyword of a statement.
///
/// The keyword is the leading run of identifier characters, returned in upper
/// case so callers can match it directly. The remainder is returned as is.
///
/// # Example
/// ```
/// use abapi::interpreter::parser::utils::split_keyword;
///
/// assert_eq!(split_keyword("write: / 'x'"), ("WRITE".to_string(), ": / 'x'"));
/// ```
#[must_use]
pub fn split_keyword(text: &str) -> (String, &str) {
    let end = text.find(|c: char| !is_identifier_char(c))
                  .unwrap_or(text.len());
    (text[..end].to_ascii_uppercase(), &text[end..])
}

/// Returns `true` when `text` has the form `name = ...`.
///
/// # Example
/// ```
/// use abapi::interpreter::parser::utils::is_assignment;
///
/// assert!(is_assignment("do = 2"));
/// assert!(!is_assignment("IF lv_x = 2"));
/// ```
#[must_use]
pub fn is_assignment(text: &str) -> bool {
    text.split_once('=').is_some_and(|(target, _)| is_identifier(target.trim()))
}

/// Strips the optional chain colon that may follow `DATA` or `WRITE`.
#[must_use]
pub fn strip_chain_colon(rest: &str) -> &str {
    let rest = rest.trim_start();
    rest.strip_prefix(':').unwrap_or(rest).trim()
}

/// Splits `text` on `separator`, ignoring separators inside quoted literals.
///
/// # Example
/// ```
/// use abapi::interpreter::parser::utils::split_unquoted;
///
/// assert_eq!(split_unquoted("/ 'a, b', c", ','), vec!["/ 'a, b'", " c"]);
/// ```
#[must_use]
pub fn split_unquoted(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {},
            None if is_quote(c) => quote = Some(c),
            None if c == separator => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            },
            None => {},
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Finds the byte offsets of `keyword` as a whole word outside quoted
/// literals. Matching is case-insensitive; `keyword` must be ASCII.
#[must_use]
pub fn keyword_positions(text: &str, keyword: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut quote = None;
    let mut previous: Option<char> = None;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {},
            None if is_quote(c) => quote = Some(c),
            None => {
                let starts_word = previous.is_none_or(|p| !is_identifier_char(p));
                if starts_word
                   && text.get(i..i + keyword.len())
                          .is_some_and(|candidate| candidate.eq_ignore_ascii_case(keyword))
                   && text[i + keyword.len()..].chars()
                                               .next()
                                               .is_none_or(|n| !is_identifier_char(n))
                {
                    positions.push(i);
                }
            },
        }
        previous = Some(c);
    }
    positions
}

/// Which occurrence of a keyword [`split_at_keyword`] should split on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// The leftmost match.
    First,
    /// The rightmost match.
    Last,
}

/// Splits `text` around a whole-word keyword outside quotes.
///
/// Both halves are trimmed. Returns `None` when the keyword does not occur.
///
/// # Example
/// ```
/// use abapi::interpreter::parser::utils::{Occurrence, split_at_keyword};
///
/// assert_eq!(split_at_keyword("'TO' TO lt_words", "TO", Occurrence::Last),
///            Some(("'TO'", "lt_words")));
/// assert_eq!(split_at_keyword("total", "TO", Occurrence::First), None);
/// ```
#[must_use]
pub fn split_at_keyword<'a>(text: &'a str,
                            keyword: &str,
                            occurrence: Occurrence)
                            -> Option<(&'a str, &'a str)> {
    let positions = keyword_positions(text, keyword);
    let at = match occurrence {
        Occurrence::First => positions.first(),
        Occurrence::Last => positions.last(),
    }?;
    Some((text[..*at].trim(), text[*at + keyword.len()..].trim()))
}

/// Returns the text before a trailing whole-word keyword, if it ends with one.
///
/// # Example
/// ```
/// use abapi::interpreter::parser::utils::strip_trailing_keyword;
///
/// assert_eq!(strip_trailing_keyword("lv_n TIMES", "TIMES"), Some("lv_n"));
/// assert_eq!(strip_trailing_keyword("lv_n", "TIMES"), None);
/// ```
#[must_use]
pub fn strip_trailing_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let text = text.trim_end();
    let last = *keyword_positions(text, keyword).last()?;
    (last + keyword.len() == text.len()).then(|| text[..last].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_inside_quotes_are_ignored() {
        assert_eq!(keyword_positions("'VALUE' VALUE x", "VALUE"), vec![8]);
        assert_eq!(keyword_positions("`to` to", "TO"), vec![5]);
    }

    #[test]
    fn keywords_must_be_whole_words() {
        assert!(keyword_positions("lv-to total _to", "TO").is_empty());
        assert_eq!(keyword_positions("x TO y to z", "TO"), vec![2, 7]);
    }

    #[test]
    fn separators_inside_quotes_are_kept() {
        assert_eq!(split_unquoted("a TYPE i, b TYPE string VALUE 'x,y'", ','),
                   vec!["a TYPE i", " b TYPE string VALUE 'x,y'"]);
        assert_eq!(split_unquoted("", ','), vec![""]);
    }

    #[test]
    fn keyword_split_uses_uppercase() {
        assert_eq!(split_keyword("Data lv TYPE i"), ("DATA".to_string(), " lv TYPE i"));
        assert_eq!(split_keyword("lv_x = 1"), ("LV_X".to_string(), " = 1"));
        assert_eq!(strip_chain_colon(" : a"), "a");
    }

    #[test]
    fn trailing_keyword_must_end_the_text() {
        assert_eq!(strip_trailing_keyword("3 TIMES", "times"), Some("3"));
        assert_eq!(strip_trailing_keyword("TIMES 3", "TIMES"), None);
        assert_eq!(strip_trailing_keyword("TIMES", "TIMES"), Some(""));
    }
}
