use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token in an expression.
///
/// Expressions are tokenized one at a time, so tokens are transient: they are
/// produced for a single parse and dropped afterwards.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.5` or `.5`.
    ///
    /// At most one dot is consumed, so `1.2.3` lexes as `1.2` followed by
    /// `.3`.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    #[regex(r"\.[0-9]+", parse_number)]
    Number(f64),
    /// Quoted literals, `'text'` or `` `text` ``. There are no escapes.
    #[regex(r"'[^']*'", unquote, allow_greedy = true)]
    #[regex(r"`[^`]*`", unquote, allow_greedy = true)]
    String(String),
    /// Identifier tokens; variable names such as `lv_total` or `gv-count`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_-]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equals,
    /// `<>`
    #[token("<>")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,

    /// A quote that is never closed. Rejected by [`tokenize`].
    #[regex(r"'[^']*", allow_greedy = true)]
    #[regex(r"`[^`]*", allow_greedy = true)]
    UnterminatedString,
    /// Operators from other languages. Rejected by [`tokenize`].
    #[token("==")]
    #[token("<=")]
    #[token(">=")]
    #[token("!=")]
    #[token("!")]
    Unsupported,
}

impl Token {
    /// Returns the source spelling of the token, used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => crate::util::num::format_number(*n),
            Self::String(s) => format!("'{s}'"),
            Self::Identifier(name) => name.clone(),
            Self::Plus => "+".to_string(),
            Self::Minus => "-".to_string(),
            Self::Star => "*".to_string(),
            Self::Slash => "/".to_string(),
            Self::Equals => "=".to_string(),
            Self::NotEqual => "<>".to_string(),
            Self::Less => "<".to_string(),
            Self::Greater => ">".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
            Self::UnterminatedString | Self::Unsupported => "?".to_string(),
        }
    }
}

/// Converts an expression substring into a flat token sequence.
///
/// # Errors
/// - `LexError::UnterminatedString` for a quote without its closing partner.
/// - `LexError::UnsupportedOperator` for `==`, `<=`, `>=`, `!=` and `!`.
/// - `LexError::UnexpectedCharacter` for anything else the lexer does not
///   recognize.
///
/// # Example
/// ```
/// use abapi::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("lv_a + 2").unwrap();
/// assert_eq!(tokens,
///            vec![Token::Identifier("lv_a".into()), Token::Plus, Token::Number(2.0)]);
///
/// assert!(tokenize("a <= b").is_err());
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(text);

    while let Some(token) = lexer.next() {
        let column = column_of(text, lexer.span().start);
        match token {
            Ok(Token::UnterminatedString) => {
                return Err(LexError::UnterminatedString { column });
            },
            Ok(Token::Unsupported) => {
                return Err(LexError::UnsupportedOperator { operator: lexer.slice().to_string() });
            },
            Ok(tok) => tokens.push(tok),
            Err(()) => {
                let character = lexer.slice().chars().next().unwrap_or('?');
                return Err(LexError::UnexpectedCharacter { character, column });
            },
        }
    }

    Ok(tokens)
}

fn column_of(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count() + 1
}

fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn unquote(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}
