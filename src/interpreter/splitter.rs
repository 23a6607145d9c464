//! Source text to raw statements.
//!
//! The splitter knows nothing about keywords. It removes comments, cuts the
//! program at statement terminators and normalizes whitespace:
//!
//! - `"` starts a comment that runs to the end of the line.
//! - a line whose first non-blank character is `*` is a comment line.
//! - `.` ends a statement.
//!
//! Quoted literals (`'...'` and `` `...` ``) are opaque to all three rules,
//! and a `.` between two digits is a decimal point. Literals never span
//! lines, so an unterminated quote only affects the rest of its own line.

use tracing::trace;

use crate::interpreter::parser::utils::is_quote;

/// Splits a program into raw statement strings.
///
/// Each returned statement is trimmed, has every whitespace run outside
/// literals collapsed to one space, and is never empty.
///
/// # Example
/// ```
/// use abapi::interpreter::splitter::split;
///
/// let source = "* header\nDATA lv_x TYPE i VALUE '1. 2'. \" note\nWRITE   lv_x.";
/// assert_eq!(split(source), vec!["DATA lv_x TYPE i VALUE '1. 2'", "WRITE lv_x"]);
/// ```
#[must_use]
pub fn split(source: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in source.lines() {
        if line.trim_start().starts_with('*') {
            continue;
        }
        split_line(line, &mut current, &mut statements);
        current.push(' ');
    }
    push_statement(&mut current, &mut statements);

    trace!(count = statements.len(), "split source into statements");
    statements
}

/// Feeds one source line into the statement being accumulated.
fn split_line(line: &str, current: &mut String, statements: &mut Vec<String>) {
    let mut quote = None;
    let mut previous = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            },
            None if is_quote(c) => {
                quote = Some(c);
                current.push(c);
            },
            None if c == '"' => break,
            None if c == '.' => {
                let decimal_point = previous.is_some_and(|p: char| p.is_ascii_digit())
                                    && chars.peek().is_some_and(char::is_ascii_digit);
                if decimal_point {
                    current.push(c);
                } else {
                    push_statement(current, statements);
                }
            },
            None => current.push(c),
        }
        previous = Some(c);
    }
}

/// Normalizes the accumulated text and records it if it is not blank.
fn push_statement(current: &mut String, statements: &mut Vec<String>) {
    let statement = collapse_whitespace(current);
    current.clear();
    if !statement.is_empty() {
        statements.push(statement);
    }
}

/// Trims and collapses whitespace runs outside quoted literals.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote = None;
    let mut pending_space = false;

    for c in text.trim().chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                out.push(c);
            },
            None if c.is_whitespace() => pending_space = true,
            None => {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                if is_quote(c) {
                    quote = Some(c);
                }
                out.push(c);
            },
        }
    }
    out
}
