//! Flat statements to a nested statement tree.
//!
//! Block keywords are matched with an explicit stack of open frames. The
//! executor walks the finished tree recursively, so blocks may nest at most
//! [`MAX_BLOCK_DEPTH`] deep. Every other statement is classified once by
//! [`parse_statement`] and becomes a leaf of the innermost open block.

use tracing::{debug, trace};

use crate::{
    ast::{Clause, Leaf, LoopKeyword, Node},
    error::StructureError,
    interpreter::parser::{
        statement::parse_statement,
        utils::{is_assignment, is_identifier, split_keyword, strip_trailing_keyword},
    },
};

/// Result type used by the structurer.
pub type StructureResult<T> = Result<T, StructureError>;

/// Deepest block nesting a program may use.
pub const MAX_BLOCK_DEPTH: usize = 128;

/// A block that has been opened but not yet closed.
enum Frame {
    Root(Vec<Node>),
    Conditional {
        opening:   String,
        clauses:   Vec<Clause>,
        else_body: Option<Vec<Node>>,
    },
    CountedLoop {
        opening: String,
        keyword: LoopKeyword,
        count:   String,
        body:    Vec<Node>,
    },
    TableLoop {
        opening:   String,
        table:     String,
        work_area: String,
        body:      Vec<Node>,
    },
}

impl Frame {
    /// The body new statements are appended to.
    fn body_mut(&mut self) -> &mut Vec<Node> {
        match self {
            Self::Root(body) | Self::CountedLoop { body, .. } | Self::TableLoop { body, .. } => body,
            Self::Conditional { clauses,
                                else_body,
                                .. } => match else_body {
                Some(body) => body,
                None => {
                    // The opening IF always pushes the first clause.
                    let last = clauses.len() - 1;
                    &mut clauses[last].body
                },
            },
        }
    }

    /// The keyword that closes this frame, `None` for the root.
    const fn terminator(&self) -> Option<&'static str> {
        match self {
            Self::Root(_) => None,
            Self::Conditional { .. } => Some("ENDIF"),
            Self::CountedLoop { keyword, .. } => Some(keyword.terminator()),
            Self::TableLoop { .. } => Some("ENDLOOP"),
        }
    }

    fn opening(&self) -> &str {
        match self {
            Self::Root(_) => "",
            Self::Conditional { opening, .. }
            | Self::CountedLoop { opening, .. }
            | Self::TableLoop { opening, .. } => opening,
        }
    }

    /// Converts a closed frame into its tree node.
    fn into_node(self) -> Option<Node> {
        match self {
            Self::Root(_) => None,
            Self::Conditional { clauses,
                                else_body,
                                .. } => Some(Node::Conditional { clauses, else_body }),
            Self::CountedLoop { keyword,
                                count,
                                body,
                                .. } => Some(Node::CountedLoop { keyword, count, body }),
            Self::TableLoop { table,
                              work_area,
                              body,
                              .. } => Some(Node::TableLoop { table, work_area, body }),
        }
    }
}

/// Builds the statement tree of a program from its raw statements.
///
/// Recognized block keywords (case-insensitive):
/// - `IF <cond> [THEN]`, `ELSEIF <cond>`, `ELSE`, `ENDIF`
/// - `DO <n> TIMES`, `ENDDO`
/// - `LOOP AT <table> INTO <work area>`, `LOOP <n> TIMES`, `ENDLOOP`
///
/// An assignment such as `do = 2` is a leaf even when its target spells a
/// block keyword. Everything else becomes a [`Node::Leaf`] of the innermost
/// open block.
///
/// # Errors
/// Returns the first [`StructureError`] found: terminators that close nothing
/// or the wrong block, clauses outside an `IF`, loops without a bound,
/// blocks nested past [`MAX_BLOCK_DEPTH`], unreadable declarations, and
/// blocks still open at the end.
///
/// # Example
/// ```
/// use abapi::{ast::Node, interpreter::structurer::structure};
///
/// let statements = ["DO 2 TIMES", "WRITE 'x'", "ENDDO"].map(String::from);
/// let tree = structure(&statements).unwrap();
/// assert!(matches!(&tree[..], [Node::CountedLoop { body, .. }] if body.len() == 1));
///
/// let statements = ["IF 1 = 1", "WRITE 'x'", "ENDDO"].map(String::from);
/// assert!(structure(&statements).is_err());
/// ```
pub fn structure(statements: &[String]) -> StructureResult<Vec<Node>> {
    let mut stack = vec![Frame::Root(Vec::new())];

    for text in statements {
        let (keyword, rest) = split_keyword(text);
        let rest = rest.trim();
        let keyword = if is_assignment(text) { "" } else { keyword.as_str() };
        match keyword {
            "IF" => {
                let condition = condition(text, "IF", rest)?;
                open(&mut stack,
                     Frame::Conditional { opening:   text.clone(),
                                          clauses:   vec![Clause { condition,
                                                                   body: Vec::new() }],
                                          else_body: None, })?;
            },
            "ELSEIF" => {
                let condition = condition(text, "ELSEIF", rest)?;
                match stack.last_mut() {
                    Some(Frame::Conditional { else_body: Some(_),
                                              opening,
                                              .. }) => {
                        return Err(StructureError::ClauseAfterElse { keyword: "ELSEIF",
                                                                     opening: opening.clone(), });
                    },
                    Some(Frame::Conditional { clauses, .. }) => {
                        clauses.push(Clause { condition,
                                              body: Vec::new() });
                    },
                    _ => {
                        return Err(StructureError::ClauseOutsideIf { keyword: "ELSEIF",
                                                                     text:    text.clone(), });
                    },
                }
            },
            "ELSE" => {
                if !rest.is_empty() {
                    return Err(malformed_block("ELSE", text, "unexpected text after ELSE"));
                }
                match stack.last_mut() {
                    Some(Frame::Conditional { else_body: Some(_),
                                              opening,
                                              .. }) => {
                        return Err(StructureError::ClauseAfterElse { keyword: "ELSE",
                                                                     opening: opening.clone(), });
                    },
                    Some(Frame::Conditional { else_body, .. }) => *else_body = Some(Vec::new()),
                    _ => {
                        return Err(StructureError::ClauseOutsideIf { keyword: "ELSE",
                                                                     text:    text.clone(), });
                    },
                }
            },
            "DO" => open(&mut stack, counted_loop(text, LoopKeyword::Do, rest)?)?,
            "LOOP" => open(&mut stack, loop_frame(text, rest)?)?,
            "ENDIF" => close(&mut stack, "ENDIF", "IF", text, rest)?,
            "ENDDO" => close(&mut stack, "ENDDO", "DO", text, rest)?,
            "ENDLOOP" => close(&mut stack, "ENDLOOP", "LOOP", text, rest)?,
            _ => {
                let statement = parse_statement(text)?;
                trace!(statement = %text, depth = stack.len(), "leaf");
                current(&mut stack).push(Node::Leaf(Leaf { text: text.clone(),
                                                           statement }));
            },
        }
    }

    match stack.pop() {
        Some(Frame::Root(nodes)) if stack.is_empty() => {
            debug!(nodes = nodes.len(), "built statement tree");
            Ok(nodes)
        },
        Some(frame) => Err(StructureError::MissingTerminator { expected: frame.terminator()
                                                                              .unwrap_or_default(),
                                                               opening:  frame.opening()
                                                                              .to_string(), }),
        None => Ok(Vec::new()),
    }
}

/// Pushes a newly opened block, refusing to nest past [`MAX_BLOCK_DEPTH`].
fn open(stack: &mut Vec<Frame>, frame: Frame) -> StructureResult<()> {
    // The root frame is not a block.
    if stack.len() > MAX_BLOCK_DEPTH {
        return Err(StructureError::NestingTooDeep { limit:   MAX_BLOCK_DEPTH,
                                                    opening: frame.opening().to_string(), });
    }
    stack.push(frame);
    Ok(())
}

/// The body of the innermost open frame.
fn current(stack: &mut Vec<Frame>) -> &mut Vec<Node> {
    if stack.is_empty() {
        stack.push(Frame::Root(Vec::new()));
    }
    let last = stack.len() - 1;
    stack[last].body_mut()
}

/// Reads the condition of `IF` or `ELSEIF`, without an optional trailing
/// `THEN`.
fn condition(text: &str, keyword: &'static str, rest: &str) -> StructureResult<String> {
    let condition = strip_trailing_keyword(rest, "THEN").unwrap_or(rest).trim();
    if condition.is_empty() {
        return Err(StructureError::MissingCondition { keyword,
                                                      text: text.to_string() });
    }
    Ok(condition.to_string())
}

/// Opens `DO <n> TIMES` or `LOOP <n> TIMES`.
fn counted_loop(text: &str, keyword: LoopKeyword, rest: &str) -> StructureResult<Frame> {
    if rest.is_empty() {
        return Err(StructureError::UnboundedLoop { keyword: keyword.opener(),
                                                   text:    text.to_string(), });
    }
    let count = strip_trailing_keyword(rest, "TIMES").ok_or_else(|| {
                                                         malformed_block(keyword.opener(),
                                                                         text,
                                                                         "expected <count> TIMES")
                                                     })?;
    if count.is_empty() {
        return Err(malformed_block(keyword.opener(), text, "TIMES requires a count"));
    }
    Ok(Frame::CountedLoop { opening: text.to_string(),
                            keyword,
                            count: count.to_string(),
                            body: Vec::new() })
}

/// Opens either form of `LOOP`.
fn loop_frame(text: &str, rest: &str) -> StructureResult<Frame> {
    let words: Vec<&str> = rest.split_whitespace().collect();
    match words.as_slice() {
        [at, table, into, work_area]
            if at.eq_ignore_ascii_case("AT") && into.eq_ignore_ascii_case("INTO") =>
        {
            if !is_identifier(table) || !is_identifier(work_area) {
                return Err(malformed_block("LOOP", text, "expected LOOP AT <table> INTO <work area>"));
            }
            Ok(Frame::TableLoop { opening:   text.to_string(),
                                  table:     (*table).to_string(),
                                  work_area: (*work_area).to_string(),
                                  body:      Vec::new(), })
        },
        [at, ..] if at.eq_ignore_ascii_case("AT") => {
            Err(malformed_block("LOOP", text, "expected LOOP AT <table> INTO <work area>"))
        },
        _ => counted_loop(text, LoopKeyword::Loop, rest),
    }
}

/// Closes the innermost frame with `keyword`, attaching the finished node to
/// its parent.
fn close(stack: &mut Vec<Frame>,
         keyword: &'static str,
         opener: &'static str,
         text: &str,
         rest: &str)
         -> StructureResult<()> {
    if !rest.is_empty() {
        return Err(malformed_block(keyword, text, &format!("unexpected text after {keyword}")));
    }
    let Some(frame) = stack.pop_if(|frame| !matches!(frame, Frame::Root(_))) else {
        return Err(StructureError::UnexpectedTerminator { keyword,
                                                          expected: opener,
                                                          text: text.to_string() });
    };
    match frame.terminator() {
        Some(expected) if expected != keyword => {
            Err(StructureError::MismatchedTerminator { found: keyword,
                                                       expected,
                                                       opening: frame.opening().to_string() })
        },
        _ => {
            if let Some(node) = frame.into_node() {
                current(stack).push(node);
            }
            Ok(())
        },
    }
}

fn malformed_block(keyword: &'static str, text: &str, reason: &str) -> StructureError {
    StructureError::MalformedBlock { keyword,
                                     text: text.to_string(),
                                     reason: reason.to_string() }
}
