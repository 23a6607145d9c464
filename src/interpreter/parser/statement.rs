use crate::{
    ast::{Declaration, Statement, TypeSpec, WriteItem},
    error::StructureError,
    interpreter::parser::utils::{
        Occurrence, is_identifier, split_at_keyword, split_keyword, split_unquoted,
        strip_chain_colon,
    },
};

/// Classifies a plain statement by its keyword.
///
/// Statements are recognized in this order:
/// - an assignment `name = expression`.
/// - `DATA`, `WRITE`, `ADD`, `SUBTRACT`, `CLEAR` and `APPEND`.
/// - anything else becomes [`Statement::Unsupported`].
///
/// A known keyword with operands of the wrong shape becomes
/// [`Statement::Malformed`] and is reported when it runs. `DATA` is the
/// exception: a declaration that cannot be read is a structural error, so the
/// program never starts.
///
/// # Errors
/// Returns `StructureError::MalformedDeclaration` for unreadable `DATA`
/// statements.
///
/// # Example
/// ```
/// use abapi::{ast::Statement, interpreter::parser::statement::parse_statement};
///
/// assert_eq!(parse_statement("ADD 3 TO lv_num").unwrap(),
///            Statement::Add { amount: "3".into(),
///                             target: "lv_num".into(), });
/// assert_eq!(parse_statement("SKIP").unwrap(), Statement::Unsupported);
/// ```
pub fn parse_statement(text: &str) -> Result<Statement, StructureError> {
    if let Some(statement) = parse_assignment(text) {
        return Ok(statement);
    }

    let (keyword, rest) = split_keyword(text);
    let statement = match keyword.as_str() {
        "DATA" => Statement::Data(parse_data(text, rest)?),
        "WRITE" => parse_write(rest),
        "ADD" => parse_arithmetic(rest, "TO").map_or(Statement::Malformed { keyword: "ADD" },
                                                     |(amount, target)| Statement::Add {
                                                         amount,
                                                         target,
                                                     }),
        "SUBTRACT" => parse_arithmetic(rest, "FROM")
            .map_or(Statement::Malformed { keyword: "SUBTRACT" },
                    |(amount, target)| Statement::Subtract { amount, target }),
        "CLEAR" => {
            let target = rest.trim();
            if is_identifier(target) {
                Statement::Clear(target.to_string())
            } else {
                Statement::Malformed { keyword: "CLEAR" }
            }
        },
        "APPEND" => parse_arithmetic(rest, "TO").map_or(Statement::Malformed { keyword: "APPEND" },
                                                        |(value, table)| Statement::Append {
                                                            value,
                                                            table,
                                                        }),
        _ => Statement::Unsupported,
    };

    Ok(statement)
}

/// Recognizes `name = expression`.
///
/// Returns `None` when the text does not start with an identifier followed by
/// `=`, so keyword statements fall through to the keyword table.
fn parse_assignment(text: &str) -> Option<Statement> {
    let (target, value) = text.split_once('=')?;
    let target = target.trim();
    if !is_identifier(target) {
        return None;
    }
    let value = value.trim();
    if value.is_empty() {
        return Some(Statement::Malformed { keyword: "assignment" });
    }
    Some(Statement::Assign { target: target.to_string(),
                             value:  value.to_string(), })
}

/// Splits `<expression> <KEYWORD> <target>` as used by `ADD ... TO`,
/// `SUBTRACT ... FROM` and `APPEND ... TO`.
///
/// The last occurrence of the keyword wins, so the expression itself may
/// contain it inside a literal or a longer identifier.
fn parse_arithmetic(rest: &str, keyword: &str) -> Option<(String, String)> {
    let (value, target) = split_at_keyword(rest, keyword, Occurrence::Last)?;
    if value.is_empty() || !is_identifier(target) {
        return None;
    }
    Some((value.to_string(), target.to_string()))
}

/// Parses the items of a `WRITE` statement.
///
/// Items are separated by commas; a leading `/` starts a new line and may
/// stand alone.
fn parse_write(rest: &str) -> Statement {
    let body = strip_chain_colon(rest);
    let mut items = Vec::new();

    for segment in split_unquoted(body, ',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (new_line, value) = match segment.strip_prefix('/') {
            Some(value) => (true, value.trim()),
            None => (false, segment),
        };
        items.push(WriteItem { new_line,
                               value: (!value.is_empty()).then(|| value.to_string()) });
    }

    if items.is_empty() {
        Statement::Malformed { keyword: "WRITE" }
    } else {
        Statement::Write(items)
    }
}

/// Parses the comma-separated declarations of a `DATA` statement.
fn parse_data(text: &str, rest: &str) -> Result<Vec<Declaration>, StructureError> {
    let body = strip_chain_colon(rest);
    let declarations = split_unquoted(body, ',').into_iter()
                                                .map(str::trim)
                                                .filter(|d| !d.is_empty())
                                                .map(parse_declaration)
                                                .collect::<Result<Vec<_>, _>>()?;

    if declarations.is_empty() {
        return Err(malformed(text, "DATA requires at least one declaration"));
    }
    Ok(declarations)
}

/// Parses one `name TYPE ...` declaration.
///
/// Accepted shapes:
/// ```text
///     name TYPE type [LENGTH n] [DECIMALS n] [VALUE expression]
///     name TYPE [STANDARD] TABLE OF type [VALUE table]
/// ```
fn parse_declaration(text: &str) -> Result<Declaration, StructureError> {
    let (name, rest) = split_word(text);
    let name = match name {
        "" => return Err(malformed(text, "missing variable name")),
        name if is_identifier(name) => name.to_string(),
        name => return Err(malformed(text, &format!("\"{name}\" is not a valid name"))),
    };

    let (type_keyword, type_clause) = split_word(rest);
    if !type_keyword.eq_ignore_ascii_case("TYPE") {
        return Err(malformed(text, "expected TYPE after the variable name"));
    }

    // VALUE is only a keyword after TYPE, so a variable may be called `value`.
    let (type_clause, value) = match split_at_keyword(type_clause, "VALUE", Occurrence::First) {
        Some((_, "")) => return Err(malformed(text, "VALUE requires an expression")),
        Some((head, value)) => (head, Some(value.to_string())),
        None => (type_clause, None),
    };

    let words: Vec<&str> = type_clause.split_whitespace().collect();
    let type_spec = match words.first() {
        Some(word) if word.eq_ignore_ascii_case("STANDARD") || word.eq_ignore_ascii_case("TABLE") => {
            parse_table_type(text, &words)?
        },
        Some(type_name) if is_identifier(type_name) => {
            parse_scalar_type(text, type_name, &words[1..])?
        },
        Some(type_name) => {
            return Err(malformed(text, &format!("\"{type_name}\" is not a type name")));
        },
        None => return Err(malformed(text, "missing type name after TYPE")),
    };

    Ok(Declaration { name,
                     type_spec,
                     value })
}

/// Splits off the first whitespace-separated word.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    text.split_once(char::is_whitespace).unwrap_or((text, ""))
}

fn parse_table_type(text: &str, words: &[&str]) -> Result<TypeSpec, StructureError> {
    let words = match words.first() {
        Some(word) if word.eq_ignore_ascii_case("STANDARD") => &words[1..],
        _ => words,
    };
    match words {
        [table, of, element]
            if table.eq_ignore_ascii_case("TABLE")
               && of.eq_ignore_ascii_case("OF")
               && is_identifier(element) =>
        {
            Ok(TypeSpec::Table { element: (*element).to_string() })
        },
        _ => Err(malformed(text, "expected TABLE OF <type>")),
    }
}

fn parse_scalar_type(text: &str, type_name: &str, words: &[&str]) -> Result<TypeSpec, StructureError> {
    let mut length = None;
    let mut decimals = None;
    let mut remaining = words.iter();

    while let Some(word) = remaining.next() {
        let slot = if word.eq_ignore_ascii_case("LENGTH") {
            &mut length
        } else if word.eq_ignore_ascii_case("DECIMALS") {
            &mut decimals
        } else {
            let unknown = std::iter::once(*word).chain(remaining.copied())
                                                .collect::<Vec<_>>()
                                                .join(" ");
            return Err(malformed(text, &format!("unrecognized parameters \"{unknown}\"")));
        };

        let keyword = word.to_ascii_uppercase();
        if slot.is_some() {
            return Err(malformed(text, &format!("{keyword} given twice")));
        }
        let amount = remaining.next()
                              .filter(|n| n.chars().all(|c| c.is_ascii_digit()))
                              .and_then(|n| n.parse::<u32>().ok())
                              .ok_or_else(|| {
                                  malformed(text, &format!("{keyword} requires a whole number"))
                              })?;
        *slot = Some(amount);
    }

    Ok(TypeSpec::Scalar { type_name: type_name.to_string(),
                          length,
                          decimals })
}

fn malformed(text: &str, reason: &str) -> StructureError {
    StructureError::MalformedDeclaration { text:   text.to_string(),
                                           reason: reason.to_string(), }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scalar(type_name: &str, length: Option<u32>, decimals: Option<u32>) -> TypeSpec {
        TypeSpec::Scalar { type_name: type_name.to_string(),
                           length,
                           decimals }
    }

    #[test]
    fn chained_declarations() {
        let statement =
            parse_statement("DATA: lv_text TYPE string VALUE 'Hola, mundo', lv_num TYPE i VALUE 5")
                .unwrap();
        assert_eq!(statement,
                   Statement::Data(vec![Declaration { name:      "lv_text".into(),
                                                      type_spec: scalar("string", None, None),
                                                      value:     Some("'Hola, mundo'".into()), },
                                        Declaration { name:      "lv_num".into(),
                                                      type_spec: scalar("i", None, None),
                                                      value:     Some("5".into()), }]));
    }

    #[test]
    fn declaration_metadata() {
        let statement = parse_statement("data lv_amount type p length 8 decimals 2").unwrap();
        assert_eq!(statement,
                   Statement::Data(vec![Declaration { name:      "lv_amount".into(),
                                                      type_spec: scalar("p", Some(8), Some(2)),
                                                      value:     None, }]));
    }

    #[test]
    fn table_declarations() {
        for text in ["DATA lt_nums TYPE TABLE OF i", "DATA lt_nums TYPE STANDARD TABLE OF i"] {
            assert_eq!(parse_statement(text).unwrap(),
                       Statement::Data(vec![Declaration { name:      "lt_nums".into(),
                                                          type_spec: TypeSpec::Table { element:
                                                                                           "i".into() },
                                                          value:     None, }]));
        }
    }

    #[test]
    fn malformed_declarations_are_structural() {
        for text in ["DATA",
                     "DATA:",
                     "DATA lv_x",
                     "DATA lv_x LIKE lv_y",
                     "DATA lv_x TYPE",
                     "DATA lv_x TYPE i VALUE",
                     "DATA lv_x TYPE i LENGTH",
                     "DATA lv_x TYPE c LENGTH ten",
                     "DATA lv_x TYPE c LENGTH 2 LENGTH 3",
                     "DATA lv_x TYPE i OBLIGATORY",
                     "DATA lv_x TYPE TABLE i",
                     "DATA 9x TYPE i"]
        {
            assert!(matches!(parse_statement(text),
                             Err(StructureError::MalformedDeclaration { .. })),
                    "{text} should be malformed");
        }
    }

    #[test]
    fn value_names_a_variable_before_type() {
        assert_eq!(parse_statement("DATA value TYPE i VALUE 1").unwrap(),
                   Statement::Data(vec![Declaration { name:      "value".into(),
                                                      type_spec: scalar("i", None, None),
                                                      value:     Some("1".into()), }]));
        assert_eq!(parse_statement("DATA: value TYPE string, lv_n TYPE i VALUE value").unwrap(),
                   Statement::Data(vec![Declaration { name:      "value".into(),
                                                      type_spec: scalar("string", None, None),
                                                      value:     None, },
                                        Declaration { name:      "lv_n".into(),
                                                      type_spec: scalar("i", None, None),
                                                      value:     Some("value".into()), }]));
    }

    #[test]
    fn write_items() {
        assert_eq!(parse_statement("WRITE: / 'Mensaje:', lv_text, /").unwrap(),
                   Statement::Write(vec![WriteItem { new_line: true,
                                                     value:    Some("'Mensaje:'".into()), },
                                         WriteItem { new_line: false,
                                                     value:    Some("lv_text".into()), },
                                         WriteItem { new_line: true,
                                                     value:    None, }]));
        assert_eq!(parse_statement("WRITE").unwrap(), Statement::Malformed { keyword: "WRITE" });
    }

    #[test]
    fn arithmetic_statements() {
        assert_eq!(parse_statement("SUBTRACT lv_a * 2 FROM lv_b").unwrap(),
                   Statement::Subtract { amount: "lv_a * 2".into(),
                                         target: "lv_b".into(), });
        assert_eq!(parse_statement("ADD 3 lv_num").unwrap(),
                   Statement::Malformed { keyword: "ADD" });
        assert_eq!(parse_statement("APPEND 'to' TO lt_words").unwrap(),
                   Statement::Append { value: "'to'".into(),
                                       table: "lt_words".into(), });
    }

    #[test]
    fn assignment_takes_precedence_over_keywords() {
        assert_eq!(parse_statement("add = add + 1").unwrap(),
                   Statement::Assign { target: "add".into(),
                                       value:  "add + 1".into(), });
        assert_eq!(parse_statement("lv_x =").unwrap(),
                   Statement::Malformed { keyword: "assignment" });
    }

    #[test]
    fn clear_needs_one_identifier() {
        assert_eq!(parse_statement("CLEAR lt_nums").unwrap(), Statement::Clear("lt_nums".into()));
        assert_eq!(parse_statement("CLEAR").unwrap(), Statement::Malformed { keyword: "CLEAR" });
    }
}
