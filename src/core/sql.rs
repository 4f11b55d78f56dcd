//! SQL text helpers - statement splitting and literal quoting.
//!
//! [`split_statements`] understands enough PostgreSQL lexical structure to find the
//! semicolons that actually end a statement: those inside string literals, quoted
//! identifiers, comments and dollar-quoted function bodies are left alone.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<'a> {
    Code,
    /// `'...'`; `escapes` is set for `E'...'` strings, where a backslash escapes the next char
    SingleQuoted { escapes: bool },
    DoubleQuoted,
    LineComment,
    /// Block comments nest, so the depth is tracked
    BlockComment(u32),
    DollarQuoted(&'a str),
}

/// Whether `c` can continue an unquoted identifier
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether the quote at `idx` opens an escape string (`E'...'`)
fn opens_escape_string(sql: &str, idx: usize) -> bool {
    let mut before = sql.get(..idx).unwrap_or_default().chars().rev();
    matches!(before.next(), Some('E' | 'e')) && !before.next().is_some_and(is_ident_char)
}

/// Splits a SQL script into individual statements.
///
/// Statements are trimmed and returned without their terminating `;`. Fragments
/// holding only whitespace or comments are dropped.
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut has_code = false;
    let mut state = State::Code;
    let mut chars = sql.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        match state {
            State::Code => match ch {
                ';' => {
                    if has_code {
                        statements.push(current.trim().to_string());
                    }
                    current.clear();
                    has_code = false;
                    continue;
                }
                '\'' => {
                    state = State::SingleQuoted {
                        escapes: opens_escape_string(sql, idx),
                    };
                    has_code = true;
                }
                '"' => {
                    state = State::DoubleQuoted;
                    has_code = true;
                }
                '-' if next == Some('-') => {
                    state = State::LineComment;
                    current.push(ch);
                    current.push('-');
                    chars.next();
                    continue;
                }
                '/' if next == Some('*') => {
                    state = State::BlockComment(1);
                    current.push(ch);
                    current.push('*');
                    chars.next();
                    continue;
                }
                '$' => {
                    let inside_identifier = sql
                        .get(..idx)
                        .and_then(|before| before.chars().next_back())
                        .is_some_and(is_ident_char);
                    if let Some(tag) = sql
                        .get(idx..)
                        .filter(|_| !inside_identifier)
                        .and_then(dollar_tag)
                    {
                        state = State::DollarQuoted(tag);
                        has_code = true;
                        current.push_str(tag);
                        // The tag is ASCII, so its byte length is its char count
                        for _ in 1..tag.len() {
                            chars.next();
                        }
                        continue;
                    }
                    has_code = true;
                }
                c if !c.is_whitespace() => has_code = true,
                _ => {}
            },
            State::SingleQuoted { escapes } => {
                if escapes && ch == '\\' {
                    current.push(ch);
                    if let Some((_, escaped)) = chars.next() {
                        current.push(escaped);
                    }
                    continue;
                }
                if ch == '\'' {
                    state = State::Code;
                }
            }
            State::DoubleQuoted => {
                if ch == '"' {
                    state = State::Code;
                }
            }
            State::LineComment => {
                if ch == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment(depth) => {
                if ch == '/' && next == Some('*') {
                    state = State::BlockComment(depth + 1);
                    current.push(ch);
                    current.push('*');
                    chars.next();
                    continue;
                }
                if ch == '*' && next == Some('/') {
                    state = if depth > 1 {
                        State::BlockComment(depth - 1)
                    } else {
                        State::Code
                    };
                    current.push(ch);
                    current.push('/');
                    chars.next();
                    continue;
                }
            }
            State::DollarQuoted(tag) => {
                if ch == '$' && sql.get(idx..).is_some_and(|rest| rest.starts_with(tag)) {
                    state = State::Code;
                    current.push_str(tag);
                    for _ in 1..tag.len() {
                        chars.next();
                    }
                    continue;
                }
            }
        }
        current.push(ch);
    }

    if has_code {
        statements.push(current.trim().to_string());
    }
    statements
}

/// Reads a dollar-quote opener (`$$` or `$tag$`) at the start of `rest`.
///
/// Positional parameters such as `$1` are not tags.
fn dollar_tag(rest: &str) -> Option<&str> {
    let body_and_tail = rest.strip_prefix('$')?;
    let end = body_and_tail.find('$')?;
    let body = body_and_tail.get(..end)?;

    let valid = body
        .chars()
        .next()
        .is_none_or(|first| first.is_ascii_alphabetic() || first == '_')
        && body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return None;
    }
    rest.get(..end + 2)
}

/// Quotes `value` as a SQL string literal, doubling embedded quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
