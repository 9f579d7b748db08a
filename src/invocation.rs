use crate::ast::AtRule;
use crate::error::{ErrorKind, MixinError, Result};

/// A parsed `@mixin` or `@include` header: the mixin name and the raw,
/// unevaluated argument strings. Arguments are re-parsed at every occurrence
/// and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Splits a header's params text into a name and raw argument strings.
///
/// The name runs up to the first `(`. Whatever follows must be empty or one
/// balanced `(...)` group wrapping a comma-separated list; anything else is a
/// syntax error attributed to the directive's source location.
pub fn parse_name_and_args(at_rule: &AtRule) -> Result<Invocation> {
    let params = at_rule.params.trim();
    let name = match params.find('(') {
        Some(pos) => &params[..pos],
        None => params,
    };
    let rest = params[name.len()..].trim();

    let mut args = Vec::new();
    if !rest.is_empty() {
        if !rest.starts_with('(') || !rest.ends_with(')') || !is_balanced(rest) {
            return Err(MixinError {
                kind: ErrorKind::SyntaxError,
                message: format!("Syntax error in mixin arguments `{}`", params),
                location: Some(at_rule.source),
            });
        }
        args = split_top_level_commas(&rest[1..rest.len() - 1]);
    }

    Ok(Invocation {
        name: name.trim_end().to_string(),
        args,
    })
}

/// Splits on commas that sit outside any nested parentheses and outside
/// quoted strings, trimming each piece. `f(a, b)` inside an argument stays
/// one argument.
pub fn split_top_level_commas(input: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in input.chars() {
        if escaped {
            escaped = false;
            current.push(c);
            continue;
        }
        match quote {
            Some(q) => {
                if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    current.push(c);
                }
                '(' => {
                    depth += 1;
                    current.push(c);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ',' if depth == 0 => {
                    items.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(c),
            },
        }
    }

    let last = current.trim();
    if !last.is_empty() || !items.is_empty() {
        items.push(last.to_string());
    }
    items
}

fn is_balanced(input: &str) -> bool {
    let mut depth = 0isize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in input.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Some(q) => {
                if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            },
        }
    }
    depth == 0 && quote.is_none()
}
