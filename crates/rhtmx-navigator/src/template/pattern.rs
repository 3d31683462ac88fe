/// Template parsing into typed parts
///
/// Splits a URI template such as `apples/{appleId}/cores/{coreId}` into
/// literal text and variable placeholders. Parsing is a pure function:
/// same input → same output, no side effects.

use crate::error::{NavigatorError, Result};

/// One piece of a parsed template
///
/// # Examples
///
/// ```
/// use rhtmx_navigator::template::pattern::{parse_template, TemplatePart};
///
/// let parts = parse_template("apples/{appleId}").unwrap();
/// assert_eq!(parts[0], TemplatePart::Literal("apples/".to_string()));
/// assert!(matches!(&parts[1], TemplatePart::Variable { name, .. } if name == "appleId"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Text that must appear verbatim
    Literal(String),
    /// Placeholder `{name}` or `{name:regex}`
    Variable {
        name: String,
        /// Custom expression after the colon, if any
        pattern: Option<String>,
    },
}

/// Parses a template into literal and variable parts
///
/// # Rules
///
/// 1. `{name}` → variable matching one or more non-`/` characters
/// 2. `{name:regex}` → variable matching `regex` (balanced braces allowed inside)
/// 3. Everything else is literal text
///
/// Fails with `InvalidTemplate` on unbalanced braces or an empty variable name.
pub fn parse_template(template: &str) -> Result<Vec<TemplatePart>> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                let body = read_variable_body(template, &mut chars)?;
                parts.push(parse_variable(template, &body)?);
            }
            '}' => {
                return Err(NavigatorError::invalid_template(
                    template,
                    "unexpected '}' without matching '{'",
                ));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }

    Ok(parts)
}

/// Consumes characters up to the `}` that closes the current variable
fn read_variable_body(template: &str, chars: &mut std::str::Chars<'_>) -> Result<String> {
    let mut body = String::new();
    let mut depth = 1usize;

    for c in chars.by_ref() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(body);
                }
            }
            _ => {}
        }
        body.push(c);
    }

    Err(NavigatorError::invalid_template(
        template,
        "unclosed '{' in variable",
    ))
}

fn parse_variable(template: &str, body: &str) -> Result<TemplatePart> {
    let (name, pattern) = body
        .split_once(':')
        .map(|(name, pattern)| (name.trim(), Some(pattern.to_string())))
        .unwrap_or_else(|| (body.trim(), None));

    if name.is_empty() {
        return Err(NavigatorError::invalid_template(
            template,
            "empty variable name",
        ));
    }

    // Nested braces are only meaningful inside a custom expression
    if name.contains(|c: char| c == '{' || c == '}') {
        return Err(NavigatorError::invalid_template(
            template,
            format!("braces in variable name '{}'", name),
        ));
    }

    Ok(TemplatePart::Variable {
        name: name.to_string(),
        pattern,
    })
}
