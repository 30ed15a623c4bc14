//! Rendering of JSON values as GraphQL input literals.
//!
//! Argument names are validated against the GraphQL `Name` grammar and
//! strings are always emitted through the JSON string encoder, so user data
//! can never terminate a literal early.

use serde_json::{Map, Value};

use crate::{GraphqlError, Result};

/// `[_A-Za-z][_0-9A-Za-z]*`
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn check_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(GraphqlError::InvalidName(name.to_string()))
    }
}

/// Quote a string as a GraphQL string literal
pub fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn render_value(value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&quote(s)),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            render_fields(fields, out)?;
            out.push('}');
        }
    }
    Ok(())
}

// Keys are emitted sorted so documents are stable across map implementations.
fn render_fields(fields: &Map<String, Value>, out: &mut String) -> Result<()> {
    let mut entries: Vec<_> = fields.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (i, (name, value)) in entries.into_iter().enumerate() {
        check_name(name)?;
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push_str(": ");
        render_value(value, out)?;
    }
    Ok(())
}

/// Render an argument map without the surrounding braces: `a: 1, b: "x"`
pub fn render_arguments(args: &Map<String, Value>) -> Result<String> {
    let mut out = String::new();
    render_fields(args, &mut out)?;
    Ok(out)
}
