//! Scalar and array values produced by the parser, and the rules for
//! projecting them onto a single textual flag default.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A configuration value.
///
/// Identifiers are bare words (`info`, `log.level`) and are kept apart from
/// quoted strings so diagnostics can tell them apart. Both render to the same
/// plain text when used as a flag default.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Identifier(String),
    Str(String),
    Number(f64),
    Array(Vec<Value>),
}

impl Value {
    /// Render the value as a flag default.
    ///
    /// Arrays join their elements with `,`. Nested arrays flatten textually,
    /// so `[[1, 2], 3]` renders as `1,2,3`.
    pub fn render(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Identifier(s) | Value::Str(s) => s.clone(),
            Value::Number(n) => format_number(*n),
            Value::Array(items) => items
                .iter()
                .map(Value::render)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Render the value as source text, for diagnostics.
    ///
    /// Strings are double-quoted with escapes and identifiers come out as
    /// backtick raw strings, so the literal parses back to a value with the
    /// same [`render`](Self::render).
    pub fn to_literal(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Identifier(s) => format!("`{s}`"),
            Value::Str(s) => quote(s),
            Value::Number(n) => format_number(*n),
            Value::Array(items) => {
                let inner: Vec<String> = items.iter().map(Value::to_literal).collect();
                format!("[{}]", inner.join(", "))
            }
        }
    }

    /// Short name of the variant, used in log fields and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Identifier(_) => "identifier",
            Value::Str(_) => "string",
            Value::Number(_) => "number",
            Value::Array(_) => "array",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Identifier(s) | Value::Str(s) => serializer.serialize_str(s),
            Value::Number(n) => match as_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// `f64`'s `Display` is already the shortest round-trippable form and never
/// uses exponent notation, so `10.0` prints as `10`.
fn format_number(n: f64) -> String {
    n.to_string()
}

/// Integral values inside the `i64` range, so typed integer destinations
/// decode from whole numbers written without a fraction.
fn as_integer(n: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    if n.fract() == 0.0 && (-LIMIT..LIMIT).contains(&n) {
        Some(n as i64)
    } else {
        None
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
