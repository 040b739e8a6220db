//! Renderable PHP values.
//!
//! The same value renderer serves two callers: parameter defaults, which
//! are always emitted on one line and never terminated, and statement
//! level values (e.g. property initialisers or `return` expressions),
//! which may span several lines and end with `;`.

use serde::Deserialize;

/// Which literal form an array value is emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayStyle {
    /// `array(1, 2)`
    #[default]
    Long,
    /// `[1, 2]`
    Short,
}

impl ArrayStyle {
    fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            ArrayStyle::Long => ("array(", ")"),
            ArrayStyle::Short => ("[", "]"),
        }
    }
}

/// Layout of array values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOutput {
    SingleLine,
    /// One element per line, indented one level, trailing comma.
    MultipleLine,
}

/// Key of an associative array entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayKey {
    Int(i64),
    String(String),
}

/// One element of an array value; `key` is `None` for list elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayEntry {
    pub key: Option<ArrayKey>,
    pub value: Value,
}

/// A value that can appear as a parameter default or on the right hand
/// side of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// A named constant (`PHP_EOL`, `self::FOO`), emitted verbatim.
    Constant(String),
    Array(Vec<ArrayEntry>),
}

impl Value {
    pub fn empty_array() -> Self {
        Value::Array(Vec::new())
    }

    /// A list array built from `values` in order.
    pub fn list(values: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(
            values
                .into_iter()
                .map(|value| ArrayEntry { key: None, value })
                .collect(),
        )
    }

    /// An associative array with string keys, in the given order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Array(
            entries
                .into_iter()
                .map(|(k, value)| ArrayEntry {
                    key: Some(ArrayKey::String(k.into())),
                    value,
                })
                .collect(),
        )
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Value::Constant(name.into())
    }

    /// Single-line rendering without a statement terminator, as used in
    /// parameter lists.
    pub fn render(&self, style: ArrayStyle) -> String {
        let mut out = String::new();
        self.write(&mut out, style, ValueOutput::SingleLine, "", 0);
        out
    }

    /// Statement level rendering: arrays span several lines (each nested
    /// level indented by `indentation`) and the result ends with `;`.
    pub fn render_statement(&self, style: ArrayStyle, indentation: &str) -> String {
        let mut out = String::new();
        self.write(&mut out, style, ValueOutput::MultipleLine, indentation, 0);
        out.push(';');
        out
    }

    fn write(
        &self,
        out: &mut String,
        style: ArrayStyle,
        output: ValueOutput,
        indentation: &str,
        depth: usize,
    ) {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => out.push_str(&i.to_string()),
            Value::Float(f) => out.push_str(&render_float(*f)),
            Value::String(s) => out.push_str(&quote(s)),
            Value::Constant(c) => out.push_str(c),
            Value::Array(entries) => {
                let (open, close) = style.delimiters();
                out.push_str(open);
                if entries.is_empty() {
                    out.push_str(close);
                    return;
                }
                match output {
                    ValueOutput::SingleLine => {
                        for (i, entry) in entries.iter().enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            entry.write(out, style, output, indentation, depth);
                        }
                    }
                    ValueOutput::MultipleLine => {
                        out.push('\n');
                        let inner = indentation.repeat(depth + 1);
                        for entry in entries {
                            out.push_str(&inner);
                            entry.write(out, style, output, indentation, depth + 1);
                            out.push_str(",\n");
                        }
                        out.push_str(&indentation.repeat(depth));
                    }
                }
                out.push_str(close);
            }
        }
    }
}

impl ArrayEntry {
    fn write(
        &self,
        out: &mut String,
        style: ArrayStyle,
        output: ValueOutput,
        indentation: &str,
        depth: usize,
    ) {
        match &self.key {
            Some(ArrayKey::Int(i)) => {
                out.push_str(&i.to_string());
                out.push_str(" => ");
            }
            Some(ArrayKey::String(s)) => {
                out.push_str(&quote(s));
                out.push_str(" => ");
            }
            None => {}
        }
        self.value.write(out, style, output, indentation, depth);
    }
}

/// Single-quoted PHP string literal.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Floats always keep a decimal point so they do not read back as ints.
fn render_float(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        format!("{f:?}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::list(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::map(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
