//! Structured pre-render script and its escaping
//!
//! Statements are collected in order and only turned into text at the end.
//! Values land inside MEL string literals through [`mel_string`]; the finished
//! script is wrapped for the shell once, by [`shell_quote`].

use std::fmt::Display;

/// Ordered list of MEL statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MelScript {
    statements: Vec<String>,
}

impl MelScript {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw statement; a trailing `;` is added when missing
    pub fn push(&mut self, statement: impl Into<String>) -> &mut Self {
        let mut statement = statement.into();
        if !statement.trim_end().ends_with(';') && !statement.trim_end().ends_with('}') {
            statement.push(';');
        }
        self.statements.push(statement);
        self
    }

    /// `string $name = "value";`
    pub fn declare_string(&mut self, name: &str, value: &str) -> &mut Self {
        self.push(format!("string ${name} = {}", mel_string(value)))
    }

    /// `int $name = value;`
    pub fn declare_int(&mut self, name: &str, value: i64) -> &mut Self {
        self.push(format!("int ${name} = {value}"))
    }

    /// `setAttr "node.attr" value;`
    pub fn set_attr(&mut self, attribute: &str, value: impl Display) -> &mut Self {
        self.push(format!("setAttr {} {value}", mel_string(attribute)))
    }

    /// `setAttr "node.attr" -type "string" "value";`
    pub fn set_attr_string(&mut self, attribute: &str, value: &str) -> &mut Self {
        self.push(format!(
            "setAttr {} -type \"string\" {}",
            mel_string(attribute),
            mel_string(value)
        ))
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether no statement has been added
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements joined into one line of MEL
    pub fn to_source(&self) -> String {
        self.statements.join(" ")
    }
}

/// Quote `value` as a MEL string literal
pub fn mel_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quote `value` as a single double-quoted POSIX shell word.
///
/// Inside double quotes the shell still interprets `\`, `"`, `$` and the
/// backtick; each is backslash-escaped so the word reaches the program verbatim.
pub fn shell_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
