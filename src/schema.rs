use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// How a variable's value line is laid out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Structure {
    Array,
    Number,
    String,
    /// Any other token, or none at all. Decoded as a scalar string.
    Unrecognized(String),
}

impl Structure {
    pub fn from_token(token: &str) -> Self {
        match token {
            "array" => Structure::Array,
            "number" => Structure::Number,
            "string" => Structure::String,
            other => Structure::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Structure::Array => f.write_str("array"),
            Structure::Number => f.write_str("number"),
            Structure::String => f.write_str("string"),
            Structure::Unrecognized(token) => f.write_str(token),
        }
    }
}

/// Element type of an array variable. Ignored for scalars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementType {
    Number,
    String,
}

impl ElementType {
    pub fn from_token(token: &str) -> Self {
        if token == "number" {
            ElementType::Number
        } else {
            ElementType::String
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Number => f.write_str("number"),
            ElementType::String => f.write_str("string"),
        }
    }
}

/// One schema line: `name structure type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    pub name: String,
    pub structure: Structure,
    pub element_type: ElementType,
}

impl VariableDescriptor {
    pub fn new(name: impl Into<String>, structure: Structure, element_type: ElementType) -> Self {
        VariableDescriptor {
            name: name.into(),
            structure,
            element_type,
        }
    }

    /// Parses one schema line. Missing tokens fall back to an empty
    /// unrecognized structure and a string element type.
    pub fn parse_line(line: &str) -> Self {
        let mut tokens = WHITESPACE_REGEX.split(line.trim());
        let name = tokens.next().unwrap_or_default();
        let structure = Structure::from_token(tokens.next().unwrap_or_default());
        let element_type = ElementType::from_token(tokens.next().unwrap_or_default());
        VariableDescriptor::new(name, structure, element_type)
    }
}

/// Renders the schema line this descriptor parses from. A descriptor without
/// a structure token renders as its bare name, so blank and name-only lines
/// survive a render and re-parse.
impl fmt::Display for VariableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.structure {
            Structure::Unrecognized(token) if token.is_empty() => f.write_str(&self.name),
            structure => write!(f, "{} {} {}", self.name, structure, self.element_type),
        }
    }
}

/// Ordered variable descriptors, position `i` describing variable `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSchema {
    descriptors: Vec<VariableDescriptor>,
}

impl VariableSchema {
    pub fn new(descriptors: Vec<VariableDescriptor>) -> Self {
        VariableSchema { descriptors }
    }

    /// Parses schema text, one descriptor per line.
    ///
    /// Blank lines inside the schema keep their position; blank lines at the
    /// end (a trailing newline) do not declare variables.
    pub fn parse(text: &str) -> Self {
        let mut lines: Vec<&str> = text.split('\n').collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        VariableSchema {
            descriptors: lines.into_iter().map(VariableDescriptor::parse_line).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&VariableDescriptor> {
        self.descriptors.get(index)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariableDescriptor> {
        self.descriptors.iter()
    }
}

impl fmt::Display for VariableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, descriptor) in self.descriptors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", descriptor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_splits_on_whitespace_runs() {
        let descriptor = VariableDescriptor::parse_line("  nums \t array   number  ");
        assert_eq!(descriptor.name, "nums");
        assert_eq!(descriptor.structure, Structure::Array);
        assert_eq!(descriptor.element_type, ElementType::Number);
    }

    #[test]
    fn parse_line_defaults_missing_tokens() {
        let descriptor = VariableDescriptor::parse_line("lonely");
        assert_eq!(descriptor.name, "lonely");
        assert_eq!(descriptor.structure, Structure::Unrecognized(String::new()));
        assert_eq!(descriptor.element_type, ElementType::String);
    }

    #[test]
    fn unknown_tokens_are_kept_for_reporting() {
        let descriptor = VariableDescriptor::parse_line("grid matrix number");
        assert_eq!(descriptor.structure, Structure::Unrecognized("matrix".to_string()));
        assert_eq!(descriptor.to_string(), "grid matrix number");
    }

    #[test]
    fn parse_drops_only_trailing_blank_lines() {
        let schema = VariableSchema::parse("a number number\n\nb string string\n\n");
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.get(1).map(|d| d.name.as_str()), Some(""));
        assert_eq!(schema.get(2).map(|d| d.name.as_str()), Some("b"));
    }

    #[test]
    fn display_parses_back_to_the_same_schema() {
        let schema = VariableSchema::parse("a number number\nb array string");
        assert_eq!(VariableSchema::parse(&schema.to_string()), schema);
    }

    #[test]
    fn blank_and_name_only_lines_render_back_unchanged() {
        let schema = VariableSchema::parse("a number number\n\nlonely\nb array string");
        assert_eq!(schema.to_string(), "a number number\n\nlonely\nb array string");

        let reparsed = VariableSchema::parse(&schema.to_string());
        assert_eq!(reparsed, schema);
        assert_eq!(reparsed.get(1).map(|d| d.name.as_str()), Some(""));
        assert_eq!(reparsed.get(2).map(|d| d.name.as_str()), Some("lonely"));
    }
}
