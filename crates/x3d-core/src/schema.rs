//! Node type declarations
//!
//! A `NodeType` is pure data: the element name plus an ordered list of
//! `AttributeSpec`s. The binding engine in [`crate::node`] is generic over
//! these declarations, so adding a node type never requires new code.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::even_token_count;
use crate::value::{AttributeValue, parse_float, split_numbers};

/// Textual value kind of an attribute, selects the parse and format rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
    NumericList,
}

impl ValueType {
    /// Strict check used when validating user-supplied defaults.
    ///
    /// Runtime parsing stays permissive; this only answers whether `text`
    /// parses cleanly.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            ValueType::Bool => text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false"),
            ValueType::Int => text.trim().parse::<i32>().is_ok(),
            ValueType::Float => parse_float(text).is_some(),
            ValueType::String => true,
            ValueType::NumericList => split_numbers(text).all(|t| parse_float(t).is_some()),
        }
    }

    /// Display name (X3D field type it corresponds to)
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueType::Bool => "SFBool",
            ValueType::Int => "SFInt32",
            ValueType::Float => "SFFloat",
            ValueType::String => "SFString",
            ValueType::NumericList => "MFFloat",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

/// Named normalization hook applied to attribute text on import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalizer {
    /// Parameter lists made of pairs: an unpaired trailing token is dropped
    EvenTokenCount,
}

impl Normalizer {
    /// Apply this hook to raw attribute text
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Normalizer::EvenTokenCount => even_token_count(text),
        }
    }
}

/// One bindable attribute of a node type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    /// Default in textual form
    pub default: String,
    /// Required attributes are always exported, even at their default
    #[serde(default)]
    pub required: bool,
    pub value_type: ValueType,
    #[serde(default)]
    pub normalizer: Option<Normalizer>,
}

impl AttributeSpec {
    /// Create an optional attribute
    pub fn new(name: impl Into<String>, default: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
            required: false,
            value_type,
            normalizer: None,
        }
    }

    pub fn boolean(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, default, ValueType::Bool)
    }

    pub fn int(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, default, ValueType::Int)
    }

    pub fn float(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, default, ValueType::Float)
    }

    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, default, ValueType::String)
    }

    pub fn numbers(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, default, ValueType::NumericList)
    }

    /// Mark this attribute as always emitted
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a normalization hook
    pub fn normalized(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Parse the default text into a typed value
    pub fn default_value(&self) -> AttributeValue {
        AttributeValue::parse(self.value_type, &self.default)
    }

    /// Parse source text for this attribute, running its normalizer first.
    ///
    /// Malformed text falls back to the default value.
    pub fn parse(&self, text: &str) -> AttributeValue {
        let text = match self.normalizer {
            Some(normalizer) => normalizer.apply(text),
            None => Cow::Borrowed(text),
        };
        AttributeValue::try_parse(self.value_type, &text).unwrap_or_else(|| {
            tracing::warn!(
                "'{}' is not a valid {} for '{}', using default '{}'",
                text,
                self.value_type,
                self.name,
                self.default
            );
            self.default_value()
        })
    }
}

/// Declaration of one element type: its tag name and ordered attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
    pub element_name: String,
    pub attributes: Vec<AttributeSpec>,
    /// Element carries body text (e.g. script source) passed through as-is
    #[serde(default)]
    pub content: bool,
}

impl NodeType {
    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            attributes: Vec::new(),
            content: false,
        }
    }

    /// Append an attribute, keeping declaration order
    pub fn with(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Mark the element as carrying body text
    pub fn with_content(mut self) -> Self {
        self.content = true;
        self
    }

    /// Position of the attribute in declaration order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub fn spec(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn default_value(&self, name: &str) -> Option<AttributeValue> {
        self.spec(name).map(AttributeSpec::default_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        assert!(ValueType::Bool.accepts("TRUE"));
        assert!(!ValueType::Bool.accepts("yes"));
        assert!(!ValueType::Bool.accepts(" true"));
        assert!(!ValueType::Float.accepts("NaN"));
        assert!(!ValueType::Float.accepts("1e400"));
        assert!(!ValueType::NumericList.accepts("0 inf"));
        assert!(ValueType::Int.accepts(" 42 "));
        assert!(!ValueType::Int.accepts("4.2"));
        assert!(ValueType::Float.accepts("0.5"));
        assert!(ValueType::NumericList.accepts("0 0 1, 0"));
        assert!(ValueType::NumericList.accepts(""));
        assert!(!ValueType::NumericList.accepts("0 x 1"));
        assert!(ValueType::String.accepts("anything at all"));
    }

    #[test]
    fn test_declaration_order() {
        let node_type = NodeType::new("Test")
            .with(AttributeSpec::string("b", ""))
            .with(AttributeSpec::string("a", ""));

        assert_eq!(node_type.index_of("b"), Some(0));
        assert_eq!(node_type.index_of("a"), Some(1));
        assert_eq!(node_type.index_of("c"), None);
    }

    #[test]
    fn test_parse_applies_normalizer() {
        let spec = AttributeSpec::string("parameter", "").normalized(Normalizer::EvenTokenCount);
        assert_eq!(
            spec.parse("1 2 3"),
            AttributeValue::String("1 2".to_string())
        );

        let plain = AttributeSpec::string("parameter", "");
        assert_eq!(
            plain.parse("1 2 3"),
            AttributeValue::String("1 2 3".to_string())
        );
    }

    #[test]
    fn test_malformed_falls_back_to_default() {
        let spec = AttributeSpec::float("weightConstant1", "0.5");
        assert_eq!(spec.parse("heavy"), AttributeValue::Float(0.5));

        let list = AttributeSpec::numbers("dimensions", "1 1 1");
        assert_eq!(
            list.parse("2 x 2"),
            AttributeValue::NumericList(vec![1.0, 1.0, 1.0])
        );
    }
}
