//! Attribute lookup over parsed markup
//!
//! The importer only needs "give me the text of attribute X, if present".
//! `AttributeSource` captures that, so any parser (or a plain map in tests)
//! can feed a `NodeInstance`.

use std::collections::{BTreeMap, HashMap};

/// Lookup-by-name view of an element's attributes.
///
/// `None` means the attribute was not written in the source markup, which
/// is distinct from it being written with its default value.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl AttributeSource for roxmltree::Node<'_, '_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeSource for [(&str, &str)] {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> AttributeSource for [(&str, &str); N] {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.as_slice().attribute(name)
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn attribute(&self, name: &str) -> Option<&str> {
        (**self).attribute(name)
    }
}

/// Owned snapshot of one element, detached from the parsed document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedElement {
    pub name: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA children
    pub body: Option<String>,
}

impl ParsedElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Snapshot a roxmltree element
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let text: String = node
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();
        let body = if text.trim().is_empty() { None } else { Some(text) };

        Self {
            name: node.tag_name().name().to_string(),
            attributes,
            body,
        }
    }
}

impl AttributeSource for ParsedElement {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
