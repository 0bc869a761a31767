//! Editable node instances
//!
//! A `NodeInstance` pairs a shared, read-only `NodeType` with the current
//! value of every declared attribute. Construction initializes every value
//! from its schema default, so there is no uninitialized state.
//!
//! - `import`: overwrite values from parsed markup
//! - `export`: minimal attribute fragment reproducing the current state

mod export;
mod import;

pub use export::{ExportOptions, escape_attribute};

use std::sync::Arc;

use crate::error::BindError;
use crate::schema::{AttributeSpec, NodeType, ValueType};
use crate::value::AttributeValue;

/// One editable element bound to its node type
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInstance {
    node_type: Arc<NodeType>,
    /// Parallel to `node_type.attributes`
    values: Vec<AttributeValue>,
    /// Opaque body text for content-carrying node types
    body: Option<String>,
}

impl NodeInstance {
    /// Create an instance with every attribute at its schema default
    pub fn initialize(node_type: Arc<NodeType>) -> Self {
        let values = node_type
            .attributes
            .iter()
            .map(AttributeSpec::default_value)
            .collect();

        Self {
            node_type,
            values,
            body: None,
        }
    }

    pub fn element_name(&self) -> &str {
        &self.node_type.element_name
    }

    pub fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    /// Iterate attributes with their current values in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeSpec, &AttributeValue)> {
        self.node_type.attributes.iter().zip(self.values.iter())
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.node_type.index_of(name).map(|i| &self.values[i])
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(AttributeValue::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(AttributeValue::as_int)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(AttributeValue::as_float)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    pub fn get_numbers(&self, name: &str) -> Option<&[f64]> {
        self.get(name).and_then(AttributeValue::as_numbers)
    }

    /// Set a typed value; the value's type must match the declaration.
    ///
    /// Numbers must be finite. String values run through the attribute's
    /// normalizer so the stored value is what a re-import would produce.
    pub fn set(&mut self, name: &str, value: impl Into<AttributeValue>) -> Result<(), BindError> {
        let value = value.into();
        let index = self.index(name)?;
        let spec = &self.node_type.attributes[index];
        if value.value_type() != spec.value_type {
            return Err(BindError::TypeMismatch {
                attribute: name.to_string(),
                expected: spec.value_type,
                found: value.value_type(),
            });
        }

        let value = match value {
            AttributeValue::Float(f) if !f.is_finite() => None,
            AttributeValue::NumericList(ref v) if v.iter().any(|f| !f.is_finite()) => None,
            AttributeValue::String(s) => match spec.normalizer {
                Some(normalizer) => Some(AttributeValue::String(normalizer.apply(&s).into_owned())),
                None => Some(AttributeValue::String(s)),
            },
            other => Some(other),
        }
        .ok_or_else(|| BindError::NonFinite {
            attribute: name.to_string(),
        })?;

        self.values[index] = value;
        Ok(())
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<(), BindError> {
        self.set(name, value)
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> Result<(), BindError> {
        self.set(name, value)
    }

    pub fn set_float(&mut self, name: &str, value: f64) -> Result<(), BindError> {
        self.set(name, value)
    }

    pub fn set_string(&mut self, name: &str, value: impl Into<String>) -> Result<(), BindError> {
        self.set(name, AttributeValue::String(value.into()))
    }

    pub fn set_numbers(&mut self, name: &str, value: Vec<f64>) -> Result<(), BindError> {
        self.set(name, value)
    }

    /// Set an attribute from text, parsed the same way the importer does
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<(), BindError> {
        let index = self.index(name)?;
        self.values[index] = self.node_type.attributes[index].parse(text);
        Ok(())
    }

    /// Whether the attribute currently equals its default.
    ///
    /// Returns `None` for names the node type does not declare.
    pub fn is_default(&self, name: &str) -> Option<bool> {
        let index = self.node_type.index_of(name)?;
        Some(self.values[index] == self.node_type.attributes[index].default_value())
    }

    /// Names of attributes that differ from their default, in declaration order
    pub fn modified(&self) -> Vec<&str> {
        self.iter()
            .filter(|(spec, value)| **value != spec.default_value())
            .map(|(spec, _)| spec.name.as_str())
            .collect()
    }

    /// Restore every attribute to its default and clear the body
    pub fn reset(&mut self) {
        for (value, spec) in self.values.iter_mut().zip(&self.node_type.attributes) {
            *value = spec.default_value();
        }
        self.body = None;
    }

    pub fn reset_attribute(&mut self, name: &str) -> Result<(), BindError> {
        let index = self.index(name)?;
        self.values[index] = self.node_type.attributes[index].default_value();
        Ok(())
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: Option<String>) {
        self.body = body;
    }

    /// Type of a declared attribute
    pub fn value_type(&self, name: &str) -> Option<ValueType> {
        self.node_type.spec(name).map(|s| s.value_type)
    }

    fn index(&self, name: &str) -> Result<usize, BindError> {
        self.node_type
            .index_of(name)
            .ok_or_else(|| BindError::UnknownAttribute {
                element: self.node_type.element_name.clone(),
                attribute: name.to_string(),
            })
    }
}
