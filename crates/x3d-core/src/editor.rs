//! Editor capability lookup
//!
//! The data model holds no reference to any editing surface. A GUI (or the
//! command line) asks the `EditorRegistry` for an editor by element name and
//! drives the instance through it.

use std::collections::HashMap;

use crate::error::BindError;
use crate::node::NodeInstance;
use crate::schema::ValueType;

/// Read-only view of one attribute as an editor presents it
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub name: String,
    pub value_type: ValueType,
    pub text: String,
    pub required: bool,
    pub is_default: bool,
}

/// Editing surface for one node type
pub trait NodeEditor {
    /// Editor display name
    fn name(&self) -> &str;

    /// Fields shown by this editor, in display order
    fn fields(&self, node: &NodeInstance) -> Vec<FieldView>;

    /// Apply a textual edit to one attribute.
    /// Returns true if the value changed.
    fn apply(
        &mut self,
        node: &mut NodeInstance,
        attribute: &str,
        text: &str,
    ) -> Result<bool, BindError>;
}

/// Generic editor exposing every declared attribute as text
#[derive(Debug, Clone, Default)]
pub struct FieldEditor;

impl NodeEditor for FieldEditor {
    fn name(&self) -> &str {
        "Fields"
    }

    fn fields(&self, node: &NodeInstance) -> Vec<FieldView> {
        node.iter()
            .map(|(spec, value)| FieldView {
                name: spec.name.clone(),
                value_type: spec.value_type,
                text: value.to_text(),
                required: spec.required,
                is_default: *value == spec.default_value(),
            })
            .collect()
    }

    fn apply(
        &mut self,
        node: &mut NodeInstance,
        attribute: &str,
        text: &str,
    ) -> Result<bool, BindError> {
        let before = node.get(attribute).cloned();
        node.set_text(attribute, text)?;
        Ok(node.get(attribute) != before.as_ref())
    }
}

/// Factory producing a fresh editor
pub type EditorFactory = Box<dyn Fn() -> Box<dyn NodeEditor> + Send + Sync>;

/// Maps element names to editor factories
#[derive(Default)]
pub struct EditorRegistry {
    factories: HashMap<String, EditorFactory>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an editor for an element name, replacing any previous one
    pub fn register<F, E>(&mut self, element_name: impl Into<String>, factory: F)
    where
        F: Fn() -> E + Send + Sync + 'static,
        E: NodeEditor + 'static,
    {
        self.factories.insert(
            element_name.into(),
            Box::new(move || Box::new(factory()) as Box<dyn NodeEditor>),
        );
    }

    /// Remove the editor registered for an element name
    pub fn unregister(&mut self, element_name: &str) -> bool {
        self.factories.remove(element_name).is_some()
    }

    pub fn contains(&self, element_name: &str) -> bool {
        self.factories.contains_key(element_name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Editor for an element, falling back to `FieldEditor`
    pub fn editor_for(&self, element_name: &str) -> Box<dyn NodeEditor> {
        match self.factories.get(element_name) {
            Some(factory) => factory(),
            None => Box::new(FieldEditor),
        }
    }
}

/// Split an `attribute=value` edit. The value may be empty or contain `=`.
pub fn parse_edit(edit: &str) -> Option<(&str, &str)> {
    let (name, value) = edit.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value))
}
