//! Error types for the binding engine
//!
//! Import and export never fail. These errors cover the opt-in strict
//! surfaces: typed setters, user-supplied schema tables, and markup that
//! is not well-formed XML.

use crate::schema::ValueType;

/// Errors returned by the typed setters of a `NodeInstance`
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindError {
    #[error("<{element}> has no attribute '{attribute}'")]
    UnknownAttribute { element: String, attribute: String },

    #[error("attribute '{attribute}' is {expected}, got {found}")]
    TypeMismatch {
        attribute: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("attribute '{attribute}' must be a finite number")]
    NonFinite { attribute: String },
}

/// Errors that can occur while loading or validating a schema catalog
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Duplicate node type: {0}")]
    DuplicateElement(String),

    #[error("Duplicate attribute '{attribute}' on <{element}>")]
    DuplicateAttribute { element: String, attribute: String },

    #[error("Default '{default}' of {element}.{attribute} is not a valid {value_type}")]
    InvalidDefault {
        element: String,
        attribute: String,
        default: String,
        value_type: ValueType,
    },
}

/// Errors that can occur while reading a markup document
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to parse XML: {0}")]
    Xml(String),
}

impl From<roxmltree::Error> for DocumentError {
    fn from(e: roxmltree::Error) -> Self {
        DocumentError::Xml(e.to_string())
    }
}
