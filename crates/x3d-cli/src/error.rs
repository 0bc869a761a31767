//! Command-line error type

use x3d_core::{BindError, CatalogError, DocumentError};

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown node type: {0}")]
    UnknownElement(String),

    #[error("Invalid edit '{0}', expected attribute=value")]
    InvalidEdit(String),
}
