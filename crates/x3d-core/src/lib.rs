//! X3D node attribute binding
//!
//! This crate binds X3D elements to editable, typed records:
//! - schema: data-only node type declarations
//! - node: instances with initialize / import / export
//! - catalog: the schema provider (builtin table, RON loading)
//! - document: bind every known element of a markup document
//! - editor: element name to editor surface lookup

pub mod catalog;
pub mod document;
pub mod editor;
pub mod error;
pub mod node;
pub mod normalize;
pub mod schema;
pub mod source;
pub mod value;

pub use catalog::*;
pub use document::*;
pub use editor::*;
pub use error::*;
pub use node::*;
pub use schema::*;
pub use source::*;
pub use value::*;
