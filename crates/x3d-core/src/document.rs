//! Bind every known element of a markup document

use roxmltree::{Document, Node, ParsingOptions};

use crate::catalog::SchemaCatalog;
use crate::error::DocumentError;
use crate::node::NodeInstance;
use crate::source::ParsedElement;

/// A catalog-known element found in a document
#[derive(Debug, Clone, PartialEq)]
pub struct BoundNode {
    /// Ancestor chain, e.g. `X3D/Scene/Transform/BooleanToggle`
    pub path: String,
    pub instance: NodeInstance,
}

/// Parse `text` and bind each element the catalog knows, in document order.
///
/// Only malformed XML is an error; unknown elements are skipped.
pub fn parse_document(text: &str, catalog: &SchemaCatalog) -> Result<Vec<BoundNode>, DocumentError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = Document::parse_with_options(text, options)?;

    let mut bound = Vec::new();
    let mut skipped = 0;
    for node in doc.root_element().descendants().filter(Node::is_element) {
        let name = node.tag_name().name();
        let Some(mut instance) = catalog.instantiate(name) else {
            tracing::trace!("skipping <{}>", name);
            skipped += 1;
            continue;
        };

        instance.import_element(&ParsedElement::from_node(node));
        bound.push(BoundNode {
            path: element_path(node),
            instance,
        });
    }

    tracing::debug!("bound {} elements, skipped {}", bound.len(), skipped);
    Ok(bound)
}

fn element_path(node: Node<'_, '_>) -> String {
    let mut names: Vec<&str> = node
        .ancestors()
        .filter(Node::is_element)
        .map(|n| n.tag_name().name())
        .collect();
    names.reverse();
    names.join("/")
}
