//! Apply parsed markup to a node instance

use super::NodeInstance;
use crate::source::{AttributeSource, ParsedElement};

impl NodeInstance {
    /// Overwrite every declared attribute that is present in `source`.
    ///
    /// Absent attributes keep their current value; attributes the node type
    /// does not declare are ignored. Never fails, and importing the same
    /// source twice yields the same state.
    pub fn import_from<S: AttributeSource + ?Sized>(&mut self, source: &S) {
        let mut applied = 0;
        for (value, spec) in self.values.iter_mut().zip(&self.node_type.attributes) {
            if let Some(text) = source.attribute(&spec.name) {
                *value = spec.parse(text);
                applied += 1;
            }
        }

        tracing::debug!(
            "imported {} of {} attributes into <{}>",
            applied,
            self.node_type.attributes.len(),
            self.node_type.element_name
        );
    }

    /// Import attributes and, for content-carrying types, the body text
    pub fn import_element(&mut self, element: &ParsedElement) {
        if element.name != self.node_type.element_name {
            tracing::warn!(
                "importing <{}> into a <{}> instance",
                element.name,
                self.node_type.element_name
            );
        }

        for (name, _) in &element.attributes {
            if self.node_type.index_of(name).is_none() {
                tracing::trace!("ignoring unknown attribute <{} {}>", element.name, name);
            }
        }

        self.import_from(element);

        if self.node_type.content && element.body.is_some() {
            self.body = element.body.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::node::NodeInstance;
    use crate::schema::{AttributeSpec, NodeType, Normalizer};
    use crate::source::ParsedElement;
    use crate::value::AttributeValue;

    fn generator_type() -> Arc<NodeType> {
        Arc::new(
            NodeType::new("TextureCoordinateGenerator")
                .with(AttributeSpec::string("DEF", ""))
                .with(AttributeSpec::string("mode", "SPHERE"))
                .with(
                    AttributeSpec::string("parameter", "")
                        .normalized(Normalizer::EvenTokenCount),
                ),
        )
    }

    #[test]
    fn test_import_overwrites_present() {
        let mut node = NodeInstance::initialize(generator_type());
        node.import_from(&[("mode", "COORD"), ("parameter", "1 2")]);

        assert_eq!(node.get_string("mode"), Some("COORD"));
        assert_eq!(node.get_string("parameter"), Some("1 2"));
        assert_eq!(node.get_string("DEF"), Some(""));
    }

    #[test]
    fn test_import_absence_keeps_value() {
        let mut node = NodeInstance::initialize(generator_type());
        node.set_string("mode", "NOISE").unwrap();

        node.import_from(&[("DEF", "gen")]);

        assert_eq!(node.get_string("mode"), Some("NOISE"));
        assert_eq!(node.get_string("DEF"), Some("gen"));
    }

    #[test]
    fn test_import_present_default_overwrites() {
        let mut node = NodeInstance::initialize(generator_type());
        node.set_string("mode", "NOISE").unwrap();

        node.import_from(&[("mode", "SPHERE")]);

        assert_eq!(node.get_string("mode"), Some("SPHERE"));
    }

    #[test]
    fn test_import_ignores_unknown() {
        let mut node = NodeInstance::initialize(generator_type());
        let before = node.clone();

        let mut attrs = HashMap::new();
        attrs.insert("containerField".to_string(), "texCoord".to_string());
        node.import_from(&attrs);

        assert_eq!(node, before);
    }

    #[test]
    fn test_import_is_idempotent() {
        let attrs = [("mode", "CAMERASPACENORMAL"), ("parameter", "0.5 1 2")];
        let mut node = NodeInstance::initialize(generator_type());

        node.import_from(&attrs);
        let once = node.clone();
        node.import_from(&attrs);

        assert_eq!(node, once);
        assert_eq!(node.get_string("parameter"), Some("0.5 1"));
    }

    #[test]
    fn test_import_malformed_never_panics() {
        let node_type = Arc::new(
            NodeType::new("Mixed")
                .with(AttributeSpec::boolean("enabled", "true"))
                .with(AttributeSpec::int("count", "3"))
                .with(AttributeSpec::numbers("size", "1 1")),
        );
        let mut node = NodeInstance::initialize(node_type);

        node.import_from(&[("enabled", "yes"), ("count", "three"), ("size", "1 one")]);

        assert_eq!(node.get_bool("enabled"), Some(false));
        assert_eq!(node.get_int("count"), Some(3));
        assert_eq!(
            node.get("size"),
            Some(&AttributeValue::NumericList(vec![1.0, 1.0]))
        );
    }

    #[test]
    fn test_import_element_body() {
        let node_type = Arc::new(
            NodeType::new("Script")
                .with(AttributeSpec::string("DEF", ""))
                .with_content(),
        );
        let mut node = NodeInstance::initialize(node_type);

        let mut element = ParsedElement::new("Script").with_attribute("DEF", "s1");
        element.body = Some("ecmascript: function f() {}".to_string());
        node.import_element(&element);

        assert_eq!(node.get_string("DEF"), Some("s1"));
        assert_eq!(node.body(), Some("ecmascript: function f() {}"));

        node.import_element(&ParsedElement::new("Script"));
        assert_eq!(node.body(), Some("ecmascript: function f() {}"));
    }

    #[test]
    fn test_import_element_body_ignored_without_content() {
        let mut node = NodeInstance::initialize(generator_type());
        let mut element = ParsedElement::new("TextureCoordinateGenerator");
        element.body = Some("stray".to_string());

        node.import_element(&element);
        assert_eq!(node.body(), None);
    }
}
