//! Serialize a node instance back to markup

use std::fmt::Write as _;

use super::NodeInstance;

/// Export settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// XML-escape attribute values (`&`, `<`, `'`, `"`)
    pub escape_values: bool,
    /// Emit every attribute, even those at their default
    pub include_defaults: bool,
}

/// Escape text for use inside a single-quoted attribute value.
///
/// Tab, newline and carriage return become character references so
/// attribute-value normalization does not turn them into spaces.
pub fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\t' => out.push_str("&#9;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

impl NodeInstance {
    /// Minimal attribute fragment, e.g. `" toggle='true'"`.
    ///
    /// Attributes are written in declaration order; an attribute is written
    /// only if it is required or differs from its default. Values are not
    /// escaped.
    pub fn export(&self) -> String {
        self.export_with(&ExportOptions::default())
    }

    pub fn export_with(&self, options: &ExportOptions) -> String {
        let mut out = String::new();
        for (spec, value) in self.iter() {
            if !(options.include_defaults || spec.required || *value != spec.default_value()) {
                continue;
            }

            let text = value.to_text();
            let text = if options.escape_values {
                escape_attribute(&text)
            } else {
                text
            };
            let _ = write!(out, " {}='{}'", spec.name, text);
        }
        out
    }

    /// Full element: `<Name .../>`, or with a CDATA body for content types
    pub fn to_element(&self, options: &ExportOptions) -> String {
        let name = self.element_name();
        let attributes = self.export_with(options);
        match self.body() {
            Some(body) if self.node_type.content => {
                let body = body.replace("]]>", "]]]]><![CDATA[>");
                format!("<{name}{attributes}><![CDATA[{body}]]></{name}>")
            }
            _ => format!("<{name}{attributes}/>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::node::NodeInstance;
    use crate::schema::{AttributeSpec, NodeType};

    fn toggle_type() -> Arc<NodeType> {
        Arc::new(NodeType::new("BooleanToggle").with(AttributeSpec::boolean("toggle", "false")))
    }

    fn shader_type() -> Arc<NodeType> {
        Arc::new(
            NodeType::new("ComposedShader")
                .with(AttributeSpec::string("DEF", ""))
                .with(AttributeSpec::string("USE", ""))
                .with(AttributeSpec::string("language", "").required()),
        )
    }

    #[test]
    fn test_toggle_scenario() {
        let mut node = NodeInstance::initialize(toggle_type());
        assert_eq!(node.export(), "");

        node.set_bool("toggle", true).unwrap();
        assert_eq!(node.export(), " toggle='true'");

        node.import_from(&[("toggle", "FALSE")]);
        assert_eq!(node.get_bool("toggle"), Some(false));
        assert_eq!(node.export(), "");
    }

    #[test]
    fn test_required_always_emitted() {
        let mut node = NodeInstance::initialize(shader_type());
        assert_eq!(node.export(), " language=''");

        node.set_string("language", "GLSL").unwrap();
        assert_eq!(node.export(), " language='GLSL'");
    }

    #[test]
    fn test_declaration_order() {
        let mut node = NodeInstance::initialize(shader_type());
        node.set_string("USE", "b").unwrap();
        node.set_string("language", "GLSL").unwrap();
        node.set_string("DEF", "a").unwrap();

        assert_eq!(node.export(), " DEF='a' USE='b' language='GLSL'");
    }

    #[test]
    fn test_value_set_back_to_default_is_suppressed() {
        let mut node = NodeInstance::initialize(shader_type());
        node.set_string("DEF", "a").unwrap();
        node.set_string("DEF", "").unwrap();

        assert_eq!(node.export(), " language=''");
    }

    #[test]
    fn test_round_trip() {
        let node_type = Arc::new(
            NodeType::new("IsoSurfaceVolumeData")
                .with(AttributeSpec::string("DEF", ""))
                .with(AttributeSpec::float("contourStepSize", "0"))
                .with(AttributeSpec::numbers("dimensions", "1 1 1"))
                .with(AttributeSpec::int("level", "0"))
                .with(AttributeSpec::boolean("enabled", "true"))
                .with(AttributeSpec::string("mode", "x").required()),
        );
        let mut source = NodeInstance::initialize(Arc::clone(&node_type));
        source.set_string("DEF", "iso").unwrap();
        source.set_float("contourStepSize", 0.1).unwrap();
        source.set_numbers("dimensions", vec![64.0, 64.0, 32.5]).unwrap();
        source.set_int("level", -2).unwrap();
        source.set_bool("enabled", false).unwrap();

        let fragment = source.export();
        let markup = format!("<IsoSurfaceVolumeData{fragment}/>");
        let doc = roxmltree::Document::parse(&markup).unwrap();

        let mut target = NodeInstance::initialize(node_type);
        target.import_from(&doc.root_element());

        assert_eq!(target, source);
    }

    #[test]
    fn test_unescaped_by_default() {
        let mut node = NodeInstance::initialize(shader_type());
        node.set_string("DEF", "a<'b'>&").unwrap();

        assert_eq!(node.export(), " DEF='a<'b'>&' language=''");

        let options = ExportOptions {
            escape_values: true,
            ..Default::default()
        };
        assert_eq!(
            node.export_with(&options),
            " DEF='a&lt;&apos;b&apos;>&amp;' language=''"
        );
    }

    #[test]
    fn test_escaped_whitespace_survives_reimport() {
        let node_type = shader_type();
        let mut node = NodeInstance::initialize(Arc::clone(&node_type));
        node.set_string("DEF", "line one\n\tline two\r").unwrap();

        let options = ExportOptions {
            escape_values: true,
            ..Default::default()
        };
        let fragment = node.export_with(&options);
        assert_eq!(
            fragment,
            " DEF='line one&#10;&#9;line two&#13;' language=''"
        );

        let markup = format!("<ComposedShader{fragment}/>");
        let doc = roxmltree::Document::parse(&markup).unwrap();
        let mut reloaded = NodeInstance::initialize(node_type);
        reloaded.import_from(&doc.root_element());
        assert_eq!(reloaded, node);
    }

    #[test]
    fn test_include_defaults() {
        let node = NodeInstance::initialize(shader_type());
        let options = ExportOptions {
            include_defaults: true,
            ..Default::default()
        };
        assert_eq!(node.export_with(&options), " DEF='' USE='' language=''");
    }

    #[test]
    fn test_to_element() {
        let mut node = NodeInstance::initialize(toggle_type());
        assert_eq!(node.to_element(&ExportOptions::default()), "<BooleanToggle/>");

        node.set_bool("toggle", true).unwrap();
        assert_eq!(
            node.to_element(&ExportOptions::default()),
            "<BooleanToggle toggle='true'/>"
        );
    }

    #[test]
    fn test_to_element_with_body() {
        let node_type = Arc::new(
            NodeType::new("Script")
                .with(AttributeSpec::boolean("directOutput", "false"))
                .with_content(),
        );
        let mut node = NodeInstance::initialize(node_type);
        node.set_body(Some("ecmascript: function f() { return 1 < 2; }".to_string()));

        assert_eq!(
            node.to_element(&ExportOptions::default()),
            "<Script><![CDATA[ecmascript: function f() { return 1 < 2; }]]></Script>"
        );
    }

    #[test]
    fn test_body_with_cdata_terminator() {
        let doc = roxmltree::Document::parse("<Script>a ]]&gt; b</Script>").unwrap();
        let node_type = Arc::new(NodeType::new("Script").with_content());
        let mut node = NodeInstance::initialize(Arc::clone(&node_type));
        node.import_element(&crate::source::ParsedElement::from_node(doc.root_element()));
        assert_eq!(node.body(), Some("a ]]> b"));

        let element = node.to_element(&ExportOptions::default());
        assert_eq!(element, "<Script><![CDATA[a ]]]]><![CDATA[> b]]></Script>");

        let reparsed = roxmltree::Document::parse(&element).unwrap();
        let mut reloaded = NodeInstance::initialize(node_type);
        reloaded.import_element(&crate::source::ParsedElement::from_node(
            reparsed.root_element(),
        ));
        assert_eq!(reloaded.body(), Some("a ]]> b"));
    }
}
