//! Schema provider: the table of known node types
//!
//! The builtin table covers a handful of X3D nodes. A user table in RON
//! form can be loaded and merged over it:
//!
//! ```ron
//! (
//!     node_types: [
//!         (
//!             element_name: "IntegerTrigger",
//!             attributes: [
//!                 (name: "integerKey", default: "-1", value_type: Int),
//!             ],
//!         ),
//!     ],
//! )
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::node::NodeInstance;
use crate::schema::{AttributeSpec, NodeType, Normalizer};

/// On-disk form of a catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    node_types: Vec<NodeType>,
}

/// Ordered, name-indexed set of node types shared by all instances
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    node_types: Vec<Arc<NodeType>>,
    index: HashMap<String, usize>,
}

impl SchemaCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate or invalid declarations
    pub fn from_node_types(node_types: Vec<NodeType>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for node_type in node_types {
            validate_node_type(&node_type)?;
            if catalog.contains(&node_type.element_name) {
                return Err(CatalogError::DuplicateElement(node_type.element_name));
            }
            catalog.insert(node_type);
        }
        Ok(catalog)
    }

    /// Parse a catalog from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            ron::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_node_types(file.node_types)
    }

    /// Load a catalog from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let catalog = Self::from_ron_str(&text)?;
        tracing::info!("Loaded {} node types from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Serialize the catalog to pretty RON
    pub fn to_ron_string(&self) -> Result<String, CatalogError> {
        let file = CatalogFile {
            node_types: self.node_types.iter().map(|t| t.as_ref().clone()).collect(),
        };
        ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::default())
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Add a node type, replacing (in place) any type with the same element name
    pub fn insert(&mut self, node_type: NodeType) -> Option<Arc<NodeType>> {
        let node_type = Arc::new(node_type);
        match self.index.get(&node_type.element_name) {
            Some(&i) => Some(std::mem::replace(&mut self.node_types[i], node_type)),
            None => {
                self.index
                    .insert(node_type.element_name.clone(), self.node_types.len());
                self.node_types.push(node_type);
                None
            }
        }
    }

    /// Overlay `other` onto this catalog; its types win on name clashes
    pub fn merge(&mut self, other: SchemaCatalog) {
        for node_type in other.node_types {
            let node_type = Arc::unwrap_or_clone(node_type);
            let name = node_type.element_name.clone();
            if self.insert(node_type).is_some() {
                tracing::debug!("<{}> overridden by merged catalog", name);
            }
        }
    }

    pub fn get(&self, element_name: &str) -> Option<&Arc<NodeType>> {
        self.index.get(element_name).map(|&i| &self.node_types[i])
    }

    pub fn contains(&self, element_name: &str) -> bool {
        self.index.contains_key(element_name)
    }

    pub fn len(&self) -> usize {
        self.node_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty()
    }

    /// Node types in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<NodeType>> {
        self.node_types.iter()
    }

    /// Fresh instance of a known node type, initialized to defaults
    pub fn instantiate(&self, element_name: &str) -> Option<NodeInstance> {
        self.get(element_name)
            .map(|t| NodeInstance::initialize(Arc::clone(t)))
    }

    /// The bundled X3D node table
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for node_type in builtin_node_types() {
            catalog.insert(node_type);
        }
        catalog
    }
}

/// Check one declaration: unique attribute names, parseable defaults
pub fn validate_node_type(node_type: &NodeType) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for spec in &node_type.attributes {
        if !seen.insert(spec.name.as_str()) {
            return Err(CatalogError::DuplicateAttribute {
                element: node_type.element_name.clone(),
                attribute: spec.name.clone(),
            });
        }
        if !spec.value_type.accepts(&spec.default) {
            return Err(CatalogError::InvalidDefault {
                element: node_type.element_name.clone(),
                attribute: spec.name.clone(),
                default: spec.default.clone(),
                value_type: spec.value_type,
            });
        }
    }
    Ok(())
}

/// DEF and USE lead every node's attribute list
fn node(element_name: &str) -> NodeType {
    NodeType::new(element_name)
        .with(AttributeSpec::string("DEF", ""))
        .with(AttributeSpec::string("USE", ""))
}

fn builtin_node_types() -> Vec<NodeType> {
    vec![
        node("BooleanToggle").with(AttributeSpec::boolean("toggle", "false")),
        node("IntegerTrigger").with(AttributeSpec::int("integerKey", "-1")),
        node("ComposedShader").with(AttributeSpec::string("language", "").required()),
        node("ShaderPart")
            .with(AttributeSpec::string("type", "VERTEX"))
            .with(AttributeSpec::string("url", "")),
        node("Script")
            .with(AttributeSpec::boolean("directOutput", "false"))
            .with(AttributeSpec::boolean("mustEvaluate", "false"))
            .with(AttributeSpec::string("url", ""))
            .with_content(),
        node("TextureCoordinateGenerator")
            .with(AttributeSpec::string("mode", "SPHERE"))
            .with(AttributeSpec::string("parameter", "").normalized(Normalizer::EvenTokenCount)),
        node("ToneMappedVolumeStyle")
            .with(AttributeSpec::boolean("enabled", "true"))
            .with(AttributeSpec::numbers("coolColor", "0 0 1 0"))
            .with(AttributeSpec::numbers("warmColor", "1 1 0 0")),
        node("BlendedVolumeStyle")
            .with(AttributeSpec::boolean("enabled", "true"))
            .with(AttributeSpec::float("weightConstant1", "0.5"))
            .with(AttributeSpec::float("weightConstant2", "0.5"))
            .with(AttributeSpec::string("weightFunction1", "CONSTANT"))
            .with(AttributeSpec::string("weightFunction2", "CONSTANT")),
        node("IsoSurfaceVolumeData")
            .with(AttributeSpec::float("contourStepSize", "0"))
            .with(AttributeSpec::numbers("dimensions", "1 1 1"))
            .with(AttributeSpec::float("surfaceTolerance", "0"))
            .with(AttributeSpec::numbers("surfaceValues", "")),
    ]
}
