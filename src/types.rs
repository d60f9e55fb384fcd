//! Core types for field-path explanation.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Version prefixes tried, in order, when looking up a Kind.
pub const DEFAULT_API_VERSIONS: &[&str] = &["v1", "v1beta1"];

/// Borrowed view of a schema node.
///
/// Schema documents stay as `serde_json::Value` (insertion ordered); this
/// wrapper gives the node's swagger attributes names.
#[derive(Debug, Clone, Copy)]
pub struct TypeDefinition<'a> {
    node: &'a Value,
}

impl<'a> TypeDefinition<'a> {
    pub fn new(node: &'a Value) -> Self {
        Self { node }
    }

    /// Human text, empty when the node has none.
    pub fn description(&self) -> &'a str {
        self.node
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// The raw `type` tag.
    pub fn type_name(&self) -> Option<&'a str> {
        self.node.get("type").and_then(Value::as_str)
    }

    /// The node's own `$ref`.
    pub fn reference(&self) -> Option<&'a str> {
        self.node.get("$ref").and_then(Value::as_str)
    }

    pub fn items(&self) -> Option<TypeDefinition<'a>> {
        self.node
            .get("items")
            .filter(|items| items.is_object())
            .map(TypeDefinition::new)
    }

    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.node.get("properties").and_then(Value::as_object)
    }

    /// Type indirection: `$ref`, or `items.$ref` for arrays of references.
    pub fn indirection(&self) -> Option<&'a str> {
        self.reference()
            .or_else(|| self.items().and_then(|items| items.reference()))
    }

    /// Effective type text: `<item>[]` for arrays, otherwise the `type` tag,
    /// defaulting to `object`.
    pub fn type_description(&self) -> String {
        match self.type_name() {
            Some("array") => {
                let item = self
                    .items()
                    .map(|items| items.type_description())
                    .unwrap_or_else(|| "object".to_string());
                format!("{}[]", item)
            }
            Some(other) => other.to_string(),
            None => "object".to_string(),
        }
    }
}

/// Options for field-path explanation.
#[derive(Debug, Clone)]
pub struct ExplainOptions {
    /// Version prefixes tried in order when looking up the Kind.
    pub api_versions: Vec<String>,
}

impl ExplainOptions {
    /// Options with the default version search order (`v1`, then `v1beta1`).
    pub fn new() -> Self {
        Self {
            api_versions: DEFAULT_API_VERSIONS.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Replace the version search order. An empty list keeps the defaults.
    pub fn api_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let versions: Vec<String> = versions.into_iter().map(Into::into).collect();
        if !versions.is_empty() {
            self.api_versions = versions;
        }
        self
    }
}

impl Default for ExplainOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// One child property in a complex explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySummary {
    pub name: String,
    pub type_description: String,
    pub description: String,
}

impl PropertySummary {
    pub fn from_definition(name: &str, definition: TypeDefinition<'_>) -> Self {
        Self {
            name: name.to_string(),
            type_description: definition.type_description(),
            description: definition.description().to_string(),
        }
    }
}

/// Documentation for a resolved field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Explanation {
    /// Terminal field without nested structure.
    Simple {
        name: String,
        type_description: String,
        description: String,
    },
    /// Object-shaped field, listed with its properties.
    Complex {
        name: String,
        description: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        type_description: Option<String>,
        properties: Vec<PropertySummary>,
    },
}

impl Explanation {
    pub fn name(&self) -> &str {
        match self {
            Explanation::Simple { name, .. } | Explanation::Complex { name, .. } => name,
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::Simple {
                name,
                type_description,
                description,
            } => write!(f, "**{}** ({})\n\n{}", name, type_description, description),
            Explanation::Complex {
                name,
                description,
                type_description,
                properties,
            } => {
                write!(f, "{}: {}", name, description)?;
                if let Some(type_description) = type_description {
                    write!(f, "\n\n{}", type_description)?;
                }
                f.write_str("\n\n")?;
                for property in properties {
                    write!(
                        f,
                        "**{}** ({})\n\n{}\n\n",
                        property.name, property.type_description, property.description
                    )?;
                }
                Ok(())
            }
        }
    }
}
