//! Kubernetes API field explainer
//!
//! Documentation lookup for fields of Kubernetes API objects.
//!
//! Two independent pieces:
//!
//! - **Field-path resolution**: walk a swagger document's `definitions` along a
//!   dotted path such as `Deployment.metadata.annotations` and render markdown
//!   describing the field.
//! - **Explain formatting**: turn the text printed by `kubectl explain` into
//!   markdown with emphasized headers and field names.
//!
//! # Example
//!
//! ```
//! use kube_explain::read_explanation;
//! use serde_json::json;
//!
//! let swagger = json!({
//!     "definitions": {
//!         "v1.ConfigMap": {
//!             "description": "ConfigMap holds configuration data.",
//!             "properties": {
//!                 "immutable": {
//!                     "description": "Immutable, if set, prevents updates.",
//!                     "type": "boolean"
//!                 }
//!             }
//!         }
//!     }
//! });
//!
//! let text = read_explanation(&swagger, "configmap.immutable");
//! assert!(text.starts_with("**immutable** (boolean)"));
//!
//! let text = read_explanation(&swagger, "ConfigMap.biscuits");
//! assert_eq!(text, "**biscuits:** field does not exist");
//! ```
//!
//! # Resolution Rules
//!
//! | Field shape | Result |
//! |-------------|--------|
//! | `$ref` to a type with `properties` | Complex: field + type description + properties |
//! | `$ref` to a typed alias | Simple: alias type, field description |
//! | inline `properties` | Complex: field description + properties |
//! | anything else | Simple: `type` (`x[]` for arrays, default `object`) |
//!
//! Path segments past a Simple field are ignored.

mod error;
mod formatter;
mod hover;
mod inflect;
mod loader;
mod path;
mod resolver;
mod types;

pub use error::{ExplainError, LoadError};
pub use formatter::{embolden_field_name, embolden_header, format_explain, FormattedExplain};
pub use hover::{
    document_reference, explain_reference, field_path_at, find_parent, find_yaml_parent,
    hover_reference, object_kind, parse_document, property_at, DocumentLanguage,
};
pub use inflect::{singularize, singularize_trailing};
pub use loader::{is_url, load_schema, load_schema_auto, load_schema_str, navigate_ref, read_text};
pub use path::FieldPath;
pub use resolver::{read_explanation, read_explanation_with, resolve_path};
pub use types::{
    ExplainOptions, Explanation, PropertySummary, TypeDefinition, DEFAULT_API_VERSIONS,
};

#[cfg(feature = "remote")]
pub use loader::load_schema_url;
