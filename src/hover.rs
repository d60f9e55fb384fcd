//! Hover targets - which field of an API object a cursor line points at.
//!
//! Given a manifest and a line number, builds the `Kind.field.path` string
//! that `resolve_path` or `kubectl explain` expects. Nesting is recovered by
//! scanning upward: by braces in JSON, by indentation in block-style YAML.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Markup of an editor document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLanguage {
    Json,
    Yaml,
}

impl DocumentLanguage {
    /// Map an editor language id (`json`, `yaml`, ...).
    pub fn from_language_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "json" | "jsonc" => Some(DocumentLanguage::Json),
            "yaml" | "yml" => Some(DocumentLanguage::Yaml),
            _ => None,
        }
    }

    /// Guess from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_language_id)
    }
}

/// Parse a manifest into a JSON value.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` or `LoadError::InvalidYaml`.
pub fn parse_document(text: &str, language: DocumentLanguage) -> Result<Value, LoadError> {
    match language {
        DocumentLanguage::Json => {
            serde_json::from_str(text).map_err(|source| LoadError::InvalidJson { source })
        }
        DocumentLanguage::Yaml => {
            serde_yaml::from_str(text).map_err(|source| LoadError::InvalidYaml { source })
        }
    }
}

/// The top-level `kind` of an API object, if it is one.
pub fn object_kind(document: &Value) -> Option<&str> {
    document
        .get("kind")
        .and_then(Value::as_str)
        .filter(|kind| !kind.is_empty())
}

/// The property named on a line: text from the first non-blank character
/// up to the first `:`, with JSON quoting removed.
pub fn property_at(line: &str) -> Option<String> {
    let colon = line.find(':')?;
    let raw = line[..colon].trim();
    let raw = raw.strip_prefix("- ").unwrap_or(raw).trim_start();

    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Some(
            serde_json::from_str::<String>(raw)
                .unwrap_or_else(|_| raw[1..raw.len() - 1].to_string()),
        );
    }
    Some(raw.to_string())
}

/// Line of the property that encloses `line`, searching upward.
///
/// Walks up until the `{` opening the current object, then to the nearest
/// line at or above it holding a `:`.
pub fn find_parent(lines: &[&str], line: usize) -> Option<usize> {
    let mut depth = 1;
    let mut opening = None;

    for idx in (0..line.min(lines.len())).rev() {
        let text = lines[idx];
        if text.contains('}') {
            depth += 1;
        }
        if text.contains('{') {
            depth -= 1;
            if depth == 0 {
                opening = Some(idx);
                break;
            }
        }
    }

    (0..=opening?).rev().find(|&idx| lines[idx].contains(':'))
}

/// Line of the YAML property that encloses `line`, searching upward.
///
/// The parent is the nearest line above with a smaller key column that
/// names a property. A `- ` list marker counts as indentation, so keys of
/// a list item sit under the property holding the list.
pub fn find_yaml_parent(lines: &[&str], line: usize) -> Option<usize> {
    let indent = yaml_key_column(lines.get(line)?);
    if indent == 0 {
        return None;
    }

    (0..line.min(lines.len())).rev().find(|&idx| {
        let text = lines[idx];
        let trimmed = text.trim_start();
        !trimmed.is_empty()
            && !trimmed.starts_with('#')
            && yaml_key_column(text) < indent
            && property_at(text).is_some()
    })
}

/// Column where a YAML line's key starts, past any `- ` list markers.
fn yaml_key_column(line: &str) -> usize {
    let mut column = line.len() - line.trim_start_matches(' ').len();
    let mut rest = &line[column..];
    while let Some(after) = rest.strip_prefix('-') {
        if !(after.is_empty() || after.starts_with(' ')) {
            break;
        }
        let spaces = after.len() - after.trim_start_matches(' ').len();
        column += 1 + spaces;
        rest = &after[spaces..];
    }
    column
}

/// Dotted path of the field on `line`, relative to the object's Kind.
///
/// Parents are found by brace nesting in JSON and by indentation in YAML.
/// Hovering `kind` itself yields an empty path.
pub fn field_path_at(text: &str, language: DocumentLanguage, line: usize) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let parent_of = |idx: usize| match language {
        DocumentLanguage::Json => find_parent(&lines, idx),
        DocumentLanguage::Yaml => find_yaml_parent(&lines, idx),
    };

    let mut field = property_at(lines.get(line)?)?;
    let mut parent = parent_of(line);
    while let Some(idx) = parent {
        let property = property_at(lines[idx])?;
        field = format!("{}.{}", property, field);
        parent = parent_of(idx);
    }

    if field == "kind" {
        field.clear();
    }
    Some(field)
}

/// `Kind` or `Kind.field.path`.
pub fn explain_reference(kind: &str, field: &str) -> String {
    if field.is_empty() {
        kind.to_string()
    } else {
        format!("{}.{}", kind, field)
    }
}

/// Full explain reference for the cursor line of a manifest.
///
/// `None` when the document does not parse, has no `kind`, or the line
/// names no property.
pub fn hover_reference(text: &str, language: DocumentLanguage, line: usize) -> Option<String> {
    let document = match parse_document(text, language) {
        Ok(document) => document,
        Err(err) => {
            tracing::debug!(error = %err, "hover document not parseable");
            return None;
        }
    };
    document_reference(&document, text, language, line)
}

/// Like `hover_reference`, for a manifest already parsed into `document`.
pub fn document_reference(
    document: &Value,
    text: &str,
    language: DocumentLanguage,
    line: usize,
) -> Option<String> {
    let kind = object_kind(document)?;
    let field = field_path_at(text, language, line)?;
    Some(explain_reference(kind, &field))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYMENT_JSON: &str = r#"{
    "apiVersion": "apps/v1",
    "kind": "Deployment",
    "metadata": {
        "name": "web",
        "annotations": {
            "team": "core"
        }
    },
    "spec": {
        "replicas": 3,
        "template": {
            "metadata": {},
            "spec": {
                "restartPolicy": "Always"
            }
        }
    }
}"#;

    #[test]
    fn language_ids() {
        assert_eq!(
            DocumentLanguage::from_language_id("json"),
            Some(DocumentLanguage::Json)
        );
        assert_eq!(
            DocumentLanguage::from_language_id("YAML"),
            Some(DocumentLanguage::Yaml)
        );
        assert_eq!(DocumentLanguage::from_language_id("rust"), None);
        assert_eq!(
            DocumentLanguage::from_path(Path::new("deploy.yml")),
            Some(DocumentLanguage::Yaml)
        );
    }

    #[test]
    fn property_at_variants() {
        assert_eq!(property_at(r#"    "name": "web","#).as_deref(), Some("name"));
        assert_eq!(property_at("  replicas: 3").as_deref(), Some("replicas"));
        assert_eq!(property_at("  - name: web").as_deref(), Some("name"));
        assert_eq!(property_at("    }"), None);
    }

    #[test]
    fn find_parent_skips_closed_siblings() {
        let lines: Vec<&str> = DEPLOYMENT_JSON.lines().collect();
        // "replicas" (line 10) sits in "spec" (line 9), after the closed "metadata" block.
        assert_eq!(find_parent(&lines, 10), Some(9));
        assert_eq!(find_parent(&lines, 9), None);
    }

    #[test]
    fn field_path_nested() {
        assert_eq!(
            field_path_at(DEPLOYMENT_JSON, DocumentLanguage::Json, 14).as_deref(),
            Some("spec.template.spec.restartPolicy")
        );
        assert_eq!(
            field_path_at(DEPLOYMENT_JSON, DocumentLanguage::Json, 6).as_deref(),
            Some("metadata.annotations.team")
        );
    }

    #[test]
    fn field_path_kind_is_empty() {
        assert_eq!(field_path_at(DEPLOYMENT_JSON, DocumentLanguage::Json, 2).as_deref(), Some(""));
    }

    #[test]
    fn hover_reference_json() {
        assert_eq!(
            hover_reference(DEPLOYMENT_JSON, DocumentLanguage::Json, 4).as_deref(),
            Some("Deployment.metadata.name")
        );
        assert_eq!(
            hover_reference(DEPLOYMENT_JSON, DocumentLanguage::Json, 2).as_deref(),
            Some("Deployment")
        );
    }

    #[test]
    fn hover_reference_yaml_top_level() {
        let yaml = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: web\n";
        assert_eq!(
            hover_reference(yaml, DocumentLanguage::Yaml, 2).as_deref(),
            Some("Pod.metadata")
        );
    }

    const DEPLOYMENT_YAML: &str = "apiVersion: apps/v1beta1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 2
  template:
    spec:
      containers:
      - name: app
        image: nginx
";

    #[test]
    fn yaml_key_columns() {
        assert_eq!(yaml_key_column("spec:"), 0);
        assert_eq!(yaml_key_column("    spec:"), 4);
        assert_eq!(yaml_key_column("      - name: app"), 8);
        assert_eq!(yaml_key_column("  - - x: 1"), 6);
        assert_eq!(yaml_key_column("  -"), 3);
    }

    #[test]
    fn find_yaml_parent_by_indentation() {
        let lines: Vec<&str> = DEPLOYMENT_YAML.lines().collect();
        assert_eq!(find_yaml_parent(&lines, 7), Some(6));
        assert_eq!(find_yaml_parent(&lines, 6), Some(4));
        assert_eq!(find_yaml_parent(&lines, 4), None);
        // "image" belongs to the list item under "containers".
        assert_eq!(find_yaml_parent(&lines, 10), Some(8));
    }

    #[test]
    fn hover_reference_yaml_nested() {
        let hover = |line| hover_reference(DEPLOYMENT_YAML, DocumentLanguage::Yaml, line);
        assert_eq!(hover(7).as_deref(), Some("Deployment.spec.template.spec"));
        assert_eq!(hover(3).as_deref(), Some("Deployment.metadata.name"));
        assert_eq!(
            hover(9).as_deref(),
            Some("Deployment.spec.template.spec.containers.name")
        );
        assert_eq!(
            hover(10).as_deref(),
            Some("Deployment.spec.template.spec.containers.image")
        );
        assert_eq!(hover(1).as_deref(), Some("Deployment"));
    }

    #[test]
    fn yaml_parent_skips_comments_and_blanks() {
        let yaml = "kind: Pod\nmetadata:\n\n  # labels follow\n  name: web\n";
        assert_eq!(
            hover_reference(yaml, DocumentLanguage::Yaml, 4).as_deref(),
            Some("Pod.metadata.name")
        );
    }

    #[test]
    fn document_reference_uses_parsed_value() {
        let document = parse_document(DEPLOYMENT_JSON, DocumentLanguage::Json).unwrap();
        assert_eq!(
            document_reference(&document, DEPLOYMENT_JSON, DocumentLanguage::Json, 4).as_deref(),
            Some("Deployment.metadata.name")
        );
    }

    #[test]
    fn hover_reference_requires_kind() {
        let json = "{\n  \"name\": \"x\"\n}";
        assert_eq!(hover_reference(json, DocumentLanguage::Json, 1), None);
    }

    #[test]
    fn hover_reference_invalid_document() {
        assert_eq!(hover_reference("{ nope", DocumentLanguage::Json, 0), None);
    }

    #[test]
    fn parse_document_yaml_error() {
        let result = parse_document("a: [unclosed", DocumentLanguage::Yaml);
        assert!(matches!(result, Err(LoadError::InvalidYaml { .. })));
    }
}
