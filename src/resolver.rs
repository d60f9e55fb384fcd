//! Field-path resolution - walks a swagger definition graph to document a field.

use serde_json::{Map, Value};

use crate::error::ExplainError;
use crate::inflect::{singularize, singularize_trailing};
use crate::loader::navigate_ref;
use crate::path::FieldPath;
use crate::types::{ExplainOptions, Explanation, PropertySummary, TypeDefinition};

/// Resolve a dotted field path (e.g. `Deployment.metadata.generation`).
///
/// The first segment names a Kind, looked up under `definitions` with each
/// of `options.api_versions` as prefix. Every later segment descends one
/// property, following `$ref` (or `items.$ref`) indirection on the way.
///
/// A field without nested properties ends the walk: trailing segments past
/// a primitive or an unstructured map are ignored, matching `kubectl explain`.
///
/// # Errors
///
/// Returns `ExplainError` when the Kind or a field is missing, or a `$ref`
/// points nowhere.
pub fn resolve_path(
    schema: &Value,
    path: &str,
    options: &ExplainOptions,
) -> Result<Explanation, ExplainError> {
    let path = FieldPath::parse(path);
    let (kind_name, kind_definition) = find_kind(schema, &path.kind, options)?;

    let mut name = kind_name;
    let mut current = TypeDefinition::new(kind_definition);
    let mut remaining = path.fields.iter();

    // Each iteration consumes one segment, so self-referencing schemas
    // still terminate.
    loop {
        let (properties, type_description) = match current.indirection() {
            Some(reference) => {
                tracing::trace!(field = %name, reference, "following type reference");
                let resolved = navigate_ref(schema, reference)
                    .map(TypeDefinition::new)
                    .ok_or_else(|| ExplainError::UnresolvableTypeReference {
                        field: name.clone(),
                        reference: reference.to_string(),
                    })?;

                match resolved.properties() {
                    Some(properties) => {
                        let description = Some(resolved.description())
                            .filter(|d| !d.is_empty())
                            .map(String::from);
                        (properties, description)
                    }
                    // Reference to a typed alias: terminal, described by the
                    // referring field.
                    None => {
                        return Ok(Explanation::Simple {
                            name,
                            type_description: resolved.type_description(),
                            description: current.description().to_string(),
                        })
                    }
                }
            }
            None => match current.properties() {
                Some(properties) => (properties, None),
                None => {
                    return Ok(Explanation::Simple {
                        name,
                        type_description: current.type_description(),
                        description: current.description().to_string(),
                    })
                }
            },
        };

        let Some(segment) = remaining.next() else {
            return Ok(Explanation::Complex {
                name,
                description: current.description().to_string(),
                type_description,
                properties: summarize(properties),
            });
        };

        let (field_name, child) =
            find_property(properties, segment).ok_or_else(|| ExplainError::FieldNotFound {
                field: segment.clone(),
            })?;

        name = field_name;
        current = TypeDefinition::new(child);
    }
}

/// Documentation text for `path`, using the default options.
///
/// Never fails: errors are rendered as `**{segment}:** {message}`.
pub fn read_explanation(schema: &Value, path: &str) -> String {
    read_explanation_with(schema, path, &ExplainOptions::default())
}

/// Documentation text for `path` with explicit options.
pub fn read_explanation_with(schema: &Value, path: &str, options: &ExplainOptions) -> String {
    match resolve_path(schema, path, options) {
        Ok(explanation) => explanation.to_string(),
        Err(err) => {
            tracing::debug!(path, error = %err, "field path not resolved");
            err.render()
        }
    }
}

// --- Internal implementation ---

/// Find the Kind's definition, returning its canonical name and node.
///
/// Retries once with the singular form, so `deployments` finds `Deployment`.
fn find_kind<'a>(
    schema: &'a Value,
    kind: &str,
    options: &ExplainOptions,
) -> Result<(String, &'a Value), ExplainError> {
    let not_found = || ExplainError::KindNotFound {
        kind: kind.to_string(),
    };

    if kind.is_empty() {
        return Err(not_found());
    }

    let definitions = schema
        .get("definitions")
        .and_then(Value::as_object)
        .ok_or_else(not_found)?;

    if let Some(found) = lookup_kind(definitions, kind, &options.api_versions) {
        return Ok(found);
    }

    let singular = singularize(kind);
    if singular == kind {
        return Err(not_found());
    }

    tracing::debug!(kind, singular = %singular, "retrying kind lookup with singular form");
    lookup_kind(definitions, &singular, &options.api_versions).ok_or_else(not_found)
}

/// Match `<version>.<Kind>` keys, or fully qualified keys ending in
/// `.<version>.<Kind>`, case-insensitively. Versions are tried in order.
fn lookup_kind<'a>(
    definitions: &'a Map<String, Value>,
    kind: &str,
    versions: &[String],
) -> Option<(String, &'a Value)> {
    for version in versions {
        let short = format!("{}.{}", version, kind).to_ascii_lowercase();
        let qualified = format!(".{}", short);

        let exact = definitions
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(&short));
        let found = exact.or_else(|| {
            definitions
                .iter()
                .find(|(key, _)| key.to_ascii_lowercase().ends_with(&qualified))
        });

        if let Some((key, definition)) = found {
            tracing::debug!(kind, definition = %key, "kind resolved");
            let canonical = key.rsplit_once('.').map_or(key.as_str(), |(_, name)| name);
            return Some((canonical.to_string(), definition));
        }
    }
    None
}

/// Look up `segment` among `properties`, case-insensitively.
///
/// Falls back once to the singularized segment. The returned name is the
/// segment as matched (after normalization).
fn find_property<'a>(
    properties: &'a Map<String, Value>,
    segment: &str,
) -> Option<(String, &'a Value)> {
    if let Some(child) = lookup_ignore_case(properties, segment) {
        return Some((segment.to_string(), child));
    }

    let singular = singularize_trailing(segment);
    if singular == segment {
        return None;
    }

    tracing::debug!(segment, singular = %singular, "retrying field lookup with singular form");
    lookup_ignore_case(properties, &singular).map(|child| (singular, child))
}

/// Keys are compared with ASCII case folding; swagger property names are ASCII.
fn lookup_ignore_case<'a>(properties: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    properties.get(key).or_else(|| {
        properties
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}

fn summarize(properties: &Map<String, Value>) -> Vec<PropertySummary> {
    properties
        .iter()
        .map(|(name, value)| PropertySummary::from_definition(name, TypeDefinition::new(value)))
        .collect()
}
