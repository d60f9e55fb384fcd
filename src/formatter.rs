//! Reformatting of `kubectl explain` text output into markdown.
//!
//! Three output shapes are recognized by their first header: `FIELD` (a
//! single field), `DESCRIPTION` (a kind without resource header) and
//! `RESOURCE` (a full resource listing). Anything else passes through
//! untouched, tagged as JSON.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Header tokens that get emphasized when they start a line.
const HEADERS: &[&str] = &["FIELD:", "FIELDS:", "DESCRIPTION:", "RESOURCE:"];

/// Result of formatting explain output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FormattedExplain {
    /// Unrecognized input, shown verbatim.
    Raw(String),
    /// Reformatted explain text.
    Markdown(String),
}

impl FormattedExplain {
    pub fn as_str(&self) -> &str {
        match self {
            FormattedExplain::Raw(text) | FormattedExplain::Markdown(text) => text,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            FormattedExplain::Raw(text) | FormattedExplain::Markdown(text) => text,
        }
    }

    /// Language tag for code-block rendering of pass-through text.
    pub fn language(&self) -> Option<&'static str> {
        match self {
            FormattedExplain::Raw(_) => Some("json"),
            FormattedExplain::Markdown(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, FormattedExplain::Raw(_))
    }
}

/// Which line grammar a multi-section output follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grammar {
    Description,
    Resource,
}

/// Line parser state for `DESCRIPTION` and `RESOURCE` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Headers before the field list.
    Init,
    /// Indented body under a resource's `DESCRIPTION:` header.
    DescriptionBody,
    /// Between fields, waiting for a `name <type>` line.
    FieldsNone,
    /// After a field's name line, before its first description line.
    FieldFirst,
    /// Inside a field description.
    FieldRest,
}

impl ParserState {
    /// Consume one line, pushing its output, and return the next state.
    fn step(self, grammar: Grammar, line: &str, out: &mut Vec<String>) -> ParserState {
        match self {
            ParserState::Init => {
                let formatted = embolden_header(line);
                if is_fields_header(&formatted) {
                    out.push(formatted);
                    out.push(String::new());
                    ParserState::FieldsNone
                } else if grammar == Grammar::Resource && formatted.starts_with("**DESCRIPTION") {
                    out.push(formatted);
                    ParserState::DescriptionBody
                } else {
                    out.push(formatted);
                    ParserState::Init
                }
            }
            ParserState::DescriptionBody => {
                let formatted = embolden_header(line).trim_start().to_string();
                let fields = is_fields_header(&formatted);
                out.push(formatted);
                if fields {
                    out.push(String::new());
                    ParserState::FieldsNone
                } else {
                    ParserState::DescriptionBody
                }
            }
            ParserState::FieldsNone => {
                let formatted = embolden_field_name(line.trim_start());
                let named = formatted.starts_with("**");
                out.push(formatted);
                if named {
                    ParserState::FieldFirst
                } else {
                    ParserState::FieldsNone
                }
            }
            ParserState::FieldFirst => {
                if line.is_empty() {
                    return ParserState::FieldFirst;
                }
                out.push(String::new());
                out.push(line.trim_start().to_string());
                ParserState::FieldRest
            }
            ParserState::FieldRest => {
                if line.is_empty() {
                    out.push(String::new());
                    return ParserState::FieldsNone;
                }
                out.push(line.trim_start().to_string());
                ParserState::FieldRest
            }
        }
    }
}

/// Reformat raw `kubectl explain` output.
///
/// Empty input and input not starting with `FIELD`, `DESCRIPTION` or
/// `RESOURCE` come back as `FormattedExplain::Raw`, unchanged.
pub fn format_explain(raw: &str) -> FormattedExplain {
    if raw.is_empty() {
        return FormattedExplain::Raw(String::new());
    }

    let normalized = raw.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let formatted = if raw.starts_with("FIELD") {
        format_field(&lines)
    } else if raw.starts_with("DESCRIPTION") {
        format_sections(Grammar::Description, &lines)
    } else if raw.starts_with("RESOURCE") {
        format_sections(Grammar::Resource, &lines)
    } else {
        tracing::trace!("explain output has no recognized header; passing through");
        return FormattedExplain::Raw(raw.to_string());
    };

    FormattedExplain::Markdown(formatted)
}

/// Single-field output: emphasize headers, drop indentation.
fn format_field(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| embolden_header(line).trim_start().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_sections(grammar: Grammar, lines: &[&str]) -> String {
    let mut out = Vec::with_capacity(lines.len() * 2);
    let mut state = ParserState::Init;
    for line in lines {
        state = state.step(grammar, line, &mut out);
    }
    out.join("\n")
}

fn is_fields_header(line: &str) -> bool {
    line.starts_with("**FIELD")
}

/// Wrap a leading `FIELD:`, `FIELDS:`, `DESCRIPTION:` or `RESOURCE:` in `**`.
pub fn embolden_header(line: &str) -> String {
    for header in HEADERS {
        if let Some(rest) = line.strip_prefix(header) {
            return format!("**{}**{}", header, rest);
        }
    }
    line.to_string()
}

/// Emphasize the name in a `name <type>` field line.
///
/// A trailing `-required-` marker becomes `**[required]**`. Lines of any
/// other shape are returned as-is.
pub fn embolden_field_name(line: &str) -> String {
    let Some(caps) = field_line_regex().captures(line) else {
        return line.to_string();
    };

    let name = &caps[1];
    let formatted = format!("**{}**{}", name, &line[name.len()..]);
    if caps.get(3).is_some() {
        formatted.replacen("-required-", "**[required]**", 1)
    } else {
        formatted
    }
}

fn field_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_]+)\s+<(\[\])?[A-Za-z0-9_]+>(\s+-required-)?$")
            .expect("valid regex")
    })
}
