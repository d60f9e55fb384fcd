//! English noun singularization for field and kind names.
//!
//! Users write `containers`, `Deployments`, `ingresses`; schemas sometimes
//! store the singular. This covers the noun shapes that occur in API field
//! names, not English at large.

/// Plural to singular, lowercase.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("mice", "mouse"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("criteria", "criterion"),
    ("aliases", "alias"),
    ("statuses", "status"),
];

/// Words whose plural and singular coincide (or that only look plural).
const UNINFLECTED: &[&str] = &[
    "data",
    "metadata",
    "series",
    "species",
    "news",
    "info",
    "kubernetes",
    "stats",
    "metrics",
];

/// Suffix rules, first match wins: (plural suffix, singular suffix).
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("uses", "us"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("ies", "y"),
];

/// Singular form of `word`, preserving the casing of the untouched prefix.
///
/// Returns the input unchanged when it does not look plural.
pub fn singularize(word: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `word`.
    let lower = word.to_ascii_lowercase();

    if UNINFLECTED.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return match_case(word, singular);
    }

    for (plural, singular) in SUFFIX_RULES {
        if lower.len() > plural.len() && lower.ends_with(plural) {
            let stem = &word[..word.len() - plural.len()];
            return format!("{}{}", stem, singular);
        }
    }

    if lower.len() > 1
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

/// Singularize only the component after the last `.` of `name`.
pub fn singularize_trailing(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((head, tail)) => format!("{}.{}", head, singularize(tail)),
        None => singularize(name),
    }
}

/// Carry a leading capital over from `original` to `replacement`.
fn match_case(original: &str, replacement: &str) -> String {
    let capitalized = original
        .chars()
        .next()
        .map(char::is_uppercase)
        .unwrap_or(false);

    if !capitalized {
        return replacement.to_string();
    }

    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
