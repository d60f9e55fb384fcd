//! Dotted field paths such as `Deployment.metadata.annotations`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A Kind followed by the property names descending from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    pub kind: String,
    pub fields: Vec<String>,
}

impl FieldPath {
    /// Split a dotted path. Segments are trimmed and empty ones dropped,
    /// so `"Deployment..spec."` is `Deployment` / `spec`.
    pub fn parse(path: &str) -> Self {
        let mut segments = path
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from);

        let kind = segments.next().unwrap_or_default();
        Self {
            kind,
            fields: segments.collect(),
        }
    }

    /// True when the path names only a Kind.
    pub fn is_kind(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromStr for FieldPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)?;
        for field in &self.fields {
            write!(f, ".{}", field)?;
        }
        Ok(())
    }
}
