//! Front-matter parsing

use serde::Serialize;
use serde_yaml::Value;

const DELIMITER: &str = "---";

/// Metadata block at the top of a content file
///
/// Every field is best-effort: a key that is missing, null, or holds a
/// sequence or mapping comes back as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub summary: String,
    pub label: String,
    pub author: String,
    pub published: String,
    pub image: String,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    ///
    /// Only a block that is not valid YAML is an error. A file without a
    /// block yields default metadata and the whole file as body.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some((yaml, body)) = split_block(content) else {
            return Ok((FrontMatter::default(), content));
        };

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let value: Value = serde_yaml::from_str(yaml)?;
        Ok((Self::from_value(&value), body))
    }

    fn from_value(value: &Value) -> Self {
        let mut fm = FrontMatter::default();

        let Value::Mapping(map) = value else {
            tracing::debug!("Front-matter is not a mapping, using defaults");
            return fm;
        };

        for (key, value) in map {
            let slot = match key.as_str() {
                Some("title") => &mut fm.title,
                Some("summary") => &mut fm.summary,
                Some("label") => &mut fm.label,
                Some("author") => &mut fm.author,
                Some("published") => &mut fm.published,
                Some("image") => &mut fm.image,
                _ => continue,
            };
            *slot = scalar_to_string(value);
        }

        fm
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves
///
/// The opening delimiter must be the first line of the file. The closing
/// delimiter is the next line consisting of `---` alone.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix(DELIMITER)?;
    let rest = strip_line_break(rest)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    // No closing ---, treat as no front-matter
    None
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}

/// String form of a YAML scalar; empty for anything that is not one
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}
