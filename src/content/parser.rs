use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::detector::FrontMatterKind;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON front matter: {0}")]
    Json(#[from] serde_json::Error),
    #[error("front matter block is never closed")]
    Unterminated,
    #[error("front matter is not a mapping")]
    NotAMapping,
}

/// A decoded file: front-matter fields plus the remaining body.
///
/// YAML and TOML mappings are normalized to JSON values so the editor
/// always sees one shape, tagged with the convention it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContent {
    /// Front-matter fields, flattened into the document.
    #[serde(flatten)]
    pub matter: Map<String, Value>,
    /// Document body with the front-matter block stripped.
    pub body: String,
    /// Which convention was detected.
    pub fm_type: FrontMatterKind,
}

/// Split front matter from body and deserialize it per `kind`.
///
/// Files with no front matter come back whole as the body. Fenceless
/// structured documents (`.json`/`.yaml`/`.toml` whole files) parse the
/// entire content as the mapping with an empty body. A block that is
/// present but malformed for its kind is an error; the raw content is never
/// returned as a fallback.
pub fn parse(content: &str, kind: FrontMatterKind) -> Result<ParsedContent, ParseError> {
    let content = content.trim_start_matches('\u{feff}');

    let (matter, body) = match kind {
        FrontMatterKind::None => (Map::new(), content),
        FrontMatterKind::Yaml => match split_fenced(content, "---", "---")? {
            Some((block, body)) => (parse_yaml_block(block)?, body),
            None => (parse_yaml_block(content)?, ""),
        },
        FrontMatterKind::Toml => match split_fenced(content, "+++", "+++")? {
            Some((block, body)) => (parse_toml_block(block)?, body),
            None => (parse_toml_block(content)?, ""),
        },
        FrontMatterKind::Json => match split_fenced(content, "---json", "---")? {
            Some((block, body)) => (parse_json_block(block)?, body),
            None => (parse_json_block(content)?, ""),
        },
    };

    Ok(ParsedContent {
        matter,
        body: body.to_string(),
        fm_type: kind,
    })
}

/// Split a fenced front-matter block from the body.
///
/// `Ok(None)` when the content does not open with `open` (whole-file
/// documents); `Unterminated` when the opening fence has no closing fence.
fn split_fenced<'a>(
    content: &'a str,
    open: &str,
    close: &str,
) -> Result<Option<(&'a str, &'a str)>, ParseError> {
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if first.trim_end() != open {
        return Ok(None);
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == close {
            let block = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return Ok(Some((block, body)));
        }
        offset += line.len();
    }

    Err(ParseError::Unterminated)
}

fn parse_yaml_block(block: &str) -> Result<Map<String, Value>, ParseError> {
    if block.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_yaml::from_str(block)?;
    into_mapping(value)
}

fn parse_toml_block(block: &str) -> Result<Map<String, Value>, ParseError> {
    let value: Value = toml::from_str(block)?;
    into_mapping(value)
}

fn parse_json_block(block: &str) -> Result<Map<String, Value>, ParseError> {
    if block.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_str(block)?;
    into_mapping(value)
}

fn into_mapping(value: Value) -> Result<Map<String, Value>, ParseError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(ParseError::NotAMapping),
    }
}
