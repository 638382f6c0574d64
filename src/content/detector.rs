use serde::{Deserialize, Serialize};

/// Front-matter convention detected at the head of a file.
///
/// Serializes to the lowercase tag the editor sees as `fmType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontMatterKind {
    Yaml,
    Toml,
    Json,
    None,
}

/// Detect which front-matter convention a file uses.
///
/// The leading fence line wins (`---json`, `+++`, `---`); without a fence
/// the file extension decides whether the whole file is a structured
/// document (`.json`, `.yaml`/`.yml`, `.toml`). Absence of front matter is
/// a normal outcome, never an error.
pub fn detect(content: &str, extension: &str) -> FrontMatterKind {
    let content = content.trim_start_matches('\u{feff}');
    let first_line = content.lines().next().unwrap_or("").trim_end();
    match first_line {
        "---json" => return FrontMatterKind::Json,
        "+++" => return FrontMatterKind::Toml,
        "---" => return FrontMatterKind::Yaml,
        _ => {}
    }

    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "json" => FrontMatterKind::Json,
        "yaml" | "yml" => FrontMatterKind::Yaml,
        "toml" => FrontMatterKind::Toml,
        _ => FrontMatterKind::None,
    }
}
