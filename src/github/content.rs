use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::Value;

use crate::content::{detect, parse, ParsedContent};

use super::client::{GitHubClient, GitHubError};
use super::models::{ContentEntry, FileRecord};

/// What a contents lookup resolved to.
///
/// The API returns one of several shapes depending on what lives at the
/// path; this union makes the caller deal with each explicitly.
#[derive(Debug, Clone)]
pub enum Content {
    /// The path is a directory; entries are returned as listed.
    Directory(Vec<ContentEntry>),
    /// A file record, payload left in its wire encoding.
    RawFile(FileRecord),
    /// A file decoded from base64 and run through front-matter parsing.
    ParsedFile(ParsedContent),
    /// Symlink and submodule records pass through untouched.
    SymlinkOrSubmodule(FileRecord),
}

impl GitHubClient {
    /// Fetch a file or directory listing at `path` on `git_ref` (the
    /// default branch when `None`).
    ///
    /// Directories, symlinks, and submodules come back as the API sent
    /// them whatever `parse_file` says. A file with a non-empty base64
    /// payload is decoded and parsed only when `parse_file` is true.
    /// Read-only: no side effects on the repository.
    pub async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
        parse_file: bool,
    ) -> Result<Content, GitHubError> {
        let mut url = format!("repos/{owner}/{repo}/contents/{}", encode_path(path));
        if let Some(git_ref) = git_ref {
            url.push_str("?ref=");
            url.push_str(&urlencoding::encode(git_ref));
        }

        let payload: Value = self.get_json(&url).await?;

        if payload.is_array() {
            let entries: Vec<ContentEntry> = serde_json::from_value(payload)?;
            log::debug!("get_content: {owner}/{repo}:{path} is a directory with {} entries", entries.len());
            return Ok(Content::Directory(entries));
        }

        let record: FileRecord = serde_json::from_value(payload)?;
        if record.entry_type != "file" {
            log::debug!("get_content: {owner}/{repo}:{path} is a {}", record.entry_type);
            return Ok(Content::SymlinkOrSubmodule(record));
        }

        let has_payload = record.encoding.as_deref() == Some("base64")
            && record.content.as_deref().is_some_and(|c| !c.trim().is_empty());
        if !parse_file || !has_payload {
            return Ok(Content::RawFile(record));
        }

        let encoded = record.content.as_deref().unwrap_or_default();
        let text = decode_base64_text(encoded)?;
        let kind = detect(&text, extension_of(&record.name));
        let parsed = parse(&text, kind)?;
        log::debug!("get_content: {owner}/{repo}:{path} parsed as {:?}", parsed.fm_type);

        Ok(Content::ParsedFile(parsed))
    }
}

/// Decode a base64 payload from the contents API into UTF-8 text.
///
/// The API wraps base64 at 60 columns, so embedded whitespace is stripped
/// before decoding.
fn decode_base64_text(encoded: &str) -> Result<String, GitHubError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| GitHubError::Decode(format!("invalid base64 payload: {e}")))?;
    String::from_utf8(bytes).map_err(|e| GitHubError::Decode(format!("payload is not UTF-8: {e}")))
}

/// Percent-encode a repository path segment by segment, keeping the
/// separators so the API still sees a path.
fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// File extension including the dot, or empty for extensionless names.
fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|i| &name[i..]).unwrap_or("")
}
