use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use vellum::FileEdit;

use crate::app::App;

pub async fn run(
    repo: &str,
    message: &str,
    description: Option<&str>,
    files: &[PathBuf],
    json: bool,
) -> Result<()> {
    if files.is_empty() {
        bail!("no files given");
    }

    let app = App::new(repo)?;

    let mut edits = Vec::with_capacity(files.len());
    for file in files {
        edits.push(read_edit(file)?);
    }

    let commit = app
        .client
        .update_files(&app.config.owner, &app.config.repo, &edits, message, description)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&commit)?);
    } else {
        println!("committed {} file(s) as {}", edits.len(), commit.sha);
    }
    Ok(())
}

/// Read one local file into a `FileEdit` at its own relative path. Markup
/// files are base64-encoded here; the pipeline labels them on upload.
fn read_edit(file: &Path) -> Result<FileEdit> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    let path = file
        .to_string_lossy()
        .trim_start_matches("./")
        .to_string();

    let content = if path.ends_with(".md") || path.ends_with(".mdx") {
        BASE64.encode(&bytes)
    } else {
        String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", file.display()))?
    };

    Ok(FileEdit { path, content })
}
