use anyhow::{bail, Result};

use vellum::Content;

use crate::app::App;

pub async fn run(
    repo: &str,
    path: &str,
    git_ref: Option<&str>,
    raw: bool,
    json: bool,
) -> Result<()> {
    let app = App::new(repo)?;

    let content = app
        .client
        .get_content(&app.config.owner, &app.config.repo, path, git_ref, !raw)
        .await?;

    match content {
        Content::ParsedFile(parsed) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                for (key, value) in &parsed.matter {
                    println!("{key}: {value}");
                }
                if !parsed.matter.is_empty() {
                    println!();
                }
                print!("{}", parsed.body);
            }
            Ok(())
        }
        Content::RawFile(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{} ({} bytes, sha {})", record.path, record.size, record.sha);
                if let Some(content) = record.content {
                    print!("{content}");
                }
            }
            Ok(())
        }
        Content::SymlinkOrSubmodule(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else if let Some(target) = record.target {
                println!("{} -> {}", record.path, target);
            } else if let Some(url) = record.submodule_git_url {
                println!("{} => submodule {}", record.path, url);
            } else {
                println!("{} ({})", record.path, record.entry_type);
            }
            Ok(())
        }
        Content::Directory(_) => bail!("'{path}' is a directory; use ls"),
    }
}
