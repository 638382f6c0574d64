use anyhow::{bail, Result};

use vellum::Content;

use crate::app::App;

pub async fn run(repo: &str, path: Option<&str>, git_ref: Option<&str>, json: bool) -> Result<()> {
    let app = App::new(repo)?;
    let path = path.unwrap_or("");

    let content = app
        .client
        .get_content(&app.config.owner, &app.config.repo, path, git_ref, false)
        .await?;

    match content {
        Content::Directory(entries) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!("{:<48} {:>9}  {}", entry.path, entry.size, entry.entry_type);
                }
            }
            Ok(())
        }
        _ => bail!("'{}' is not a directory", if path.is_empty() { "/" } else { path }),
    }
}
