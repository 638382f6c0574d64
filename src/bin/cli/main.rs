mod app;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vellum-cli", about = "Git-backed content editor CLI", version)]
struct Cli {
    /// Output JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a directory of the repository
    Ls {
        /// Repository as owner/name
        repo: String,
        /// Directory path (default: repository root)
        path: Option<String>,
        /// Branch, tag, or commit to read from
        #[arg(long)]
        r#ref: Option<String>,
    },

    /// Show a file, decoded and parsed
    Show {
        /// Repository as owner/name
        repo: String,
        /// File path within the repository
        path: String,
        /// Branch, tag, or commit to read from
        #[arg(long)]
        r#ref: Option<String>,
        /// Print the raw record without decoding
        #[arg(long)]
        raw: bool,
    },

    /// Commit local files to the repository branch as one commit
    Commit {
        /// Repository as owner/name
        repo: String,
        /// Commit message
        #[arg(short, long)]
        message: String,
        /// Extended description
        #[arg(long)]
        description: Option<String>,
        /// Files to upload at their relative paths
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Ls { repo, path, r#ref } => {
            commands::ls::run(&repo, path.as_deref(), r#ref.as_deref(), cli.json).await
        }
        Command::Show {
            repo,
            path,
            r#ref,
            raw,
        } => commands::show::run(&repo, &path, r#ref.as_deref(), raw, cli.json).await,
        Command::Commit {
            repo,
            message,
            description,
            files,
        } => commands::commit::run(&repo, &message, description.as_deref(), &files, cli.json).await,
    }
}
