pub mod config;
pub mod content;
pub mod github;

pub use config::EditorConfig;
pub use content::{detect, parse, FrontMatterKind, ParseError, ParsedContent};
pub use github::{Content, FileEdit, GitHubClient, GitHubError};
