mod client;
mod commit;
mod content;
mod models;

pub use client::{GitHubClient, GitHubError};
pub use commit::FileEdit;
pub use content::Content;
pub use models::{
    BlobRecord, CommitParent, CommitRecord, CommitTree, ContentEntry, FileRecord, GitObject,
    GitRef, TreeEntry, TreeRecord,
};

pub(crate) use client::DEFAULT_API_BASE;
