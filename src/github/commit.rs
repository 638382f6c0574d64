use futures_util::future::try_join_all;

use super::client::{GitHubClient, GitHubError};
use super::models::{
    BlobRecord, CommitRecord, GitRef, NewBlob, NewCommit, NewTree, RefUpdate, TreeEntry,
    TreeRecord,
};

/// One file to write in the next commit.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEdit {
    /// Repository-relative path.
    pub path: String,
    /// Full new content. Markup files (`.md`, `.mdx`) are expected to
    /// carry base64; everything else plain text. The pipeline picks the
    /// upload encoding from the path, not the caller.
    pub content: String,
}

/// Markup files are shipped base64 so binary-embedding content survives.
fn is_markup(path: &str) -> bool {
    path.ends_with(".md") || path.ends_with(".mdx")
}

impl GitHubClient {
    /// Publish `files` as one commit on `heads/<repo>` and advance the
    /// branch to it.
    ///
    /// Five stages, each depending on the last: resolve the branch head,
    /// create one blob per file (all in flight at once, fail-fast), build
    /// a tree on top of the head's tree, create the commit, force-update
    /// the ref. A failure at any stage aborts the rest; blobs or trees
    /// already created are left for the store's garbage collection.
    ///
    /// The ref update is last-writer-wins: the head is read once up front
    /// and overwritten at the end with no compare-and-swap, so a commit
    /// racing on the same branch is silently discarded. Use
    /// [`update_files_fast_forward`](Self::update_files_fast_forward) when
    /// that must be an error instead.
    pub async fn update_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[FileEdit],
        message: &str,
        description: Option<&str>,
    ) -> Result<CommitRecord, GitHubError> {
        self.commit_files(owner, repo, files, message, description, true)
            .await
    }

    /// Same pipeline with `force: false`: the API rejects the ref update
    /// unless the new commit is a fast-forward of the current head, so a
    /// racing sibling commit surfaces as an error instead of being lost.
    pub async fn update_files_fast_forward(
        &self,
        owner: &str,
        repo: &str,
        files: &[FileEdit],
        message: &str,
        description: Option<&str>,
    ) -> Result<CommitRecord, GitHubError> {
        self.commit_files(owner, repo, files, message, description, false)
            .await
    }

    async fn commit_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[FileEdit],
        message: &str,
        description: Option<&str>,
        force: bool,
    ) -> Result<CommitRecord, GitHubError> {
        if files.is_empty() {
            return Err(GitHubError::EmptyBatch);
        }

        // 1. Resolve the branch head; its commit is the sole parent.
        let parent = self.branch_head(owner, repo).await?;
        log::debug!("update_files: head of {owner}/{repo} is {parent}");

        // 2. One blob per edit, all concurrent. try_join_all aborts the
        // whole batch on the first failure, so no partial blob set ever
        // reaches the tree stage.
        let blobs: Vec<BlobRecord> = try_join_all(
            files
                .iter()
                .map(|file| self.create_blob(owner, repo, file)),
        )
        .await?;

        // 3. Tree on top of the parent's tree; paths not in the batch
        // carry over unchanged.
        let entries: Vec<TreeEntry> = files
            .iter()
            .zip(&blobs)
            .map(|(file, blob)| TreeEntry::blob(file.path.as_str(), blob.sha.as_str()))
            .collect();
        let tree: TreeRecord = self
            .post_json(
                &format!("repos/{owner}/{repo}/git/trees"),
                &NewTree {
                    tree: &entries,
                    base_tree: &parent,
                },
            )
            .await?;

        // 4. The commit itself.
        let parents = [parent.clone()];
        let commit: CommitRecord = self
            .post_json(
                &format!("repos/{owner}/{repo}/git/commits"),
                &NewCommit {
                    message,
                    tree: &tree.sha,
                    parents: &parents,
                    description,
                },
            )
            .await?;

        // 5. Advance the branch ref to the new commit.
        let _: GitRef = self
            .patch_json(
                &format!("repos/{owner}/{repo}/git/refs/heads/{repo}"),
                &RefUpdate {
                    sha: &commit.sha,
                    force,
                },
            )
            .await?;

        log::info!(
            "update_files: {owner}/{repo} advanced to {} ({} file(s))",
            commit.sha,
            files.len()
        );

        Ok(commit)
    }

    async fn branch_head(&self, owner: &str, repo: &str) -> Result<String, GitHubError> {
        let path = format!("repos/{owner}/{repo}/git/ref/heads/{repo}");
        match self.get_json::<GitRef>(&path).await {
            Ok(git_ref) => Ok(git_ref.object.sha),
            Err(GitHubError::Api { status: 404, .. }) => {
                Err(GitHubError::RefNotFound(format!("heads/{repo}")))
            }
            Err(e) => Err(e),
        }
    }

    async fn create_blob(
        &self,
        owner: &str,
        repo: &str,
        file: &FileEdit,
    ) -> Result<BlobRecord, GitHubError> {
        let encoding = (is_markup(&file.path) && !file.content.is_empty()).then_some("base64");
        self.post_json(
            &format!("repos/{owner}/{repo}/git/blobs"),
            &NewBlob {
                content: &file.content,
                encoding,
            },
        )
        .await
    }
}
