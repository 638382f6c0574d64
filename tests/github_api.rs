//! Read-path and commit-pipeline tests against a local stub of the GitHub
//! API that records every request body it sees.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{json, Value};

use vellum::{Content, FileEdit, FrontMatterKind, GitHubClient, GitHubError};

const HEAD_SHA: &str = "6dcb09b5b57875f334f61aebed695e2e4193db5e";
const TREE_SHA: &str = "9fb037999f264ba9a7fc6274d15fa3ae2ab98312";
const COMMIT_SHA: &str = "7638417db6d59f3c431d3e1f261cc637155684cd";

const POST_MD: &str = "---\ntitle: Hello\n---\n# Body text\n";

/// The contents API wraps base64 payloads; mimic that.
fn wrapped_post_md() -> String {
    let encoded = BASE64.encode(POST_MD);
    let (a, b) = encoded.split_at(encoded.len() / 2);
    format!("{a}\n{b}\n")
}

#[derive(Default)]
struct Recorded {
    blobs: Vec<Value>,
    trees: Vec<Value>,
    commits: Vec<Value>,
    refs: Vec<Value>,
}

#[derive(Clone, Default)]
struct Stub {
    recorded: Arc<Mutex<Recorded>>,
    missing_ref: bool,
}

impl Stub {
    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap()
    }
}

async fn start(stub: Stub) -> String {
    let app = Router::new()
        .route("/repos/{owner}/{repo}/git/ref/{*refname}", get(get_ref))
        .route("/repos/{owner}/{repo}/git/blobs", post(create_blob))
        .route("/repos/{owner}/{repo}/git/trees", post(create_tree))
        .route("/repos/{owner}/{repo}/git/commits", post(create_commit))
        .route("/repos/{owner}/{repo}/git/refs/{*refname}", patch(update_ref))
        .route("/repos/{owner}/{repo}/contents/{*path}", get(get_contents))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn client(base_url: &str) -> GitHubClient {
    GitHubClient::with_base_url(base_url.to_string(), Some("test-token".to_string())).unwrap()
}

async fn get_ref(
    State(stub): State<Stub>,
    Path((_owner, _repo, refname)): Path<(String, String, String)>,
) -> Response {
    if stub.missing_ref {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response();
    }
    Json(json!({
        "ref": format!("refs/{refname}"),
        "object": {"sha": HEAD_SHA, "type": "commit", "url": "http://localhost/commit"}
    }))
    .into_response()
}

async fn create_blob(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.recorded().blobs.push(body.clone());
    let content = body["content"].as_str().unwrap_or_default();
    if content == "boom" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "blob rejected"})),
        )
            .into_response();
    }
    Json(json!({"sha": format!("blob:{content}"), "url": null})).into_response()
}

async fn create_tree(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.recorded().trees.push(body);
    Json(json!({"sha": TREE_SHA, "tree": []})).into_response()
}

async fn create_commit(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.recorded().commits.push(body.clone());
    let parents: Vec<Value> = body["parents"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|sha| json!({"sha": sha}))
        .collect();
    Json(json!({
        "sha": COMMIT_SHA,
        "message": body["message"],
        "tree": {"sha": body["tree"]},
        "parents": parents,
    }))
    .into_response()
}

async fn update_ref(
    State(stub): State<Stub>,
    Path((_owner, repo, refname)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    stub.recorded()
        .refs
        .push(json!({"refname": refname, "body": body.clone()}));
    Json(json!({
        "ref": format!("refs/heads/{repo}"),
        "object": {"sha": body["sha"], "type": "commit", "url": "http://localhost/commit"}
    }))
    .into_response()
}

async fn get_contents(
    Path((_owner, _repo, path)): Path<(String, String, String)>,
) -> Response {
    match path.as_str() {
        "docs" => Json(json!([
            {
                "name": "post.md",
                "path": "docs/post.md",
                "sha": "a1b2c3",
                "size": 42,
                "type": "file"
            },
            {
                "name": "drafts",
                "path": "docs/drafts",
                "sha": "d4e5f6",
                "size": 0,
                "type": "dir"
            }
        ]))
        .into_response(),
        "post.md" => Json(json!({
            "name": "post.md",
            "path": "post.md",
            "sha": "a1b2c3",
            "size": POST_MD.len(),
            "type": "file",
            "content": wrapped_post_md(),
            "encoding": "base64"
        }))
        .into_response(),
        "link" => Json(json!({
            "name": "link",
            "path": "link",
            "sha": "0f0f0f",
            "size": 12,
            "type": "symlink",
            "target": "docs/post.md"
        }))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response(),
    }
}

#[tokio::test]
async fn read_directory_listing_passes_through() {
    let base = start(Stub::default()).await;

    // parse requested, but directories come back as listed
    let content = client(&base)
        .get_content("octo", "demo", "docs", None, true)
        .await
        .unwrap();

    match content {
        Content::Directory(entries) => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].path, "docs/post.md");
            assert_eq!(entries[1].entry_type, "dir");
        }
        other => panic!("expected directory, got {other:?}"),
    }
}

#[tokio::test]
async fn read_file_raw_keeps_encoded_payload() {
    let base = start(Stub::default()).await;

    let content = client(&base)
        .get_content("octo", "demo", "post.md", Some("main"), false)
        .await
        .unwrap();

    match content {
        Content::RawFile(record) => {
            assert_eq!(record.content.as_deref(), Some(wrapped_post_md().as_str()));
            assert_eq!(record.encoding.as_deref(), Some("base64"));
        }
        other => panic!("expected raw file, got {other:?}"),
    }
}

#[tokio::test]
async fn read_file_parsed_decodes_and_splits_front_matter() {
    let base = start(Stub::default()).await;

    let content = client(&base)
        .get_content("octo", "demo", "post.md", None, true)
        .await
        .unwrap();

    match content {
        Content::ParsedFile(parsed) => {
            assert_eq!(parsed.fm_type, FrontMatterKind::Yaml);
            assert_eq!(parsed.matter["title"], json!("Hello"));
            assert_eq!(parsed.body, "# Body text\n");
        }
        other => panic!("expected parsed file, got {other:?}"),
    }
}

#[tokio::test]
async fn read_symlink_passes_through() {
    let base = start(Stub::default()).await;

    let content = client(&base)
        .get_content("octo", "demo", "link", None, true)
        .await
        .unwrap();

    match content {
        Content::SymlinkOrSubmodule(record) => {
            assert_eq!(record.entry_type, "symlink");
            assert_eq!(record.target.as_deref(), Some("docs/post.md"));
        }
        other => panic!("expected symlink record, got {other:?}"),
    }
}

#[tokio::test]
async fn read_missing_path_surfaces_status_and_message() {
    let base = start(Stub::default()).await;

    let err = client(&base)
        .get_content("octo", "demo", "missing.md", None, true)
        .await
        .unwrap_err();

    match err {
        GitHubError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn commit_pipeline_creates_blobs_tree_commit_and_ref() {
    let stub = Stub::default();
    let base = start(stub.clone()).await;

    let encoded_md = BASE64.encode("# Hello");
    let files = vec![
        FileEdit {
            path: "post.md".to_string(),
            content: encoded_md.clone(),
        },
        FileEdit {
            path: "config.yaml".to_string(),
            content: "retries: 3\n".to_string(),
        },
    ];

    let commit = client(&base)
        .update_files("octo", "demo", &files, "Update content", Some("nightly edit"))
        .await
        .unwrap();
    assert_eq!(commit.sha, COMMIT_SHA);

    let recorded = stub.recorded();

    // one blob per file; markup is labelled base64, plain text is not
    assert_eq!(recorded.blobs.len(), 2);
    let md_blob = recorded
        .blobs
        .iter()
        .find(|b| b["content"] == json!(encoded_md))
        .expect("markup blob not uploaded");
    assert_eq!(md_blob["encoding"], json!("base64"));
    let yaml_blob = recorded
        .blobs
        .iter()
        .find(|b| b["content"] == json!("retries: 3\n"))
        .expect("plain blob not uploaded");
    assert!(yaml_blob.get("encoding").is_none());

    // one tree on top of the head, carrying every blob sha
    assert_eq!(recorded.trees.len(), 1);
    let tree = &recorded.trees[0];
    assert_eq!(tree["base_tree"], json!(HEAD_SHA));
    let entries = tree["tree"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    let md_entry = entries.iter().find(|e| e["path"] == json!("post.md")).unwrap();
    assert_eq!(md_entry["mode"], json!("100644"));
    assert_eq!(md_entry["type"], json!("blob"));
    assert_eq!(md_entry["sha"], json!(format!("blob:{encoded_md}")));
    let yaml_entry = entries
        .iter()
        .find(|e| e["path"] == json!("config.yaml"))
        .unwrap();
    assert_eq!(yaml_entry["sha"], json!("blob:retries: 3\n"));

    // one commit, single parent, pointing at the created tree
    assert_eq!(recorded.commits.len(), 1);
    let commit_body = &recorded.commits[0];
    assert_eq!(commit_body["message"], json!("Update content"));
    assert_eq!(commit_body["description"], json!("nightly edit"));
    assert_eq!(commit_body["tree"], json!(TREE_SHA));
    assert_eq!(commit_body["parents"], json!([HEAD_SHA]));

    // ref force-updated to the commit the API returned
    assert_eq!(recorded.refs.len(), 1);
    assert_eq!(recorded.refs[0]["refname"], json!("heads/demo"));
    assert_eq!(recorded.refs[0]["body"]["sha"], json!(COMMIT_SHA));
    assert_eq!(recorded.refs[0]["body"]["force"], json!(true));
}

#[tokio::test]
async fn blob_failure_aborts_before_tree_commit_and_ref() {
    let stub = Stub::default();
    let base = start(stub.clone()).await;

    let files = vec![
        FileEdit {
            path: "ok.txt".to_string(),
            content: "fine".to_string(),
        },
        FileEdit {
            path: "bad.txt".to_string(),
            content: "boom".to_string(),
        },
    ];

    let err = client(&base)
        .update_files("octo", "demo", &files, "msg", None)
        .await
        .unwrap_err();

    match err {
        GitHubError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "blob rejected");
        }
        other => panic!("expected API error, got {other:?}"),
    }

    let recorded = stub.recorded();
    assert!(recorded.trees.is_empty());
    assert!(recorded.commits.is_empty());
    assert!(recorded.refs.is_empty());
}

#[tokio::test]
async fn missing_branch_aborts_before_any_blob() {
    let stub = Stub {
        missing_ref: true,
        ..Stub::default()
    };
    let base = start(stub.clone()).await;

    let files = vec![FileEdit {
        path: "a.txt".to_string(),
        content: "x".to_string(),
    }];

    let err = client(&base)
        .update_files("octo", "demo", &files, "msg", None)
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::RefNotFound(ref name) if name == "heads/demo"));
    assert!(stub.recorded().blobs.is_empty());
}

#[tokio::test]
async fn fast_forward_variant_sends_force_false() {
    let stub = Stub::default();
    let base = start(stub.clone()).await;

    let files = vec![FileEdit {
        path: "a.txt".to_string(),
        content: "x".to_string(),
    }];

    client(&base)
        .update_files_fast_forward("octo", "demo", &files, "msg", None)
        .await
        .unwrap();

    let recorded = stub.recorded();
    assert_eq!(recorded.refs.len(), 1);
    assert_eq!(recorded.refs[0]["body"]["force"], json!(false));
}

#[tokio::test]
async fn empty_batch_is_rejected_up_front() {
    let base = start(Stub::default()).await;

    let err = client(&base)
        .update_files("octo", "demo", &[], "msg", None)
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::EmptyBatch));
}
