//! Pinata client against a mock pinning API.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use article_minter::config::ContentStoreConfig;
use article_minter::error::WorkflowError;
use article_minter::metadata::StoreMetadataUploader;
use article_minter::storage::{ContentStore, PinataStore, StoreError, UploadFile};
use article_minter::workflow::{publish_article, ArticleWorkflow, MintSettings, WorkflowState};
use chrono::{TimeZone, Utc};

mod common;

fn store_for(backend: &common::MockBackend, jwt: Option<&str>) -> PinataStore {
    let config = ContentStoreConfig {
        api_url: backend.url(),
        jwt: jwt.map(str::to_string),
        ..ContentStoreConfig::default()
    };
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    PinataStore::new(&config, client)
}

#[tokio::test]
async fn test_upload_sends_multipart_with_bearer() {
    let backend = common::start_mock_backend(200, r#"{"IpfsHash":"bafyhtml","PinSize":42}"#).await;
    let store = store_for(&backend, Some("test-jwt"));

    let id = store
        .upload(UploadFile::new("article.html", "<h1>Hi</h1>", "text/html"))
        .await
        .unwrap();
    assert_eq!(id.as_str(), "bafyhtml");
    assert_eq!(id.locator(), "ipfs://bafyhtml");

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/pinning/pinFileToIPFS");
    assert_eq!(request.header("authorization"), Some("Bearer test-jwt"));
    assert!(request
        .header("content-type")
        .unwrap_or_default()
        .starts_with("multipart/form-data"));

    let body = request.body_text();
    assert!(body.contains(r#"name="file"; filename="article.html""#));
    assert!(body.contains("<h1>Hi</h1>"));
    assert!(body.contains(r#"{"name":"article.html"}"#));
    assert!(body.contains(r#"{"cidVersion":1}"#));
}

#[tokio::test]
async fn test_unauthorized_is_reported_with_api_message() {
    let backend = common::start_mock_backend(401, r#"{"error":{"reason":"INVALID_CREDENTIALS","details":"Invalid token"}}"#).await;
    let store = store_for(&backend, Some("bad-jwt"));

    let err = store
        .upload(UploadFile::new("article.md", "# Hi", "text/markdown"))
        .await
        .unwrap_err();
    match &err {
        StoreError::Unauthorized { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid token");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejection_and_unknown_error() {
    let backend = common::start_mock_backend(400, r#"{"error":"Invalid file"}"#).await;
    let store = store_for(&backend, Some("jwt"));
    let err = store
        .upload(UploadFile::new("article.md", "x", "text/markdown"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Content store rejected upload (400): Invalid file");

    let backend = common::start_mock_backend(500, "not json").await;
    let store = store_for(&backend, Some("jwt"));
    let err = store
        .upload(UploadFile::new("article.md", "x", "text/markdown"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Content store rejected upload (500): Unknown error");
}

#[tokio::test]
async fn test_missing_hash_is_response_error() {
    let backend = common::start_mock_backend(200, r#"{"PinSize":1}"#).await;
    let store = store_for(&backend, Some("jwt"));
    let err = store
        .upload(UploadFile::new("metadata.json", "{}", "application/json"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Response(_)));
}

#[tokio::test]
async fn test_publish_through_pinata_uploads_every_artifact() {
    let counter = Arc::new(AtomicU32::new(0));
    let c = counter.clone();
    let backend = common::start_programmable_backend(move |_| {
        let n = c.fetch_add(1, Ordering::SeqCst);
        async move { (200, format!(r#"{{"IpfsHash":"bafy{}"}}"#, n)) }
    })
    .await;
    let store = Arc::new(store_for(&backend, Some("jwt")));
    let uploader = StoreMetadataUploader::new(store.clone());

    let created_at = Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
    let published = publish_article(&common::hello_world_draft(), created_at, store.as_ref(), &uploader)
        .await
        .unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 3);
    assert!(published.article_uri.starts_with("ipfs://bafy"));
    assert!(published.markdown_uri.starts_with("ipfs://bafy"));
    assert_ne!(published.article_uri, published.markdown_uri);

    let names: Vec<String> = backend
        .requests()
        .iter()
        .map(|r| r.body_text())
        .filter_map(|body| {
            ["article.html", "article.md", "metadata.json"]
                .into_iter()
                .find(|name| body.contains(&format!(r#"filename="{}""#, name)))
                .map(str::to_string)
        })
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"metadata.json".to_string()));
    let metadata_request = backend
        .requests()
        .into_iter()
        .find(|r| r.body_text().contains(r#"filename="metadata.json""#))
        .unwrap();
    assert!(metadata_request.body_text().contains(&published.article_uri));
}

#[tokio::test]
async fn test_authorization_failure_returns_to_editing() {
    let backend = common::start_mock_backend(401, r#"{"error":"Invalid authentication credentials"}"#).await;
    let store: Arc<dyn ContentStore> = Arc::new(store_for(&backend, Some("revoked")));
    let uploader = Arc::new(StoreMetadataUploader::new(store.clone()));
    let mut workflow = ArticleWorkflow::new(store, uploader, MintSettings::default());
    workflow.set_draft(common::hello_world_draft()).unwrap();

    let err = workflow.publish().await.unwrap_err();
    assert!(matches!(err, WorkflowError::Upload(_)));
    assert!(err.to_string().contains("Invalid authentication credentials"));
    assert_eq!(workflow.state(), WorkflowState::Editing);
    assert!(workflow.published().is_none());
    assert_eq!(workflow.draft(), &common::hello_world_draft());
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let backend = common::start_mock_backend(200, r#"{"IpfsHash":"bafy"}"#).await;
    let store: Arc<dyn ContentStore> = Arc::new(store_for(&backend, None));
    let uploader = Arc::new(StoreMetadataUploader::new(store.clone()));
    let mut workflow = ArticleWorkflow::new(store, uploader, MintSettings::default());
    workflow.set_draft(common::hello_world_draft()).unwrap();

    let err = workflow.publish().await.unwrap_err();
    assert!(matches!(err, WorkflowError::Configuration(_)));
    assert!(backend.requests().is_empty());
}
