//! Publish operation: render, pin, describe.

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;

use crate::article::render::iso_timestamp;
use crate::article::{metadata_symbol, render_html, render_markdown, ArticleDraft, FeaturedImage, PublishedArticle};
use crate::error::WorkflowResult;
use crate::metadata::{MetadataBuilder, MetadataUploader};
use crate::storage::{ContentStore, UploadFile};

pub const HTML_FILE_NAME: &str = "article.html";
pub const MARKDOWN_FILE_NAME: &str = "article.md";

/// Files produced from a draft, in upload order: HTML, Markdown, image.
pub fn build_artifacts(draft: &ArticleDraft, created_at: DateTime<Utc>) -> WorkflowResult<Vec<UploadFile>> {
    let mut files = vec![
        UploadFile::new(HTML_FILE_NAME, render_html(draft, created_at), "text/html"),
        UploadFile::new(MARKDOWN_FILE_NAME, render_markdown(draft, created_at), "text/markdown"),
    ];
    if let Some(uri) = draft.image.as_deref().filter(|i| !i.is_empty()) {
        let image = FeaturedImage::from_data_uri(uri)?;
        files.push(UploadFile::new(image.file_name, image.bytes, image.mime_type));
    }
    Ok(files)
}

/// Publish a draft and return its locators.
///
/// Artifacts are uploaded concurrently; the first failure fails the whole
/// operation and uploads that already finished are left in place.
pub async fn publish_article(
    draft: &ArticleDraft,
    created_at: DateTime<Utc>,
    store: &dyn ContentStore,
    uploader: &dyn MetadataUploader,
) -> WorkflowResult<PublishedArticle> {
    draft.validate()?;

    let files = build_artifacts(draft, created_at)?;
    tracing::info!(files = files.len(), "Uploading article files");
    let ids = try_join_all(files.into_iter().map(|file| store.upload(file))).await?;

    let (html_cid, markdown_cid) = (&ids[0], &ids[1]);
    let article_uri = html_cid.locator();
    let markdown_uri = markdown_cid.locator();
    let image_uri = ids.get(2).map(|id| id.locator());

    let created = iso_timestamp(created_at);
    let mut builder = MetadataBuilder::new()
        .with_name(draft.title.as_str())
        .with_symbol(metadata_symbol(&draft.title))
        .with_description(draft.excerpt.as_str())
        .with_properties([
            ("article_content", draft.content.clone()),
            ("article_excerpt", draft.excerpt.clone()),
            ("article_html_cid", html_cid.to_string()),
            ("article_markdown_cid", markdown_cid.to_string()),
            ("article_html_uri", article_uri.clone()),
            ("article_markdown_uri", markdown_uri.clone()),
            ("content_type", "article".to_string()),
            ("content_length", draft.content.chars().count().to_string()),
            ("created_at", created),
            ("mint_price", draft.mint_price.clone()),
        ])
        .with_media_uri(article_uri.as_str(), "text/html");
    if let Some(uri) = &image_uri {
        builder = builder.with_image_uri(uri.as_str());
    }

    let uploaded = uploader.upload(builder).await?;
    tracing::info!(
        html_cid = %html_cid,
        markdown_cid = %markdown_cid,
        metadata_uri = %uploaded.url,
        "Article published"
    );

    Ok(PublishedArticle {
        article_uri,
        markdown_uri,
        metadata_uri: uploaded.url,
        html_cid: html_cid.to_string(),
        markdown_cid: markdown_cid.to_string(),
        image_uri,
    })
}
