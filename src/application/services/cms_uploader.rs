use std::sync::Arc;

use serde_json::{Value, json};

use crate::application::ports::{
    Clock, ContentStore, ContentStoreError, ImageDownloadError, ImageDownloader,
};
use crate::domain::{FetchedImage, GeneratedContent, PublishConfig, RowInput, UploadedAsset, slugify};

use super::markdown_blocks::{markdown_to_blocks, new_key};

pub struct CmsUploader<S>
where
    S: ContentStore,
{
    content_store: Arc<S>,
    image_downloader: Arc<dyn ImageDownloader>,
    clock: Arc<dyn Clock>,
}

impl<S> CmsUploader<S>
where
    S: ContentStore,
{
    pub fn new(
        content_store: Arc<S>,
        image_downloader: Arc<dyn ImageDownloader>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            content_store,
            image_downloader,
            clock,
        }
    }

    pub async fn upload_image(&self, image: &FetchedImage) -> Result<UploadedAsset, CmsUploadError> {
        let downloaded = self
            .image_downloader
            .download(&image.url)
            .await
            .map_err(CmsUploadError::ImageDownload)?;

        let filename = format!("{}.{}", image.id, extension_for(&downloaded.content_type));
        let asset = self
            .content_store
            .upload_image(downloaded.data, &filename, &downloaded.content_type)
            .await
            .map_err(CmsUploadError::ImageUpload)?;

        tracing::info!(asset_id = %asset.id, image_id = %image.id, "Uploaded image asset");
        Ok(asset)
    }

    /// Creates the article document, resolving author and category references first.
    pub async fn create_article(
        &self,
        row: &RowInput,
        content: &GeneratedContent,
        asset: Option<&UploadedAsset>,
        config: &PublishConfig,
    ) -> Result<String, CmsUploadError> {
        let author_name = non_empty(row.author_name.as_deref())
            .or_else(|| non_empty(config.default_author.as_deref()));
        let category = non_empty(row.category.as_deref())
            .or_else(|| non_empty(config.default_category.as_deref()));

        let author_id = match author_name {
            Some(name) => Some(self.upsert_by_lookup("author", "name", name).await?),
            None => None,
        };
        let category_id = match category {
            Some(title) => Some(self.upsert_by_lookup("category", "title", title).await?),
            None => None,
        };

        let mut document = json!({
            "_type": "post",
            "title": content.title,
            "slug": { "_type": "slug", "current": content.slug },
            "excerpt": content.meta_description,
            "tags": content.tags,
            "body": markdown_to_blocks(&content.content),
        });

        if let Some(id) = author_id {
            document["author"] = reference(&id);
        }
        if let Some(id) = category_id {
            let mut category_ref = reference(&id);
            category_ref["_key"] = Value::String(new_key());
            document["categories"] = json!([category_ref]);
        }
        if let Some(asset) = asset {
            document["mainImage"] = json!({
                "_type": "image",
                "asset": reference(&asset.id),
                "alt": content.title,
            });
        }
        if config.publish_immediately {
            document["publishedAt"] = Value::String(self.clock.now().to_rfc3339());
        }

        let id = self
            .content_store
            .create(document)
            .await
            .map_err(CmsUploadError::ArticleCreate)?;

        tracing::info!(
            document_id = %id,
            slug = %content.slug,
            published = config.publish_immediately,
            "Created article document"
        );
        Ok(id)
    }

    /// Query-then-create; not atomic, so two concurrent writers can both create.
    async fn upsert_by_lookup(
        &self,
        doc_type: &'static str,
        field: &'static str,
        value: &str,
    ) -> Result<String, CmsUploadError> {
        let lookup_err = |source| CmsUploadError::Reference { doc_type, source };

        if let Some(id) = self
            .content_store
            .find_id(doc_type, field, value)
            .await
            .map_err(lookup_err)?
        {
            return Ok(id);
        }

        let slug = match slugify(value) {
            slug if !slug.is_empty() => slug,
            _ => new_key(),
        };
        let mut document = json!({
            "_type": doc_type,
            "slug": { "_type": "slug", "current": slug },
        });
        document[field] = Value::String(value.to_string());

        let id = self
            .content_store
            .create(document)
            .await
            .map_err(lookup_err)?;

        tracing::info!(doc_type, id = %id, value = %value, "Created referenced document");
        Ok(id)
    }
}

fn reference(id: &str) -> Value {
    json!({ "_type": "reference", "_ref": id })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type.split(';').next().map(str::trim) {
        Some("image/png") => "png",
        Some("image/webp") => "webp",
        Some("image/gif") => "gif",
        _ => "jpg",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CmsUploadError {
    #[error("image download failed: {0}")]
    ImageDownload(ImageDownloadError),
    #[error("image upload failed: {0}")]
    ImageUpload(ContentStoreError),
    #[error("{doc_type} lookup failed: {source}")]
    Reference {
        doc_type: &'static str,
        source: ContentStoreError,
    },
    #[error("article creation failed: {0}")]
    ArticleCreate(ContentStoreError),
}
