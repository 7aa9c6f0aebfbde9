use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};
use url::Url;

use crate::error::{Error, Result};

/// Resource-type hint for the object store: images get an image
/// pipeline, everything else is stored raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Image,
    Raw,
}

impl StorageKind {
    pub fn for_content_type(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            StorageKind::Image
        } else {
            StorageKind::Raw
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Image => "image",
            StorageKind::Raw => "raw",
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Client for the external file-hosting collaborator. Uploads return a
/// stable URL; deletes take the asset id embedded in that URL.
#[derive(Clone)]
pub struct StorageClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl StorageClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("failed to build storage HTTP client");
        Self {
            base_url,
            api_key,
            client,
        }
    }

    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
        kind: StorageKind,
    ) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| Error::BadRequest(format!("Unsupported content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/v1/files", self.base_url))
            .query(&[("kind", kind.as_str())])
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "storage upload request failed");
                Error::Storage(format!("Upload request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "Storage rejected upload with status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::Storage(format!("Malformed upload response: {}", e)))?;
        info!(file_name, url = %body.url, "uploaded file to storage");
        Ok(body.url)
    }

    pub async fn delete(&self, storage_url: &str, kind: StorageKind) -> Result<()> {
        let Some(asset_id) = extract_asset_id(storage_url) else {
            // Nothing sensible to delete; log and move on rather than
            // blocking the row removal.
            tracing::warn!(url = storage_url, "could not extract asset id from URL");
            return Ok(());
        };

        let response = self
            .client
            .delete(format!("{}/v1/files/{}", self.base_url, asset_id))
            .query(&[("kind", kind.as_str())])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Delete request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "Storage rejected delete with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Pull the asset id out of a storage URL: the last path segment with
/// its extension stripped.
fn extract_asset_id(storage_url: &str) -> Option<String> {
    let parsed = Url::parse(storage_url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let id = match segment.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => segment,
    };
    Some(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_id_strips_extension() {
        assert_eq!(
            extract_asset_id("https://files.example.com/docs/ab12cd34.pdf").as_deref(),
            Some("ab12cd34")
        );
    }

    #[test]
    fn asset_id_without_extension_is_kept_whole() {
        assert_eq!(
            extract_asset_id("https://files.example.com/docs/ab12cd34").as_deref(),
            Some("ab12cd34")
        );
    }

    #[test]
    fn garbage_url_yields_none() {
        assert_eq!(extract_asset_id("not a url"), None);
    }

    #[test]
    fn kind_follows_content_type() {
        assert_eq!(
            StorageKind::for_content_type("image/png"),
            StorageKind::Image
        );
        assert_eq!(
            StorageKind::for_content_type("application/pdf"),
            StorageKind::Raw
        );
    }
}
