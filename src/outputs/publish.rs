//! Delivering the announcement.
//!
//! [`WebhookPublisher`] posts a `multipart/form-data` body to a configured
//! endpoint: one `text` part and one `media` file part per picture. The
//! endpoint is expected to relay it to the social account; credentials are a
//! bearer token taken from the environment.

use crate::errors::PublishFailure;
use crate::models::{MediaAsset, Post};
use crate::utils::truncate_for_log;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

/// Something that can publish a [`Post`].
pub trait Publisher {
    async fn publish(&self, post: &Post) -> Result<(), PublishFailure>;
}

pub struct WebhookPublisher {
    client: Client,
    endpoint: Option<Url>,
    token: Option<String>,
}

impl WebhookPublisher {
    /// Without an endpoint every publish fails with [`PublishFailure::NotConfigured`].
    pub fn new(client: Client, endpoint: Option<Url>, token: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            token,
        }
    }

    async fn form(&self, post: &Post) -> Form {
        let mut form = Form::new().text("text", post.text.clone());
        for asset in &post.media {
            match media_part(asset).await {
                Ok(part) => form = form.part("media", part),
                Err(e) => {
                    warn!(path = %asset.path.display(), error = %e, "Cannot attach picture; skipping");
                }
            }
        }
        form
    }
}

impl fmt::Debug for WebhookPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookPublisher")
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Publisher for WebhookPublisher {
    #[instrument(level = "info", skip_all, fields(endpoint = ?self.endpoint.as_ref().map(Url::as_str), media = post.media.len()))]
    async fn publish(&self, post: &Post) -> Result<(), PublishFailure> {
        let Some(endpoint) = &self.endpoint else {
            return Err(PublishFailure::NotConfigured);
        };
        let form = self.form(post).await;
        let mut request = self.client.post(endpoint.clone()).multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishFailure::Rejected {
                status: status.as_u16(),
                body: truncate_for_log(&body, 300),
            });
        }
        info!(status = status.as_u16(), "Announcement published");
        Ok(())
    }
}

async fn media_part(asset: &MediaAsset) -> Result<Part, Box<dyn std::error::Error + Send + Sync>> {
    let bytes = fs::read(&asset.path).await?;
    let file_name = asset
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| asset.last_name.clone());
    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(&asset.path))?)
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
