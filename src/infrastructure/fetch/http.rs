use std::{path::Path, time::Duration};

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{info, warn};
use url::Url;

use crate::{constants::INVALID_URL, errors::AppError, repositories::image_source::ImageSource};

#[derive(Clone)]
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client error: {}", e)))?;

        Ok(HttpImageSource { client })
    }
}

fn parse_http_url(raw: &str) -> Result<Url, AppError> {
    let parsed = Url::parse(raw.trim()).map_err(|_| AppError::BadRequest(INVALID_URL.into()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(AppError::BadRequest(INVALID_URL.into())),
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn download_to(&self, url: &str, destination: &Path) -> Result<u64, AppError> {
        let url = parse_http_url(url)?;

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, "Fetch failed: {}", e);
            AppError::BadRequest(INVALID_URL.into())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Remote returned a non-success status");
            return Err(AppError::BadRequest(INVALID_URL.into()));
        }

        let mut file = File::create(destination).await?;
        let mut body = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| {
                warn!(%url, "Body stream interrupted: {}", e);
                AppError::BadRequest(INVALID_URL.into())
            })?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        info!(%url, bytes = written, "Image downloaded");
        Ok(written)
    }
}
