use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::CatalogError;
use super::file;
use super::responses::{AccountResponse, DownloadResponse, WallpapersResponse};
use super::types::{AccountInfo, CatalogPage, DownloadRequest};
use super::CatalogClient;
use crate::types::SortOrder;

const DEFAULT_USER_AGENT: &str = concat!("digital-blasphemy-sync/", env!("CARGO_PKG_VERSION"));

/// Error bodies are echoed into messages; keep them to a readable length.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Settings for [`HttpCatalogClient`], passed in explicitly rather than read
/// from the environment by the client.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// [`CatalogClient`] backed by the Digital Blasphemy v2 REST API.
///
/// API requests carry the bearer token; the signed download URLs the API
/// hands out are fetched without it.
pub struct HttpCatalogClient {
    client: Client,
    auth: HeaderMap,
    base_url: String,
}

impl std::fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpCatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self, CatalogError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let mut token = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| CatalogError::InvalidApiKey)?;
        token.set_sensitive(true);
        let mut auth = HeaderMap::new();
        auth.insert(AUTHORIZATION, token);
        auth.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let parsed = Url::parse(&config.base_url).map_err(|e| CatalogError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|source| CatalogError::Http {
                source,
                url: config.base_url.clone(),
            })?;

        Ok(Self {
            client,
            auth,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(url)
            .headers(self.auth.clone())
            .query(query)
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                source,
                url: url.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
                message: truncate_body(&body),
            });
        }

        let bytes = response.bytes().await.map_err(|source| CatalogError::Http {
            source,
            url: url.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Decode {
            source,
            url: url.to_string(),
        })
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut short: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    short.push_str("...");
    short
}

#[async_trait::async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_account_info(&self) -> Result<AccountInfo, CatalogError> {
        let url = self.endpoint("/v2/core/account");
        let response: AccountResponse = self.get_json(&url, &[]).await?;
        Ok(response.into())
    }

    async fn fetch_page(&self, page: u32, order: SortOrder) -> Result<CatalogPage, CatalogError> {
        let url = self.endpoint("/v2/core/wallpapers");
        let query = [
            ("page", page.to_string()),
            ("order", order.as_query().to_string()),
            ("show_resolutions", "true".to_string()),
        ];
        let response: WallpapersResponse = self.get_json(&url, &query).await?;
        Ok(response.into_page(page))
    }

    async fn download_item(
        &self,
        destination: &Path,
        request: &DownloadRequest,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!(
            "/v2/core/download/wallpaper/{}/{}/{}/{}",
            request.layout.as_str(),
            request.width,
            request.height,
            request.item_id
        ));
        let query = [("show_watermark", request.show_watermark.to_string())];
        let response: DownloadResponse = self.get_json(&url, &query).await?;

        let bytes =
            file::download_file(&self.client, &response.download.url, destination, request.item_id)
                .await?;
        debug!(
            id = request.item_id,
            bytes,
            path = %destination.display(),
            "downloaded"
        );
        Ok(())
    }
}
