use async_trait::async_trait;
use std::time::Duration;
use swatch_core::config::schema::FragmentConfig;
use swatch_core::view::FragmentRequest;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("Invalid fragment URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Fragment request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Fragment request returned status {0}")]
    Status(u16),
    #[error("No storefront base URL configured")]
    NoBaseUrl,
}

/// Anything able to return the server-rendered section markup for a variant.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    async fn fetch(&self, request: &FragmentRequest) -> Result<String, FragmentError>;
}

/// Fetches fragments from the storefront over HTTP.
pub struct HttpFragmentSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpFragmentSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FragmentError> {
        let base = Url::parse(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &FragmentConfig) -> Result<Self, FragmentError> {
        let base_url = config.base_url.as_deref().ok_or(FragmentError::NoBaseUrl)?;
        Self::new(base_url, Duration::from_millis(config.timeout_ms))
    }

    /// `{base}{product_url}?variant={id}&section_id={section}`
    pub fn url_for(&self, request: &FragmentRequest) -> Result<Url, FragmentError> {
        let mut url = self.base.join(&request.product_url)?;
        url.query_pairs_mut().clear().extend_pairs(request.query());
        Ok(url)
    }
}

#[async_trait]
impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, request: &FragmentRequest) -> Result<String, FragmentError> {
        let url = self.url_for(request)?;
        tracing::info!("Fetching fragment: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FragmentError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}
