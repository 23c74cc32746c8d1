use async_trait::async_trait;
use reqwest::Client;

use crate::app::Result;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().gzip(true).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!("Loading url: {}", url);

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;

        let body = response.bytes().await?.to_vec();
        tracing::debug!("Received {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
