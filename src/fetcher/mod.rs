pub mod channel;
pub mod http_fetcher;

pub use channel::{channel_feed_url, FeedClient, FEED_BASE_URL};

use async_trait::async_trait;

use crate::app::Result;

/// Transport for a single feed request.
#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the response body. Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
