use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::Result;
use crate::config::ConfigStore;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{FeedClient, Fetcher};
use crate::monitor::{Clock, TokioClock};
use crate::power::{Hibernate, SystemHibernate};

pub struct AppContext {
    pub config_store: ConfigStore,
    pub feed_client: FeedClient,
    pub clock: Arc<dyn Clock>,
    pub hibernator: Arc<dyn Hibernate>,
}

impl AppContext {
    /// Wire the real collaborators. `config_path` overrides the default location.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config_store = match config_path {
            Some(path) => ConfigStore::new(path),
            None => ConfigStore::at_default_path()?,
        };

        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new()?);

        Ok(Self {
            config_store,
            feed_client: FeedClient::new(fetcher),
            clock: Arc::new(TokioClock),
            hibernator: Arc::new(SystemHibernate),
        })
    }
}
