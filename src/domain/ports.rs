use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// Issues one GET request and returns the raw body. Non-success statuses
/// and network failures are errors; nothing is retried.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        (**self).fetch(url).await
    }
}
