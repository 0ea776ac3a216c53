use crate::config::SearchConfig;
use crate::core::decoder::decode_page;
use crate::domain::model::PageResult;
use crate::domain::ports::Fetcher;
use crate::utils::error::Result;

/// Walks the search pages strictly in order, one request at a time.
pub struct PaginationDriver<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    config: &'a SearchConfig,
}

impl<F: Fetcher + ?Sized> Clone for PaginationDriver<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Fetcher + ?Sized> Copy for PaginationDriver<'_, F> {}

/// Outcome of the first page request.
pub enum FirstPage<'a, F: Fetcher + ?Sized> {
    /// Page 0 came back without listings.
    NoResults { found: u64 },
    Listings(PageStream<'a, F>),
}

impl<'a, F: Fetcher + ?Sized> PaginationDriver<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a SearchConfig) -> Self {
        Self { fetcher, config }
    }

    pub async fn fetch_page(&self, page: u32) -> Result<PageResult> {
        let url = self.config.vacancies_url(page)?;
        let body = self.fetcher.fetch(&url).await?;
        decode_page(&body)
    }

    /// Fetches page 0. Any failure here is returned to the caller, since
    /// the page count is unknown without it. Calling `start` again begins a
    /// fresh run.
    pub async fn start(&self) -> Result<FirstPage<'a, F>> {
        tracing::info!("Requesting first page...");
        let first = self.fetch_page(0).await?;
        tracing::info!("First page received");

        if first.items.is_empty() {
            return Ok(FirstPage::NoResults { found: first.found });
        }

        Ok(FirstPage::Listings(PageStream {
            driver: *self,
            found: first.found,
            pages: first.pages,
            next_index: 0,
            first: Some(first),
        }))
    }
}

/// Lazy sequence of `(page_index, page)` pairs. Page 0 is yielded from the
/// initial request; pages `1..pages` are fetched on demand, each after the
/// configured inter-page delay. A failed page is yielded as an error and
/// the stream moves on.
pub struct PageStream<'a, F: Fetcher + ?Sized> {
    driver: PaginationDriver<'a, F>,
    found: u64,
    pages: u32,
    next_index: u32,
    first: Option<PageResult>,
}

impl<F: Fetcher + ?Sized> PageStream<'_, F> {
    pub fn found(&self) -> u64 {
        self.found
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub async fn next_page(&mut self) -> Option<(u32, Result<PageResult>)> {
        if let Some(first) = self.first.take() {
            self.next_index = 1;
            return Some((0, Ok(first)));
        }

        if self.next_index >= self.pages {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;

        tokio::time::sleep(self.driver.config.page_delay).await;
        tracing::info!("Requesting page {} of {}...", index + 1, self.pages);

        Some((index, self.driver.fetch_page(index).await))
    }
}
