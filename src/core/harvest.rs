use crate::config::SearchConfig;
use crate::core::enrichment::Enricher;
use crate::core::pagination::{FirstPage, PaginationDriver};
use crate::core::render::Renderer;
use crate::domain::ports::Fetcher;
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub found: u64,
    pub pages: u32,
    pub rendered: usize,
    pub failed_pages: Vec<u32>,
    pub no_results: bool,
}

/// Runs one search end to end: page 0, then every later page, enriching
/// and rendering each listing as its page arrives.
pub struct HarvestEngine<F: Fetcher> {
    fetcher: F,
    config: SearchConfig,
}

impl<F: Fetcher> HarvestEngine<F> {
    pub fn new(fetcher: F, config: SearchConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fails only when page 0 cannot be fetched or output cannot be written.
    pub async fn run<W: Write>(&self, renderer: &mut Renderer<W>) -> Result<RunSummary> {
        tracing::info!(
            "Fetching vacancies for {:?} from {}",
            self.config.search_text,
            self.config.base_url
        );
        renderer.write_banner(&self.config.search_text)?;

        let driver = PaginationDriver::new(&self.fetcher, &self.config);
        let mut stream = match driver.start().await? {
            FirstPage::NoResults { found } => {
                tracing::info!("No vacancies found");
                renderer.write_no_results()?;
                renderer.flush()?;
                return Ok(RunSummary {
                    found,
                    no_results: true,
                    ..Default::default()
                });
            }
            FirstPage::Listings(stream) => stream,
        };

        let found = stream.found();
        let pages = stream.pages();
        tracing::info!("Found vacancies: {}, pages: {}", found, pages);

        let enricher = Enricher::new(&self.fetcher, &self.config);
        let mut failed_pages = Vec::new();

        while let Some((index, page)) = stream.next_page().await {
            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Failed to fetch page {}: {}", index, e);
                    failed_pages.push(index);
                    continue;
                }
            };

            if index == 0 {
                renderer.write_totals(found, page.items.len())?;
            }

            for summary in page.items {
                let listing = enricher.enrich(summary).await;
                renderer.render(&listing)?;
            }
            renderer.flush()?;
            tracing::info!("Processed vacancies: {}", renderer.counter());
        }

        tracing::info!(
            "Done! Total vacancies processed: {}",
            renderer.counter()
        );

        Ok(RunSummary {
            found,
            pages,
            rendered: renderer.counter(),
            failed_pages,
            no_results: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::OutputFormat;
    use crate::core::testing::{page_json, MockFetcher};
    use crate::utils::error::HarvestError;
    use std::time::Duration;

    fn config() -> SearchConfig {
        SearchConfig::default()
            .with_base_url("http://mock.local")
            .with_delays(Duration::ZERO, Duration::ZERO)
    }

    fn numbers(output: &str) -> Vec<usize> {
        output
            .lines()
            .filter_map(|line| line.split_once(". Vacancy "))
            .filter_map(|(n, _)| n.parse().ok())
            .collect()
    }

    #[tokio::test]
    async fn test_failed_middle_page_keeps_numbering_contiguous() {
        let config = config();
        let fetcher = MockFetcher::new()
            .with_page(&config, 0, &page_json(0, 3, 6, &["1", "2"]))
            .with_page_status(&config, 1, 500)
            .with_page(&config, 2, &page_json(2, 3, 6, &["5", "6"]));

        let engine = HarvestEngine::new(fetcher, config);
        let mut renderer = Renderer::new(Vec::new(), OutputFormat::Text);
        let summary = engine.run(&mut renderer).await.unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(numbers(&out), vec![1, 2, 3, 4]);
        assert!(out.contains("3. Vacancy 5\n"));
        assert_eq!(summary.rendered, 4);
        assert_eq!(summary.failed_pages, vec![1]);
        assert_eq!(summary.found, 6);
        assert_eq!(summary.pages, 3);
    }

    #[tokio::test]
    async fn test_first_page_failure_aborts_before_listings() {
        let config = config();
        let fetcher = MockFetcher::new().with_page_status(&config, 0, 500);

        let engine = HarvestEngine::new(fetcher, config);
        let mut renderer = Renderer::new(Vec::new(), OutputFormat::Text);
        let err = engine.run(&mut renderer).await.unwrap_err();

        assert!(matches!(err, HarvestError::HttpStatusError { status: 500, .. }));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(renderer.counter(), 0);
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(numbers(&out).is_empty());
    }

    #[tokio::test]
    async fn test_empty_first_page_prints_no_results() {
        let config = config();
        let fetcher = MockFetcher::new().with_page(&config, 0, &page_json(0, 0, 0, &[]));

        let engine = HarvestEngine::new(fetcher, config);
        let mut renderer = Renderer::new(Vec::new(), OutputFormat::Text);
        let summary = engine.run(&mut renderer).await.unwrap();

        assert!(summary.no_results);
        assert_eq!(summary.rendered, 0);
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("No vacancies found"));
        assert!(!out.contains("Vacancy list:"));
    }

    #[tokio::test]
    async fn test_detail_failure_keeps_listing_and_numbering() {
        let config = config();
        let ids = ["1", "2", "3", "4", "5"];
        let mut fetcher =
            MockFetcher::new().with_page(&config, 0, &page_json(0, 1, 5, &ids));
        for id in ids.iter().filter(|id| **id != "3") {
            fetcher = fetcher.with_detail(
                &config,
                id,
                &serde_json::json!({
                    "id": id,
                    "salary": {"from": 100, "to": 200, "currency": "RUR"}
                }),
            );
        }
        let detail_url = config.vacancy_url("3").unwrap();
        let fetcher = fetcher.with_status(&detail_url, 500, "detail down");

        let engine = HarvestEngine::new(fetcher, config);
        let mut renderer = Renderer::new(Vec::new(), OutputFormat::Text);
        let summary = engine.run(&mut renderer).await.unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(summary.rendered, 5);
        assert_eq!(numbers(&out), vec![1, 2, 3, 4, 5]);
        assert_eq!(out.matches("Salary: 100 - 200 RUR").count(), 4);

        let third = out
            .split("\n\n")
            .find(|block| block.contains("3. Vacancy 3"))
            .unwrap();
        assert!(!third.contains("Salary"));
        assert!(third.contains("Link: https://hh.ru/vacancy/3"));
    }

    #[tokio::test]
    async fn test_requests_are_issued_in_page_then_item_order() {
        let config = config();
        let fetcher = MockFetcher::new()
            .with_page(&config, 0, &page_json(0, 2, 3, &["a", "b"]))
            .with_page(&config, 1, &page_json(1, 2, 3, &["c"]));

        let engine = HarvestEngine::new(fetcher.clone(), config.clone());
        let mut renderer = Renderer::new(Vec::new(), OutputFormat::Text);
        engine.run(&mut renderer).await.unwrap();

        let expected = vec![
            config.vacancies_url(0).unwrap().to_string(),
            config.vacancy_url("a").unwrap().to_string(),
            config.vacancy_url("b").unwrap().to_string(),
            config.vacancies_url(1).unwrap().to_string(),
            config.vacancy_url("c").unwrap().to_string(),
        ];
        assert_eq!(fetcher.calls(), expected);
    }
}
