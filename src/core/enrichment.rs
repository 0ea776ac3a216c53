use crate::config::SearchConfig;
use crate::core::decoder::decode_detail;
use crate::domain::model::{EnrichedListing, ListingDetail, ListingSummary};
use crate::domain::ports::Fetcher;
use crate::utils::error::Result;

/// Adds salary and contacts from the per-vacancy detail endpoint.
pub struct Enricher<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    config: &'a SearchConfig,
}

impl<'a, F: Fetcher + ?Sized> Enricher<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a SearchConfig) -> Self {
        Self { fetcher, config }
    }

    pub async fn fetch_detail(&self, id: &str) -> Result<ListingDetail> {
        let url = self.config.vacancy_url(id)?;
        let body = self.fetcher.fetch(&url).await?;
        decode_detail(&body)
    }

    /// Never fails: a detail that cannot be fetched, decoded or matched to
    /// the summary leaves the listing with its summary fields only.
    pub async fn enrich(&self, summary: ListingSummary) -> EnrichedListing {
        tokio::time::sleep(self.config.detail_delay).await;

        match self.fetch_detail(&summary.id).await {
            Ok(detail) => {
                if detail.id != summary.id {
                    tracing::debug!(
                        "Detail for vacancy {} answered with id {}, skipping enrichment",
                        summary.id,
                        detail.id
                    );
                }
                EnrichedListing::merge(summary, detail)
            }
            Err(e) => {
                tracing::debug!("No details for vacancy {}: {}", summary.id, e);
                EnrichedListing::bare(summary)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::MockFetcher;
    use crate::domain::model::SalaryBounds;
    use std::time::Duration;
    use tokio::time::Instant;

    fn config() -> SearchConfig {
        SearchConfig::default()
            .with_base_url("http://mock.local")
            .with_delays(Duration::ZERO, Duration::ZERO)
    }

    fn summary(id: &str) -> ListingSummary {
        ListingSummary {
            id: id.to_string(),
            title: "PHP developer".to_string(),
            employer: "Acme".to_string(),
            area: Some("Москва".to_string()),
            url: format!("https://hh.ru/vacancy/{}", id),
            published_at: "2024-03-01T10:00:00+0300".to_string(),
        }
    }

    #[tokio::test]
    async fn test_enrich_merges_salary_and_contacts() {
        let config = config();
        let fetcher = MockFetcher::new().with_detail(
            &config,
            "7",
            &serde_json::json!({
                "id": "7",
                "salary": {"from": 100, "to": null, "currency": "RUR"},
                "contacts": {"name": "Анна", "email": "", "phones": []}
            }),
        );

        let enricher = Enricher::new(&fetcher, &config);
        let listing = enricher.enrich(summary("7")).await;

        assert_eq!(listing.summary, summary("7"));
        assert_eq!(
            listing.salary.unwrap().bounds,
            SalaryBounds::From { from: 100 }
        );
        let contacts = listing.contacts.unwrap();
        assert_eq!(contacts.name.as_deref(), Some("Анна"));
        assert_eq!(contacts.email, None);
    }

    #[tokio::test]
    async fn test_enrich_swallows_http_failure() {
        let config = config();
        let url = config.vacancy_url("7").unwrap();
        let fetcher = MockFetcher::new().with_status(&url, 500, "oops");

        let enricher = Enricher::new(&fetcher, &config);
        let listing = enricher.enrich(summary("7")).await;

        assert_eq!(listing, EnrichedListing::bare(summary("7")));
    }

    #[tokio::test]
    async fn test_enrich_swallows_decode_failure() {
        let config = config();
        let url = config.vacancy_url("7").unwrap();
        let fetcher = MockFetcher::new().with_body(&url, "{\"salary\": 5");

        let enricher = Enricher::new(&fetcher, &config);
        let listing = enricher.enrich(summary("7")).await;

        assert_eq!(listing, EnrichedListing::bare(summary("7")));
    }

    #[tokio::test]
    async fn test_enrich_ignores_detail_with_other_id() {
        let config = config();
        let fetcher = MockFetcher::new().with_detail(
            &config,
            "7",
            &serde_json::json!({
                "id": "8",
                "salary": {"from": 1, "to": 2, "currency": "RUR"}
            }),
        );

        let enricher = Enricher::new(&fetcher, &config);
        let listing = enricher.enrich(summary("7")).await;

        assert_eq!(listing, EnrichedListing::bare(summary("7")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_delay_is_paid_per_listing() {
        let config = config().with_delays(Duration::ZERO, Duration::from_millis(25));
        let fetcher = MockFetcher::new();

        let enricher = Enricher::new(&fetcher, &config);
        let started = Instant::now();
        enricher.enrich(summary("1")).await;
        enricher.enrich(summary("2")).await;

        assert_eq!(started.elapsed(), Duration::from_millis(50));
        assert_eq!(fetcher.calls().len(), 2);
    }
}
