//! In-memory fetcher for exercising the pipeline without a network.

use crate::config::SearchConfig;
use crate::domain::ports::Fetcher;
use crate::utils::error::{HarvestError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use url::Url;

#[derive(Debug, Clone)]
enum MockResponse {
    Body(Vec<u8>),
    Status(u16, String),
}

/// Answers by exact URL. Unregistered URLs answer 404. Every call is
/// recorded in order so tests can assert on the request sequence.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: &Url, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, MockResponse::Body(body.into()));
        self
    }

    pub fn with_status(self, url: &Url, status: u16, body: impl Into<String>) -> Self {
        self.insert(url, MockResponse::Status(status, body.into()));
        self
    }

    /// Registers search page `page` as built from `config`.
    pub fn with_page(self, config: &SearchConfig, page: u32, body: &serde_json::Value) -> Self {
        match config.vacancies_url(page) {
            Ok(url) => self.with_body(&url, body.to_string()),
            Err(_) => self,
        }
    }

    pub fn with_page_status(self, config: &SearchConfig, page: u32, status: u16) -> Self {
        match config.vacancies_url(page) {
            Ok(url) => self.with_status(&url, status, "mock failure"),
            Err(_) => self,
        }
    }

    pub fn with_detail(self, config: &SearchConfig, id: &str, body: &serde_json::Value) -> Self {
        match config.vacancy_url(id) {
            Ok(url) => self.with_body(&url, body.to_string()),
            Err(_) => self,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().map(|c| c.clone()).unwrap_or_default()
    }

    fn insert(&self, url: &Url, response: MockResponse) {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(url.to_string(), response);
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        if let Ok(mut calls) = self.calls.write() {
            calls.push(url.to_string());
        }

        let response = self
            .responses
            .read()
            .ok()
            .and_then(|r| r.get(url.as_str()).cloned());

        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status, body)) => {
                Err(HarvestError::HttpStatusError { status, body })
            }
            None => Err(HarvestError::HttpStatusError {
                status: 404,
                body: format!("no mock registered for {}", url),
            }),
        }
    }
}

/// Search-page JSON in the API's shape.
pub fn page_json(page: u32, pages: u32, found: u64, ids: &[&str]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": format!("Vacancy {}", id),
                "employer": {"name": format!("Employer {}", id)},
                "area": {"name": "Москва"},
                "alternate_url": format!("https://hh.ru/vacancy/{}", id),
                "published_at": "2024-03-01T10:00:00+0300"
            })
        })
        .collect();

    serde_json::json!({
        "items": items,
        "found": found,
        "pages": pages,
        "page": page,
        "per_page": ids.len()
    })
}
