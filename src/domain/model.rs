use serde::Serialize;

/// One vacancy as returned by the paginated search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
    pub employer: String,
    pub area: Option<String>,
    pub url: String,
    pub published_at: String,
}

/// Salary bounds. "No bounds at all" is not representable; the decoder
/// turns it into an absent salary instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SalaryBounds {
    Range { from: u64, to: u64 },
    From { from: u64 },
    UpTo { to: u64 },
}

impl SalaryBounds {
    pub fn from_parts(from: Option<u64>, to: Option<u64>) -> Option<Self> {
        match (from, to) {
            (Some(from), Some(to)) => Some(SalaryBounds::Range { from, to }),
            (Some(from), None) => Some(SalaryBounds::From { from }),
            (None, Some(to)) => Some(SalaryBounds::UpTo { to }),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Salary {
    pub bounds: SalaryBounds,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phone {
    pub country: String,
    pub city: String,
    pub number: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Contacts {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phones: Vec<Phone>,
}

/// Per-vacancy detail record; only the fields merged into the display record are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetail {
    pub id: String,
    pub salary: Option<Salary>,
    pub contacts: Option<Contacts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedListing {
    #[serde(flatten)]
    pub summary: ListingSummary,
    pub salary: Option<Salary>,
    pub contacts: Option<Contacts>,
}

impl EnrichedListing {
    /// Summary fields only, used when the detail fetch could not be merged.
    pub fn bare(summary: ListingSummary) -> Self {
        Self {
            summary,
            salary: None,
            contacts: None,
        }
    }

    /// Detail fields are only taken when the detail belongs to the same vacancy.
    pub fn merge(summary: ListingSummary, detail: ListingDetail) -> Self {
        if summary.id != detail.id {
            return Self::bare(summary);
        }
        Self {
            summary,
            salary: detail.salary,
            contacts: detail.contacts,
        }
    }
}

/// One page of search results. `found` and `pages` are read from page 0
/// and trusted for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub items: Vec<ListingSummary>,
    pub found: u64,
    pub pages: u32,
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> ListingSummary {
        ListingSummary {
            id: id.to_string(),
            title: "PHP developer".to_string(),
            employer: "Acme".to_string(),
            area: None,
            url: format!("https://hh.ru/vacancy/{}", id),
            published_at: "2024-01-01T00:00:00+0300".to_string(),
        }
    }

    #[test]
    fn test_salary_bounds_three_states() {
        assert_eq!(
            SalaryBounds::from_parts(Some(100), Some(200)),
            Some(SalaryBounds::Range { from: 100, to: 200 })
        );
        assert_eq!(
            SalaryBounds::from_parts(Some(100), None),
            Some(SalaryBounds::From { from: 100 })
        );
        assert_eq!(
            SalaryBounds::from_parts(None, Some(200)),
            Some(SalaryBounds::UpTo { to: 200 })
        );
        assert_eq!(SalaryBounds::from_parts(None, None), None);
    }

    #[test]
    fn test_zero_salary_is_not_absent() {
        assert_eq!(
            SalaryBounds::from_parts(Some(0), None),
            Some(SalaryBounds::From { from: 0 })
        );
    }

    #[test]
    fn test_merge_ignores_detail_of_other_vacancy() {
        let detail = ListingDetail {
            id: "2".to_string(),
            salary: Some(Salary {
                bounds: SalaryBounds::UpTo { to: 5 },
                currency: "RUR".to_string(),
            }),
            contacts: None,
        };
        let merged = EnrichedListing::merge(summary("1"), detail);
        assert_eq!(merged, EnrichedListing::bare(summary("1")));
    }

    #[test]
    fn test_merge_carries_salary_and_contacts() {
        let detail = ListingDetail {
            id: "1".to_string(),
            salary: Some(Salary {
                bounds: SalaryBounds::From { from: 100 },
                currency: "RUR".to_string(),
            }),
            contacts: Some(Contacts {
                name: Some("Ivan".to_string()),
                ..Default::default()
            }),
        };
        let merged = EnrichedListing::merge(summary("1"), detail);
        assert_eq!(merged.summary.id, "1");
        assert!(merged.salary.is_some());
        assert_eq!(merged.contacts.unwrap().name.as_deref(), Some("Ivan"));
    }
}
