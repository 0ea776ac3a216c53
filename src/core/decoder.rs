//! JSON wire shapes of the search and detail endpoints, mapped onto the
//! domain records. Unknown fields are ignored; empty strings and nulls both
//! become `None`.

use crate::domain::model::{
    Contacts, ListingDetail, ListingSummary, PageResult, Phone, Salary, SalaryBounds,
};
use crate::utils::error::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    items: Vec<RawVacancy>,
    #[serde(default)]
    found: u64,
    #[serde(default)]
    pages: u32,
    #[serde(default)]
    page: u32,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawVacancy {
    id: String,
    name: Option<String>,
    employer: Option<RawNamed>,
    area: Option<RawNamed>,
    alternate_url: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDetail {
    id: String,
    salary: Option<RawSalary>,
    contacts: Option<RawContacts>,
}

#[derive(Debug, Deserialize)]
struct RawSalary {
    from: Option<u64>,
    to: Option<u64>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContacts {
    name: Option<String>,
    email: Option<String>,
    phones: Option<Vec<RawPhone>>,
}

#[derive(Debug, Deserialize)]
struct RawPhone {
    country: Option<String>,
    city: Option<String>,
    number: Option<String>,
    comment: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<RawVacancy> for ListingSummary {
    fn from(raw: RawVacancy) -> Self {
        Self {
            id: raw.id,
            title: raw.name.unwrap_or_default(),
            employer: raw.employer.and_then(|e| e.name).unwrap_or_default(),
            area: non_empty(raw.area.and_then(|a| a.name)),
            url: raw.alternate_url.unwrap_or_default(),
            published_at: raw.published_at.unwrap_or_default(),
        }
    }
}

impl RawSalary {
    fn into_salary(self) -> Option<Salary> {
        let bounds = SalaryBounds::from_parts(self.from, self.to)?;
        Some(Salary {
            bounds,
            currency: self.currency.unwrap_or_default(),
        })
    }
}

impl From<RawPhone> for Phone {
    fn from(raw: RawPhone) -> Self {
        Self {
            country: raw.country.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            number: raw.number.unwrap_or_default(),
            comment: non_empty(raw.comment),
        }
    }
}

impl From<RawContacts> for Contacts {
    fn from(raw: RawContacts) -> Self {
        Self {
            name: non_empty(raw.name),
            email: non_empty(raw.email),
            phones: raw
                .phones
                .unwrap_or_default()
                .into_iter()
                .map(Phone::from)
                .collect(),
        }
    }
}

pub fn decode_page(bytes: &[u8]) -> Result<PageResult> {
    let raw: RawPage = serde_json::from_slice(bytes)?;
    Ok(PageResult {
        items: raw.items.into_iter().map(ListingSummary::from).collect(),
        found: raw.found,
        pages: raw.pages,
        page: raw.page,
    })
}

pub fn decode_detail(bytes: &[u8]) -> Result<ListingDetail> {
    let raw: RawDetail = serde_json::from_slice(bytes)?;
    Ok(ListingDetail {
        id: raw.id,
        salary: raw.salary.and_then(RawSalary::into_salary),
        contacts: raw.contacts.map(Contacts::from),
    })
}
