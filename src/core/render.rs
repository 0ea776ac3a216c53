use crate::domain::model::{EnrichedListing, Phone, Salary, SalaryBounds};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

const SEPARATOR: &str =
    "================================================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Numbered human-readable blocks.
    #[default]
    Text,
    /// One JSON object per listing per line.
    Json,
}

pub fn format_salary(salary: &Salary) -> String {
    match salary.bounds {
        SalaryBounds::Range { from, to } => format!("{} - {} {}", from, to, salary.currency),
        SalaryBounds::From { from } => format!("from {} {}", from, salary.currency),
        SalaryBounds::UpTo { to } => format!("up to {} {}", to, salary.currency),
    }
}

/// `+<country> (<city>) <number>`, plus ` (<comment>)` when there is one.
pub fn format_phone(phone: &Phone) -> String {
    let mut out = format!("+{} ({}) {}", phone.country, phone.city, phone.number);
    if let Some(comment) = &phone.comment {
        out.push_str(&format!(" ({})", comment));
    }
    out
}

/// Text block for one listing, terminated by a blank line.
pub fn format_listing(number: usize, listing: &EnrichedListing) -> String {
    let summary = &listing.summary;
    let mut out = String::new();

    let _ = writeln!(out, "{}. {}", number, summary.title);
    let _ = writeln!(out, "   Company: {}", summary.employer);
    if let Some(area) = summary.area.as_deref().filter(|a| !a.is_empty()) {
        let _ = writeln!(out, "   Location: {}", area);
    }
    let _ = writeln!(out, "   Link: {}", summary.url);

    if let Some(salary) = &listing.salary {
        let _ = writeln!(out, "   Salary: {}", format_salary(salary));
    }

    if let Some(contacts) = &listing.contacts {
        if let Some(name) = &contacts.name {
            let _ = writeln!(out, "   Contacts:");
            let _ = writeln!(out, "      Name: {}", name);
            if let Some(email) = &contacts.email {
                let _ = writeln!(out, "      Email: {}", email);
            }
            for phone in &contacts.phones {
                let _ = writeln!(out, "      Phone: {}", format_phone(phone));
            }
        }
    }

    out.push('\n');
    out
}

#[derive(Serialize)]
struct NumberedListing<'a> {
    number: usize,
    #[serde(flatten)]
    listing: &'a EnrichedListing,
}

/// Writes listings to `out` under a display counter that starts at 1 and
/// is shared by every page of the run.
pub struct Renderer<W: Write> {
    out: W,
    format: OutputFormat,
    counter: usize,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            counter: 0,
        }
    }

    /// Number of listings rendered so far.
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_banner(&mut self, search_text: &str) -> Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "Fetching vacancies for \"{}\" from hh.ru...", search_text)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn write_totals(&mut self, found: u64, first_page_len: usize) -> Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "Found vacancies: {}", found)?;
            writeln!(self.out, "Received on first page: {}", first_page_len)?;
            writeln!(self.out)?;
            writeln!(self.out, "Vacancy list:")?;
            writeln!(self.out, "{}", SEPARATOR)?;
        }
        Ok(())
    }

    /// Text mode only. A JSON run with no results writes nothing, so stdout
    /// stays a valid (empty) JSON-lines stream.
    pub fn write_no_results(&mut self) -> Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "No vacancies found")?;
        }
        Ok(())
    }

    /// Assigns the next display number, writes the listing and returns what was written.
    pub fn render(&mut self, listing: &EnrichedListing) -> Result<String> {
        self.counter += 1;
        let block = match self.format {
            OutputFormat::Text => format_listing(self.counter, listing),
            OutputFormat::Json => {
                let mut line = serde_json::to_string(&NumberedListing {
                    number: self.counter,
                    listing,
                })?;
                line.push('\n');
                line
            }
        };
        self.out.write_all(block.as_bytes())?;
        Ok(block)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
