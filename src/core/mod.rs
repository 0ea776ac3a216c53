pub mod decoder;
pub mod enrichment;
pub mod harvest;
pub mod pagination;
pub mod render;
pub mod testing;

pub use crate::domain::model::{EnrichedListing, ListingDetail, ListingSummary, PageResult};
pub use crate::domain::ports::Fetcher;
pub use crate::utils::error::Result;
