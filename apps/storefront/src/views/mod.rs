//! Client-side views over the catalog API.
//!
//! Views hold UI state and talk to the API through [`domain_products::CatalogApi`], so they
//! can be driven by the terminal front end or by tests with a mock API.

pub mod creation;
pub mod listing;

pub use creation::{CreationView, ProductDraft};
pub use listing::{FetchOutcome, FetchTicket, ListingView};

/// Where the front end should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Listing,
}

/// Shown for every failed listing request
pub const LISTING_FAILED: &str = "Failed to fetch products. Try again.";

/// Shown for every failed creation attempt
pub const ADD_FAILED: &str = "Failed to add product. Try again.";
