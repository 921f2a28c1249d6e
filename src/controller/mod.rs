//! Portfolio list controller: the filtered, paginated, URL-addressable view
//! over one fetched image listing.

pub mod portfolio;
pub mod url_state;

pub use portfolio::*;

/// Pseudo-category that selects every portfolio image.
pub const ALL_CATEGORY: &str = "All";
