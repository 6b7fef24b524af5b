//! Listing parameters entered on the product page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::catalog::Product;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Sort by title A-Z.
    #[default]
    NameAsc,
    /// Sort by price paid, low to high.
    PriceAsc,
    /// Sort by price paid, high to low.
    PriceDesc,
}

impl SortOption {
    /// All options, in menu order.
    pub const ALL: [SortOption; 3] = [
        SortOption::NameAsc,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    /// Identifier used in URLs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "name-asc",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "Name: A-Z",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort option '{0}' (expected name-asc, price-asc or price-desc)")]
pub struct ParseSortError(pub String);

impl FromStr for SortOption {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSortError(s.to_string()))
    }
}

/// Transient search box and sort menu state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingParams {
    /// Free-text query.
    pub query: String,
    /// Sort option.
    pub sort: SortOption,
}

impl ListingParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.query = q.into();
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check if the query filters anything out.
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Run the listing over `products`.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        super::filter_and_sort(products, &self.query, self.sort)
    }
}
