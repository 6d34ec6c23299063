//! Product listing query.

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by highest rated.
    Rating,
}

impl SortOption {
    /// All options, in the order the listing offers them.
    pub const ALL: [SortOption; 6] = [
        SortOption::Featured,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceLow => "priceLow",
            SortOption::PriceHigh => "priceHigh",
            SortOption::NameAsc => "nameAsc",
            SortOption::NameDesc => "nameDesc",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::Rating => "Top Rated",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => b.featured.cmp(&a.featured),
            SortOption::PriceLow => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceHigh => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortOption::NameAsc => compare_titles(a, b),
            SortOption::NameDesc => compare_titles(b, a),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

fn compare_titles(a: &Product, b: &Product) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CommerceError::InvalidSortOption(s.to_string()))
    }
}

/// A listing query: optional search term plus a sort order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductQuery {
    /// Text matched against title and product type.
    pub term: Option<String>,
    /// Sort option.
    pub sort: SortOption,
}

impl ProductQuery {
    /// Create a query listing everything in featured order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term. Blank terms match everything.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.term = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Filter and sort products. Sorting is stable, so ties keep catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut result: Vec<&Product> = match &self.term {
            Some(term) => products.iter().filter(|p| p.matches(term)).collect(),
            None => products.iter().collect(),
        };
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn titles(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_featured_first_keeps_catalog_order() {
        let catalog = StaticCatalog::storefront();
        let result = catalog.search(&ProductQuery::new());
        assert_eq!(result.len(), 9);
        assert_eq!(result[0].title, "Modern UI Kit Pro");
        assert_eq!(result[1].title, "Motion Graphics Kit");
        assert_eq!(result[2].title, "Photography Master Presets");
    }

    #[test]
    fn test_price_sorts() {
        let catalog = StaticCatalog::storefront();
        let low = catalog.search(&ProductQuery::new().with_sort(SortOption::PriceLow));
        assert_eq!(low[0].price.amount_cents, 2900);
        assert_eq!(low[8].price.amount_cents, 9900);

        let high = catalog.search(&ProductQuery::new().with_sort(SortOption::PriceHigh));
        assert_eq!(high[0].title, "Cinematic LUTs Pack");
    }

    #[test]
    fn test_name_sorts() {
        let catalog = StaticCatalog::storefront();
        let asc = catalog.search(&ProductQuery::new().with_sort(SortOption::NameAsc));
        assert_eq!(asc[0].title, "3D Icons Collection");
        let desc = catalog.search(&ProductQuery::new().with_sort(SortOption::NameDesc));
        assert_eq!(desc[0].title, "Website Wireframe Templates");
    }

    #[test]
    fn test_rating_sort() {
        let catalog = StaticCatalog::storefront();
        let result = catalog.search(&ProductQuery::new().with_sort(SortOption::Rating));
        assert_eq!(
            titles(&result[..2]),
            vec!["Photography Master Presets", "Cinematic LUTs Pack"]
        );
    }

    #[test]
    fn test_search_term_matches_type() {
        let catalog = StaticCatalog::storefront();
        let result = catalog.search(&ProductQuery::new().with_term("ui templates"));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_blank_term_matches_all() {
        let query = ProductQuery::new().with_term("   ");
        assert!(query.term.is_none());
    }

    #[test]
    fn test_parse_sort_option() {
        assert_eq!("priceLow".parse::<SortOption>().unwrap(), SortOption::PriceLow);
        assert_eq!("RATING".parse::<SortOption>().unwrap(), SortOption::Rating);
        assert!("newest".parse::<SortOption>().is_err());
    }
}
