//! Catalog lookup.
//!
//! The cart never owns prices: it asks a [`CatalogLookup`] for the product
//! behind an id. Whether that catalog is a trusted server-side authority is up
//! to the embedding application.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::search::ProductQuery;

/// Source of product data for the cart.
pub trait CatalogLookup {
    /// Look up a product by id.
    fn product(&self, id: &ProductId) -> Option<&Product>;

    /// All products, in catalog order.
    fn products(&self) -> &[Product];
}

/// An in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Create a catalog from a list of products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The products listed on the storefront.
    pub fn storefront() -> Self {
        let usd = |dollars: i64| Money::new(dollars * 100, Currency::USD);
        Self::new(vec![
            Product::new("modern-ui-kit-pro", "Modern UI Kit Pro", "UI Templates", usd(79))
                .with_rating(4.8, 124)
                .featured(),
            Product::new(
                "photography-master-presets",
                "Photography Master Presets",
                "Presets",
                usd(49),
            )
            .with_rating(4.9, 87),
            Product::new("3d-icons-collection", "3D Icons Collection", "3D Assets", usd(39))
                .with_rating(4.7, 63),
            Product::new("motion-graphics-kit", "Motion Graphics Kit", "Video Templates", usd(59))
                .with_rating(4.6, 42)
                .featured(),
            Product::new(
                "helvetica-neue-font-family",
                "Helvetica Neue Font Family",
                "Fonts",
                usd(29),
            )
            .with_rating(4.5, 78),
            Product::new("social-media-toolkit", "Social Media Toolkit", "Marketing", usd(89))
                .with_rating(4.7, 52),
            Product::new(
                "website-wireframe-templates",
                "Website Wireframe Templates",
                "UI Templates",
                usd(69),
            )
            .with_rating(4.8, 36),
            Product::new("cinematic-luts-pack", "Cinematic LUTs Pack", "Video", usd(99))
                .with_rating(4.9, 93),
            Product::new("sketch-ui-components", "Sketch UI Components", "UI Templates", usd(49))
                .with_rating(4.6, 47),
        ])
    }

    /// Run a listing query against this catalog.
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogLookup for StaticCatalog {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    fn products(&self) -> &[Product] {
        &self.products
    }
}
