//! Catalog listing command.

use anyhow::Result;
use lumina_commerce::cart::LicenseTier;
use lumina_commerce::catalog::StaticCatalog;
use lumina_commerce::search::ProductQuery;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::stars;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = StaticCatalog::storefront();

    let mut query = ProductQuery::new().with_sort(args.sort);
    if let Some(term) = args.search {
        query = query.with_term(term);
    }
    let products = catalog.search(&query);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({}, sorted by {})",
        products.len(),
        args.sort.display_name()
    ));

    if products.is_empty() {
        ctx.output.info("No products found");
        ctx.output.info("Try adjusting your search or filter to find what you're looking for.");
        return Ok(());
    }

    let widths = [28, 16, 9, 10, 12];
    ctx.output
        .table_row(&["Title", "Type", "Standard", "Extended", "Rating"], &widths);
    for product in products {
        let standard = product.price_for(LicenseTier::Standard).display();
        let extended = product.price_for(LicenseTier::Extended).display();
        let rating = format!("{} ({})", stars(product.full_stars()), product.review_count);
        ctx.output.table_row(
            &[
                product.title.as_str(),
                product.product_type.as_str(),
                &standard,
                &extended,
                &rating,
            ],
            &widths,
        );
    }

    Ok(())
}
