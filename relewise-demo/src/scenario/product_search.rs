use super::{RunOptions, DISPLAYED_AT_LOCATION};
use crate::capture::RunLogger;
use crate::client::Connector;
use crate::error::DemoError;
use crate::request::{
    PriceSelectionStrategy, ProductSearchBuilder, ProductSearchRequest, QuerySettings,
    SelectedProductProperties, SelectedVariantProperties,
};
use tracing::debug;

/// The fixed product search: "laptop", 30 per page, brand/price/size facets
pub fn product_search_request() -> ProductSearchRequest {
    let settings = QuerySettings::new("da-DK", "DKK", DISPLAYED_AT_LOCATION);

    ProductSearchBuilder::new(settings)
        .set_selected_product_properties(SelectedProductProperties {
            display_name: true,
            ..Default::default()
        })
        .set_selected_variant_properties(SelectedVariantProperties {
            display_name: true,
            ..Default::default()
        })
        .set_term("laptop")
        .pagination(|p| p.set_page_size(30).set_page(1))
        .facets(|f| {
            f.add_brand_facet()
                .add_sales_price_range_facet(PriceSelectionStrategy::Product)
                .add_variant_specification_facet("Size")
        })
        .build()
}

pub async fn run_product_search(
    connector: &dyn Connector,
    options: &RunOptions,
    logger: &dyn RunLogger,
) -> Result<(), DemoError> {
    let credentials = options.credentials()?;
    let request = product_search_request();

    let searcher = connector.connect(&credentials)?;
    debug!(dataset_id = %credentials.dataset_id, "Running product search");
    let response = searcher.search_products(&request).await?;

    logger.log(&[response]);
    Ok(())
}
