//! Product search request and builder

use super::facets::{FacetBuilder, FacetQuery};
use super::QuerySettings;
use serde::Serialize;

/// Product fields to include in each hit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProductProperties {
    pub display_name: bool,
    pub brand: bool,
    pub pricing: bool,
    pub category_paths: bool,
}

/// Variant fields to include in each hit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVariantProperties {
    pub display_name: bool,
    pub pricing: bool,
    pub specification: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_product_properties: Option<SelectedProductProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_variant_properties: Option<SelectedVariantProperties>,
}

/// A finished product search request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchRequest {
    #[serde(rename = "$type")]
    type_tag: &'static str,
    #[serde(flatten)]
    pub context: QuerySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    pub skip: u32,
    pub take: u32,
    #[serde(skip_serializing_if = "FacetQuery::is_empty")]
    pub facets: FacetQuery,
    pub settings: ProductSearchSettings,
}

impl ProductSearchRequest {
    /// Request type name, also the endpoint path segment
    pub const TYPE_NAME: &'static str = "ProductSearchRequest";
    const TYPE_TAG: &'static str = "Relewise.Client.Requests.Search.ProductSearchRequest, Relewise.Client";
}

/// Page-based pagination, turned into skip/take on build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationBuilder {
    page_size: u32,
    page: u32,
}

impl Default for PaginationBuilder {
    fn default() -> Self {
        Self {
            page_size: 10,
            page: 1,
        }
    }
}

impl PaginationBuilder {
    pub fn set_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Pages are 1-based; page 0 is treated as page 1
    pub fn set_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn skip(&self) -> u32 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn take(&self) -> u32 {
        self.page_size
    }
}

/// Fluent builder for [`ProductSearchRequest`]
#[derive(Debug, Clone)]
pub struct ProductSearchBuilder {
    context: QuerySettings,
    term: Option<String>,
    pagination: PaginationBuilder,
    facets: FacetQuery,
    settings: ProductSearchSettings,
}

impl ProductSearchBuilder {
    pub fn new(context: QuerySettings) -> Self {
        Self {
            context,
            term: None,
            pagination: PaginationBuilder::default(),
            facets: FacetQuery::default(),
            settings: ProductSearchSettings::default(),
        }
    }

    pub fn set_selected_product_properties(mut self, properties: SelectedProductProperties) -> Self {
        self.settings.selected_product_properties = Some(properties);
        self
    }

    pub fn set_selected_variant_properties(mut self, properties: SelectedVariantProperties) -> Self {
        self.settings.selected_variant_properties = Some(properties);
        self
    }

    pub fn set_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn pagination<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(PaginationBuilder) -> PaginationBuilder,
    {
        self.pagination = configure(self.pagination);
        self
    }

    /// Replace the facet list with whatever `configure` adds
    pub fn facets<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(FacetBuilder) -> FacetBuilder,
    {
        self.facets = configure(FacetBuilder::new()).build();
        self
    }

    pub fn build(self) -> ProductSearchRequest {
        ProductSearchRequest {
            type_tag: ProductSearchRequest::TYPE_TAG,
            context: self.context,
            term: self.term,
            skip: self.pagination.skip(),
            take: self.pagination.take(),
            facets: self.facets,
            settings: self.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PriceSelectionStrategy;
    use serde_json::json;

    fn settings() -> QuerySettings {
        QuerySettings::new("da-DK", "DKK", "Search Page")
    }

    #[test]
    fn test_pagination_maps_pages_to_skip_take() {
        let p = PaginationBuilder::default().set_page_size(30).set_page(1);
        assert_eq!((p.skip(), p.take()), (0, 30));

        let p = p.set_page(3);
        assert_eq!((p.skip(), p.take()), (60, 30));

        let p = p.set_page(0);
        assert_eq!(p.skip(), 0);
    }

    #[test]
    fn test_builder_defaults() {
        let request = ProductSearchBuilder::new(settings()).build();
        assert_eq!(request.term, None);
        assert_eq!((request.skip, request.take), (0, 10));
        assert!(request.facets.is_empty());

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("term").is_none());
        assert!(value.get("facets").is_none());
        assert_eq!(value["settings"], json!({}));
    }

    #[test]
    fn test_full_request_wire_shape() {
        let request = ProductSearchBuilder::new(settings())
            .set_selected_product_properties(SelectedProductProperties {
                display_name: true,
                ..Default::default()
            })
            .set_term("laptop")
            .pagination(|p| p.set_page_size(30).set_page(2))
            .facets(|f| f.add_brand_facet().add_sales_price_range_facet(PriceSelectionStrategy::Product))
            .build();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["$type"],
            "Relewise.Client.Requests.Search.ProductSearchRequest, Relewise.Client"
        );
        assert_eq!(value["language"], json!({ "value": "da-DK" }));
        assert_eq!(value["term"], "laptop");
        assert_eq!(value["skip"], 30);
        assert_eq!(value["take"], 30);
        assert_eq!(value["facets"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(
            value["settings"]["selectedProductProperties"]["displayName"],
            true
        );
        assert!(value["settings"].get("selectedVariantProperties").is_none());
    }
}
