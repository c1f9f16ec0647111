//! Facet requests attached to a product search

use serde::Serialize;

/// Which price a price-range facet aggregates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceSelectionStrategy {
    Product,
    Variant,
    VariantWithFallbackToProduct,
}

/// A single facet request, tagged with the API's polymorphic type name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type")]
pub enum Facet {
    #[serde(
        rename = "Relewise.Client.DataTypes.Search.Facets.Queries.BrandFacet, Relewise.Client",
        rename_all = "camelCase"
    )]
    Brand { field: &'static str },

    #[serde(
        rename = "Relewise.Client.DataTypes.Search.Facets.Queries.PriceRangeFacet, Relewise.Client",
        rename_all = "camelCase"
    )]
    SalesPriceRange {
        field: &'static str,
        price_selection_strategy: PriceSelectionStrategy,
    },

    #[serde(
        rename = "Relewise.Client.DataTypes.Search.Facets.Queries.VariantSpecificationFacet, Relewise.Client",
        rename_all = "camelCase"
    )]
    VariantSpecification { field: &'static str, key: String },
}

/// Ordered list of facets, serialized as `{ "items": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetQuery {
    pub items: Vec<Facet>,
}

impl FacetQuery {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fluent facet builder handed to [`super::ProductSearchBuilder::facets`]
#[derive(Debug, Default)]
pub struct FacetBuilder {
    items: Vec<Facet>,
}

impl FacetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_brand_facet(mut self) -> Self {
        self.items.push(Facet::Brand { field: "Brand" });
        self
    }

    pub fn add_sales_price_range_facet(mut self, strategy: PriceSelectionStrategy) -> Self {
        self.items.push(Facet::SalesPriceRange {
            field: "SalesPrice",
            price_selection_strategy: strategy,
        });
        self
    }

    pub fn add_variant_specification_facet(mut self, key: impl Into<String>) -> Self {
        self.items.push(Facet::VariantSpecification {
            field: "VariantSpecification",
            key: key.into(),
        });
        self
    }

    pub fn build(self) -> FacetQuery {
        FacetQuery { items: self.items }
    }
}
