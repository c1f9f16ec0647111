//! Request payloads and the fluent builders that produce them

mod facets;
mod prediction;
mod product_search;

pub use facets::{Facet, FacetBuilder, FacetQuery, PriceSelectionStrategy};
pub use prediction::{SearchTermPredictionBuilder, SearchTermPredictionRequest};
pub use product_search::{
    PaginationBuilder, ProductSearchBuilder, ProductSearchRequest, ProductSearchSettings,
    SelectedProductProperties, SelectedVariantProperties,
};

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-request context shared by every search request.
///
/// Serialized flattened into the request body, with language and currency
/// wrapped as `{ "value": ... }` the way the API expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySettings {
    #[serde(serialize_with = "as_value_wrapper")]
    pub language: String,
    #[serde(serialize_with = "as_value_wrapper")]
    pub currency: String,
    pub displayed_at_location: String,
    pub user: User,
}

impl QuerySettings {
    /// Settings for an anonymous user
    pub fn new(
        language: impl Into<String>,
        currency: impl Into<String>,
        displayed_at_location: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            currency: currency.into(),
            displayed_at_location: displayed_at_location.into(),
            user: User::anonymous(),
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = user;
        self
    }
}

fn as_value_wrapper<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Wrapped<'a> {
        value: &'a str,
    }
    Wrapped { value }.serialize(serializer)
}

/// End-user descriptor attached to a request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub classifications: BTreeMap<String, String>,
    pub identifiers: BTreeMap<String, String>,
    pub data: BTreeMap<String, Value>,
}

impl User {
    /// A user with no identity at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.authenticated_id.is_none()
            && self.temporary_id.is_none()
            && self.email.is_none()
            && self.identifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_serialize_with_value_wrappers() {
        let settings = QuerySettings::new("da-DK", "DKK", "Search Page");
        let value = serde_json::to_value(&settings).unwrap();

        assert_eq!(value["language"], json!({ "value": "da-DK" }));
        assert_eq!(value["currency"], json!({ "value": "DKK" }));
        assert_eq!(value["displayedAtLocation"], "Search Page");
        assert_eq!(
            value["user"],
            json!({ "classifications": {}, "identifiers": {}, "data": {} })
        );
    }

    #[test]
    fn test_anonymous_user() {
        assert!(User::anonymous().is_anonymous());

        let known = User {
            temporary_id: Some("t-1".to_string()),
            ..User::anonymous()
        };
        assert!(!known.is_anonymous());

        let settings = QuerySettings::new("en", "EUR", "Search Page").with_user(known);
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["user"]["temporaryId"], "t-1");
    }
}
