//! Search term prediction request and builder

use super::QuerySettings;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTermPredictionRequest {
    #[serde(rename = "$type")]
    type_tag: &'static str,
    #[serde(flatten)]
    pub context: QuerySettings,
    pub term: String,
    pub take: u32,
}

impl SearchTermPredictionRequest {
    pub const TYPE_NAME: &'static str = "SearchTermPredictionRequest";
    const TYPE_TAG: &'static str =
        "Relewise.Client.Requests.Search.SearchTermPredictionRequest, Relewise.Client";
}

/// Fluent builder for [`SearchTermPredictionRequest`]
#[derive(Debug, Clone)]
pub struct SearchTermPredictionBuilder {
    context: QuerySettings,
    term: String,
    take: u32,
}

impl SearchTermPredictionBuilder {
    pub fn new(context: QuerySettings) -> Self {
        Self {
            context,
            term: String::new(),
            take: 5,
        }
    }

    pub fn set_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Maximum number of predictions returned
    pub fn take(mut self, count: u32) -> Self {
        self.take = count;
        self
    }

    pub fn build(self) -> SearchTermPredictionRequest {
        SearchTermPredictionRequest {
            type_tag: SearchTermPredictionRequest::TYPE_TAG,
            context: self.context,
            term: self.term,
            take: self.take,
        }
    }
}
