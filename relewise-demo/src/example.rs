//! Example selection and URL parameter resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The demo scenarios that can be run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExampleId {
    #[default]
    SearchTermPrediction,
    ProductSearch,
}

impl ExampleId {
    /// Every example, in selector order
    pub const ALL: [ExampleId; 2] = [ExampleId::SearchTermPrediction, ExampleId::ProductSearch];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExampleId::SearchTermPrediction => "search-term-prediction",
            ExampleId::ProductSearch => "product-search",
        }
    }

    /// Human readable name shown in the selector and heading
    pub fn label(&self) -> &'static str {
        match self {
            ExampleId::SearchTermPrediction => "Search Term Prediction",
            ExampleId::ProductSearch => "Product Search",
        }
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier outside the allow-list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown example '{0}'")]
pub struct UnknownExample(pub String);

impl FromStr for ExampleId {
    type Err = UnknownExample;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExampleId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownExample(s.to_string()))
    }
}

/// Page parameters that pick the example: `?example=` or the StackBlitz-style `?file=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExampleParams {
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

impl ExampleParams {
    /// The raw identifier the parameters ask for, before validation
    pub fn requested(&self) -> Option<String> {
        if let Some(example) = self.example.as_deref().filter(|s| !s.is_empty()) {
            return Some(example.to_string());
        }

        let file = self.file.as_deref().filter(|s| !s.is_empty())?;
        let name = file.rsplit('/').next().filter(|s| !s.is_empty())?;
        Some(strip_extension(name).to_string())
    }

    /// Resolve to a known example, falling back to the default
    pub fn resolve(&self) -> ExampleId {
        self.requested()
            .and_then(|id| id.parse().ok())
            .unwrap_or_default()
    }
}

/// `foo.test.ts` -> `foo.test`; names without a dot are returned as-is
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[..idx],
        _ => name,
    }
}
