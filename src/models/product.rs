use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog record. The fields the query pipeline interprets are typed;
/// everything else in the source JSON (dimensions, reviews, images, ...)
/// is carried verbatim in `extra` and round-trips untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub availability_status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Case-insensitive substring test over title, description, brand and
    /// tags. `term_lower` must already be lowercased.
    pub fn matches_search(&self, term_lower: &str) -> bool {
        let contains = |s: &str| s.to_lowercase().contains(term_lower);
        contains(&self.title)
            || contains(&self.description)
            || contains(&self.brand)
            || self.tags.iter().any(|t| contains(t))
    }
}
