use serde::{Deserialize, Serialize};

use crate::models::null_as_default;
use crate::models::review::Review;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub telephone: String,
    /// Owner. Always taken from the caller's token, never from the request body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
}

impl Restaurant {
    /// Field errors keyed the way the API reports them. Empty when valid.
    pub fn validation_errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(("Name", "You must provide a name.".to_string()));
        }
        if self.address.trim().is_empty() {
            errors.push(("Address", "You must provide an address.".to_string()));
        }
        errors
    }

    pub fn average_stars(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: i64 = self.reviews.iter().map(|review| i64::from(review.stars)).sum();
        Some(total as f64 / self.reviews.len() as f64)
    }

    pub fn matches_filter(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}
