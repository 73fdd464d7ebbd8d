use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::null_as_default;
use crate::models::user::User;

pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default = "default_stars")]
    pub stars: i32,
    /// Assigned by the server on creation, ignored on input.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub restaurant_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

fn default_stars() -> i32 {
    MAX_STARS
}

impl Review {
    /// Blank draft for the review form of a restaurant page.
    pub fn draft(restaurant_id: i64) -> Self {
        Self {
            id: 0,
            summary: String::new(),
            body: String::new(),
            stars: MAX_STARS,
            created_at: None,
            user_id: 0,
            restaurant_id,
            user: None,
        }
    }

    /// Field errors keyed the way the API reports them. Empty when valid.
    pub fn validation_errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();
        if !(MIN_STARS..=MAX_STARS).contains(&self.stars) {
            errors.push((
                "Stars",
                format!("Stars must be between {MIN_STARS} and {MAX_STARS}."),
            ));
        }
        errors
    }

    /// e.g. "Tuesday, March 5th, 2024 at 6:30 pm"
    pub fn created_at_display(&self) -> Option<String> {
        let created_at = self.created_at?;
        Some(format!(
            "{}, {} {}{}, {} at {}",
            created_at.format("%A"),
            created_at.format("%B"),
            created_at.day(),
            ordinal_suffix(created_at.day()),
            created_at.year(),
            created_at.format("%-I:%M %P"),
        ))
    }

    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.full_name.as_str())
            .unwrap_or("Someone")
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
