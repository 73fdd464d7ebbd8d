use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `errors` is either a map of field name to messages (validation) or a plain
/// list (authorization failures).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetails {
    Fields(BTreeMap<String, Vec<String>>),
    Messages(Vec<String>),
}

impl Default for ErrorDetails {
    fn default() -> Self {
        ErrorDetails::Fields(BTreeMap::new())
    }
}

/// JSON body of every non-2xx API response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiErrorBody {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub errors: ErrorDetails,
}

impl ApiErrorBody {
    /// All server messages joined by a space, the way the forms display them.
    pub fn message(&self) -> String {
        let messages: Vec<&str> = match &self.errors {
            ErrorDetails::Fields(fields) => fields
                .values()
                .flat_map(|messages| messages.iter().map(String::as_str))
                .collect(),
            ErrorDetails::Messages(messages) => messages.iter().map(String::as_str).collect(),
        };

        if !messages.is_empty() {
            return messages.join(" ");
        }
        match &self.title {
            Some(title) => title.clone(),
            None => format!("Request failed with status {}", self.status),
        }
    }
}
