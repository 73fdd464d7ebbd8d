use serde::{Deserialize, Serialize};

/// Public view of an account. The password hash never leaves the database layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}
