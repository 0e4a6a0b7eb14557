//! Tag DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /tag`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTag {
    pub label: String,
}

/// Tag as returned by the target API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub label: String,
}
