//! Scope group

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeGroup {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "createdTime", default, skip_serializing)]
    pub created_time: String,
    #[serde(rename = "updatedTime", default, skip_serializing)]
    pub updated_time: String,
}
