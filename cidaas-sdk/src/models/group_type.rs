//! User group category (group type)

use serde::{Deserialize, Serialize};

/// Fixed owner of group types managed through this client
pub const OBJECT_OWNER_CLIENT: &str = "client";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupType {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "groupType", default)]
    pub group_type: String,
    #[serde(rename = "roleMode", default)]
    pub role_mode: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "allowedRoles", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_roles: Vec<String>,
    #[serde(rename = "objectOwner", default, skip_serializing_if = "String::is_empty")]
    pub object_owner: String,
    #[serde(rename = "createdTime", default, skip_serializing)]
    pub created_time: String,
    #[serde(rename = "updatedTime", default, skip_serializing)]
    pub updated_time: String,
}
