//! Hosted page group

use serde::{Deserialize, Serialize};

/// Fixed owner of hosted page groups managed through this client
pub const GROUP_OWNER_CLIENT: &str = "client";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostedPage {
    #[serde(default)]
    pub hosted_page_id: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostedPageGroup {
    /// The group name
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub group_owner: String,
    #[serde(default)]
    pub default_locale: String,
    #[serde(default)]
    pub hosted_pages: Vec<HostedPage>,
    #[serde(rename = "createdTime", default, skip_serializing)]
    pub created_time: String,
    #[serde(rename = "updatedTime", default, skip_serializing)]
    pub updated_time: String,
}
