//! Notification template

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub template_key: String,
    #[serde(default)]
    pub template_type: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// Only meaningful for EMAIL templates
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub template_owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub usage_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group_id: String,
}

/// Body of the template lookup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateQuery {
    pub template_key: String,
    pub template_type: String,
    pub locale: String,
}
