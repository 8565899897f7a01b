//! OAuth scope

use serde::{Deserialize, Serialize};

use super::is_false;

/// One locale-scoped description of a scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeDescription {
    #[serde(default)]
    pub locale: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Lowercase on the wire
    #[serde(rename = "scopeKey", default)]
    pub scope_key: String,
    #[serde(rename = "securityLevel", default, skip_serializing_if = "String::is_empty")]
    pub security_level: String,
    #[serde(rename = "requiredUserConsent", default, skip_serializing_if = "is_false")]
    pub required_user_consent: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_name: Vec<String>,
    #[serde(rename = "localeWiseDescription", default)]
    pub locale_wise_description: Vec<ScopeDescription>,
    #[serde(rename = "scopeOwner", default, skip_serializing_if = "String::is_empty")]
    pub scope_owner: String,
}
