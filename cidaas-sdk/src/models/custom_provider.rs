//! Custom (OIDC-like) identity provider

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::is_false;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderScope {
    #[serde(default)]
    pub scope_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub recommended: bool,
}

/// Scope tree offered by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderScopes {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_label: String,
    #[serde(default)]
    pub scopes: Vec<ProviderScope>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomProvider {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub standard_type: String,
    #[serde(default)]
    pub authorization_endpoint: String,
    #[serde(default)]
    pub token_endpoint: String,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logo_url: String,
    #[serde(default)]
    pub userinfo_endpoint: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope_display_label: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    #[serde(default)]
    pub scopes: ProviderScopes,
    /// Claim name mapping, e.g. `given_name -> "first_name"`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub userinfo_fields: BTreeMap<String, serde_json::Value>,
}
