//! Outbound webhook

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyDetails {
    #[serde(default)]
    pub apikey_placeholder: String,
    #[serde(default)]
    pub apikey_placement: String,
    #[serde(default)]
    pub apikey: String,
}

impl fmt::Debug for ApiKeyDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyDetails")
            .field("apikey_placeholder", &self.apikey_placeholder)
            .field("apikey_placement", &self.apikey_placement)
            .field("apikey", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotpDetails {
    #[serde(default)]
    pub totp_placeholder: String,
    #[serde(default)]
    pub totp_placement: String,
    #[serde(default)]
    pub totpkey: String,
}

impl fmt::Debug for TotpDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpDetails")
            .field("totp_placeholder", &self.totp_placeholder)
            .field("totp_placement", &self.totp_placement)
            .field("totpkey", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CidaasAuthDetails {
    #[serde(default)]
    pub client_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    /// Server-assigned; present in update bodies
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub auth_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(rename = "apikeyDetails", default, skip_serializing_if = "Option::is_none")]
    pub apikey_details: Option<ApiKeyDetails>,
    #[serde(rename = "totpDetails", default, skip_serializing_if = "Option::is_none")]
    pub totp_details: Option<TotpDetails>,
    #[serde(rename = "cidaasAuthDetails", default, skip_serializing_if = "Option::is_none")]
    pub cidaas_auth_details: Option<CidaasAuthDetails>,
    #[serde(rename = "createdTime", default, skip_serializing)]
    pub created_time: String,
    #[serde(rename = "updatedTime", default, skip_serializing)]
    pub updated_time: String,
}
