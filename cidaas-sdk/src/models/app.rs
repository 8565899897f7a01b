//! Application (OAuth client)

use serde::{Deserialize, Serialize};

/// An application.
///
/// The commonly used attributes are typed; every other attribute the
/// service knows about travels through `extra` under its wire name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct App {
    /// Server-assigned on create
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    #[serde(default, skip_serializing)]
    pub client_secret: String,
    #[serde(default)]
    pub client_type: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_display_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_address: String,
    #[serde(default)]
    pub company_website: String,
    #[serde(default)]
    pub allow_login_with: Vec<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default)]
    pub allowed_logout_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_web_origins: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub hosted_page_group: String,
    #[serde(default)]
    pub allowed_scopes: Vec<String>,
    #[serde(default)]
    pub response_types: Vec<String>,
    #[serde(default)]
    pub grant_types: Vec<String>,
    #[serde(default)]
    pub template_group_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub login_providers: Vec<String>,

    // Branding
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub accent_color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub primary_color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_align: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logo_uri: String,

    // Token lifetimes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_lifetime_in_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token_lifetime_in_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_lifetime_in_seconds: Option<i64>,

    // Flags
    #[serde(default)]
    pub enable_deduplication: bool,
    #[serde(default)]
    pub auto_login_after_register: bool,
    #[serde(default)]
    pub enable_passwordless_auth: bool,
    #[serde(default)]
    pub register_with_login_information: bool,
    #[serde(default)]
    pub fds_enabled: bool,
    #[serde(default)]
    pub is_hybrid_app: bool,

    /// Auxiliary attributes keyed by wire name
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_attributes_land_in_extra() {
        let app: App = serde_json::from_str(
            r#"{"client_id":"abc","client_type":"SINGLE_PAGE","policy_uri":"https://x/p","jwe_enabled":true}"#,
        )
        .unwrap();
        assert_eq!(app.client_id, "abc");
        assert_eq!(
            app.extra.get("policy_uri"),
            Some(&serde_json::json!("https://x/p"))
        );
        assert_eq!(app.extra.get("jwe_enabled"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn create_body_omits_server_assigned_fields() {
        let app = App {
            client_type: "SINGLE_PAGE".to_string(),
            client_secret: "shh".to_string(),
            ..App::default()
        };
        let json = serde_json::to_value(&app).unwrap();
        assert!(json.get("client_id").is_none());
        assert!(json.get("client_secret").is_none());
        assert!(json.get("token_lifetime_in_seconds").is_none());
        assert_eq!(json["client_type"], "SINGLE_PAGE");
    }
}
