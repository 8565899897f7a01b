//! Provider configuration block
//!
//! Credentials missing from the block are taken from `CIDAAS_CLIENT_ID` and
//! `CIDAAS_CLIENT_SECRET`.

use std::fmt;

use cidaas_core::schema::types;
use cidaas_core::{AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData, ResourceSchema};
use cidaas_sdk::ClientConfig;
use cidaas_sdk::auth::CLIENT_CREDENTIALS;
use serde::Deserialize;

pub const CLIENT_ID_ENV: &str = "CIDAAS_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "CIDAAS_CLIENT_SECRET";

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Token endpoint
    pub auth_url: String,
    pub base_url: String,
    pub app_url: String,
    pub provider_url: String,
    pub grant_type: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("base_url", &self.base_url)
            .field("app_url", &self.app_url)
            .field("provider_url", &self.provider_url)
            .field("grant_type", &self.grant_type)
            .finish()
    }
}

impl ProviderConfig {
    /// Decode the provider block from the host's attribute bag
    pub fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        let json: serde_json::Map<String, serde_json::Value> = data
            .attributes()
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        serde_json::from_value(serde_json::Value::Object(json)).map_err(|e| {
            ProviderError::configuration("invalid provider configuration").with_detail(e.to_string())
        })
    }

    /// Fill credentials from the process environment
    pub fn with_env_fallback(self) -> Self {
        self.with_fallback(|name| std::env::var(name).ok())
    }

    /// Fill empty credentials through `lookup`
    pub fn with_fallback(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.client_id.is_empty()
            && let Some(id) = lookup(CLIENT_ID_ENV)
        {
            self.client_id = id;
        }
        if self.client_secret.is_empty()
            && let Some(secret) = lookup(CLIENT_SECRET_ENV)
        {
            self.client_secret = secret;
        }
        self
    }

    /// Check required settings and derive the client configuration
    pub fn client_config(&self) -> ProviderResult<ClientConfig> {
        let missing: Vec<&str> = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("auth_url", &self.auth_url),
            ("base_url", &self.base_url),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Err(ProviderError::configuration(format!(
                "missing provider configuration: {}",
                missing.join(", ")
            ))
            .with_detail(format!(
                "client credentials may also be supplied through {} and {}",
                CLIENT_ID_ENV, CLIENT_SECRET_ENV
            )));
        }

        let mut config = ClientConfig::new(
            &self.base_url,
            &self.auth_url,
            &self.client_id,
            &self.client_secret,
        )
        .with_redirect_uri(&self.redirect_uri);
        if !self.app_url.is_empty() {
            config = config.with_app_url(&self.app_url);
        }
        if !self.provider_url.is_empty() {
            config = config.with_provider_url(&self.provider_url);
        }
        if !self.grant_type.is_empty() {
            config = config.with_grant_type(&self.grant_type);
        }
        Ok(config)
    }
}

/// Schema of the provider block
pub fn config_schema() -> ResourceSchema {
    ResourceSchema::new("cidaas")
        .with_description("Connection settings for a cidaas tenant")
        .attribute(
            AttributeSchema::new("client_id", AttributeType::String)
                .with_description(format!("Admin client id; falls back to {}", CLIENT_ID_ENV)),
        )
        .attribute(
            AttributeSchema::new("client_secret", AttributeType::String)
                .sensitive()
                .with_description(format!(
                    "Admin client secret; falls back to {}",
                    CLIENT_SECRET_ENV
                )),
        )
        .attribute(AttributeSchema::new("redirect_uri", AttributeType::String))
        .attribute(
            AttributeSchema::new("auth_url", types::url())
                .required()
                .with_description("Token endpoint"),
        )
        .attribute(AttributeSchema::new("base_url", types::url()).required())
        .attribute(
            AttributeSchema::new("app_url", types::url())
                .with_description("Defaults to <base_url>/apps-srv/clients"),
        )
        .attribute(
            AttributeSchema::new("provider_url", types::url())
                .with_description("Defaults to <base_url>/providers-srv/custom"),
        )
        .attribute(
            AttributeSchema::new("grant_type", AttributeType::String)
                .with_default(CLIENT_CREDENTIALS),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ResourceData {
        ResourceData::new()
            .with_attribute("auth_url", "https://tenant.example.com/token-srv/token")
            .with_attribute("base_url", "https://tenant.example.com/")
            .with_attribute("redirect_uri", "https://tenant.example.com/cb")
    }

    #[test]
    fn test_env_fallback_fills_credentials() {
        let config = ProviderConfig::from_data(&data())
            .unwrap()
            .with_fallback(|name| match name {
                CLIENT_ID_ENV => Some("env-id".to_string()),
                CLIENT_SECRET_ENV => Some("env-secret".to_string()),
                _ => None,
            });
        let client = config.client_config().unwrap();
        assert_eq!(client.client_id, "env-id");
        assert_eq!(client.client_secret, "env-secret");
        assert_eq!(client.base_url, "https://tenant.example.com");
        assert_eq!(client.app_url, "https://tenant.example.com/apps-srv/clients");
        assert_eq!(client.grant_type, "client_credentials");
    }

    #[test]
    fn test_block_values_take_precedence_over_env() {
        let config = ProviderConfig::from_data(
            &data()
                .with_attribute("client_id", "block-id")
                .with_attribute("client_secret", "block-secret")
                .with_attribute("provider_url", "https://idp.example.com/custom"),
        )
        .unwrap()
        .with_fallback(|_| Some("env".to_string()));
        let client = config.client_config().unwrap();
        assert_eq!(client.client_id, "block-id");
        assert_eq!(client.provider_url, "https://idp.example.com/custom");
    }

    #[test]
    fn test_missing_credentials_is_configuration_error() {
        let config = ProviderConfig::from_data(&data())
            .unwrap()
            .with_fallback(|_| None);
        let err = config.client_config().unwrap_err();
        assert_eq!(err.kind, cidaas_core::ErrorKind::Configuration);
        assert!(err.message.contains("client_id, client_secret"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ProviderConfig {
            client_secret: "hunter2".to_string(),
            ..ProviderConfig::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_schema_requires_endpoints() {
        let errors = config_schema()
            .validate(ResourceData::new().attributes())
            .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
