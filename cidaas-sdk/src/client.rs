//! The shared client handle
//!
//! Built once per provider configuration: holds the endpoint URLs, the
//! client credentials and the access token acquired at bootstrap. Immutable
//! after [`CidaasClient::connect`] and safe to share by reference.

use std::fmt;

use log::info;

use crate::auth::{self, CLIENT_CREDENTIALS, TokenRequest, TokenResponse};
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::services::{
    AppService, CustomProviderService, GroupTypeService, HostedPageService,
    RegistrationFieldService, RoleService, ScopeGroupService, ScopeService, TemplateService,
    UserGroupService, WebhookService,
};

/// Endpoint and credential settings
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub app_url: String,
    pub provider_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

impl ClientConfig {
    /// Config with the app and provider URLs derived from `base_url`
    pub fn new(
        base_url: impl Into<String>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            app_url: format!("{}/apps-srv/clients", base_url),
            provider_url: format!("{}/providers-srv/custom", base_url),
            base_url,
            token_url: token_url.into(),
            redirect_uri: String::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            grant_type: CLIENT_CREDENTIALS.to_string(),
        }
    }

    pub fn with_app_url(mut self, url: impl Into<String>) -> Self {
        self.app_url = url.into();
        self
    }

    pub fn with_provider_url(mut self, url: impl Into<String>) -> Self {
        self.provider_url = url.into();
        self
    }

    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }

    pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = grant_type.into();
        self
    }

    fn token_request(&self) -> TokenRequest {
        TokenRequest {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            grant_type: self.grant_type.clone(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("app_url", &self.app_url)
            .field("provider_url", &self.provider_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("grant_type", &self.grant_type)
            .finish()
    }
}

/// Authenticated handle shared by every lifecycle callback
#[derive(Debug, Clone)]
pub struct CidaasClient {
    config: ClientConfig,
    token: TokenResponse,
    http: HttpClient,
}

impl CidaasClient {
    /// Acquire an access token and return the ready handle.
    ///
    /// The token is fetched exactly once; it is not refreshed.
    pub async fn connect(config: ClientConfig) -> ClientResult<Self> {
        let http = HttpClient::new()?;
        let token = auth::request_token(&http, &config.token_url, &config.token_request()).await?;
        info!("authenticated against {}", config.base_url);
        Ok(Self {
            http: http.with_token(token.access_token.clone()),
            config,
            token,
        })
    }

    /// Handle around an already acquired token
    pub fn with_token(config: ClientConfig, token: TokenResponse) -> ClientResult<Self> {
        let http = HttpClient::new()?.with_token(token.access_token.clone());
        Ok(Self {
            config,
            token,
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn token(&self) -> &TokenResponse {
        &self.token
    }

    pub fn access_token(&self) -> &str {
        &self.token.access_token
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Absolute URL for a path under `base_url`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    // =========================================================================
    // Services
    // =========================================================================

    pub fn apps(&self) -> AppService<'_> {
        AppService::new(self)
    }

    pub fn custom_providers(&self) -> CustomProviderService<'_> {
        CustomProviderService::new(self)
    }

    pub fn scopes(&self) -> ScopeService<'_> {
        ScopeService::new(self)
    }

    pub fn scope_groups(&self) -> ScopeGroupService<'_> {
        ScopeGroupService::new(self)
    }

    pub fn registration_fields(&self) -> RegistrationFieldService<'_> {
        RegistrationFieldService::new(self)
    }

    pub fn templates(&self) -> TemplateService<'_> {
        TemplateService::new(self)
    }

    pub fn hosted_pages(&self) -> HostedPageService<'_> {
        HostedPageService::new(self)
    }

    pub fn roles(&self) -> RoleService<'_> {
        RoleService::new(self)
    }

    pub fn group_types(&self) -> GroupTypeService<'_> {
        GroupTypeService::new(self)
    }

    pub fn user_groups(&self) -> UserGroupService<'_> {
        UserGroupService::new(self)
    }

    pub fn webhooks(&self) -> WebhookService<'_> {
        WebhookService::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_derives_urls_from_base() {
        let config = ClientConfig::new("https://tenant.example.com/", "https://t/token", "id", "secret");
        assert_eq!(config.base_url, "https://tenant.example.com");
        assert_eq!(config.app_url, "https://tenant.example.com/apps-srv/clients");
        assert_eq!(
            config.provider_url,
            "https://tenant.example.com/providers-srv/custom"
        );
        assert_eq!(config.grant_type, "client_credentials");
    }

    #[test]
    fn debug_redacts_secret() {
        let config = ClientConfig::new("https://a", "https://a/token", "id", "top-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("top-secret"));
        assert!(printed.contains("[REDACTED]"));
    }
}
