//! Client-credentials token acquisition

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

pub const CLIENT_CREDENTIALS: &str = "client_credentials";

/// Body posted to the token endpoint
#[derive(Clone, Serialize)]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("grant_type", &self.grant_type)
            .finish()
    }
}

/// Token endpoint response
#[derive(Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Exchange client credentials for an access token.
///
/// The request goes out without a bearer header; the returned token must be
/// non-empty.
pub async fn request_token(
    http: &HttpClient,
    token_url: &str,
    request: &TokenRequest,
) -> ClientResult<TokenResponse> {
    debug!(
        "requesting {} token for client {}",
        request.grant_type, request.client_id
    );
    let response = http.post(token_url, request).await?;
    let token: TokenResponse = serde_json::from_str(&response.body)
        .map_err(|e| ClientError::decoding(&e, &response.body))?;
    if token.access_token.trim().is_empty() {
        return Err(ClientError::Authentication(
            "token endpoint returned an empty access token".to_string(),
        ));
    }
    Ok(token)
}
