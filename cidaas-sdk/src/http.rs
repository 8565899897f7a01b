//! Authenticated JSON transport
//!
//! One stateless client offering GET, POST, PUT and DELETE. Each verb
//! accepts a fixed set of statuses; anything else is a transport error
//! carrying the status and raw body. Bodies are returned undecoded.

use std::fmt;

use log::{debug, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, redirect};
use serde::Serialize;

use crate::error::{ClientError, ClientResult};

/// Statuses accepted for GET
pub const GET_ACCEPTED: &[u16] = &[200];
/// Statuses accepted for POST
pub const POST_ACCEPTED: &[u16] = &[200, 201, 204];
/// Statuses accepted for PUT
pub const PUT_ACCEPTED: &[u16] = &[200];
/// Statuses accepted for DELETE
pub const DELETE_ACCEPTED: &[u16] = &[200, 201, 202, 204];

const USER_AGENT: &str = concat!("cidaas-provider/", env!("CARGO_PKG_VERSION"));

/// Raw outcome of an accepted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    token: Option<String>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpClient {
    /// Build a client without credentials. Redirects are not followed.
    pub fn new() -> ClientResult<Self> {
        let inner = Client::builder()
            .redirect(redirect::Policy::none())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { inner, token: None })
    }

    /// Same client, sending `Authorization: Bearer <token>` from now on
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn get(&self, url: &str) -> ClientResult<HttpResponse> {
        self.execute(Method::GET, url, None::<&()>, GET_ACCEPTED).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<HttpResponse> {
        self.execute(Method::POST, url, Some(body), POST_ACCEPTED)
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<HttpResponse> {
        self.execute(Method::PUT, url, Some(body), PUT_ACCEPTED).await
    }

    pub async fn delete(&self, url: &str) -> ClientResult<HttpResponse> {
        self.execute(Method::DELETE, url, None::<&()>, DELETE_ACCEPTED)
            .await
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        accepted: &[u16],
    ) -> ClientResult<HttpResponse> {
        debug!("{} {}", method, url);
        let mut builder = self
            .inner
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(|e| {
                ClientError::Configuration(format!("failed to encode request body: {e}"))
            })?;
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(encoded);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if accepted.contains(&status) {
            Ok(HttpResponse { status, body })
        } else {
            warn!("{} {} answered {}", method, url, status);
            Err(ClientError::Transport { status, body })
        }
    }
}
