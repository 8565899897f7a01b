//! Cidaas SDK
//!
//! Client for the cidaas administrative API.
//!
//! ## Module Structure
//!
//! - `http` - Authenticated JSON transport with per-verb status acceptance
//! - `auth` - Client-credentials token acquisition
//! - `client` - The shared, immutable client handle
//! - `models` - Wire records and the response envelope
//! - `services` - Per-kind create/read/update/delete operations
//! - `error` - Client error taxonomy

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod models;
pub mod services;

pub use client::{CidaasClient, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, HttpResponse};
