//! Wire models for the administrative API
//!
//! Every entity travels inside the standard response envelope
//! `{success, status, data, error?}`. Request records omit empty optional
//! fields from the encoded body.

pub mod app;
pub mod custom_provider;
pub mod group_type;
pub mod hosted_page;
pub mod registration_field;
pub mod role;
pub mod scope;
pub mod scope_group;
pub mod template;
pub mod user_group;
pub mod webhook;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use app::App;
pub use custom_provider::{CustomProvider, ProviderScope, ProviderScopes};
pub use group_type::GroupType;
pub use hosted_page::{HostedPage, HostedPageGroup};
pub use registration_field::{FieldDefinition, FieldLocaleText, RegistrationField};
pub use role::Role;
pub use scope::{Scope, ScopeDescription};
pub use scope_group::ScopeGroup;
pub use template::{Template, TemplateQuery};
pub use user_group::UserGroup;
pub use webhook::{ApiKeyDetails, CidaasAuthDetails, TotpDetails, Webhook};

use crate::error::{ClientError, ClientResult};

/// Error block of a failed envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceError {
    pub code: i64,
    #[serde(rename = "type")]
    pub error_type: String,
    pub status: i64,
    pub error: String,
    #[serde(rename = "referenceNumber", skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code {} ({}), status {}: {}",
            self.code, self.error_type, self.status, self.error
        )?;
        if let Some(reference) = &self.reference_number {
            write!(f, " [ref {}]", reference)?;
        }
        Ok(())
    }
}

/// Standard response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: i64,
    pub data: Option<T>,
    pub error: Option<ServiceError>,
}

impl<T> Envelope<T> {
    /// Fail with the service's error block when `success` is false
    pub fn ensure_success(&self) -> ClientResult<()> {
        if self.success {
            return Ok(());
        }
        let error = self.error.clone().unwrap_or_else(|| ServiceError {
            status: self.status,
            error: "request was not successful".to_string(),
            ..ServiceError::default()
        });
        Err(ClientError::Service(error))
    }

    /// The payload of a successful envelope
    pub fn into_data(self) -> ClientResult<T> {
        self.ensure_success()?;
        self.data.ok_or_else(|| ClientError::Decoding {
            message: "envelope carries no data".to_string(),
            body: String::new(),
        })
    }
}

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_envelope_surfaces_error_block() {
        let envelope: Envelope<Role> = serde_json::from_str(
            r#"{"success":false,"status":400,"error":{"code":417,"type":"RoleException","status":400,"error":"role exists"}}"#,
        )
        .unwrap();
        match envelope.into_data() {
            Err(ClientError::Service(e)) => {
                assert_eq!(e.code, 417);
                assert_eq!(e.error_type, "RoleException");
                assert_eq!(e.error, "role exists");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn failed_envelope_without_error_block() {
        let envelope: Envelope<Role> =
            serde_json::from_str(r#"{"success":false,"status":500}"#).unwrap();
        match envelope.ensure_success() {
            Err(ClientError::Service(e)) => assert_eq!(e.status, 500),
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn successful_envelope_without_data_is_a_decoding_error() {
        let envelope: Envelope<Role> =
            serde_json::from_str(r#"{"success":true,"status":200}"#).unwrap();
        assert!(matches!(
            envelope.into_data(),
            Err(ClientError::Decoding { .. })
        ));
    }
}
