//! Service operations
//!
//! One small service per entity kind. Each verb selects the endpoint,
//! encodes the request, calls the transport and decodes the envelope.
//! Interpreting `success = false` is left to the caller through
//! [`Envelope::into_data`](crate::models::Envelope::into_data).

mod app;
mod custom_provider;
mod group_type;
mod hosted_page;
mod registration_field;
mod role;
mod scope;
mod scope_group;
mod template;
mod user_group;
mod webhook;

pub use app::AppService;
pub use custom_provider::CustomProviderService;
pub use group_type::GroupTypeService;
pub use hosted_page::HostedPageService;
pub use registration_field::RegistrationFieldService;
pub use role::RoleService;
pub use scope::ScopeService;
pub use scope_group::ScopeGroupService;
pub use template::TemplateService;
pub use user_group::UserGroupService;
pub use webhook::WebhookService;

use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpResponse;
use crate::models::Envelope;

/// Decode a response body into the standard envelope
pub(crate) fn decode<T: DeserializeOwned>(response: HttpResponse) -> ClientResult<Envelope<T>> {
    serde_json::from_str(&response.body).map_err(|e| ClientError::decoding(&e, &response.body))
}

/// Decode a delete response.
///
/// Empty bodies (204) are a success; otherwise the envelope must report
/// success.
pub(crate) fn decode_deleted(response: HttpResponse) -> ClientResult<()> {
    if response.is_empty() {
        return Ok(());
    }
    decode::<serde_json::Value>(response)?.ensure_success()
}

/// Percent-encode a query parameter value
pub(crate) fn query_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Percent-encode a single path segment
pub(crate) fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_percent_encoded() {
        assert_eq!(query_value("myscope"), "myscope");
        assert_eq!(query_value("a b&c"), "a%20b%26c");
        assert_eq!(query_value("ü"), "%C3%BC");
    }

    #[test]
    fn path_segments_escape_separators() {
        assert_eq!(path_segment("K_SMS"), "K_SMS");
        assert_eq!(path_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(path_segment("v1.0~x"), "v1.0~x");
    }

    #[test]
    fn empty_delete_body_is_success() {
        let response = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert!(decode_deleted(response).is_ok());
    }

    #[test]
    fn unsuccessful_delete_envelope_is_service_error() {
        let response = HttpResponse {
            status: 200,
            body: r#"{"success":false,"status":404,"error":{"error":"gone"}}"#.to_string(),
        };
        assert!(matches!(
            decode_deleted(response),
            Err(ClientError::Service(_))
        ));
    }

    #[test]
    fn garbage_body_is_decoding_error() {
        let response = HttpResponse {
            status: 200,
            body: "<html>".to_string(),
        };
        assert!(matches!(
            decode::<serde_json::Value>(response),
            Err(ClientError::Decoding { .. })
        ));
    }
}
