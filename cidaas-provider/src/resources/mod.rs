//! Resource adapters
//!
//! One module per managed entity kind. Each adapter owns its schema, the
//! marshalling between the state bag and the wire record, cross-field
//! validation and the five lifecycle callbacks.

use cidaas_core::{ProviderError, ProviderResult, ResourceData, ResourceDefinition};
use cidaas_sdk::CidaasClient;

/// Wrap `async fn(&mut ResourceData, &CidaasClient)` bodies into the
/// fn-pointer callbacks a [`ResourceDefinition`] holds. Errors are labelled
/// with the resource type and, when known, the host-visible id.
macro_rules! lifecycle_callbacks {
    ($($callback:ident => $body:ident),* $(,)?) => {
        $(
            fn $callback<'a>(
                d: &'a mut cidaas_core::ResourceData,
                client: &'a cidaas_sdk::CidaasClient,
            ) -> cidaas_core::BoxFuture<'a, cidaas_core::ProviderResult<()>> {
                Box::pin(async move {
                    let id = d.id().unwrap_or_default().to_string();
                    $body(d, client).await.map_err(|e| {
                        if e.resource.is_some() || id.is_empty() {
                            e
                        } else {
                            e.for_resource(RESOURCE_TYPE, &id)
                        }
                    })
                })
            }
        )*
    };
}

pub mod app;
pub mod custom_provider;
pub mod hosted_page;
pub mod registration_field;
pub mod role;
pub mod scope;
pub mod scope_group;
pub mod template;
pub mod user_group;
pub mod user_group_category;
pub mod webhook;

/// Returns all resource kinds managed by this provider
pub fn resources() -> Vec<ResourceDefinition<CidaasClient>> {
    vec![
        app::definition(),
        custom_provider::definition(),
        scope::definition(),
        scope_group::definition(),
        registration_field::definition(),
        template::definition(),
        hosted_page::definition(),
        role::definition(),
        user_group_category::definition(),
        user_group::definition(),
        webhook::definition(),
    ]
}

/// Natural key of an instance: the host-visible id, else `attribute`
pub(crate) fn natural_key(d: &ResourceData, attribute: &str) -> ProviderResult<String> {
    if let Some(id) = d.id()
        && !id.is_empty()
    {
        return Ok(id.to_string());
    }
    d.get_opt_string(attribute).ok_or_else(|| {
        ProviderError::validation(format!("resource id is not set and {} is empty", attribute))
    })
}

/// Import keyed by a natural-key attribute rather than the id slot
pub(crate) fn import_into(attribute: &str, id: &str) -> ProviderResult<Vec<ResourceData>> {
    if id.trim().is_empty() {
        return Err(ProviderError::validation(format!(
            "import id must be the {}",
            attribute
        )));
    }
    Ok(vec![
        ResourceData::new()
            .with_id(id)
            .with_attribute(attribute, id),
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_resource_names_are_unique() {
        let defs = resources();
        let names: HashSet<&str> = defs.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), defs.len());
        assert!(names.iter().all(|n| n.starts_with("cidaas_")));
    }

    #[test]
    fn test_schemas_are_named_after_their_resource() {
        for def in resources() {
            assert_eq!((def.schema)().resource_type, def.name);
        }
    }

    #[test]
    fn test_natural_key_prefers_id() {
        let d = ResourceData::new()
            .with_id("admin")
            .with_attribute("role", "other");
        assert_eq!(natural_key(&d, "role").unwrap(), "admin");

        let d = ResourceData::new().with_attribute("role", "viewer");
        assert_eq!(natural_key(&d, "role").unwrap(), "viewer");

        assert!(natural_key(&ResourceData::new(), "role").is_err());
    }

    #[test]
    fn test_import_into_seeds_attribute() {
        let imported = import_into("client_id", "abc").unwrap();
        assert_eq!(imported[0].id(), Some("abc"));
        assert_eq!(imported[0].get_string("client_id"), "abc");
        assert!(import_into("client_id", " ").is_err());
    }
}
