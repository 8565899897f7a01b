//! cidaas_scope
//!
//! Scopes are keyed by `scope_key`; the service stores the key lowercased
//! and expects it lowercased on reads and deletes.

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema, Value,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::{Scope, ScopeDescription};
use log::info;

use super::natural_key;
use crate::utils::{LOCALES, SECURITY_LEVELS, block, block_list, block_string};

pub const RESOURCE_TYPE: &str = "cidaas_scope";

fn description_type() -> AttributeType {
    AttributeType::structure(
        "LocalizedDescription",
        vec![
            AttributeSchema::new("locale", AttributeType::enumeration(LOCALES)).required(),
            AttributeSchema::new("language", AttributeType::String),
            AttributeSchema::new("title", AttributeType::String),
            AttributeSchema::new("description", AttributeType::String),
        ],
    )
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("An OAuth2 scope")
        .attribute(AttributeSchema::new("scope_key", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("security_level", AttributeType::enumeration(SECURITY_LEVELS))
                .with_default("PUBLIC"),
        )
        .attribute(
            AttributeSchema::new("required_user_consent", AttributeType::Bool).with_default(false),
        )
        .attribute(
            AttributeSchema::new("group_name", AttributeType::string_list())
                .with_description("Scope groups this scope belongs to"),
        )
        .attribute(
            AttributeSchema::new(
                "localized_descriptions",
                AttributeType::list_of(description_type()),
            )
            .required(),
        )
        .attribute(AttributeSchema::new("scope_owner", AttributeType::String).computed())
}

pub fn definition() -> ResourceDefinition<CidaasClient> {
    ResourceDefinition {
        name: RESOURCE_TYPE,
        schema,
        create,
        read,
        update,
        delete,
        import: import_passthrough,
    }
}

lifecycle_callbacks! {
    create => create_scope,
    read => read_scope,
    update => update_scope,
    delete => delete_scope,
}

fn build(d: &ResourceData) -> ProviderResult<Scope> {
    let descriptions: Vec<ScopeDescription> = block_list(d, "localized_descriptions")
        .iter()
        .map(|b| ScopeDescription {
            locale: block_string(b, "locale"),
            language: block_string(b, "language"),
            title: block_string(b, "title"),
            description: block_string(b, "description"),
        })
        .collect();
    if descriptions.is_empty() {
        return Err(ProviderError::validation(
            "localized_descriptions must contain at least one entry",
        ));
    }

    Ok(Scope {
        scope_key: d.get_string("scope_key"),
        security_level: d
            .get_opt_string("security_level")
            .unwrap_or_else(|| "PUBLIC".to_string()),
        required_user_consent: d.get_bool("required_user_consent"),
        group_name: d.get_string_list("group_name"),
        locale_wise_description: descriptions,
        ..Scope::default()
    })
}

fn write(d: &mut ResourceData, scope: Scope) -> ProviderResult<()> {
    let descriptions: Vec<Value> = scope
        .locale_wise_description
        .into_iter()
        .map(|desc| {
            block([
                ("locale", desc.locale),
                ("language", desc.language),
                ("title", desc.title),
                ("description", desc.description),
            ])
        })
        .collect();

    d.set("scope_key", scope.scope_key)?;
    d.set("security_level", scope.security_level)?;
    d.set("required_user_consent", scope.required_user_consent)?;
    d.set("group_name", scope.group_name)?;
    d.set("localized_descriptions", descriptions)?;
    d.set("scope_owner", scope.scope_owner)?;
    Ok(())
}

async fn create_scope(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let scope = build(d)?;
    info!("creating scope {}", scope.scope_key);
    client.scopes().upsert(&scope).await?.into_data()?;
    d.set_id(scope.scope_key);
    read_scope(d, client).await
}

async fn read_scope(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "scope_key")?;
    let scope = client.scopes().get(&key).await?.into_data()?;
    write(d, scope)
}

async fn update_scope(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let scope = build(d)?;
    info!("updating scope {}", scope.scope_key);
    client.scopes().upsert(&scope).await?.into_data()?;
    read_scope(d, client).await
}

async fn delete_scope(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "scope_key")?;
    info!("deleting scope {}", key);
    client.scopes().delete(&key).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ResourceData {
        ResourceData::new()
            .with_attribute("scope_key", "MyScope")
            .with_attribute("group_name", vec!["profile".to_string()])
            .with_attribute(
                "localized_descriptions",
                vec![block([
                    ("locale", "en-us"),
                    ("language", "en"),
                    ("title", "My scope"),
                ])],
            )
    }

    #[test]
    fn test_build_scope() {
        let scope = build(&data()).unwrap();
        assert_eq!(scope.scope_key, "MyScope");
        assert_eq!(scope.security_level, "PUBLIC");
        assert!(!scope.required_user_consent);
        assert_eq!(scope.group_name, vec!["profile"]);
        assert_eq!(scope.locale_wise_description.len(), 1);
        assert_eq!(scope.locale_wise_description[0].title, "My scope");
        assert!(scope.locale_wise_description[0].description.is_empty());
    }

    #[test]
    fn test_build_requires_a_description() {
        let d = ResourceData::new().with_attribute("scope_key", "s");
        assert!(build(&d).unwrap_err().is_validation());
    }

    #[test]
    fn test_schema_rejects_unknown_locale() {
        let d = data().with_attribute(
            "localized_descriptions",
            vec![block([("locale", "en_US")])],
        );
        assert!(schema().validate(d.attributes()).is_err());
    }

    #[test]
    fn test_write_round_trips_build() {
        let scope = build(&data()).unwrap();
        let mut d = ResourceData::new().with_schema(std::sync::Arc::new(schema()));
        write(&mut d, scope.clone()).unwrap();
        assert_eq!(build(&d).unwrap(), scope);
    }
}
