//! cidaas_custom_provider
//!
//! The host-visible id is an opaque creation timestamp; reads and deletes
//! are keyed by the `provider_name` attribute.

use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema, Value,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::{CustomProvider, ProviderScope, ProviderScopes};
use log::info;

use super::import_into;
use crate::utils::{block_bool, block_list, block_string, json_to_strings, timestamp_id};

pub const RESOURCE_TYPE: &str = "cidaas_custom_provider";

const STANDARD_TYPES: &[&str] = &["OPENID_CONNECT", "OAUTH2"];

fn scope_type() -> AttributeType {
    AttributeType::structure(
        "ProviderScope",
        vec![
            AttributeSchema::new("scope_name", types::non_empty_string()).required(),
            AttributeSchema::new("required", AttributeType::Bool),
            AttributeSchema::new("recommended", AttributeType::Bool),
        ],
    )
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("An external OpenID Connect or OAuth2 identity provider")
        .attribute(AttributeSchema::new("provider_name", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("display_name", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("standard_type", AttributeType::enumeration(STANDARD_TYPES))
                .with_default("OPENID_CONNECT"),
        )
        .attribute(AttributeSchema::new("authorization_endpoint", types::url()).required())
        .attribute(AttributeSchema::new("token_endpoint", types::url()).required())
        .attribute(AttributeSchema::new("userinfo_endpoint", types::url()).required())
        .attribute(AttributeSchema::new("logo_url", types::url()))
        .attribute(AttributeSchema::new("client_id", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("client_secret", types::non_empty_string())
                .required()
                .sensitive(),
        )
        .attribute(AttributeSchema::new("scope_display_label", AttributeType::String))
        .attribute(AttributeSchema::new("scopes", AttributeType::list_of(scope_type())))
        .attribute(AttributeSchema::new("domains", AttributeType::string_list()))
        .attribute(
            AttributeSchema::new("userinfo_fields", AttributeType::string_map())
                .with_description("Maps user profile fields to userinfo claims"),
        )
}

pub fn definition() -> ResourceDefinition<CidaasClient> {
    ResourceDefinition {
        name: RESOURCE_TYPE,
        schema,
        create,
        read,
        update,
        delete,
        import,
    }
}

lifecycle_callbacks! {
    create => create_provider,
    read => read_provider,
    update => update_provider,
    delete => delete_provider,
}

fn import(id: &str) -> ProviderResult<Vec<ResourceData>> {
    import_into("provider_name", id)
}

fn provider_name(d: &ResourceData) -> ProviderResult<String> {
    d.get_opt_string("provider_name")
        .ok_or_else(|| ProviderError::validation("provider_name is not set"))
}

fn build(d: &ResourceData) -> CustomProvider {
    let scopes = block_list(d, "scopes")
        .iter()
        .map(|b| ProviderScope {
            scope_name: block_string(b, "scope_name"),
            required: block_bool(b, "required"),
            recommended: block_bool(b, "recommended"),
        })
        .collect();
    let scope_display_label = d.get_string("scope_display_label");

    CustomProvider {
        standard_type: d
            .get_opt_string("standard_type")
            .unwrap_or_else(|| "OPENID_CONNECT".to_string()),
        authorization_endpoint: d.get_string("authorization_endpoint"),
        token_endpoint: d.get_string("token_endpoint"),
        provider_name: d.get_string("provider_name"),
        display_name: d.get_string("display_name"),
        logo_url: d.get_string("logo_url"),
        userinfo_endpoint: d.get_string("userinfo_endpoint"),
        client_id: d.get_string("client_id"),
        client_secret: d.get_string("client_secret"),
        domains: d.get_string_list("domains"),
        scopes: ProviderScopes {
            display_label: scope_display_label.clone(),
            scopes,
        },
        scope_display_label,
        userinfo_fields: d
            .get_string_map("userinfo_fields")
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect(),
        ..CustomProvider::default()
    }
}

fn write(d: &mut ResourceData, provider: CustomProvider) -> ProviderResult<()> {
    let scopes: Vec<Value> = provider
        .scopes
        .scopes
        .iter()
        .map(|s| {
            Value::Map(
                [
                    ("scope_name".to_string(), Value::from(s.scope_name.clone())),
                    ("required".to_string(), Value::from(s.required)),
                    ("recommended".to_string(), Value::from(s.recommended)),
                ]
                .into_iter()
                .collect(),
            )
        })
        .collect();
    let label = if provider.scope_display_label.is_empty() {
        provider.scopes.display_label.clone()
    } else {
        provider.scope_display_label.clone()
    };

    d.set("provider_name", provider.provider_name)?;
    d.set("display_name", provider.display_name)?;
    d.set("standard_type", provider.standard_type)?;
    d.set("authorization_endpoint", provider.authorization_endpoint)?;
    d.set("token_endpoint", provider.token_endpoint)?;
    d.set("userinfo_endpoint", provider.userinfo_endpoint)?;
    d.set("logo_url", provider.logo_url)?;
    d.set("client_id", provider.client_id)?;
    // The secret is not echoed by every tenant; keep the configured one
    if !provider.client_secret.is_empty() {
        d.set("client_secret", provider.client_secret)?;
    }
    d.set("scope_display_label", label)?;
    d.set("scopes", scopes)?;
    d.set("domains", provider.domains)?;
    d.set("userinfo_fields", json_to_strings(&provider.userinfo_fields))?;
    Ok(())
}

async fn create_provider(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let provider = build(d);
    info!("creating custom provider {}", provider.provider_name);
    client.custom_providers().create(&provider).await?.into_data()?;
    d.set_id(timestamp_id());
    read_provider(d, client).await
}

async fn read_provider(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let name = provider_name(d)?;
    let provider = client.custom_providers().get(&name).await?.into_data()?;
    write(d, provider)
}

async fn update_provider(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let provider = build(d);
    info!("updating custom provider {}", provider.provider_name);
    client.custom_providers().update(&provider).await?.into_data()?;
    read_provider(d, client).await
}

async fn delete_provider(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let name = provider_name(d)?;
    info!("deleting custom provider {}", name);
    client.custom_providers().delete(&name).await?;
    Ok(())
}
