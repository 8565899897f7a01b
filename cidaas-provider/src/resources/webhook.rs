//! cidaas_webhook
//!
//! Exactly one credential block travels with a webhook, selected by
//! `auth_type`. The host-visible id is the server-assigned `_id`.

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::{ApiKeyDetails, CidaasAuthDetails, TotpDetails, Webhook};
use log::info;

use crate::utils::{AUTH_TYPES, PLACEMENTS, require_set};

pub const RESOURCE_TYPE: &str = "cidaas_webhook";

const APIKEY_FIELDS: &[&str] = &["apikey_placeholder", "apikey_placement", "apikey"];
const TOTP_FIELDS: &[&str] = &["totp_placeholder", "totp_placement", "totpkey"];
const OAUTH2_FIELDS: &[&str] = &["client_id"];

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("An outbound webhook")
        .attribute(AttributeSchema::new("auth_type", AttributeType::enumeration(AUTH_TYPES)).required())
        .attribute(AttributeSchema::new("url", types::url()).required())
        .attribute(AttributeSchema::new("events", AttributeType::string_list()).required())
        .attribute(AttributeSchema::new("apikey_placeholder", AttributeType::String))
        .attribute(AttributeSchema::new(
            "apikey_placement",
            AttributeType::enumeration(PLACEMENTS),
        ))
        .attribute(AttributeSchema::new("apikey", AttributeType::String).sensitive())
        .attribute(AttributeSchema::new("totp_placeholder", AttributeType::String))
        .attribute(AttributeSchema::new(
            "totp_placement",
            AttributeType::enumeration(PLACEMENTS),
        ))
        .attribute(AttributeSchema::new("totpkey", AttributeType::String).sensitive())
        .attribute(
            AttributeSchema::new("client_id", AttributeType::String)
                .with_description("Client whose credentials sign CIDAAS_OAUTH2 calls"),
        )
        .attribute(AttributeSchema::new("created_at", AttributeType::String).computed())
        .attribute(AttributeSchema::new("updated_at", AttributeType::String).computed())
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
    create => create_webhook,
    read => read_webhook,
    update => update_webhook,
    delete => delete_webhook,
}

fn webhook_id(d: &ResourceData) -> ProviderResult<String> {
    d.id()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::validation("webhook id is not set"))
}

fn build(d: &ResourceData) -> ProviderResult<Webhook> {
    let auth_type = d.get_string("auth_type");
    let events = d.get_string_list("events");
    if events.is_empty() {
        return Err(ProviderError::validation(
            "events must contain at least one event",
        ));
    }

    let mut webhook = Webhook {
        auth_type: auth_type.clone(),
        url: d.get_string("url"),
        events,
        ..Webhook::default()
    };
    let context = format!("auth_type is {}", auth_type);
    match auth_type.as_str() {
        "APIKEY" => {
            require_set(d, APIKEY_FIELDS, &context)?;
            webhook.apikey_details = Some(ApiKeyDetails {
                apikey_placeholder: d.get_string("apikey_placeholder"),
                apikey_placement: d.get_string("apikey_placement"),
                apikey: d.get_string("apikey"),
            });
        }
        "TOTP" => {
            require_set(d, TOTP_FIELDS, &context)?;
            webhook.totp_details = Some(TotpDetails {
                totp_placeholder: d.get_string("totp_placeholder"),
                totp_placement: d.get_string("totp_placement"),
                totpkey: d.get_string("totpkey"),
            });
        }
        "CIDAAS_OAUTH2" => {
            require_set(d, OAUTH2_FIELDS, &context)?;
            webhook.cidaas_auth_details = Some(CidaasAuthDetails {
                client_id: d.get_string("client_id"),
            });
        }
        other => {
            return Err(ProviderError::validation(format!(
                "invalid auth_type '{}', expected one of: {}",
                other,
                AUTH_TYPES.join(", ")
            )));
        }
    }
    Ok(webhook)
}

fn write(d: &mut ResourceData, webhook: Webhook) -> ProviderResult<()> {
    d.set("auth_type", webhook.auth_type)?;
    d.set("url", webhook.url)?;
    d.set("events", webhook.events)?;
    if let Some(details) = webhook.apikey_details {
        d.set("apikey_placeholder", details.apikey_placeholder)?;
        d.set("apikey_placement", details.apikey_placement)?;
        if !details.apikey.is_empty() {
            d.set("apikey", details.apikey)?;
        }
    }
    if let Some(details) = webhook.totp_details {
        d.set("totp_placeholder", details.totp_placeholder)?;
        d.set("totp_placement", details.totp_placement)?;
        if !details.totpkey.is_empty() {
            d.set("totpkey", details.totpkey)?;
        }
    }
    if let Some(details) = webhook.cidaas_auth_details {
        d.set("client_id", details.client_id)?;
    }
    d.set("created_at", webhook.created_time)?;
    d.set("updated_at", webhook.updated_time)?;
    Ok(())
}

async fn create_webhook(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let webhook = build(d)?;
    info!("creating {} webhook for {}", webhook.auth_type, webhook.url);
    let created = client.webhooks().upsert(&webhook).await?.into_data()?;
    if created.id.is_empty() {
        return Err(ProviderError::decoding("webhook create response carries no _id"));
    }
    d.set_id(created.id);
    read_webhook(d, client).await
}

async fn read_webhook(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let id = webhook_id(d)?;
    let webhook = client.webhooks().get(&id).await?.into_data()?;
    write(d, webhook)
}

async fn update_webhook(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let mut webhook = build(d)?;
    webhook.id = webhook_id(d)?;
    info!("updating webhook {}", webhook.id);
    client.webhooks().upsert(&webhook).await?.into_data()?;
    read_webhook(d, client).await
}

async fn delete_webhook(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let id = webhook_id(d)?;
    info!("deleting webhook {}", id);
    client.webhooks().delete(&id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(auth_type: &str) -> ResourceData {
        ResourceData::new()
            .with_attribute("auth_type", auth_type)
            .with_attribute("url", "https://hooks.example.com/cidaas")
            .with_attribute("events", vec!["ACCOUNT_CREATED".to_string()])
    }

    #[test]
    fn test_apikey_missing_placeholder() {
        let d = data("APIKEY")
            .with_attribute("apikey_placement", "header")
            .with_attribute("apikey_placeholder", "")
            .with_attribute("apikey", "x");
        let err = build(&d).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.message,
            "apikey_placeholder must be set when auth_type is APIKEY"
        );
    }

    #[test]
    fn test_only_selected_credential_block_is_sent() {
        let d = data("TOTP")
            .with_attribute("totp_placeholder", "totp")
            .with_attribute("totp_placement", "query")
            .with_attribute("totpkey", "secret")
            .with_attribute("apikey", "stale");
        let webhook = build(&d).unwrap();
        assert!(webhook.apikey_details.is_none());
        assert!(webhook.cidaas_auth_details.is_none());
        assert_eq!(webhook.totp_details.unwrap().totp_placement, "query");
    }

    #[test]
    fn test_oauth2_requires_client_id() {
        assert!(build(&data("CIDAAS_OAUTH2")).is_err());
        let d = data("CIDAAS_OAUTH2").with_attribute("client_id", "c1");
        assert_eq!(build(&d).unwrap().cidaas_auth_details.unwrap().client_id, "c1");
    }

    #[test]
    fn test_events_required() {
        let d = data("CIDAAS_OAUTH2")
            .with_attribute("client_id", "c1")
            .with_attribute("events", Vec::<String>::new());
        assert!(build(&d).is_err());
    }
}
