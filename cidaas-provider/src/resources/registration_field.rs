//! cidaas_registration_page_field
//!
//! The service keeps one locale text per language; the schema exposes a
//! single active one through the `locale_text_*` attributes.

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::{FieldDefinition, FieldLocaleText, RegistrationField};
use log::info;

use super::natural_key;
use crate::utils::LOCALES;

pub const RESOURCE_TYPE: &str = "cidaas_registration_page_field";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("A field on the registration page")
        .attribute(AttributeSchema::new("field_key", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("data_type", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("base_data_type", AttributeType::String).with_default("string"))
        .attribute(
            AttributeSchema::new("parent_group_id", AttributeType::String).with_default("DEFAULT"),
        )
        .attribute(AttributeSchema::new("field_type", AttributeType::String).with_default("CUSTOM"))
        .attribute(AttributeSchema::new("order", types::positive_int()).with_default(1i64))
        .attribute(AttributeSchema::new("is_group", AttributeType::Bool).with_default(false))
        .attribute(AttributeSchema::new("enabled", AttributeType::Bool).with_default(true))
        .attribute(AttributeSchema::new("claimable", AttributeType::Bool).with_default(true))
        .attribute(AttributeSchema::new("required", AttributeType::Bool).with_default(false))
        .attribute(AttributeSchema::new("read_only", AttributeType::Bool).with_default(false))
        .attribute(AttributeSchema::new("internal", AttributeType::Bool).with_default(false))
        .attribute(AttributeSchema::new("is_searchable", AttributeType::Bool).with_default(true))
        .attribute(AttributeSchema::new("scopes", AttributeType::string_list()))
        .attribute(
            AttributeSchema::new("locale_text_locale", AttributeType::enumeration(LOCALES))
                .with_default("en-us"),
        )
        .attribute(
            AttributeSchema::new("locale_text_language", AttributeType::String).with_default("en"),
        )
        .attribute(AttributeSchema::new("locale_text_name", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("required_msg", AttributeType::String)
                .with_description("Message shown when a required field is left empty"),
        )
        .attribute(AttributeSchema::new("max_length", types::positive_int()))
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
    create => create_field,
    read => read_field,
    update => update_field,
    delete => delete_field,
}

fn build(d: &ResourceData) -> ProviderResult<RegistrationField> {
    let required = d.get_bool("required");
    let required_msg = d.get_string("required_msg");
    if required && required_msg.is_empty() {
        return Err(ProviderError::validation(
            "required_msg must be set when required is true",
        ));
    }

    Ok(RegistrationField {
        parent_group_id: d
            .get_opt_string("parent_group_id")
            .unwrap_or_else(|| "DEFAULT".to_string()),
        is_group: d.get_bool("is_group"),
        data_type: d.get_string("data_type"),
        field_key: d.get_string("field_key"),
        field_type: d
            .get_opt_string("field_type")
            .unwrap_or_else(|| "CUSTOM".to_string()),
        order: d.get_opt_int("order").unwrap_or(1),
        enabled: d.get_opt_bool("enabled").unwrap_or(true),
        claimable: d.get_opt_bool("claimable").unwrap_or(true),
        required,
        read_only: d.get_bool("read_only"),
        internal: d.get_bool("internal"),
        is_searchable: d.get_opt_bool("is_searchable").unwrap_or(true),
        scopes: d.get_string_list("scopes"),
        base_data_type: d
            .get_opt_string("base_data_type")
            .unwrap_or_else(|| "string".to_string()),
        locale_text: Some(FieldLocaleText {
            locale: d
                .get_opt_string("locale_text_locale")
                .unwrap_or_else(|| "en-us".to_string()),
            language: d
                .get_opt_string("locale_text_language")
                .unwrap_or_else(|| "en".to_string()),
            name: d.get_string("locale_text_name"),
            required_msg,
        }),
        field_definition: d.get_opt_int("max_length").map(|max| FieldDefinition {
            max_length: Some(max),
        }),
        ..RegistrationField::default()
    })
}

fn write(d: &mut ResourceData, field: RegistrationField) -> ProviderResult<()> {
    let text = field.active_locale_text().cloned().unwrap_or_default();

    d.set("field_key", field.field_key)?;
    d.set("data_type", field.data_type)?;
    d.set("base_data_type", field.base_data_type)?;
    d.set("parent_group_id", field.parent_group_id)?;
    d.set("field_type", field.field_type)?;
    d.set("order", field.order)?;
    d.set("is_group", field.is_group)?;
    d.set("enabled", field.enabled)?;
    d.set("claimable", field.claimable)?;
    d.set("required", field.required)?;
    d.set("read_only", field.read_only)?;
    d.set("internal", field.internal)?;
    d.set("is_searchable", field.is_searchable)?;
    d.set("scopes", field.scopes)?;
    d.set("locale_text_locale", text.locale)?;
    d.set("locale_text_language", text.language)?;
    d.set("locale_text_name", text.name)?;
    d.set("required_msg", text.required_msg)?;
    match field.field_definition.and_then(|def| def.max_length) {
        Some(max) => d.set("max_length", max)?,
        None => {
            d.remove("max_length");
        }
    }
    Ok(())
}

async fn create_field(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let field = build(d)?;
    info!("creating registration field {}", field.field_key);
    client.registration_fields().upsert(&field).await?.into_data()?;
    d.set_id(field.field_key);
    read_field(d, client).await
}

async fn read_field(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "field_key")?;
    let field = client.registration_fields().get(&key).await?.into_data()?;
    write(d, field)
}

async fn update_field(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let field = build(d)?;
    info!("updating registration field {}", field.field_key);
    client.registration_fields().upsert(&field).await?.into_data()?;
    read_field(d, client).await
}

async fn delete_field(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "field_key")?;
    info!("deleting registration field {}", key);
    client.registration_fields().delete(&key).await?;
    Ok(())
}
