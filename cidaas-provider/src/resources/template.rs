//! cidaas_template
//!
//! Templates have no single natural key; the host-visible id packs key, type
//! and locale as `<key>_<type>_<locale>`.

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::{Template, TemplateQuery};
use log::info;

use crate::utils::{LOCALES, TEMPLATE_TYPES, ensure_unchanged, parse_template_id, template_id};

pub const RESOURCE_TYPE: &str = "cidaas_template";

const IMMUTABLE: &[&str] = &["template_key", "template_type", "locale"];

const EMAIL: &str = "EMAIL";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("A custom notification template")
        .attribute(AttributeSchema::new("template_key", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("template_type", AttributeType::enumeration(TEMPLATE_TYPES))
                .required(),
        )
        .attribute(AttributeSchema::new("locale", AttributeType::enumeration(LOCALES)).required())
        .attribute(AttributeSchema::new("content", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("subject", AttributeType::String)
                .with_description("Required for EMAIL templates, not allowed otherwise"),
        )
        .attribute(AttributeSchema::new("template_owner", AttributeType::String).computed())
        .attribute(AttributeSchema::new("usage_type", AttributeType::String).computed())
        .attribute(AttributeSchema::new("language", AttributeType::String).computed())
        .attribute(AttributeSchema::new("group_id", AttributeType::String).computed())
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
    create => create_template,
    read => read_template,
    update => update_template,
    delete => delete_template,
}

fn build(d: &ResourceData) -> ProviderResult<Template> {
    let template = Template {
        template_key: d.get_string("template_key"),
        template_type: d.get_string("template_type"),
        locale: d.get_string("locale"),
        content: d.get_string("content"),
        subject: d.get_string("subject"),
        ..Template::default()
    };

    if template.template_type == EMAIL && template.subject.trim().is_empty() {
        return Err(ProviderError::validation(
            "subject must be set when template_type is EMAIL",
        ));
    }
    if template.template_type != EMAIL && !template.subject.is_empty() {
        return Err(ProviderError::validation(format!(
            "subject is only supported for EMAIL templates, not {}",
            template.template_type
        )));
    }
    Ok(template)
}

fn write(d: &mut ResourceData, template: Template) -> ProviderResult<()> {
    d.set("template_key", template.template_key)?;
    d.set("template_type", template.template_type)?;
    d.set("locale", template.locale)?;
    d.set("content", template.content)?;
    d.set("subject", template.subject)?;
    d.set("template_owner", template.template_owner)?;
    d.set("usage_type", template.usage_type)?;
    d.set("language", template.language)?;
    d.set("group_id", template.group_id)?;
    Ok(())
}

/// Key parts from the id slot, else from the attributes
fn query(d: &ResourceData) -> ProviderResult<TemplateQuery> {
    let (template_key, template_type, locale) = match d.id() {
        Some(id) if !id.is_empty() => parse_template_id(id)?,
        _ => parse_template_id(&template_id(
            &d.get_string("template_key"),
            &d.get_string("template_type"),
            &d.get_string("locale"),
        ))?,
    };
    Ok(TemplateQuery {
        template_key,
        template_type,
        locale,
    })
}

async fn create_template(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let template = build(d)?;
    info!(
        "creating {} template {} ({})",
        template.template_type, template.template_key, template.locale
    );
    client.templates().upsert(&template).await?.into_data()?;
    d.set_id(template_id(
        &template.template_key,
        &template.template_type,
        &template.locale,
    ));
    read_template(d, client).await
}

async fn read_template(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let query = query(d)?;
    let template = client.templates().find(&query).await?.into_data()?;
    write(d, template)
}

async fn update_template(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    ensure_unchanged(d, IMMUTABLE)?;
    let template = build(d)?;
    info!(
        "updating {} template {} ({})",
        template.template_type, template.template_key, template.locale
    );
    client.templates().upsert(&template).await?.into_data()?;
    read_template(d, client).await
}

async fn delete_template(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let query = query(d)?;
    info!(
        "deleting {} template {}",
        query.template_type, query.template_key
    );
    client
        .templates()
        .delete(&query.template_key, &query.template_type)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cidaas_core::Value;

    use super::*;

    fn data(template_type: &str, subject: &str) -> ResourceData {
        ResourceData::new()
            .with_attribute("template_key", "welcome")
            .with_attribute("template_type", template_type)
            .with_attribute("locale", "en-us")
            .with_attribute("content", "Hello {{name}}")
            .with_attribute("subject", subject)
    }

    #[test]
    fn test_email_requires_subject() {
        let err = build(&data("EMAIL", "")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message, "subject must be set when template_type is EMAIL");
        assert!(build(&data("EMAIL", "Welcome")).is_ok());
    }

    #[test]
    fn test_subject_rejected_for_sms() {
        assert!(build(&data("SMS", "Welcome")).is_err());
        assert!(build(&data("SMS", "")).is_ok());
    }

    #[test]
    fn test_key_is_immutable() {
        let prior: HashMap<String, Value> = data("SMS", "").into_attributes();
        let d = data("SMS", "")
            .with_attribute("template_key", "welcome2")
            .with_prior(prior);
        let err = ensure_unchanged(&d, IMMUTABLE).unwrap_err();
        assert_eq!(err.message, "template_key can't be modified");
    }

    #[test]
    fn test_query_from_id() {
        let d = ResourceData::new().with_id("reset_password_SMS_de-de");
        let q = query(&d).unwrap();
        assert_eq!(q.template_key, "reset_password");
        assert_eq!(q.template_type, "SMS");
        assert_eq!(q.locale, "de-de");
    }

    #[test]
    fn test_query_rejects_malformed_id() {
        let d = ResourceData::new().with_id("reset_password_sms_de-de");
        assert!(query(&d).unwrap_err().is_validation());
    }
}
