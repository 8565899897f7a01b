//! cidaas_hosted_page

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema, Value,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::hosted_page::GROUP_OWNER_CLIENT;
use cidaas_sdk::models::{HostedPage, HostedPageGroup};
use log::info;

use super::natural_key;
use crate::utils::{LOCALES, block, block_list, block_string, ensure_unchanged};

pub const RESOURCE_TYPE: &str = "cidaas_hosted_page";

const IMMUTABLE: &[&str] = &["hosted_page_group_name"];

const DEFAULT_LOCALE: &str = "en-us";

fn page_type() -> AttributeType {
    AttributeType::structure(
        "HostedPage",
        vec![
            AttributeSchema::new("hosted_page_id", types::non_empty_string()).required(),
            AttributeSchema::new("locale", AttributeType::enumeration(LOCALES)),
            AttributeSchema::new("url", types::url()).required(),
            AttributeSchema::new("content", AttributeType::String),
        ],
    )
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("A group of hosted pages")
        .attribute(
            AttributeSchema::new("hosted_page_group_name", types::non_empty_string()).required(),
        )
        .attribute(
            AttributeSchema::new("default_locale", AttributeType::enumeration(LOCALES))
                .with_default(DEFAULT_LOCALE),
        )
        .attribute(
            AttributeSchema::new("hosted_pages", AttributeType::list_of(page_type()))
                .required()
                .with_description("Pages in display order; locale defaults to default_locale"),
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
    create => create_group,
    read => read_group,
    update => update_group,
    delete => delete_group,
}

fn build(d: &ResourceData) -> ProviderResult<HostedPageGroup> {
    let default_locale = d
        .get_opt_string("default_locale")
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let hosted_pages: Vec<HostedPage> = block_list(d, "hosted_pages")
        .iter()
        .map(|b| {
            let locale = block_string(b, "locale");
            HostedPage {
                hosted_page_id: block_string(b, "hosted_page_id"),
                locale: if locale.is_empty() {
                    default_locale.clone()
                } else {
                    locale
                },
                url: block_string(b, "url"),
                content: block_string(b, "content"),
            }
        })
        .collect();
    if hosted_pages.is_empty() {
        return Err(ProviderError::validation(
            "hosted_pages must contain at least one page",
        ));
    }

    Ok(HostedPageGroup {
        id: d.get_string("hosted_page_group_name"),
        group_owner: GROUP_OWNER_CLIENT.to_string(),
        default_locale,
        hosted_pages,
        ..HostedPageGroup::default()
    })
}

fn write(d: &mut ResourceData, group: HostedPageGroup) -> ProviderResult<()> {
    let pages: Vec<Value> = group
        .hosted_pages
        .into_iter()
        .map(|p| {
            block([
                ("hosted_page_id", p.hosted_page_id),
                ("locale", p.locale),
                ("url", p.url),
                ("content", p.content),
            ])
        })
        .collect();

    d.set("hosted_page_group_name", group.id)?;
    d.set("default_locale", group.default_locale)?;
    d.set("hosted_pages", pages)?;
    d.set("created_at", group.created_time)?;
    d.set("updated_at", group.updated_time)?;
    Ok(())
}

async fn create_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let group = build(d)?;
    info!("creating hosted page group {}", group.id);
    client.hosted_pages().upsert(&group).await?.into_data()?;
    d.set_id(group.id);
    read_group(d, client).await
}

async fn read_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "hosted_page_group_name")?;
    let group = client.hosted_pages().get(&key).await?.into_data()?;
    write(d, group)
}

async fn update_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    ensure_unchanged(d, IMMUTABLE)?;
    let group = build(d)?;
    info!("updating hosted page group {}", group.id);
    client.hosted_pages().upsert(&group).await?.into_data()?;
    read_group(d, client).await
}

async fn delete_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "hosted_page_group_name")?;
    info!("deleting hosted page group {}", key);
    client.hosted_pages().delete(&key).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fills_page_locale_and_owner() {
        let d = ResourceData::new()
            .with_attribute("hosted_page_group_name", "branding")
            .with_attribute("default_locale", "de-de")
            .with_attribute(
                "hosted_pages",
                vec![
                    block([
                        ("hosted_page_id", "register_success"),
                        ("url", "https://x/registered"),
                    ]),
                    block([
                        ("hosted_page_id", "login_success"),
                        ("locale", "en-us"),
                        ("url", "https://x/welcome"),
                    ]),
                ],
            );
        let group = build(&d).unwrap();
        assert_eq!(group.id, "branding");
        assert_eq!(group.group_owner, "client");
        assert_eq!(group.hosted_pages[0].locale, "de-de");
        assert_eq!(group.hosted_pages[1].locale, "en-us");
        assert_eq!(group.hosted_pages[1].hosted_page_id, "login_success");
    }

    #[test]
    fn test_build_requires_pages() {
        let d = ResourceData::new().with_attribute("hosted_page_group_name", "branding");
        assert!(build(&d).unwrap_err().is_validation());
    }
}
