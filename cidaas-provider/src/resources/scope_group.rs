//! cidaas_scope_group

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderResult, ResourceData, ResourceDefinition,
    ResourceSchema,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::ScopeGroup;
use log::info;

use super::natural_key;
use crate::utils::ensure_unchanged;

pub const RESOURCE_TYPE: &str = "cidaas_scope_group";

const IMMUTABLE: &[&str] = &["group_name"];

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .attribute(AttributeSchema::new("group_name", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("description", AttributeType::String))
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

fn build(d: &ResourceData) -> ScopeGroup {
    ScopeGroup {
        group_name: d.get_string("group_name"),
        description: d.get_string("description"),
        ..ScopeGroup::default()
    }
}

async fn create_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let group = build(d);
    info!("creating scope group {}", group.group_name);
    let created = client.scope_groups().upsert(&group).await?.into_data()?;
    d.set_id(created.group_name);
    read_group(d, client).await
}

async fn read_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "group_name")?;
    let group = client.scope_groups().get(&key).await?.into_data()?;
    d.set("group_name", group.group_name)?;
    d.set("description", group.description)?;
    d.set("created_at", group.created_time)?;
    d.set("updated_at", group.updated_time)?;
    Ok(())
}

async fn update_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    ensure_unchanged(d, IMMUTABLE)?;
    let group = build(d);
    info!("updating scope group {}", group.group_name);
    client.scope_groups().upsert(&group).await?.into_data()?;
    read_group(d, client).await
}

async fn delete_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "group_name")?;
    info!("deleting scope group {}", key);
    client.scope_groups().delete(&key).await?;
    Ok(())
}
