//! cidaas_role

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderResult, ResourceData, ResourceDefinition,
    ResourceSchema,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::Role;
use log::info;

use super::natural_key;
use crate::utils::ensure_unchanged;

pub const RESOURCE_TYPE: &str = "cidaas_role";

const IMMUTABLE: &[&str] = &["role"];

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("A role that can be granted to users")
        .attribute(AttributeSchema::new("role", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("name", AttributeType::String))
        .attribute(AttributeSchema::new("description", AttributeType::String))
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
    create => create_role,
    read => read_role,
    update => update_role,
    delete => delete_role,
}

fn build(d: &ResourceData) -> Role {
    Role {
        role: d.get_string("role"),
        name: d.get_string("name"),
        description: d.get_string("description"),
    }
}

async fn create_role(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let role = build(d);
    info!("creating role {}", role.role);
    let created = client.roles().upsert(&role).await?.into_data()?;
    d.set_id(created.role);
    read_role(d, client).await
}

async fn read_role(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "role")?;
    let role = client.roles().get(&key).await?.into_data()?;
    d.set("role", role.role)?;
    d.set("name", role.name)?;
    d.set("description", role.description)?;
    Ok(())
}

async fn update_role(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    ensure_unchanged(d, IMMUTABLE)?;
    let role = build(d);
    // Upsert would silently recreate a role deleted out of band
    client.roles().get(&role.role).await?.into_data()?;
    info!("updating role {}", role.role);
    client.roles().upsert(&role).await?.into_data()?;
    read_role(d, client).await
}

async fn delete_role(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "role")?;
    info!("deleting role {}", key);
    client.roles().delete(&key).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cidaas_core::Value;

    use super::*;

    #[test]
    fn test_build_role() {
        let d = ResourceData::new()
            .with_attribute("role", "auditor")
            .with_attribute("name", "Auditor");
        let role = build(&d);
        assert_eq!(role.role, "auditor");
        assert_eq!(role.name, "Auditor");
        assert!(role.description.is_empty());
    }

    #[test]
    fn test_role_is_immutable() {
        let d = ResourceData::new()
            .with_attribute("role", "auditor2")
            .with_prior(HashMap::from([("role".to_string(), Value::from("auditor"))]));
        let err = ensure_unchanged(&d, IMMUTABLE).unwrap_err();
        assert_eq!(err.message, "role can't be modified");
    }

    #[test]
    fn test_schema_requires_role() {
        assert!(schema().validate(&HashMap::new()).is_err());
    }
}
