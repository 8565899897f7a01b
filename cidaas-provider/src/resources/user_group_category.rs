//! cidaas_user_group_category

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::GroupType;
use cidaas_sdk::models::group_type::OBJECT_OWNER_CLIENT;
use log::info;

use super::natural_key;
use crate::utils::{ROLE_MODES, ensure_unchanged};

pub const RESOURCE_TYPE: &str = "cidaas_user_group_category";

const IMMUTABLE: &[&str] = &["group_type"];

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("A category (group type) of user groups")
        .attribute(AttributeSchema::new("group_type", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("role_mode", AttributeType::enumeration(ROLE_MODES)).required(),
        )
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(
            AttributeSchema::new("allowed_roles", AttributeType::string_list())
                .with_description("Required when role_mode is allowed_roles"),
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
    create => create_category,
    read => read_category,
    update => update_category,
    delete => delete_category,
}

fn build(d: &ResourceData) -> ProviderResult<GroupType> {
    let category = GroupType {
        group_type: d.get_string("group_type"),
        role_mode: d.get_string("role_mode"),
        description: d.get_string("description"),
        allowed_roles: d.get_string_list("allowed_roles"),
        object_owner: OBJECT_OWNER_CLIENT.to_string(),
        ..GroupType::default()
    };
    if category.role_mode == "allowed_roles" && category.allowed_roles.is_empty() {
        return Err(ProviderError::validation(
            "allowed_roles must be set when role_mode is allowed_roles",
        ));
    }
    Ok(category)
}

fn write(d: &mut ResourceData, category: GroupType) -> ProviderResult<()> {
    d.set("group_type", category.group_type)?;
    d.set("role_mode", category.role_mode)?;
    d.set("description", category.description)?;
    d.set("allowed_roles", category.allowed_roles)?;
    d.set("created_at", category.created_time)?;
    d.set("updated_at", category.updated_time)?;
    Ok(())
}

async fn create_category(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let category = build(d)?;
    info!("creating user group category {}", category.group_type);
    client.group_types().create(&category).await?.into_data()?;
    d.set_id(category.group_type);
    read_category(d, client).await
}

async fn read_category(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "group_type")?;
    let category = client.group_types().get(&key).await?.into_data()?;
    write(d, category)
}

async fn update_category(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    ensure_unchanged(d, IMMUTABLE)?;
    let category = build(d)?;
    info!("updating user group category {}", category.group_type);
    client.group_types().update(&category).await?.into_data()?;
    read_category(d, client).await
}

async fn delete_category(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "group_type")?;
    info!("deleting user group category {}", key);
    client.group_types().delete(&key).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sets_owner() {
        let d = ResourceData::new()
            .with_attribute("group_type", "departments")
            .with_attribute("role_mode", "no_roles");
        let category = build(&d).unwrap();
        assert_eq!(category.object_owner, "client");
        assert!(category.allowed_roles.is_empty());
    }

    #[test]
    fn test_allowed_roles_mode_needs_roles() {
        let d = ResourceData::new()
            .with_attribute("group_type", "departments")
            .with_attribute("role_mode", "allowed_roles");
        assert!(build(&d).unwrap_err().is_validation());

        let d = d.with_attribute("allowed_roles", vec!["member".to_string()]);
        assert_eq!(build(&d).unwrap().allowed_roles, vec!["member"]);
    }

    #[test]
    fn test_schema_rejects_unknown_role_mode() {
        let d = ResourceData::new()
            .with_attribute("group_type", "departments")
            .with_attribute("role_mode", "some_roles");
        assert!(schema().validate(d.attributes()).is_err());
    }
}
