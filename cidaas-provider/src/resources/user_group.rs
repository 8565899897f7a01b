//! cidaas_user_groups

use cidaas_core::provider::import_passthrough;
use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::UserGroup;
use log::info;

use super::natural_key;
use crate::utils::{
    MEMBER_PROFILE_VISIBILITIES, NONE_MEMBER_PROFILE_VISIBILITIES, ensure_unchanged,
    json_to_strings,
};

pub const RESOURCE_TYPE: &str = "cidaas_user_groups";

const IMMUTABLE: &[&str] = &["group_id"];

const ROOT_GROUP: &str = "root";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("A user group")
        .attribute(AttributeSchema::new("group_type", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("group_id", types::non_empty_string())
                .required()
                .with_description("Must not contain whitespace"),
        )
        .attribute(AttributeSchema::new("group_name", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("parent_id", AttributeType::String).with_default(ROOT_GROUP))
        .attribute(AttributeSchema::new("logo_url", types::url()))
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(
            AttributeSchema::new("make_first_user_admin", AttributeType::Bool).with_default(false),
        )
        .attribute(AttributeSchema::new("custom_fields", AttributeType::string_map()))
        .attribute(
            AttributeSchema::new(
                "member_profile_visibility",
                AttributeType::enumeration(MEMBER_PROFILE_VISIBILITIES),
            )
            .with_default("public"),
        )
        .attribute(
            AttributeSchema::new(
                "none_member_profile_visibility",
                AttributeType::enumeration(NONE_MEMBER_PROFILE_VISIBILITIES),
            )
            .with_default("none"),
        )
        .attribute(AttributeSchema::new("group_owner", AttributeType::String).computed())
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

fn build(d: &ResourceData) -> ProviderResult<UserGroup> {
    let group_id = d.get_string("group_id");
    if group_id.chars().any(char::is_whitespace) {
        return Err(ProviderError::validation(format!(
            "group_id '{}' must not contain whitespace",
            group_id
        )));
    }

    Ok(UserGroup {
        group_type: d.get_string("group_type"),
        group_id,
        group_name: d.get_string("group_name"),
        parent_id: d
            .get_opt_string("parent_id")
            .unwrap_or_else(|| ROOT_GROUP.to_string()),
        logo_url: d.get_string("logo_url"),
        description: d.get_string("description"),
        make_first_user_admin: d.get_bool("make_first_user_admin"),
        custom_fields: d
            .get_string_map("custom_fields")
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect(),
        member_profile_visibility: d
            .get_opt_string("member_profile_visibility")
            .unwrap_or_else(|| "public".to_string()),
        none_member_profile_visibility: d
            .get_opt_string("none_member_profile_visibility")
            .unwrap_or_else(|| "none".to_string()),
        ..UserGroup::default()
    })
}

fn write(d: &mut ResourceData, group: UserGroup) -> ProviderResult<()> {
    d.set("group_type", group.group_type)?;
    d.set("group_id", group.group_id)?;
    d.set("group_name", group.group_name)?;
    d.set("parent_id", group.parent_id)?;
    d.set("logo_url", group.logo_url)?;
    d.set("description", group.description)?;
    d.set("make_first_user_admin", group.make_first_user_admin)?;
    d.set("custom_fields", json_to_strings(&group.custom_fields))?;
    d.set("member_profile_visibility", group.member_profile_visibility)?;
    d.set(
        "none_member_profile_visibility",
        group.none_member_profile_visibility,
    )?;
    d.set("group_owner", group.group_owner)?;
    d.set("created_at", group.created_time)?;
    d.set("updated_at", group.updated_time)?;
    Ok(())
}

async fn create_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let group = build(d)?;
    info!("creating user group {}", group.group_id);
    client.user_groups().create(&group).await?.into_data()?;
    d.set_id(group.group_id);
    read_group(d, client).await
}

async fn read_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "group_id")?;
    let group = client.user_groups().get(&key).await?.into_data()?;
    write(d, group)
}

async fn update_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    ensure_unchanged(d, IMMUTABLE)?;
    let group = build(d)?;
    info!("updating user group {}", group.group_id);
    client.user_groups().update(&group).await?.into_data()?;
    read_group(d, client).await
}

async fn delete_group(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let key = natural_key(d, "group_id")?;
    info!("deleting user group {}", key);
    client.user_groups().delete(&key).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn data() -> ResourceData {
        ResourceData::new()
            .with_attribute("group_type", "departments")
            .with_attribute("group_id", "sales")
            .with_attribute("group_name", "Sales")
    }

    #[test]
    fn test_build_defaults() {
        let group = build(&data()).unwrap();
        assert_eq!(group.parent_id, "root");
        assert!(!group.make_first_user_admin);
        assert_eq!(group.member_profile_visibility, "public");
        assert_eq!(group.none_member_profile_visibility, "none");
        assert!(group.custom_fields.is_empty());
    }

    #[test]
    fn test_group_id_with_space_is_rejected() {
        let d = data().with_attribute("group_id", "my group");
        let err = build(&d).unwrap_err();
        assert!(err.is_validation());
        assert!(err.message.contains("my group"));
    }

    #[test]
    fn test_custom_fields_travel_as_strings() {
        let d = data().with_attribute(
            "custom_fields",
            HashMap::from([("region".to_string(), "emea".to_string())]),
        );
        let group = build(&d).unwrap();
        assert_eq!(
            group.custom_fields.get("region"),
            Some(&serde_json::json!("emea"))
        );
    }

    #[test]
    fn test_schema_rejects_unknown_visibility() {
        let d = data().with_attribute("member_profile_visibility", "private");
        assert!(schema().validate(d.attributes()).is_err());
    }
}
