//! User group

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserGroup {
    #[serde(rename = "id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "groupType", default)]
    pub group_type: String,
    #[serde(rename = "groupId", default)]
    pub group_id: String,
    #[serde(rename = "groupName", default)]
    pub group_name: String,
    #[serde(rename = "parentId", default)]
    pub parent_id: String,
    #[serde(rename = "logoUrl", default, skip_serializing_if = "String::is_empty")]
    pub logo_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "makeFirstUserAdmin", default)]
    pub make_first_user_admin: bool,
    #[serde(rename = "customFields", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "memberProfileVisibility", default)]
    pub member_profile_visibility: String,
    #[serde(rename = "noneMemberProfileVisibility", default)]
    pub none_member_profile_visibility: String,
    #[serde(rename = "groupOwner", default, skip_serializing)]
    pub group_owner: String,
    #[serde(rename = "createdTime", default, skip_serializing)]
    pub created_time: String,
    #[serde(rename = "updatedTime", default, skip_serializing)]
    pub updated_time: String,
}
