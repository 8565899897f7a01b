use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, UserGroup};

use super::{decode, decode_deleted, path_segment};

pub struct UserGroupService<'a> {
    client: &'a CidaasClient,
}

impl<'a> UserGroupService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, group: &UserGroup) -> ClientResult<Envelope<UserGroup>> {
        let url = self.client.url("/groups-srv/usergroups");
        decode(self.client.http().post(&url, group).await?)
    }

    pub async fn update(&self, group: &UserGroup) -> ClientResult<Envelope<UserGroup>> {
        let url = self.client.url("/groups-srv/usergroups");
        decode(self.client.http().put(&url, group).await?)
    }

    pub async fn get(&self, group_id: &str) -> ClientResult<Envelope<UserGroup>> {
        let url = self
            .client
            .url(&format!("/groups-srv/usergroups/{}", path_segment(group_id)));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, group_id: &str) -> ClientResult<()> {
        let url = self
            .client
            .url(&format!("/groups-srv/usergroups/{}", path_segment(group_id)));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
