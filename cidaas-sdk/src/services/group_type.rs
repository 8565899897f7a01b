use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, GroupType};

use super::{decode, decode_deleted, path_segment, query_value};

/// User group categories
pub struct GroupTypeService<'a> {
    client: &'a CidaasClient,
}

impl<'a> GroupTypeService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, group_type: &GroupType) -> ClientResult<Envelope<GroupType>> {
        let url = self.client.url("/groups-srv/grouptypes");
        decode(self.client.http().post(&url, group_type).await?)
    }

    pub async fn update(&self, group_type: &GroupType) -> ClientResult<Envelope<GroupType>> {
        let url = self.client.url("/groups-srv/grouptypes");
        decode(self.client.http().put(&url, group_type).await?)
    }

    pub async fn get(&self, group_type: &str) -> ClientResult<Envelope<GroupType>> {
        let url = self.client.url(&format!(
            "/groups-srv/grouptypes?groupType={}",
            query_value(group_type)
        ));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, group_type: &str) -> ClientResult<()> {
        let url = self
            .client
            .url(&format!("/groups-srv/grouptypes/{}", path_segment(group_type)));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
