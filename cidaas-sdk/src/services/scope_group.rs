use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, ScopeGroup};

use super::{decode, decode_deleted, path_segment, query_value};

pub struct ScopeGroupService<'a> {
    client: &'a CidaasClient,
}

impl<'a> ScopeGroupService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    /// Creates or updates
    pub async fn upsert(&self, group: &ScopeGroup) -> ClientResult<Envelope<ScopeGroup>> {
        let url = self.client.url("/scopes-srv/group");
        decode(self.client.http().post(&url, group).await?)
    }

    pub async fn get(&self, group_name: &str) -> ClientResult<Envelope<ScopeGroup>> {
        let url = self.client.url(&format!(
            "/scopes-srv/group?group_name={}",
            query_value(group_name)
        ));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, group_name: &str) -> ClientResult<()> {
        let url = self
            .client
            .url(&format!("/scopes-srv/group/{}", path_segment(group_name)));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
