use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, HostedPageGroup};

use super::{decode, decode_deleted, path_segment};

/// Hosted page groups, keyed by the lowercased group name on reads and deletes
pub struct HostedPageService<'a> {
    client: &'a CidaasClient,
}

impl<'a> HostedPageService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    /// Creates or updates
    pub async fn upsert(&self, group: &HostedPageGroup) -> ClientResult<Envelope<HostedPageGroup>> {
        let url = self.client.url("/hostedpages-srv/hpgroup");
        decode(self.client.http().post(&url, group).await?)
    }

    pub async fn get(&self, group_name: &str) -> ClientResult<Envelope<HostedPageGroup>> {
        let url = self.client.url(&format!(
            "/hostedpages-srv/hpgroup/{}",
            path_segment(&group_name.to_lowercase())
        ));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, group_name: &str) -> ClientResult<()> {
        let url = self.client.url(&format!(
            "/hostedpages-srv/hpgroup/{}",
            path_segment(&group_name.to_lowercase())
        ));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
