use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, Role};

use super::{decode, decode_deleted, query_value};

pub struct RoleService<'a> {
    client: &'a CidaasClient,
}

impl<'a> RoleService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    /// Creates or updates
    pub async fn upsert(&self, role: &Role) -> ClientResult<Envelope<Role>> {
        let url = self.client.url("/roles-srv/role");
        decode(self.client.http().post(&url, role).await?)
    }

    pub async fn get(&self, role: &str) -> ClientResult<Envelope<Role>> {
        let url = self
            .client
            .url(&format!("/roles-srv/role?role={}", query_value(role)));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, role: &str) -> ClientResult<()> {
        let url = self
            .client
            .url(&format!("/roles-srv/role?role={}", query_value(role)));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
