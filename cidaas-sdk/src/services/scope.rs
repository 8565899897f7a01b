use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, Scope};

use super::{decode, decode_deleted, path_segment, query_value};

/// OAuth scopes, keyed by the lowercased scope key
pub struct ScopeService<'a> {
    client: &'a CidaasClient,
}

impl<'a> ScopeService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    /// Creates or updates; the endpoint upserts on `scopeKey`
    pub async fn upsert(&self, scope: &Scope) -> ClientResult<Envelope<Scope>> {
        let url = self.client.url("/scopes-srv/scope");
        decode(self.client.http().post(&url, scope).await?)
    }

    pub async fn get(&self, scope_key: &str) -> ClientResult<Envelope<Scope>> {
        let url = self.client.url(&format!(
            "/scopes-srv/scope?scopekey={}",
            query_value(&scope_key.to_lowercase())
        ));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, scope_key: &str) -> ClientResult<()> {
        let url = self.client.url(&format!(
            "/scopes-srv/scope/{}",
            path_segment(&scope_key.to_lowercase())
        ));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
