use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{Envelope, Webhook};

use super::{decode, decode_deleted, path_segment, query_value};

/// Outbound webhooks, keyed by the server-assigned `_id`
pub struct WebhookService<'a> {
    client: &'a CidaasClient,
}

impl<'a> WebhookService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    /// Creates when `_id` is empty, updates otherwise
    pub async fn upsert(&self, webhook: &Webhook) -> ClientResult<Envelope<Webhook>> {
        let url = self.client.url("/webhook-srv/webhook");
        decode(self.client.http().post(&url, webhook).await?)
    }

    pub async fn get(&self, id: &str) -> ClientResult<Envelope<Webhook>> {
        let url = self
            .client
            .url(&format!("/webhook-srv/webhook?id={}", query_value(id)));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let url = self
            .client
            .url(&format!("/webhook-srv/webhook/{}", path_segment(id)));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
