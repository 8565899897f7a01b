use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{App, Envelope};

use super::{decode, decode_deleted, path_segment};

/// Applications: create/update go to the configured `app_url`
pub struct AppService<'a> {
    client: &'a CidaasClient,
}

impl<'a> AppService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, app: &App) -> ClientResult<Envelope<App>> {
        let response = self
            .client
            .http()
            .post(&self.client.config().app_url, app)
            .await?;
        decode(response)
    }

    pub async fn update(&self, app: &App) -> ClientResult<Envelope<App>> {
        let response = self
            .client
            .http()
            .put(&self.client.config().app_url, app)
            .await?;
        decode(response)
    }

    pub async fn get(&self, client_id: &str) -> ClientResult<Envelope<App>> {
        let url = self
            .client
            .url(&format!("/apps-srv/clients/{}", path_segment(client_id)));
        decode(self.client.http().get(&url).await?)
    }

    /// Raw attribute view of an app, used by the lookup data source
    pub async fn get_raw(
        &self,
        client_id: &str,
    ) -> ClientResult<Envelope<serde_json::Map<String, serde_json::Value>>> {
        let url = self
            .client
            .url(&format!("/apps-srv/clients/{}", path_segment(client_id)));
        decode(self.client.http().get(&url).await?)
    }

    pub async fn delete(&self, client_id: &str) -> ClientResult<()> {
        let url = self
            .client
            .url(&format!("/apps-srv/clients/{}", path_segment(client_id)));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
