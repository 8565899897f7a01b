use crate::client::CidaasClient;
use crate::error::ClientResult;
use crate::models::{CustomProvider, Envelope};

use super::{decode, decode_deleted, path_segment};

/// Custom identity providers: create/update go to the configured `provider_url`
pub struct CustomProviderService<'a> {
    client: &'a CidaasClient,
}

impl<'a> CustomProviderService<'a> {
    pub(crate) fn new(client: &'a CidaasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, provider: &CustomProvider) -> ClientResult<Envelope<CustomProvider>> {
        let response = self
            .client
            .http()
            .post(&self.client.config().provider_url, provider)
            .await?;
        decode(response)
    }

    pub async fn update(&self, provider: &CustomProvider) -> ClientResult<Envelope<CustomProvider>> {
        let response = self
            .client
            .http()
            .put(&self.client.config().provider_url, provider)
            .await?;
        decode(response)
    }

    pub async fn get(&self, provider_name: &str) -> ClientResult<Envelope<CustomProvider>> {
        let url = self.client.url(&format!(
            "/providers-srv/custom/{}",
            path_segment(provider_name)
        ));
        decode(self.client.http().get(&url).await?)
    }

    /// The provider name is lowercased for deletion
    pub async fn delete(&self, provider_name: &str) -> ClientResult<()> {
        let url = self.client.url(&format!(
            "/providers-srv/custom/{}",
            path_segment(&provider_name.to_lowercase())
        ));
        decode_deleted(self.client.http().delete(&url).await?)
    }
}
