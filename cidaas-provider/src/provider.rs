//! Provider descriptor
//!
//! Ties the configuration schema, the resource adapters and the data sources
//! together. Configuring the provider acquires the access token once; the
//! resulting [`CidaasClient`] is shared by every lifecycle callback.

use cidaas_core::{BoxFuture, ProviderDefinition, ProviderResult, ResourceData};
use cidaas_sdk::CidaasClient;
use log::info;

use crate::config::{ProviderConfig, config_schema};
use crate::data_sources::data_sources;
use crate::resources::resources;

pub const PROVIDER_NAME: &str = "cidaas";

/// The cidaas provider, ready to be configured by the host
pub fn provider() -> ProviderDefinition<CidaasClient> {
    ProviderDefinition {
        name: PROVIDER_NAME,
        config_schema,
        resources: resources(),
        data_sources: data_sources(),
        configure,
    }
}

fn configure(data: ResourceData) -> BoxFuture<'static, ProviderResult<CidaasClient>> {
    Box::pin(async move {
        let config = ProviderConfig::from_data(&data)?.with_env_fallback();
        let client_config = config.client_config()?;
        info!("connecting to {}", client_config.base_url);
        let client = CidaasClient::connect(client_config).await?;
        Ok(client)
    })
}
