//! Data sources
//!
//! Read-only lookups. They share the resource adapters' client handle but
//! never write to the remote side.

use cidaas_core::DataSourceDefinition;
use cidaas_sdk::CidaasClient;

pub mod app;

/// Returns all data sources exposed by this provider
pub fn data_sources() -> Vec<DataSourceDefinition<CidaasClient>> {
    vec![app::definition()]
}
