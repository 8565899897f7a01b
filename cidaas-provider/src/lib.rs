//! Cidaas Provider
//!
//! Declarative management of cidaas tenant configuration.
//!
//! ## Module Structure
//!
//! - `config` - Provider configuration block and client bootstrap
//! - `provider` - The provider descriptor
//! - `resources` - One adapter per managed entity kind
//! - `data_sources` - Read-only lookups
//! - `utils` - Enumeration tables, composite ids and coercion helpers

pub mod config;
pub mod data_sources;
pub mod provider;
pub mod resources;
pub mod utils;

pub use config::ProviderConfig;
pub use provider::{PROVIDER_NAME, provider};
