//! Cidaas Core
//!
//! Host-boundary types for an infrastructure provider that manages
//! identity and access management entities.
//!
//! ## Module Structure
//!
//! - `resource` - Untyped attribute values and the per-instance state bag
//! - `schema` - Attribute and resource schemas with validation
//! - `diagnostics` - Structured diagnostics returned to the host
//! - `provider` - Error taxonomy, resource descriptors and the provider descriptor

pub mod diagnostics;
pub mod provider;
pub mod resource;
pub mod schema;

pub use diagnostics::{Diagnostic, Severity};
pub use provider::{
    BoxFuture, ConfiguredProvider, DataSourceDefinition, ErrorKind, ProviderDefinition,
    ProviderError, ProviderResult, ResourceDefinition,
};
pub use resource::{ResourceData, StateError, Value};
pub use schema::{AttributeSchema, AttributeType, ResourceSchema, TypeError};
