//! Provider - Resource descriptors, the provider descriptor and its error taxonomy
//!
//! A provider is described by a [`ProviderDefinition`]: the schema of its
//! configuration block, one [`ResourceDefinition`] per managed kind, the
//! read-only [`DataSourceDefinition`]s, and a configure function that turns
//! the configuration block into a handle `M` shared by every callback.
//!
//! Lifecycle callbacks are only reachable through the [`ConfiguredProvider`]
//! returned by [`ProviderDefinition::configure`], so nothing touches the
//! network before configuration has succeeded.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::debug;

use crate::diagnostics::Diagnostic;
use crate::resource::{ResourceData, StateError};
use crate::schema::{ResourceSchema, TypeError};

/// Category of a provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any remote call
    Validation,
    /// Non-acceptable HTTP status
    Transport,
    /// The request could not complete
    Connectivity,
    /// Response body did not match the expected envelope
    Decoding,
    /// HTTP succeeded but the envelope reported `success = false`
    Service,
    /// The host refused a write into the state bag
    StateWrite,
    /// Provider configuration or registry problem
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::Decoding => "decoding",
            ErrorKind::Service => "service",
            ErrorKind::StateWrite => "state write",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(s)
    }
}

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: Option<String>,
    /// `type.id` label of the instance the error belongs to
    pub resource: Option<String>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref resource) = self.resource {
            write!(f, "[{}] {}", resource, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            resource: None,
            cause: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn transport(status: u16, body: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Transport,
            format!("unexpected HTTP status {}", status),
        )
        .with_detail(body)
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connectivity, message)
    }

    pub fn decoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decoding, message)
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Service, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if !detail.is_empty() {
            self.detail = Some(detail);
        }
        self
    }

    pub fn for_resource(mut self, resource_type: &str, id: &str) -> Self {
        self.resource = Some(format!("{}.{}", resource_type, id));
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}

impl From<StateError> for ProviderError {
    fn from(e: StateError) -> Self {
        ProviderError::new(ErrorKind::StateWrite, "failed to write state").with_detail(e.to_string())
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(e: ProviderError) -> Self {
        let detail = match (&e.detail, &e.cause) {
            (Some(detail), _) => detail.clone(),
            (None, Some(cause)) => cause.to_string(),
            (None, None) => String::new(),
        };
        Diagnostic::error(e.to_string(), detail)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A lifecycle callback operating on exactly one instance
pub type ResourceFn<M> = for<'a> fn(&'a mut ResourceData, &'a M) -> BoxFuture<'a, ProviderResult<()>>;

/// Turns a host-supplied import string into the instances to refresh
pub type ImportFn = fn(&str) -> ProviderResult<Vec<ResourceData>>;

/// Builds the shared handle from the provider configuration block
pub type ConfigureFn<M> = fn(ResourceData) -> BoxFuture<'static, ProviderResult<M>>;

/// Default import: the supplied string becomes the resource ID
pub fn import_passthrough(id: &str) -> ProviderResult<Vec<ResourceData>> {
    Ok(vec![ResourceData::new().with_id(id)])
}

/// Descriptor of one managed resource kind
pub struct ResourceDefinition<M> {
    pub name: &'static str,
    pub schema: fn() -> ResourceSchema,
    pub create: ResourceFn<M>,
    pub read: ResourceFn<M>,
    pub update: ResourceFn<M>,
    pub delete: ResourceFn<M>,
    pub import: ImportFn,
}

/// Descriptor of one read-only data source
pub struct DataSourceDefinition<M> {
    pub name: &'static str,
    pub schema: fn() -> ResourceSchema,
    pub read: ResourceFn<M>,
}

/// Main provider descriptor
pub struct ProviderDefinition<M> {
    pub name: &'static str,
    pub config_schema: fn() -> ResourceSchema,
    pub resources: Vec<ResourceDefinition<M>>,
    pub data_sources: Vec<DataSourceDefinition<M>>,
    pub configure: ConfigureFn<M>,
}

impl<M: Send + Sync> ProviderDefinition<M> {
    /// Names of the managed resource kinds
    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.iter().map(|r| r.name).collect()
    }

    pub fn data_source_types(&self) -> Vec<&'static str> {
        self.data_sources.iter().map(|d| d.name).collect()
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceDefinition<M>> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn data_source(&self, name: &str) -> Option<&DataSourceDefinition<M>> {
        self.data_sources.iter().find(|d| d.name == name)
    }

    /// Validate the configuration block and build the shared handle
    pub async fn configure(
        self,
        mut config: ResourceData,
    ) -> Result<ConfiguredProvider<M>, Vec<Diagnostic>> {
        let schema = (self.config_schema)();
        schema.apply_defaults(config.attributes_mut());
        schema
            .validate(config.attributes())
            .map_err(|errors| type_errors_to_diagnostics(self.name, &errors))?;

        let meta = (self.configure)(config)
            .await
            .map_err(|e| vec![Diagnostic::from(e)])?;

        // A data source may share its name with a resource kind
        let schemas = self
            .resources
            .iter()
            .map(|r| (r.name, Arc::new((r.schema)())))
            .collect();
        let data_source_schemas = self
            .data_sources
            .iter()
            .map(|d| (d.name, Arc::new((d.schema)())))
            .collect();

        Ok(ConfiguredProvider {
            definition: self,
            meta,
            schemas,
            data_source_schemas,
        })
    }
}

fn type_errors_to_diagnostics(subject: &str, errors: &[TypeError]) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|e| Diagnostic::error(format!("invalid {} configuration", subject), e.to_string()))
        .collect()
}

fn into_diagnostics(result: ProviderResult<()>) -> Vec<Diagnostic> {
    match result {
        Ok(()) => Vec::new(),
        Err(e) => vec![Diagnostic::from(e)],
    }
}

/// A provider whose configure step succeeded
pub struct ConfiguredProvider<M> {
    definition: ProviderDefinition<M>,
    meta: M,
    schemas: HashMap<&'static str, Arc<ResourceSchema>>,
    data_source_schemas: HashMap<&'static str, Arc<ResourceSchema>>,
}

impl<M: Send + Sync> ConfiguredProvider<M> {
    pub fn definition(&self) -> &ProviderDefinition<M> {
        &self.definition
    }

    /// The handle threaded into every callback
    pub fn meta(&self) -> &M {
        &self.meta
    }

    pub fn schema(&self, name: &str) -> Option<Arc<ResourceSchema>> {
        self.schemas.get(name).cloned()
    }

    pub fn data_source_schema(&self, name: &str) -> Option<Arc<ResourceSchema>> {
        self.data_source_schemas.get(name).cloned()
    }

    fn lookup(&self, kind: &str) -> Result<(&ResourceDefinition<M>, Arc<ResourceSchema>), Vec<Diagnostic>> {
        match (self.definition.resource(kind), self.schema(kind)) {
            (Some(def), Some(schema)) => Ok((def, schema)),
            _ => Err(vec![Diagnostic::from(ProviderError::configuration(
                format!("unknown resource type '{}'", kind),
            ))]),
        }
    }

    /// Attach the schema, fill defaults, and validate the desired attributes
    fn prepare(
        &self,
        kind: &str,
        schema: Arc<ResourceSchema>,
        data: &mut ResourceData,
    ) -> Result<(), Vec<Diagnostic>> {
        schema.apply_defaults(data.attributes_mut());
        let result = schema.validate(data.attributes());
        data.attach_schema(schema);
        result.map_err(|errors| {
            debug!("{} rejected by schema validation: {} error(s)", kind, errors.len());
            type_errors_to_diagnostics(kind, &errors)
        })
    }

    pub async fn create(&self, kind: &str, data: &mut ResourceData) -> Vec<Diagnostic> {
        let (def, schema) = match self.lookup(kind) {
            Ok(found) => found,
            Err(diags) => return diags,
        };
        if let Err(diags) = self.prepare(kind, schema, data) {
            return diags;
        }
        into_diagnostics((def.create)(data, &self.meta).await)
    }

    pub async fn read(&self, kind: &str, data: &mut ResourceData) -> Vec<Diagnostic> {
        let (def, schema) = match self.lookup(kind) {
            Ok(found) => found,
            Err(diags) => return diags,
        };
        data.attach_schema(schema);
        into_diagnostics((def.read)(data, &self.meta).await)
    }

    pub async fn update(&self, kind: &str, data: &mut ResourceData) -> Vec<Diagnostic> {
        let (def, schema) = match self.lookup(kind) {
            Ok(found) => found,
            Err(diags) => return diags,
        };
        if data.prior().is_empty() {
            let id = data.id().unwrap_or_default().to_string();
            return vec![
                ProviderError::validation("update requires the prior state")
                    .for_resource(kind, &id)
                    .into(),
            ];
        }
        if let Err(diags) = self.prepare(kind, schema, data) {
            return diags;
        }
        into_diagnostics((def.update)(data, &self.meta).await)
    }

    pub async fn delete(&self, kind: &str, data: &mut ResourceData) -> Vec<Diagnostic> {
        let (def, schema) = match self.lookup(kind) {
            Ok(found) => found,
            Err(diags) => return diags,
        };
        data.attach_schema(schema);
        into_diagnostics((def.delete)(data, &self.meta).await)
    }

    /// Run the kind's import function, then Read each imported instance
    pub async fn import(&self, kind: &str, id: &str) -> (Vec<ResourceData>, Vec<Diagnostic>) {
        let (def, schema) = match self.lookup(kind) {
            Ok(found) => found,
            Err(diags) => return (Vec::new(), diags),
        };
        let mut imported = match (def.import)(id) {
            Ok(imported) => imported,
            Err(e) => return (Vec::new(), vec![Diagnostic::from(e)]),
        };
        let mut diagnostics = Vec::new();
        for data in &mut imported {
            data.attach_schema(schema.clone());
            diagnostics.extend(into_diagnostics((def.read)(data, &self.meta).await));
        }
        (imported, diagnostics)
    }

    pub async fn read_data_source(&self, name: &str, data: &mut ResourceData) -> Vec<Diagnostic> {
        let (def, schema) = match (
            self.definition.data_source(name),
            self.data_source_schema(name),
        ) {
            (Some(def), Some(schema)) => (def, schema),
            _ => {
                return vec![Diagnostic::from(ProviderError::configuration(format!(
                    "unknown data source '{}'",
                    name
                )))];
            }
        };
        if let Err(diags) = self.prepare(name, schema, data) {
            return diags;
        }
        into_diagnostics((def.read)(data, &self.meta).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::resource::Value;
    use crate::schema::{AttributeSchema, AttributeType};

    #[derive(Default)]
    struct Meta {
        calls: AtomicUsize,
    }

    fn role_schema() -> ResourceSchema {
        ResourceSchema::new("mock_role")
            .attribute(AttributeSchema::new("role", AttributeType::String).required())
            .attribute(
                AttributeSchema::new("mode", AttributeType::enumeration(&["a", "b"]))
                    .with_default("a"),
            )
    }

    fn create<'a>(data: &'a mut ResourceData, meta: &'a Meta) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async move {
            meta.calls.fetch_add(1, Ordering::SeqCst);
            let role = data.get_string("role");
            data.set_id(role);
            Ok(())
        })
    }

    fn read<'a>(data: &'a mut ResourceData, meta: &'a Meta) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async move {
            meta.calls.fetch_add(1, Ordering::SeqCst);
            let id = data.id().unwrap_or_default().to_string();
            data.set("role", id)?;
            Ok(())
        })
    }

    fn fail<'a>(_data: &'a mut ResourceData, _meta: &'a Meta) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async move { Err(ProviderError::service("boom").with_detail("remote said no")) })
    }

    fn configure(config: ResourceData) -> BoxFuture<'static, ProviderResult<Meta>> {
        Box::pin(async move {
            if config.get_string("token").is_empty() {
                return Err(ProviderError::configuration("token is required"));
            }
            Ok(Meta::default())
        })
    }

    fn definition() -> ProviderDefinition<Meta> {
        ProviderDefinition {
            name: "mock",
            config_schema: || {
                ResourceSchema::new("mock")
                    .attribute(AttributeSchema::new("token", AttributeType::String))
            },
            resources: vec![ResourceDefinition {
                name: "mock_role",
                schema: role_schema,
                create,
                read,
                update: fail,
                delete: fail,
                import: import_passthrough,
            }],
            data_sources: vec![],
            configure,
        }
    }

    #[tokio::test]
    async fn configure_failure_yields_diagnostics() {
        let result = definition().configure(ResourceData::new()).await;
        let diags = result.err().unwrap();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].summary.contains("token is required"));
    }

    #[tokio::test]
    async fn create_applies_defaults_and_runs_callback() {
        let provider = definition()
            .configure(ResourceData::new().with_attribute("token", "t"))
            .await
            .ok()
            .unwrap();
        let mut data = ResourceData::new().with_attribute("role", "admin");
        let diags = provider.create("mock_role", &mut data).await;
        assert!(diags.is_empty());
        assert_eq!(data.id(), Some("admin"));
        assert_eq!(data.get("mode"), Some(&Value::String("a".to_string())));
        assert_eq!(provider.meta().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn schema_violation_never_reaches_callback() {
        let provider = definition()
            .configure(ResourceData::new().with_attribute("token", "t"))
            .await
            .ok()
            .unwrap();
        let mut data = ResourceData::new()
            .with_attribute("role", "admin")
            .with_attribute("mode", "c");
        let diags = provider.create("mock_role", &mut data).await;
        assert_eq!(diags.len(), 1);
        assert!(diags[0].detail.contains("Invalid enum variant 'c'"));
        assert_eq!(provider.meta().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn import_reads_each_instance() {
        let provider = definition()
            .configure(ResourceData::new().with_attribute("token", "t"))
            .await
            .ok()
            .unwrap();
        let (imported, diags) = provider.import("mock_role", "viewer").await;
        assert!(diags.is_empty());
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].get_string("role"), "viewer");
    }

    #[tokio::test]
    async fn callback_error_becomes_diagnostic() {
        let provider = definition()
            .configure(ResourceData::new().with_attribute("token", "t"))
            .await
            .ok()
            .unwrap();
        let mut data = ResourceData::new().with_id("admin");
        let diags = provider.delete("mock_role", &mut data).await;
        assert_eq!(diags, vec![Diagnostic::error("boom", "remote said no")]);
    }

    #[tokio::test]
    async fn update_without_prior_is_rejected() {
        let provider = definition()
            .configure(ResourceData::new().with_attribute("token", "t"))
            .await
            .ok()
            .unwrap();
        let mut data = ResourceData::new()
            .with_id("admin")
            .with_attribute("role", "editor");
        let diags = provider.update("mock_role", &mut data).await;
        assert_eq!(diags.len(), 1);
        assert!(diags[0].summary.contains("update requires the prior state"));
        assert!(diags[0].summary.contains("mock_role.admin"));
        assert_eq!(provider.meta().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_kind_is_reported() {
        let provider = definition()
            .configure(ResourceData::new().with_attribute("token", "t"))
            .await
            .ok()
            .unwrap();
        let mut data = ResourceData::new();
        let diags = provider.read("nope", &mut data).await;
        assert!(diags[0].summary.contains("unknown resource type"));
    }

    #[tokio::test]
    async fn data_source_may_share_a_resource_name() {
        let mut def = definition();
        def.data_sources.push(DataSourceDefinition {
            name: "mock_role",
            schema: || {
                ResourceSchema::new("mock_role")
                    .attribute(AttributeSchema::new("lookup", AttributeType::String).required())
            },
            read,
        });
        let provider = def
            .configure(ResourceData::new().with_attribute("token", "t"))
            .await
            .ok()
            .unwrap();

        let resource = provider.schema("mock_role").unwrap();
        assert!(resource.attributes.contains_key("role"));
        let lookup = provider.data_source_schema("mock_role").unwrap();
        assert!(lookup.attributes.contains_key("lookup"));

        let mut data = ResourceData::new().with_attribute("role", "admin");
        assert!(provider.create("mock_role", &mut data).await.is_empty());
    }

    #[test]
    fn state_error_maps_to_state_write() {
        let e: ProviderError = StateError::UnknownAttribute {
            resource_type: "t".to_string(),
            name: "x".to_string(),
        }
        .into();
        assert_eq!(e.kind, ErrorKind::StateWrite);
    }
}
