//! Schema - Define type schemas for resources
//!
//! Providers define schemas for each resource type, data source and for the
//! provider configuration block itself. The host validates desired state
//! against the schema before any lifecycle callback runs.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
    /// Nested block with named, individually typed fields
    Struct {
        name: String,
        fields: Vec<AttributeSchema>,
    },
}

impl AttributeType {
    /// Enum type from a static table of allowed values
    pub fn enumeration(values: &[&str]) -> Self {
        AttributeType::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn string_list() -> Self {
        AttributeType::List(Box::new(AttributeType::String))
    }

    pub fn string_map() -> Self {
        AttributeType::Map(Box::new(AttributeType::String))
    }

    pub fn list_of(inner: AttributeType) -> Self {
        AttributeType::List(Box::new(inner))
    }

    pub fn structure(name: impl Into<String>, fields: Vec<AttributeSchema>) -> Self {
        AttributeType::Struct {
            name: name.into(),
            fields,
        }
    }

    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { validate, base, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Struct { fields, .. }, Value::Map(map)) => {
                for field in fields {
                    if field.required && !map.contains_key(&field.name) {
                        return Err(TypeError::MissingRequired {
                            name: field.name.clone(),
                        });
                    }
                }
                for (k, v) in map {
                    let field = fields
                        .iter()
                        .find(|f| &f.name == k)
                        .ok_or_else(|| TypeError::UnknownField { name: k.clone() })?;
                    field.attr_type.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    /// Structural check only: enum membership and custom validators are not
    /// applied, since values written back from the remote side are
    /// authoritative.
    pub fn check_shape(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String | AttributeType::Enum(_), Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),
            (AttributeType::Custom { base, .. }, v) => base.check_shape(v),
            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.check_shape(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }
            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.check_shape(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }
            (AttributeType::Struct { fields, .. }, Value::Map(map)) => {
                for (k, v) in map {
                    if let Some(field) = fields.iter().find(|f| &f.name == k) {
                        field.attr_type.check_shape(v).map_err(|e| TypeError::MapValueError {
                            key: k.clone(),
                            inner: Box::new(e),
                        })?;
                    }
                }
                Ok(())
            }
            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Struct { name, .. } => name.clone(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            AttributeType::Enum(variants) => serde_json::json!({"enum": variants}),
            AttributeType::Custom { name, base, .. } => {
                serde_json::json!({"custom": name, "base": base.to_json()})
            }
            AttributeType::List(inner) => serde_json::json!({"list": inner.to_json()}),
            AttributeType::Map(inner) => serde_json::json!({"map": inner.to_json()}),
            AttributeType::Struct { name, fields } => {
                let fields: BTreeMap<&str, serde_json::Value> = fields
                    .iter()
                    .map(|f| (f.name.as_str(), f.to_json()))
                    .collect();
                serde_json::json!({"struct": name, "fields": fields})
            }
            other => serde_json::Value::String(other.type_name().to_lowercase()),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown field '{name}'")]
    UnknownField { name: String },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Set by the remote side; the user may leave it out
    pub computed: bool,
    /// Never printed in plain text by the host
    pub sensitive: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    /// Wire-side property name when it differs from the attribute name
    pub provider_name: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            sensitive: false,
            default: None,
            description: None,
            provider_name: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Name used on the wire
    pub fn wire_name(&self) -> &str {
        self.provider_name.as_deref().unwrap_or(&self.name)
    }

    fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("type".to_string(), self.attr_type.to_json());
        obj.insert("required".to_string(), self.required.into());
        obj.insert("computed".to_string(), self.computed.into());
        if self.sensitive {
            obj.insert("sensitive".to_string(), true.into());
        }
        if let Some(default) = &self.default {
            obj.insert("default".to_string(), default.to_json());
        }
        if let Some(desc) = &self.description {
            obj.insert("description".to_string(), desc.clone().into());
        }
        serde_json::Value::Object(obj)
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        for (name, value) in attributes {
            if let Some(schema) = self.attributes.get(name)
                && let Err(e) = schema.attr_type.validate(value)
            {
                errors.push(TypeError::AttributeError {
                    name: name.clone(),
                    inner: Box::new(e),
                });
            }
            // Unknown attributes are left to the adapter
        }

        if errors.is_empty() {
            Ok(())
        } else {
            errors.sort_by_key(|e| e.to_string());
            Err(errors)
        }
    }

    /// Fill defaults for absent optional attributes
    pub fn apply_defaults(&self, attributes: &mut HashMap<String, Value>) {
        for (name, schema) in &self.attributes {
            if let Some(default) = &schema.default
                && !attributes.contains_key(name)
            {
                attributes.insert(name.clone(), default.clone());
            }
        }
    }

    /// Machine-readable form of the schema, attributes in name order
    pub fn to_json(&self) -> serde_json::Value {
        let attributes: BTreeMap<&str, serde_json::Value> = self
            .attributes
            .iter()
            .map(|(name, attr)| (name.as_str(), attr.to_json()))
            .collect();
        serde_json::json!({
            "type": self.resource_type,
            "description": self.description,
            "attributes": attributes,
        })
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// String that must not be empty
    pub fn non_empty_string() -> AttributeType {
        AttributeType::Custom {
            name: "NonEmptyString".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value {
                Value::String(s) if s.trim().is_empty() => {
                    Err("Value must not be empty".to_string())
                }
                _ => Ok(()),
            },
        }
    }

    /// Positive integer type
    pub fn positive_int() -> AttributeType {
        AttributeType::Custom {
            name: "PositiveInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| match value {
                Value::Int(n) if *n > 0 => Ok(()),
                Value::Int(_) => Err("Value must be positive".to_string()),
                _ => Err("Expected integer".to_string()),
            },
        }
    }

    /// Absolute http(s) URL
    pub fn url() -> AttributeType {
        AttributeType::Custom {
            name: "Url".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value {
                Value::String(s) => validate_url(s),
                _ => Err("Expected string".to_string()),
            },
        }
    }
}

/// Validate that a string is an absolute http or https URL
pub fn validate_url(s: &str) -> Result<(), String> {
    let url = url::Url::parse(s).map_err(|e| format!("Invalid URL '{}': {}", s, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "Invalid URL '{}': expected http:// or https:// scheme",
            s
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("Invalid URL '{}': missing host", s));
    }
    Ok(())
}
