//! Resource - Attribute values and the state bag of a single resource instance

use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::ResourceSchema;

/// Attribute value of a resource
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert a JSON value into an attribute value.
    ///
    /// `null` has no attribute representation and yields `None`; array
    /// elements and object entries holding `null` are dropped.
    pub fn from_json(value: &serde_json::Value) -> Option<Value> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            // Only integers fit; fractions and values beyond i64 are dropped
            serde_json::Value::Number(n) => n.as_i64().map(Value::Int),
            serde_json::Value::Array(arr) => {
                Some(Value::List(arr.iter().filter_map(Value::from_json).collect()))
            }
            serde_json::Value::Object(obj) => Some(Value::Map(
                obj.iter()
                    .filter_map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
                    .collect(),
            )),
        }
    }

    /// Convert this attribute value into JSON
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    pub(crate) fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items.into_iter().map(Value::String).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<HashMap<String, String>> for Value {
    fn from(map: HashMap<String, String>) -> Self {
        Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        )
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

/// A write into the state bag that the host refused
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("attribute '{name}' is not part of the {resource_type} schema")]
    UnknownAttribute { resource_type: String, name: String },

    #[error("attribute '{name}' expects {expected}: {message}")]
    TypeMismatch {
        name: String,
        expected: String,
        message: String,
    },
}

/// The host's attribute store for one resource instance.
///
/// Holds the host-visible resource ID, the current (desired or refreshed)
/// attributes and, during an update, the attributes recorded before the
/// change. When a schema is attached, writes are type checked against it.
#[derive(Debug, Clone, Default)]
pub struct ResourceData {
    id: Option<String>,
    attributes: HashMap<String, Value>,
    prior: HashMap<String, Value>,
    schema: Option<Arc<ResourceSchema>>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: HashMap<String, Value>) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Record the attributes the instance had before the pending update
    pub fn with_prior(mut self, prior: HashMap<String, Value>) -> Self {
        self.prior = prior;
        self
    }

    pub fn with_schema(mut self, schema: Arc<ResourceSchema>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn attach_schema(&mut self, schema: Arc<ResourceSchema>) {
        self.schema = Some(schema);
    }

    pub fn schema(&self) -> Option<&ResourceSchema> {
        self.schema.as_deref()
    }

    // =========================================================================
    // ID slot
    // =========================================================================

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Mark the instance as gone
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.attributes
    }

    pub fn into_attributes(self) -> HashMap<String, Value> {
        self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// String attribute, empty when absent or not a string
    pub fn get_string(&self, name: &str) -> String {
        self.get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// String attribute, `None` when absent or empty
    pub fn get_opt_string(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_opt_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_int(&self, name: &str) -> i64 {
        self.get(name).and_then(Value::as_int).unwrap_or(0)
    }

    pub fn get_opt_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn get_list(&self, name: &str) -> Vec<Value> {
        self.get(name)
            .and_then(Value::as_list)
            .map(<[Value]>::to_vec)
            .unwrap_or_default()
    }

    /// List attribute coerced to strings; non-string items are skipped
    pub fn get_string_list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .and_then(Value::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Map attribute coerced to string values; non-string values are skipped
    pub fn get_string_map(&self, name: &str) -> HashMap<String, String> {
        self.get(name)
            .and_then(Value::as_map)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    // =========================================================================
    // Change tracking
    // =========================================================================

    pub fn prior(&self) -> &HashMap<String, Value> {
        &self.prior
    }

    /// Returns (old, new) for an attribute
    pub fn get_change(&self, name: &str) -> (Option<&Value>, Option<&Value>) {
        (self.prior.get(name), self.attributes.get(name))
    }

    /// True when the attribute differs from the recorded prior state.
    ///
    /// Without a prior state (create, read) nothing counts as changed.
    pub fn has_change(&self, name: &str) -> bool {
        if self.prior.is_empty() {
            return false;
        }
        let (old, new) = self.get_change(name);
        old != new
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Typed write into the state bag
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), StateError> {
        let value = value.into();
        if let Some(schema) = &self.schema {
            let attr = schema
                .attributes
                .get(name)
                .ok_or_else(|| StateError::UnknownAttribute {
                    resource_type: schema.resource_type.clone(),
                    name: name.to_string(),
                })?;
            attr.attr_type
                .check_shape(&value)
                .map_err(|e| StateError::TypeMismatch {
                    name: name.to_string(),
                    expected: attr.attr_type.to_string(),
                    message: e.to_string(),
                })?;
        }
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, AttributeType};

    fn role_schema() -> Arc<ResourceSchema> {
        Arc::new(
            ResourceSchema::new("role")
                .attribute(AttributeSchema::new("role", AttributeType::String).required())
                .attribute(AttributeSchema::new(
                    "tags",
                    AttributeType::List(Box::new(AttributeType::String)),
                )),
        )
    }

    #[test]
    fn getters_default_when_absent() {
        let data = ResourceData::new();
        assert_eq!(data.get_string("missing"), "");
        assert!(!data.get_bool("missing"));
        assert_eq!(data.get_int("missing"), 0);
        assert!(data.get_string_list("missing").is_empty());
        assert!(data.get_opt_string("missing").is_none());
    }

    #[test]
    fn string_list_skips_non_strings() {
        let data = ResourceData::new().with_attribute(
            "items",
            Value::List(vec![
                Value::String("a".to_string()),
                Value::Int(1),
                Value::String("b".to_string()),
            ]),
        );
        assert_eq!(data.get_string_list("items"), vec!["a", "b"]);
    }

    #[test]
    fn set_checks_attached_schema() {
        let mut data = ResourceData::new().with_schema(role_schema());
        assert!(data.set("role", "admin").is_ok());
        assert!(matches!(
            data.set("unknown", "x"),
            Err(StateError::UnknownAttribute { .. })
        ));
        assert!(matches!(
            data.set("role", true),
            Err(StateError::TypeMismatch { .. })
        ));
        assert!(data.set("tags", vec!["a".to_string()]).is_ok());
    }

    #[test]
    fn has_change_compares_prior() {
        let prior = HashMap::from([("role".to_string(), Value::from("admin"))]);
        let data = ResourceData::new()
            .with_attribute("role", "editor")
            .with_prior(prior);
        assert!(data.has_change("role"));

        let fresh = ResourceData::new().with_attribute("role", "editor");
        assert!(!fresh.has_change("role"));
    }

    #[test]
    fn json_conversion_drops_non_integral_numbers() {
        let json = serde_json::json!({"ratio": 0.5, "huge": u64::MAX, "count": 3});
        let value = Value::from_json(&json).unwrap();
        let map = value.as_map().unwrap();
        assert!(!map.contains_key("ratio"));
        assert!(!map.contains_key("huge"));
        assert_eq!(map.get("count"), Some(&Value::Int(3)));
        assert_eq!(Value::from_json(&serde_json::json!(1.5)), None);
    }

    #[test]
    fn json_conversion_drops_nulls() {
        let json = serde_json::json!({"a": "x", "b": null, "c": [1, null, true]});
        let value = Value::from_json(&json).unwrap();
        let map = value.as_map().unwrap();
        assert!(!map.contains_key("b"));
        assert_eq!(
            map.get("c"),
            Some(&Value::List(vec![Value::Int(1), Value::Bool(true)]))
        );
        assert_eq!(map.get("a").unwrap().to_json(), serde_json::json!("x"));
    }
}
