//! cidaas_app data source
//!
//! Looks an application up by `client_id` and exposes every scalar
//! attribute as a `{name, value, datatype}` entry.

use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, BoxFuture, DataSourceDefinition, ProviderResult,
    ResourceData, ResourceSchema, Value,
};
use cidaas_sdk::CidaasClient;
use log::debug;

pub const DATA_SOURCE_TYPE: &str = "cidaas_app";

const DATATYPES: &[&str] = &["string", "int", "bool"];

fn attribute_type() -> AttributeType {
    AttributeType::structure(
        "AppAttribute",
        vec![
            AttributeSchema::new("name", AttributeType::String).required(),
            AttributeSchema::new("value", AttributeType::String).required(),
            AttributeSchema::new("datatype", AttributeType::enumeration(DATATYPES)).required(),
        ],
    )
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(DATA_SOURCE_TYPE)
        .with_description("Looks up an application by client_id")
        .attribute(AttributeSchema::new("client_id", types::non_empty_string()).required())
        .attribute(
            AttributeSchema::new("attributes", AttributeType::list_of(attribute_type()))
                .computed()
                .with_description("Scalar app attributes; nested values are left out"),
        )
}

pub fn definition() -> DataSourceDefinition<CidaasClient> {
    DataSourceDefinition {
        name: DATA_SOURCE_TYPE,
        schema,
        read,
    }
}

fn read<'a>(d: &'a mut ResourceData, client: &'a CidaasClient) -> BoxFuture<'a, ProviderResult<()>> {
    Box::pin(async move {
        let client_id = d.get_string("client_id");
        read_app(d, client)
            .await
            .map_err(|e| e.for_resource(DATA_SOURCE_TYPE, &client_id))
    })
}

async fn read_app(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let client_id = d.get_string("client_id");
    let raw = client.apps().get_raw(&client_id).await?.into_data()?;
    let attributes = flatten(&raw);
    debug!("app {} exposes {} scalar attributes", client_id, attributes.len());
    d.set("attributes", attributes)?;
    d.set_id(client_id);
    Ok(())
}

/// Scalar entries of `raw`, sorted by name
fn flatten(raw: &serde_json::Map<String, serde_json::Value>) -> Vec<Value> {
    let mut entries: Vec<(&String, String, &str)> = raw
        .iter()
        .filter_map(|(name, value)| {
            let (value, datatype) = match value {
                serde_json::Value::String(s) => (s.clone(), "string"),
                serde_json::Value::Bool(b) => (b.to_string(), "bool"),
                serde_json::Value::Number(n) => (n.as_i64()?.to_string(), "int"),
                _ => return None,
            };
            Some((name, value, datatype))
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    entries
        .into_iter()
        .map(|(name, value, datatype)| {
            Value::Map(
                [
                    ("name".to_string(), Value::from(name.as_str())),
                    ("value".to_string(), Value::from(value)),
                    ("datatype".to_string(), Value::from(datatype)),
                ]
                .into_iter()
                .collect(),
            )
        })
        .collect()
}
