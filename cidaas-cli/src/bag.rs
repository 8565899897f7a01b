//! Loading state bags from JSON files and rendering them back

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use cidaas_core::{Diagnostic, ResourceData, Value};
use colored::Colorize;

const REDACTED: &str = "(sensitive)";

/// Read a JSON object from `path` into a state bag
pub fn load(path: &Path) -> Result<ResourceData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid attributes in {}", path.display()))
}

/// Parse a JSON object into a state bag; null members are dropped
pub fn parse(content: &str) -> Result<ResourceData> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    if !json.is_object() {
        bail!("expected a JSON object, found {}", kind_of(&json));
    }
    match Value::from_json(&json) {
        Some(Value::Map(attributes)) => Ok(ResourceData::from_attributes(attributes)),
        _ => bail!("expected a JSON object"),
    }
}

fn kind_of(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// `{"id", "attributes"}` view of a bag with sensitive attributes masked
pub fn render(data: &ResourceData) -> serde_json::Value {
    let attributes: serde_json::Map<String, serde_json::Value> = data
        .attributes()
        .iter()
        .map(|(name, value)| {
            let sensitive = data
                .schema()
                .and_then(|s| s.attributes.get(name))
                .is_some_and(|a| a.sensitive);
            let json = if sensitive {
                serde_json::Value::String(REDACTED.to_string())
            } else {
                value.to_json()
            };
            (name.clone(), json)
        })
        .collect();
    serde_json::json!({
        "id": data.id(),
        "attributes": sorted(attributes),
    })
}

fn sorted(map: serde_json::Map<String, serde_json::Value>) -> serde_json::Value {
    let ordered: std::collections::BTreeMap<_, _> = map.into_iter().collect();
    serde_json::json!(ordered)
}

/// Print diagnostics to stderr; true when any of them is an error
pub fn report(diagnostics: &[Diagnostic]) -> bool {
    for diag in diagnostics {
        let label = if diag.is_error() {
            "Error:".red().bold()
        } else {
            "Warning:".yellow().bold()
        };
        eprintln!("{} {}", label, diag.summary);
        if !diag.detail.is_empty() {
            eprintln!("  {}", diag.detail);
        }
    }
    cidaas_core::diagnostics::has_error(diagnostics)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use cidaas_core::{AttributeSchema, AttributeType, ResourceSchema};
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_object_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"role": "auditor", "tags": ["a", "b"], "enabled": true, "note": null}}"#
        )
        .unwrap();

        let data = load(file.path()).unwrap();
        assert_eq!(data.get_string("role"), "auditor");
        assert_eq!(data.get_string_list("tags"), vec!["a", "b"]);
        assert!(data.get_bool("enabled"));
        assert!(!data.contains("note"));
    }

    #[test]
    fn test_load_rejects_non_object() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"["role"]"#).unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("found an array"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn test_render_masks_sensitive_attributes() {
        let schema = ResourceSchema::new("cidaas_webhook")
            .attribute(AttributeSchema::new("url", AttributeType::String))
            .attribute(AttributeSchema::new("apikey", AttributeType::String).sensitive());
        let data = ResourceData::new()
            .with_id("wh-1")
            .with_attribute("url", "https://hooks.example.com")
            .with_attribute("apikey", "secret")
            .with_schema(Arc::new(schema));

        let json = render(&data);
        assert_eq!(json["id"], "wh-1");
        assert_eq!(json["attributes"]["url"], "https://hooks.example.com");
        assert_eq!(json["attributes"]["apikey"], REDACTED);
    }

    #[test]
    fn test_report_flags_errors() {
        assert!(!report(&[Diagnostic::warning("careful", "")]));
        assert!(report(&[Diagnostic::error("boom", "detail")]));
    }
}
