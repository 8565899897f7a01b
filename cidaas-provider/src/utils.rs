//! Utility functions for enumeration tables, composite ids and value coercion

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use cidaas_core::{ProviderError, ProviderResult, ResourceData, Value};

// =============================================================================
// Enumeration Tables
// =============================================================================

pub const AUTH_TYPES: &[&str] = &["APIKEY", "TOTP", "CIDAAS_OAUTH2"];

pub const PLACEMENTS: &[&str] = &["query", "header"];

pub const ROLE_MODES: &[&str] = &["any_roles", "no_roles", "roles_required", "allowed_roles"];

pub const TEMPLATE_TYPES: &[&str] = &["EMAIL", "SMS", "IVR", "PUSH"];

pub const MEMBER_PROFILE_VISIBILITIES: &[&str] = &["public", "full"];

pub const NONE_MEMBER_PROFILE_VISIBILITIES: &[&str] = &["none", "public"];

pub const SECURITY_LEVELS: &[&str] = &["PUBLIC", "CONFIDENTIAL"];

pub const CLIENT_TYPES: &[&str] = &[
    "SINGLE_PAGE",
    "REGULAR_WEB",
    "MOBILE",
    "IOS",
    "ANDROID",
    "DESKTOP",
    "NON_INTERACTIVE",
    "THIRD_PARTY",
    "DEVICE",
];

/// Client types that sign users in through a browser redirect
pub const INTERACTIVE_CLIENT_TYPES: &[&str] = &[
    "SINGLE_PAGE",
    "REGULAR_WEB",
    "MOBILE",
    "IOS",
    "ANDROID",
    "DESKTOP",
    "THIRD_PARTY",
];

pub const LOCALES: &[&str] = &[
    "af-za", "ar", "ar-ae", "ar-bh", "ar-dz", "ar-eg", "ar-iq", "ar-jo", "ar-kw", "ar-lb",
    "ar-ly", "ar-ma", "ar-om", "ar-qa", "ar-sa", "ar-sy", "ar-tn", "ar-ye", "az-az", "be-by",
    "bg-bg", "bs-ba", "ca-es", "cs-cz", "cy-gb", "da-dk", "de", "de-at", "de-ch", "de-de",
    "de-li", "de-lu", "el-gr", "en", "en-au", "en-bz", "en-ca", "en-gb", "en-ie", "en-in",
    "en-jm", "en-nz", "en-ph", "en-tt", "en-us", "en-za", "en-zw", "es", "es-ar", "es-bo",
    "es-cl", "es-co", "es-cr", "es-do", "es-ec", "es-es", "es-gt", "es-hn", "es-mx", "es-ni",
    "es-pa", "es-pe", "es-pr", "es-py", "es-sv", "es-us", "es-uy", "es-ve", "et-ee", "eu-es",
    "fa-ir", "fi-fi", "fo-fo", "fr", "fr-be", "fr-ca", "fr-ch", "fr-fr", "fr-lu", "fr-mc",
    "gl-es", "gu-in", "he-il", "hi-in", "hr-ba", "hr-hr", "hu-hu", "hy-am", "id-id", "is-is",
    "it", "it-ch", "it-it", "ja-jp", "ka-ge", "kk-kz", "kn-in", "ko-kr", "ky-kg", "lt-lt",
    "lv-lv", "mi-nz", "mk-mk", "mn-mn", "mr-in", "ms-bn", "ms-my", "mt-mt", "nb-no", "nl",
    "nl-be", "nl-nl", "nn-no", "ns-za", "pa-in", "pl-pl", "ps-ar", "pt", "pt-br", "pt-pt",
    "qu-bo", "qu-ec", "qu-pe", "ro-ro", "ru-ru", "sa-in", "se-fi", "se-no", "se-se", "sk-sk",
    "sl-si", "sq-al", "sr-ba", "sr-sp", "sv-fi", "sv-se", "sw-ke", "ta-in", "te-in", "th-th",
    "tl-ph", "tn-za", "tr-tr", "tt-ru", "uk-ua", "ur-pk", "uz-uz", "vi-vn", "xh-za", "zh-cn",
    "zh-hk", "zh-mo", "zh-sg", "zh-tw", "zu-za",
];

pub fn is_member(table: &[&str], value: &str) -> bool {
    table.contains(&value)
}

// =============================================================================
// Composite Ids
// =============================================================================

/// Host-visible template id: `<key>_<type>_<locale>`
pub fn template_id(template_key: &str, template_type: &str, locale: &str) -> String {
    format!("{}_{}_{}", template_key, template_type, locale)
}

/// Split a template id into (key, type, locale).
///
/// The key may itself contain `_`, so the id is split from the right. Type
/// and locale are checked against their tables.
pub fn parse_template_id(id: &str) -> ProviderResult<(String, String, String)> {
    let malformed = |reason: String| {
        ProviderError::validation(format!("malformed template id '{}'", id)).with_detail(format!(
            "{}; expected <template_key>_<template_type>_<locale>",
            reason
        ))
    };

    let mut parts = id.rsplitn(3, '_');
    let (Some(locale), Some(template_type), Some(template_key)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed("not enough '_' separated parts".to_string()));
    };

    if template_key.is_empty() {
        return Err(malformed("template_key is empty".to_string()));
    }
    if !is_member(TEMPLATE_TYPES, template_type) {
        return Err(malformed(format!(
            "unknown template_type '{}', expected one of: {}",
            template_type,
            TEMPLATE_TYPES.join(", ")
        )));
    }
    if !is_member(LOCALES, locale) {
        return Err(malformed(format!("unknown locale '{}'", locale)));
    }

    Ok((
        template_key.to_string(),
        template_type.to_string(),
        locale.to_string(),
    ))
}

// =============================================================================
// Validation Helpers
// =============================================================================

/// Fail when any of `attributes` differs from the recorded prior state
pub fn ensure_unchanged(d: &ResourceData, attributes: &[&str]) -> ProviderResult<()> {
    match attributes.iter().find(|name| d.has_change(name)) {
        Some(name) => Err(ProviderError::validation(format!(
            "{} can't be modified",
            name
        ))),
        None => Ok(()),
    }
}

/// Fail listing every attribute in `attributes` that is unset or empty
pub fn require_set(d: &ResourceData, attributes: &[&str], context: &str) -> ProviderResult<()> {
    let missing: Vec<&str> = attributes
        .iter()
        .copied()
        .filter(|name| d.get_opt_string(name).is_none())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(ProviderError::validation(format!(
        "{} must be set when {}",
        missing.join(", "),
        context
    )))
}

/// Opaque id derived from the wall clock
pub fn timestamp_id() -> String {
    Utc::now().timestamp().to_string()
}

// =============================================================================
// Coercion
// =============================================================================

/// Nested blocks of a list attribute; non-map items are skipped
pub fn block_list(d: &ResourceData, name: &str) -> Vec<HashMap<String, Value>> {
    d.get_list(name)
        .into_iter()
        .filter_map(|item| match item {
            Value::Map(map) => Some(map),
            _ => None,
        })
        .collect()
}

/// String field of a nested block, empty when absent
pub fn block_string(block: &HashMap<String, Value>, key: &str) -> String {
    block
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn block_bool(block: &HashMap<String, Value>, key: &str) -> bool {
    block.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Build a nested block from (key, value) pairs, dropping empty strings
pub fn block<I, V>(entries: I) -> Value
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<Value>,
{
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.into()))
            .filter(|(_, v)| !matches!(v, Value::String(s) if s.is_empty()))
            .collect(),
    )
}

/// Free-form wire map to string values; nested values are dropped
pub fn json_to_strings(json: &BTreeMap<String, serde_json::Value>) -> HashMap<String, String> {
    json.iter()
        .filter_map(|(k, v)| {
            let s = match v {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((k.clone(), s))
        })
        .collect()
}
