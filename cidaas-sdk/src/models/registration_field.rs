//! Registration form field

use serde::{Deserialize, Serialize};

/// Field label and messages for one locale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldLocaleText {
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "required", default, skip_serializing_if = "String::is_empty")]
    pub required_msg: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
}

/// A registration field.
///
/// Writes carry a single `localeText`; reads return the full `localeTexts`
/// list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationField {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub parent_group_id: String,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub field_key: String,
    #[serde(rename = "fieldType", default)]
    pub field_type: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub claimable: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub is_searchable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_data_type: String,
    #[serde(rename = "localeText", default, skip_serializing_if = "Option::is_none")]
    pub locale_text: Option<FieldLocaleText>,
    #[serde(rename = "localeTexts", default, skip_serializing_if = "Vec::is_empty")]
    pub locale_texts: Vec<FieldLocaleText>,
    #[serde(rename = "fieldDefinition", default, skip_serializing_if = "Option::is_none")]
    pub field_definition: Option<FieldDefinition>,
}

impl RegistrationField {
    /// The active locale text: the single write-side record, else the first
    /// entry of the read-side list
    pub fn active_locale_text(&self) -> Option<&FieldLocaleText> {
        self.locale_text.as_ref().or_else(|| self.locale_texts.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_shape_picks_first_locale_text() {
        let field: RegistrationField = serde_json::from_str(
            r#"{"field_key":"nickname","localeTexts":[
                {"locale":"en-us","language":"en","name":"Nickname"},
                {"locale":"de-de","language":"de","name":"Spitzname"}]}"#,
        )
        .unwrap();
        assert_eq!(field.active_locale_text().unwrap().name, "Nickname");
    }

    #[test]
    fn write_shape_omits_locale_text_list() {
        let field = RegistrationField {
            field_key: "nickname".to_string(),
            locale_text: Some(FieldLocaleText {
                locale: "en-us".to_string(),
                language: "en".to_string(),
                name: "Nickname".to_string(),
                required_msg: String::new(),
            }),
            ..RegistrationField::default()
        };
        let json = serde_json::to_value(&field).unwrap();
        assert!(json.get("localeTexts").is_none());
        assert_eq!(json["localeText"]["name"], "Nickname");
        assert!(json["localeText"].get("required").is_none());
    }
}
