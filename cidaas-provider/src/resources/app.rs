//! cidaas_app
//!
//! The commonly used application attributes are typed on [`App`]. The long
//! tail of optional settings is described by [`AUXILIARY`] and travels
//! through `App::extra` under its wire name.
//!
//! The host-visible id is the creation timestamp; every remote call is keyed
//! by the server-assigned `client_id` attribute.

use cidaas_core::schema::types;
use cidaas_core::{
    AttributeSchema, AttributeType, ProviderError, ProviderResult, ResourceData,
    ResourceDefinition, ResourceSchema, Value,
};
use cidaas_sdk::CidaasClient;
use cidaas_sdk::models::App;
use log::{debug, info};

use super::import_into;
use crate::utils::{CLIENT_TYPES, INTERACTIVE_CLIENT_TYPES, is_member, timestamp_id};

pub const RESOURCE_TYPE: &str = "cidaas_app";

const DEFAULT_LOGIN_WITH: &[&str] = &["EMAIL", "MOBILE", "USER_NAME"];

// =============================================================================
// Auxiliary attributes
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Aux {
    Str,
    Url,
    Bool,
    Int,
    StrList,
    StrMap,
}

impl Aux {
    fn attr_type(self) -> AttributeType {
        match self {
            Aux::Str => AttributeType::String,
            Aux::Url => types::url(),
            Aux::Bool => AttributeType::Bool,
            Aux::Int => AttributeType::Int,
            Aux::StrList => AttributeType::string_list(),
            Aux::StrMap => AttributeType::string_map(),
        }
    }
}

/// (attribute name, wire name, type)
const AUXILIARY: &[(&str, &str, Aux)] = &[
    ("description", "description", Aux::Str),
    ("policy_uri", "policy_uri", Aux::Url),
    ("tos_uri", "tos_uri", Aux::Url),
    ("imprint_uri", "imprint_uri", Aux::Url),
    ("jwks_uri", "jwks_uri", Aux::Url),
    ("initiate_login_uri", "initiate_login_uri", Aux::Url),
    ("backchannel_logout_uri", "backchannel_logout_uri", Aux::Url),
    ("background_uri", "background_uri", Aux::Url),
    ("video_url", "video_url", Aux::Url),
    ("sector_identifier_uri", "sector_identifier_uri", Aux::Url),
    ("post_logout_redirect_uris", "post_logout_redirect_uris", Aux::StrList),
    ("web_message_uris", "web_message_uris", Aux::StrList),
    ("contacts", "contacts", Aux::StrList),
    ("token_endpoint_auth_method", "token_endpoint_auth_method", Aux::Str),
    ("token_endpoint_auth_signing_alg", "token_endpoint_auth_signing_alg", Aux::Str),
    ("default_max_age", "default_max_age", Aux::Int),
    ("require_auth_time", "require_auth_time", Aux::Bool),
    ("default_acr_values", "default_acr_values", Aux::StrList),
    ("client_secret_expires_at", "client_secret_expires_at", Aux::Int),
    ("jwe_enabled", "jwe_enabled", Aux::Bool),
    ("user_consent", "user_consent", Aux::Bool),
    ("always_ask_mfa", "always_ask_mfa", Aux::Bool),
    ("smart_mfa", "smart_mfa", Aux::Bool),
    ("allowed_mfa", "allowed_mfa", Aux::StrList),
    ("mfa_configuration", "mfa_configuration", Aux::Str),
    ("enable_bot_detection", "enable_bot_detection", Aux::Bool),
    ("bot_provider", "bot_provider", Aux::Str),
    ("captcha_ref", "captcha_ref", Aux::Str),
    ("allow_guest_login", "allow_guest_login", Aux::Bool),
    ("allow_disposable_email", "allow_disposable_email", Aux::Bool),
    ("email_verification_required", "email_verification_required", Aux::Bool),
    (
        "mobile_number_verification_required",
        "mobile_number_verification_required",
        Aux::Bool,
    ),
    ("is_remember_me_selected", "is_remember_me_selected", Aux::Bool),
    ("is_login_success_page_enabled", "is_login_success_page_enabled", Aux::Bool),
    (
        "is_register_success_page_enabled",
        "is_register_success_page_enabled",
        Aux::Bool,
    ),
    ("enable_classical_provider", "enable_classical_provider", Aux::Bool),
    ("enable_login_spi", "enable_login_spi", Aux::Bool),
    ("allowed_roles", "allowed_roles", Aux::StrList),
    ("default_roles", "default_roles", Aux::StrList),
    ("default_scopes", "default_scopes", Aux::StrList),
    ("pending_scopes", "pending_scopes", Aux::StrList),
    ("consent_refs", "consent_refs", Aux::StrList),
    ("required_fields", "required_fields", Aux::StrList),
    ("suggest_verification_methods", "suggest_verification_methods", Aux::Bool),
    ("group_ids", "groupIds", Aux::StrList),
    ("group_types", "group_types", Aux::StrList),
    ("allowed_groups", "allowed_groups", Aux::StrList),
    ("operations_allowed_groups", "operations_allowed_groups", Aux::StrList),
    ("application_meta_data", "application_meta_data", Aux::StrMap),
    ("background_color", "backgroundColor", Aux::Str),
    ("text_color", "textColor", Aux::Str),
];

fn auxiliary_attributes() -> impl Iterator<Item = AttributeSchema> {
    AUXILIARY.iter().map(|&(name, wire, aux)| {
        let attr = AttributeSchema::new(name, aux.attr_type());
        if name == wire {
            attr
        } else {
            attr.with_provider_name(wire)
        }
    })
}

// =============================================================================
// Schema
// =============================================================================

pub fn schema() -> ResourceSchema {
    let schema = ResourceSchema::new(RESOURCE_TYPE)
        .with_description("An application (OAuth client)")
        .attribute(
            AttributeSchema::new("client_type", AttributeType::enumeration(CLIENT_TYPES)).required(),
        )
        .attribute(AttributeSchema::new("client_name", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("client_display_name", AttributeType::String))
        .attribute(AttributeSchema::new("company_name", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("company_address", types::non_empty_string()).required())
        .attribute(AttributeSchema::new("company_website", types::url()).required())
        .attribute(
            AttributeSchema::new("allow_login_with", AttributeType::string_list()).with_default(
                DEFAULT_LOGIN_WITH
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>(),
            ),
        )
        .attribute(
            AttributeSchema::new("redirect_uris", AttributeType::string_list())
                .with_description("Required for interactive client types"),
        )
        .attribute(
            AttributeSchema::new("allowed_logout_urls", AttributeType::string_list())
                .with_description("Required for interactive client types"),
        )
        .attribute(AttributeSchema::new("allowed_web_origins", AttributeType::string_list()))
        .attribute(AttributeSchema::new("allowed_origins", AttributeType::string_list()))
        .attribute(
            AttributeSchema::new("hosted_page_group", AttributeType::String).with_default("default"),
        )
        .attribute(AttributeSchema::new("allowed_scopes", AttributeType::string_list()).required())
        .attribute(AttributeSchema::new("response_types", AttributeType::string_list()))
        .attribute(AttributeSchema::new("grant_types", AttributeType::string_list()))
        .attribute(AttributeSchema::new("template_group_id", AttributeType::String))
        .attribute(AttributeSchema::new("login_providers", AttributeType::string_list()))
        .attribute(AttributeSchema::new("accent_color", AttributeType::String))
        .attribute(AttributeSchema::new("primary_color", AttributeType::String))
        .attribute(AttributeSchema::new("media_type", AttributeType::String))
        .attribute(AttributeSchema::new("content_align", AttributeType::String))
        .attribute(AttributeSchema::new("logo_uri", types::url()))
        .attribute(AttributeSchema::new("token_lifetime_in_seconds", types::positive_int()))
        .attribute(AttributeSchema::new("id_token_lifetime_in_seconds", types::positive_int()))
        .attribute(AttributeSchema::new(
            "refresh_token_lifetime_in_seconds",
            types::positive_int(),
        ))
        .attribute(AttributeSchema::new("enable_deduplication", AttributeType::Bool).with_default(false))
        .attribute(
            AttributeSchema::new("auto_login_after_register", AttributeType::Bool).with_default(false),
        )
        .attribute(
            AttributeSchema::new("enable_passwordless_auth", AttributeType::Bool).with_default(false),
        )
        .attribute(
            AttributeSchema::new("register_with_login_information", AttributeType::Bool)
                .with_default(false),
        )
        .attribute(AttributeSchema::new("fds_enabled", AttributeType::Bool).with_default(false))
        .attribute(AttributeSchema::new("is_hybrid_app", AttributeType::Bool).with_default(false))
        .attribute(AttributeSchema::new("client_id", AttributeType::String).computed())
        .attribute(
            AttributeSchema::new("client_secret", AttributeType::String)
                .computed()
                .sensitive(),
        );

    auxiliary_attributes().fold(schema, |schema, attr| schema.attribute(attr))
}

pub fn definition() -> ResourceDefinition<CidaasClient> {
    ResourceDefinition {
        name: RESOURCE_TYPE,
        schema,
        create,
        read,
        update,
        delete,
        import,
    }
}

lifecycle_callbacks! {
    create => create_app,
    read => read_app,
    update => update_app,
    delete => delete_app,
}

fn import(id: &str) -> ProviderResult<Vec<ResourceData>> {
    import_into("client_id", id)
}

fn client_id(d: &ResourceData) -> ProviderResult<String> {
    d.get_opt_string("client_id")
        .ok_or_else(|| ProviderError::validation("client_id is not set"))
}

// =============================================================================
// Marshalling
// =============================================================================

fn check_interactive(app: &App) -> ProviderResult<()> {
    if !is_member(INTERACTIVE_CLIENT_TYPES, &app.client_type) {
        return Ok(());
    }
    for (name, values) in [
        ("redirect_uris", &app.redirect_uris),
        ("allowed_logout_urls", &app.allowed_logout_urls),
    ] {
        if values.is_empty() {
            return Err(ProviderError::validation(format!(
                "{} must contain at least one entry when client_type is {}",
                name, app.client_type
            )));
        }
    }
    Ok(())
}

fn opt_lifetime(d: &ResourceData, name: &str) -> Option<i64> {
    d.get_opt_int(name).filter(|v| *v > 0)
}

fn build(d: &ResourceData) -> ProviderResult<App> {
    let mut extra = serde_json::Map::new();
    for attr in auxiliary_attributes() {
        if let Some(value) = d.get(&attr.name) {
            extra.insert(attr.wire_name().to_string(), value.to_json());
        }
    }

    let app = App {
        client_id: d.get_string("client_id"),
        client_type: d.get_string("client_type"),
        client_name: d.get_string("client_name"),
        client_display_name: d.get_string("client_display_name"),
        company_name: d.get_string("company_name"),
        company_address: d.get_string("company_address"),
        company_website: d.get_string("company_website"),
        allow_login_with: d.get_string_list("allow_login_with"),
        redirect_uris: d.get_string_list("redirect_uris"),
        allowed_logout_urls: d.get_string_list("allowed_logout_urls"),
        allowed_web_origins: d.get_string_list("allowed_web_origins"),
        allowed_origins: d.get_string_list("allowed_origins"),
        hosted_page_group: d.get_string("hosted_page_group"),
        allowed_scopes: d.get_string_list("allowed_scopes"),
        response_types: d.get_string_list("response_types"),
        grant_types: d.get_string_list("grant_types"),
        template_group_id: d.get_string("template_group_id"),
        login_providers: d.get_string_list("login_providers"),
        accent_color: d.get_string("accent_color"),
        primary_color: d.get_string("primary_color"),
        media_type: d.get_string("media_type"),
        content_align: d.get_string("content_align"),
        logo_uri: d.get_string("logo_uri"),
        token_lifetime_in_seconds: opt_lifetime(d, "token_lifetime_in_seconds"),
        id_token_lifetime_in_seconds: opt_lifetime(d, "id_token_lifetime_in_seconds"),
        refresh_token_lifetime_in_seconds: opt_lifetime(d, "refresh_token_lifetime_in_seconds"),
        enable_deduplication: d.get_bool("enable_deduplication"),
        auto_login_after_register: d.get_bool("auto_login_after_register"),
        enable_passwordless_auth: d.get_bool("enable_passwordless_auth"),
        register_with_login_information: d.get_bool("register_with_login_information"),
        fds_enabled: d.get_bool("fds_enabled"),
        is_hybrid_app: d.get_bool("is_hybrid_app"),
        extra,
        ..App::default()
    };
    check_interactive(&app)?;
    Ok(app)
}

fn write(d: &mut ResourceData, app: App) -> ProviderResult<()> {
    d.set("client_id", app.client_id)?;
    if !app.client_secret.is_empty() {
        d.set("client_secret", app.client_secret)?;
    }
    d.set("client_type", app.client_type)?;
    d.set("client_name", app.client_name)?;
    d.set("client_display_name", app.client_display_name)?;
    d.set("company_name", app.company_name)?;
    d.set("company_address", app.company_address)?;
    d.set("company_website", app.company_website)?;
    d.set("allow_login_with", app.allow_login_with)?;
    d.set("redirect_uris", app.redirect_uris)?;
    d.set("allowed_logout_urls", app.allowed_logout_urls)?;
    d.set("allowed_web_origins", app.allowed_web_origins)?;
    d.set("allowed_origins", app.allowed_origins)?;
    d.set("hosted_page_group", app.hosted_page_group)?;
    d.set("allowed_scopes", app.allowed_scopes)?;
    d.set("response_types", app.response_types)?;
    d.set("grant_types", app.grant_types)?;
    d.set("template_group_id", app.template_group_id)?;
    d.set("login_providers", app.login_providers)?;
    d.set("accent_color", app.accent_color)?;
    d.set("primary_color", app.primary_color)?;
    d.set("media_type", app.media_type)?;
    d.set("content_align", app.content_align)?;
    d.set("logo_uri", app.logo_uri)?;
    for (name, lifetime) in [
        ("token_lifetime_in_seconds", app.token_lifetime_in_seconds),
        ("id_token_lifetime_in_seconds", app.id_token_lifetime_in_seconds),
        (
            "refresh_token_lifetime_in_seconds",
            app.refresh_token_lifetime_in_seconds,
        ),
    ] {
        if let Some(seconds) = lifetime {
            d.set(name, seconds)?;
        }
    }
    d.set("enable_deduplication", app.enable_deduplication)?;
    d.set("auto_login_after_register", app.auto_login_after_register)?;
    d.set("enable_passwordless_auth", app.enable_passwordless_auth)?;
    d.set(
        "register_with_login_information",
        app.register_with_login_information,
    )?;
    d.set("fds_enabled", app.fds_enabled)?;
    d.set("is_hybrid_app", app.is_hybrid_app)?;

    for attr in auxiliary_attributes() {
        let Some(value) = app.extra.get(attr.wire_name()).and_then(Value::from_json) else {
            continue;
        };
        if attr.attr_type.check_shape(&value).is_err() {
            debug!("skipping {}: unexpected shape in response", attr.name);
            continue;
        }
        d.set(&attr.name, value)?;
    }
    Ok(())
}

// =============================================================================
// Lifecycle
// =============================================================================

async fn create_app(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let app = build(d)?;
    info!("creating {} app {}", app.client_type, app.client_name);
    let created = client.apps().create(&app).await?.into_data()?;
    if created.client_id.is_empty() {
        return Err(ProviderError::decoding(
            "app create response carries no client_id",
        ));
    }
    d.set("client_id", created.client_id)?;
    if !created.client_secret.is_empty() {
        d.set("client_secret", created.client_secret)?;
    }
    d.set_id(timestamp_id());
    read_app(d, client).await
}

async fn read_app(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let client_id = client_id(d)?;
    let app = client.apps().get(&client_id).await?.into_data()?;
    write(d, app)
}

async fn update_app(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let mut app = build(d)?;
    app.client_id = client_id(d)?;
    info!("updating app {}", app.client_id);
    client.apps().update(&app).await?.into_data()?;
    read_app(d, client).await
}

async fn delete_app(d: &mut ResourceData, client: &CidaasClient) -> ProviderResult<()> {
    let client_id = client_id(d)?;
    info!("deleting app {}", client_id);
    client.apps().delete(&client_id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn data(client_type: &str) -> ResourceData {
        ResourceData::new()
            .with_attribute("client_type", client_type)
            .with_attribute("client_name", "shop")
            .with_attribute("company_name", "Acme")
            .with_attribute("company_address", "Main St 1")
            .with_attribute("company_website", "https://acme.example")
            .with_attribute("allowed_scopes", strings(&["openid"]))
    }

    #[test]
    fn test_interactive_type_needs_redirects() {
        let err = build(&data("SINGLE_PAGE")).unwrap_err();
        assert_eq!(
            err.message,
            "redirect_uris must contain at least one entry when client_type is SINGLE_PAGE"
        );

        let d = data("SINGLE_PAGE").with_attribute("redirect_uris", strings(&["https://x/cb"]));
        let err = build(&d).unwrap_err();
        assert!(err.message.starts_with("allowed_logout_urls"));
    }

    #[test]
    fn test_non_interactive_type_needs_no_redirects() {
        assert!(build(&data("NON_INTERACTIVE")).is_ok());
    }

    #[test]
    fn test_auxiliary_attributes_use_wire_names() {
        let d = data("NON_INTERACTIVE")
            .with_attribute("group_ids", strings(&["g1"]))
            .with_attribute("jwe_enabled", true);
        let app = build(&d).unwrap();
        assert_eq!(app.extra.get("groupIds"), Some(&serde_json::json!(["g1"])));
        assert_eq!(app.extra.get("jwe_enabled"), Some(&serde_json::json!(true)));
        assert!(!app.extra.contains_key("group_ids"));
    }

    #[test]
    fn test_write_skips_mismatched_auxiliary_values() {
        let mut app = build(&data("NON_INTERACTIVE")).unwrap();
        app.client_id = "c1".to_string();
        app.extra
            .insert("jwe_enabled".to_string(), serde_json::json!("yes"));
        app.extra
            .insert("policy_uri".to_string(), serde_json::json!("https://x/p"));

        let mut d = ResourceData::new().with_schema(std::sync::Arc::new(schema()));
        write(&mut d, app).unwrap();
        assert_eq!(d.get_string("client_id"), "c1");
        assert_eq!(d.get_string("policy_uri"), "https://x/p");
        assert!(d.get("jwe_enabled").is_none());
    }

    #[test]
    fn test_schema_rejects_unknown_client_type() {
        let d = data("SMART_TV");
        assert!(schema().validate(d.attributes()).is_err());
    }
}
