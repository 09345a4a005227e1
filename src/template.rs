use std::collections::BTreeMap;

use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    config::{Filter, JsExpr},
    error::RenderError,
    Config,
};

const TEMPLATE_NAME: &str = "swagger_index.html";

pub(crate) const INDEX_TEMPLATE: &str = include_str!("index.html");

/// The compiled index page.
pub(crate) struct IndexTemplate {
    tera: Tera,
}

impl IndexTemplate {
    pub(crate) fn compile(source: &str) -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(Self { tera })
    }

    pub(crate) fn render(&self, config: &Config, doc_url: &str) -> Result<String, RenderError> {
        let view = IndexView::new(config, doc_url)?;
        let context = Context::from_serialize(&view)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

/// Options handed to `SwaggerUIBundle`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UiSettings<'a> {
    url: &'a str,
    #[serde(rename = "dom_id")]
    dom_id: &'a str,
    layout: &'a str,
    deep_linking: bool,
    doc_expansion: &'a str,
    default_models_expand_depth: i32,
    default_model_expand_depth: i32,
    default_model_rendering: &'a str,
    display_operation_id: bool,
    display_request_duration: bool,
    filter: &'a Filter,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_displayed_tags: Option<u32>,
    show_extensions: bool,
    show_common_extensions: bool,
    show_mutated_request: bool,
    try_it_out_enabled: bool,
    request_snippets_enabled: bool,
    persist_authorization: bool,
    with_credentials: bool,
    query_config_enabled: bool,
    syntax_highlight: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    supported_submit_methods: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validator_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    oauth2_redirect_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config_url: Option<&'a str>,
}

impl<'a> UiSettings<'a> {
    fn new(config: &'a Config, doc_url: &'a str) -> Self {
        let syntax_highlight = match &config.syntax_highlight {
            Some(highlight) => serde_json::json!({
                "activate": highlight.activate,
                "theme": highlight.theme,
            }),
            None => serde_json::Value::Bool(false),
        };

        Self {
            url: doc_url,
            dom_id: &config.dom_id,
            layout: &config.layout,
            deep_linking: config.deep_linking,
            doc_expansion: &config.doc_expansion,
            default_models_expand_depth: config.default_models_expand_depth,
            default_model_expand_depth: config.default_model_expand_depth,
            default_model_rendering: &config.default_model_rendering,
            display_operation_id: config.display_operation_id,
            display_request_duration: config.display_request_duration,
            filter: &config.filter,
            max_displayed_tags: config.max_displayed_tags,
            show_extensions: config.show_extensions,
            show_common_extensions: config.show_common_extensions,
            show_mutated_request: config.show_mutated_request,
            try_it_out_enabled: config.try_it_out_enabled,
            request_snippets_enabled: config.request_snippets_enabled,
            persist_authorization: config.persist_authorization,
            with_credentials: config.with_credentials,
            query_config_enabled: config.query_config_enabled,
            syntax_highlight,
            supported_submit_methods: config.supported_submit_methods.as_deref(),
            validator_url: config.validator_url.as_deref(),
            oauth2_redirect_url: config.oauth2_redirect_url.as_deref(),
            config_url: config.config_url.as_deref(),
        }
    }
}

/// Parameters of `ui.initOAuth`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OAuthSettings<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    app_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    realm: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scopes: &'a Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope_separator: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    additional_query_string_params: &'a BTreeMap<String, String>,
    use_basic_authentication_with_access_code_grant: bool,
    use_pkce_with_authorization_code_grant: bool,
}

#[derive(Serialize)]
struct IndexView<'a> {
    title: &'a str,
    assets_url: &'a str,
    dom_element_id: Option<&'a str>,
    dom_element_class: Option<&'a str>,
    settings: String,
    plugins: &'a [JsExpr],
    presets: &'a [JsExpr],
    request_interceptor: Option<&'a JsExpr>,
    response_interceptor: Option<&'a JsExpr>,
    on_complete: Option<&'a JsExpr>,
    operations_sorter: Option<&'a JsExpr>,
    tags_sorter: Option<&'a JsExpr>,
    oauth: Option<String>,
    preauthorize_basic: Option<&'a JsExpr>,
    preauthorize_api_key: Option<&'a JsExpr>,
    custom_style: Option<&'a str>,
    custom_script: Option<&'a JsExpr>,
}

impl<'a> IndexView<'a> {
    fn new(config: &'a Config, doc_url: &'a str) -> Result<Self, serde_json::Error> {
        let oauth = config
            .oauth
            .as_ref()
            .map(|oauth| {
                script_json(&OAuthSettings {
                    app_name: oauth.app_name.as_deref(),
                    client_id: oauth.client_id.as_deref(),
                    client_secret: oauth.client_secret.as_deref(),
                    realm: oauth.realm.as_deref(),
                    scopes: &oauth.scopes,
                    scope_separator: oauth.scope_separator.as_deref(),
                    additional_query_string_params: &oauth.additional_query_string_params,
                    use_basic_authentication_with_access_code_grant: oauth
                        .use_basic_authentication_with_access_code_grant,
                    use_pkce_with_authorization_code_grant: oauth
                        .use_pkce_with_authorization_code_grant,
                })
            })
            .transpose()?;

        let (dom_element_id, dom_element_class) = match dom_element(&config.dom_id) {
            Some(DomElement::Id(id)) => (Some(id), None),
            Some(DomElement::Class(class)) => (None, Some(class)),
            None => (None, None),
        };

        Ok(Self {
            title: &config.title,
            assets_url: config.assets_url.trim_end_matches('/'),
            dom_element_id,
            dom_element_class,
            settings: script_json(&UiSettings::new(config, doc_url))?,
            plugins: &config.plugins,
            presets: &config.presets,
            request_interceptor: config.request_interceptor.as_ref(),
            response_interceptor: config.response_interceptor.as_ref(),
            on_complete: config.on_complete.as_ref(),
            operations_sorter: config.operations_sorter.as_ref(),
            tags_sorter: config.tags_sorter.as_ref(),
            oauth,
            preauthorize_basic: config.preauthorize_basic.as_ref(),
            preauthorize_api_key: config.preauthorize_api_key.as_ref(),
            custom_style: config.custom_style.as_deref(),
            custom_script: config.custom_script.as_ref(),
        })
    }
}

enum DomElement<'a> {
    Id(&'a str),
    Class(&'a str),
}

/// Returns the element to create for a plain `#id` or `.class` selector.
///
/// Any other selector must match an element of a custom index template.
fn dom_element(selector: &str) -> Option<DomElement<'_>> {
    fn is_name(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    if let Some(id) = selector.strip_prefix('#').filter(|id| is_name(id)) {
        Some(DomElement::Id(id))
    } else if let Some(class) = selector.strip_prefix('.').filter(|class| is_name(class)) {
        Some(DomElement::Class(class))
    } else {
        None
    }
}

/// Serializes a value as JSON that can be embedded in a `<script>` element.
fn script_json(value: &impl Serialize) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}
