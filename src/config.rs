use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::DEFAULT_INSTANCE;

/// A raw JavaScript expression that is written into the page verbatim.
///
/// Used for the Swagger UI options that take functions or global objects,
/// e.g. `SwaggerUIBundle.plugins.DownloadUrl` or
/// `(req) => { req.headers["X-Trace"] = "1"; return req; }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsExpr(String);

impl JsExpr {
    /// Wraps a JavaScript expression.
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    /// Returns the expression source.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JsExpr {
    fn from(expr: &str) -> Self {
        Self::new(expr)
    }
}

impl From<String> for JsExpr {
    fn from(expr: String) -> Self {
        Self(expr)
    }
}

/// The `filter` option of Swagger UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// Show or hide the tag filter box.
    Enabled(bool),

    /// Show the filter box and pre-fill it with this expression.
    Expression(String),
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Enabled(false)
    }
}

/// Syntax highlighting of request and response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxHighlight {
    /// Whether highlighting is active.
    pub activate: bool,

    /// Highlight.js theme: `agate`, `arta`, `monokai`, `nord`, `obsidian` or
    /// `tomorrow-night`.
    pub theme: String,
}

impl Default for SyntaxHighlight {
    fn default() -> Self {
        Self {
            activate: true,
            theme: "agate".to_string(),
        }
    }
}

/// Parameters passed to `ui.initOAuth`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Application name, displayed in the authorization popup.
    pub app_name: Option<String>,

    /// Default client id.
    pub client_id: Option<String>,

    /// Default client secret. Never use this in production.
    pub client_secret: Option<String>,

    /// Realm query parameter added to the authorization and token URLs.
    pub realm: Option<String>,

    /// Scopes selected by default.
    pub scopes: Vec<String>,

    /// Scope separator, `" "` when unset.
    pub scope_separator: Option<String>,

    /// Extra query parameters added to the authorization URL.
    pub additional_query_string_params: BTreeMap<String, String>,

    /// Send the client credentials with HTTP basic auth for the access code
    /// flow.
    pub use_basic_authentication_with_access_code_grant: bool,

    /// Use PKCE with the authorization code flow.
    pub use_pkce_with_authorization_code_grant: bool,
}

/// Configuration of the [`SwaggerUi`](crate::SwaggerUi) endpoint.
///
/// Every field has a default, so a configuration file only needs to mention
/// the options it changes:
///
/// ```
/// use poem_swagger::Config;
///
/// let config: Config = serde_json::from_str(
///     r#"{ "title": "Petstore", "deep_linking": false }"#,
/// )
/// .unwrap();
/// assert_eq!(config.title, "Petstore");
/// assert_eq!(config.instance_name, "swagger");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the API document. When empty, `<mount prefix>/doc.json` is used.
    pub url: String,

    /// Name of the document in the registry.
    pub instance_name: String,

    /// Page title.
    pub title: String,

    /// Base URL of the `swagger-ui-dist` distribution.
    pub assets_url: String,

    /// Selector of the element the UI is mounted on.
    ///
    /// The bundled page creates the element for a `#id` or `.class`
    /// selector. Any other selector needs a custom
    /// [`index_template`](Self::index_template) that contains the element.
    pub dom_id: String,

    /// Name of a component available via the plugin system to use as the
    /// top-level layout.
    pub layout: String,

    /// Enables deep linking for tags and operations.
    pub deep_linking: bool,

    /// Default expansion of operations and tags: `list`, `full` or `none`.
    pub doc_expansion: String,

    /// Default expansion depth for models, `-1` hides them.
    pub default_models_expand_depth: i32,

    /// Default expansion depth for the model on the model-example section.
    pub default_model_expand_depth: i32,

    /// Controls how the model is shown first: `example` or `model`.
    pub default_model_rendering: String,

    /// Display operation ids in the operations list.
    pub display_operation_id: bool,

    /// Display the request duration of "Try it out" requests.
    pub display_request_duration: bool,

    /// Tag filter box.
    pub filter: Filter,

    /// Limits the number of tagged operations displayed.
    pub max_displayed_tags: Option<u32>,

    /// Display vendor extension fields.
    pub show_extensions: bool,

    /// Display extension fields of parameters.
    pub show_common_extensions: bool,

    /// Show the request as modified by the request interceptor.
    pub show_mutated_request: bool,

    /// Whether "Try it out" is enabled by default.
    pub try_it_out_enabled: bool,

    /// Enables the request snippets section.
    pub request_snippets_enabled: bool,

    /// Keep authorization data across page reloads.
    pub persist_authorization: bool,

    /// Send cookies with CORS requests.
    pub with_credentials: bool,

    /// Allow overriding the configuration through the page query string.
    pub query_config_enabled: bool,

    /// Syntax highlighting, `None` turns it off.
    pub syntax_highlight: Option<SyntaxHighlight>,

    /// HTTP methods that have "Try it out" enabled.
    pub supported_submit_methods: Option<Vec<String>>,

    /// Validator badge URL.
    pub validator_url: Option<String>,

    /// OAuth redirect URL.
    pub oauth2_redirect_url: Option<String>,

    /// URL of a remote Swagger UI configuration document.
    pub config_url: Option<String>,

    /// OAuth defaults passed to `ui.initOAuth`.
    pub oauth: Option<OAuthConfig>,

    /// Plugins to load.
    pub plugins: Vec<JsExpr>,

    /// Presets to load.
    pub presets: Vec<JsExpr>,

    /// Function called for every outgoing request.
    pub request_interceptor: Option<JsExpr>,

    /// Function called for every incoming response.
    pub response_interceptor: Option<JsExpr>,

    /// Function called once the UI finished rendering.
    pub on_complete: Option<JsExpr>,

    /// Sorting of operations: `"alpha"`, `"method"` or a function.
    pub operations_sorter: Option<JsExpr>,

    /// Sorting of tags: `"alpha"` or a function.
    pub tags_sorter: Option<JsExpr>,

    /// Arguments of `ui.preauthorizeBasic`, e.g. `"'basic', 'user', 'pass'"`.
    pub preauthorize_basic: Option<JsExpr>,

    /// Arguments of `ui.preauthorizeApiKey`, e.g. `"'api_key', 'abc'"`.
    pub preauthorize_api_key: Option<JsExpr>,

    /// CSS appended to the page head.
    pub custom_style: Option<String>,

    /// Script run after the UI has been created.
    pub custom_script: Option<JsExpr>,

    /// Replaces the bundled index page template.
    pub index_template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            instance_name: DEFAULT_INSTANCE.to_string(),
            title: "Swagger UI".to_string(),
            assets_url: "https://unpkg.com/swagger-ui-dist@5".to_string(),
            dom_id: "#swagger-ui".to_string(),
            layout: "StandaloneLayout".to_string(),
            deep_linking: true,
            doc_expansion: "list".to_string(),
            default_models_expand_depth: 1,
            default_model_expand_depth: 1,
            default_model_rendering: "example".to_string(),
            display_operation_id: false,
            display_request_duration: false,
            filter: Filter::default(),
            max_displayed_tags: None,
            show_extensions: false,
            show_common_extensions: false,
            show_mutated_request: true,
            try_it_out_enabled: false,
            request_snippets_enabled: false,
            persist_authorization: false,
            with_credentials: false,
            query_config_enabled: false,
            syntax_highlight: Some(SyntaxHighlight::default()),
            supported_submit_methods: None,
            validator_url: None,
            oauth2_redirect_url: None,
            config_url: None,
            oauth: None,
            plugins: vec![JsExpr::new("SwaggerUIBundle.plugins.DownloadUrl")],
            presets: vec![
                JsExpr::new("SwaggerUIBundle.presets.apis"),
                JsExpr::new("SwaggerUIStandalonePreset"),
            ],
            request_interceptor: None,
            response_interceptor: None,
            on_complete: None,
            operations_sorter: None,
            tags_sorter: None,
            preauthorize_basic: None,
            preauthorize_api_key: None,
            custom_style: None,
            custom_script: None,
            index_template: None,
        }
    }
}

impl Config {
    /// Sets the document URL.
    #[must_use]
    pub fn url(self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self
        }
    }

    /// Sets the registry name of the document.
    #[must_use]
    pub fn instance_name(self, name: impl Into<String>) -> Self {
        Self {
            instance_name: name.into(),
            ..self
        }
    }

    /// Sets the page title.
    #[must_use]
    pub fn title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    /// Sets the base URL the Swagger UI assets are loaded from.
    #[must_use]
    pub fn assets_url(self, url: impl Into<String>) -> Self {
        Self {
            assets_url: url.into(),
            ..self
        }
    }

    /// Sets the selector of the element the UI is mounted on.
    #[must_use]
    pub fn dom_id(self, selector: impl Into<String>) -> Self {
        Self {
            dom_id: selector.into(),
            ..self
        }
    }

    /// Sets the layout component.
    #[must_use]
    pub fn layout(self, layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
            ..self
        }
    }

    /// Enables or disables deep linking.
    #[must_use]
    pub fn deep_linking(self, deep_linking: bool) -> Self {
        Self {
            deep_linking,
            ..self
        }
    }

    /// Sets the default expansion of operations and tags.
    #[must_use]
    pub fn doc_expansion(self, expansion: impl Into<String>) -> Self {
        Self {
            doc_expansion: expansion.into(),
            ..self
        }
    }

    /// Sets the default models expansion depth.
    #[must_use]
    pub fn default_models_expand_depth(self, depth: i32) -> Self {
        Self {
            default_models_expand_depth: depth,
            ..self
        }
    }

    /// Displays the duration of "Try it out" requests.
    #[must_use]
    pub fn display_request_duration(self, display: bool) -> Self {
        Self {
            display_request_duration: display,
            ..self
        }
    }

    /// Sets the tag filter.
    #[must_use]
    pub fn filter(self, filter: Filter) -> Self {
        Self { filter, ..self }
    }

    /// Enables "Try it out" by default.
    #[must_use]
    pub fn try_it_out_enabled(self, enabled: bool) -> Self {
        Self {
            try_it_out_enabled: enabled,
            ..self
        }
    }

    /// Keeps authorization data across page reloads.
    #[must_use]
    pub fn persist_authorization(self, persist: bool) -> Self {
        Self {
            persist_authorization: persist,
            ..self
        }
    }

    /// Sets the syntax highlighting, `None` turns it off.
    #[must_use]
    pub fn syntax_highlight(self, highlight: Option<SyntaxHighlight>) -> Self {
        Self {
            syntax_highlight: highlight,
            ..self
        }
    }

    /// Sets the OAuth defaults.
    #[must_use]
    pub fn oauth(self, oauth: OAuthConfig) -> Self {
        Self {
            oauth: Some(oauth),
            ..self
        }
    }

    /// Sets the OAuth redirect URL.
    #[must_use]
    pub fn oauth2_redirect_url(self, url: impl Into<String>) -> Self {
        Self {
            oauth2_redirect_url: Some(url.into()),
            ..self
        }
    }

    /// Appends a plugin.
    #[must_use]
    pub fn plugin(mut self, plugin: impl Into<JsExpr>) -> Self {
        self.plugins.push(plugin.into());
        self
    }

    /// Appends a preset.
    #[must_use]
    pub fn preset(mut self, preset: impl Into<JsExpr>) -> Self {
        self.presets.push(preset.into());
        self
    }

    /// Sets the request interceptor.
    #[must_use]
    pub fn request_interceptor(self, interceptor: impl Into<JsExpr>) -> Self {
        Self {
            request_interceptor: Some(interceptor.into()),
            ..self
        }
    }

    /// Sets the response interceptor.
    #[must_use]
    pub fn response_interceptor(self, interceptor: impl Into<JsExpr>) -> Self {
        Self {
            response_interceptor: Some(interceptor.into()),
            ..self
        }
    }

    /// Sets the function called once the UI is rendered.
    #[must_use]
    pub fn on_complete(self, on_complete: impl Into<JsExpr>) -> Self {
        Self {
            on_complete: Some(on_complete.into()),
            ..self
        }
    }

    /// Preauthorizes a basic security scheme.
    #[must_use]
    pub fn preauthorize_basic(self, args: impl Into<JsExpr>) -> Self {
        Self {
            preauthorize_basic: Some(args.into()),
            ..self
        }
    }

    /// Preauthorizes an API key security scheme.
    #[must_use]
    pub fn preauthorize_api_key(self, args: impl Into<JsExpr>) -> Self {
        Self {
            preauthorize_api_key: Some(args.into()),
            ..self
        }
    }

    /// Appends CSS to the page head.
    #[must_use]
    pub fn custom_style(self, css: impl Into<String>) -> Self {
        Self {
            custom_style: Some(css.into()),
            ..self
        }
    }

    /// Runs a script after the UI has been created.
    #[must_use]
    pub fn custom_script(self, script: impl Into<JsExpr>) -> Self {
        Self {
            custom_script: Some(script.into()),
            ..self
        }
    }

    /// Replaces the bundled index page with a custom tera template.
    ///
    /// The template is compiled by [`SwaggerUi::new`](crate::SwaggerUi::new),
    /// which panics if it is invalid.
    #[must_use]
    pub fn index_template(self, source: impl Into<String>) -> Self {
        Self {
            index_template: Some(source.into()),
            ..self
        }
    }
}
