use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use poem::{
    http::{Method, StatusCode},
    web::{Html, Redirect},
    Endpoint, IntoResponse, Request, Response, Result,
};

use crate::{
    mount::{self, Mount, DOC_JSON, INDEX_HTML},
    registry::{self, Registry},
    template::{IndexTemplate, INDEX_TEMPLATE},
    Config,
};

/// An endpoint that serves Swagger UI and the API document it displays.
///
/// Nest it under a path prefix; relative to that prefix it serves:
///
/// | Path | Response |
/// |------|----------|
/// | `/` | `301` redirect to `index.html` |
/// | `/index.html` | the Swagger UI page |
/// | `/doc.json` | the document registered under [`Config::instance_name`] |
/// | anything else | `404` |
///
/// The prefix the browser sees is resolved from the first request, including
/// the `X-Forwarded-Prefix` header set by reverse proxies, and is kept for the
/// lifetime of the endpoint and all its clones.
///
/// # Errors
///
/// - [`ReadDocError`](crate::ReadDocError)
/// - [`RenderError`](crate::RenderError)
///
/// # Example
///
/// ```
/// use poem::{http::StatusCode, test::TestClient};
/// use poem_swagger::{Config, SwaggerUi};
///
/// let ui = SwaggerUi::new(Config::default());
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let cli = TestClient::new(ui);
/// let resp = cli
///     .get("/")
///     .header("X-Forwarded-Prefix", "/docs")
///     .send()
///     .await;
/// resp.assert_status(StatusCode::MOVED_PERMANENTLY);
/// resp.assert_header("location", "/docs/index.html");
/// # });
/// ```
#[derive(Clone)]
pub struct SwaggerUi {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,
    template: IndexTemplate,
    registry: Arc<Registry>,
    mount: OnceCell<Mount>,
}

impl SwaggerUi {
    /// Creates a new `SwaggerUi` that reads documents from the
    /// [global registry](registry::global).
    ///
    /// # Panics
    ///
    /// Panics if [`Config::index_template`] is not a valid template.
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, registry::global())
    }

    /// Creates a new `SwaggerUi` that reads documents from `registry`.
    ///
    /// # Panics
    ///
    /// Panics if [`Config::index_template`] is not a valid template.
    pub fn with_registry(config: Config, registry: Arc<Registry>) -> Self {
        let source = config.index_template.as_deref().unwrap_or(INDEX_TEMPLATE);
        let template = match IndexTemplate::compile(source) {
            Ok(template) => template,
            Err(err) => {
                tracing::error!(error = ?err, "failed to compile swagger index template");
                panic!("failed to compile swagger index template: {err}");
            }
        };

        Self {
            inner: Arc::new(Inner {
                config,
                template,
                registry,
                mount: OnceCell::new(),
            }),
        }
    }

    /// Returns the configuration of this endpoint.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    fn mount(&self, req: &Request) -> &Mount {
        self.inner.mount.get_or_init(|| {
            let mount = Mount::resolve(
                req.original_uri().path(),
                req.uri().path(),
                req.headers(),
                &self.inner.config.url,
            );
            tracing::debug!(
                prefix = %mount.prefix,
                doc_url = %mount.doc_url,
                "swagger ui mounted"
            );
            mount
        })
    }
}

impl Default for SwaggerUi {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Endpoint for SwaggerUi {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        if req.method() != Method::GET && req.method() != Method::HEAD {
            return Err(StatusCode::METHOD_NOT_ALLOWED.into());
        }

        let mount = self.mount(&req);
        let config = &self.inner.config;

        match mount::remainder(req.uri().path()) {
            INDEX_HTML => {
                let html = self
                    .inner
                    .template
                    .render(config, &mount.doc_url)
                    .inspect_err(|err| tracing::error!(error = %err, "failed to render swagger ui"))?;
                Ok(Html(html).into_response())
            }
            DOC_JSON => {
                let doc = self
                    .inner
                    .registry
                    .read_doc(&config.instance_name)
                    .inspect_err(|err| {
                        tracing::warn!(
                            instance_name = %config.instance_name,
                            error = %err,
                            "failed to read api document"
                        )
                    })?;
                Ok(Response::builder()
                    .content_type("application/json")
                    .body(doc))
            }
            "" | "/" => Ok(Redirect::moved_permanent(mount.index_url()).into_response()),
            _ => Ok(StatusCode::NOT_FOUND.into_response()),
        }
    }
}

static HANDLER_DEFAULT: Lazy<SwaggerUi> = Lazy::new(SwaggerUi::default);

/// Returns the process-wide `SwaggerUi` with the default configuration.
///
/// Every call returns a clone of the same instance, so the mount prefix is
/// resolved once for all of them.
pub fn handler_default() -> SwaggerUi {
    HANDLER_DEFAULT.clone()
}
