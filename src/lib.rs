//! Swagger UI for Poem.
//!
//! [`SwaggerUi`] serves the [Swagger UI](https://swagger.io/tools/swagger-ui/)
//! page and the API document it displays. The document itself is generated
//! elsewhere (for example by `poem-openapi`) and handed to the
//! [`registry`].
//!
//! # Example
//!
//! ```no_run
//! use poem::{listener::TcpListener, Route, Server};
//! use poem_swagger::{registry, Config, SwaggerUi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), std::io::Error> {
//!     registry::register("swagger", r#"{"openapi":"3.0.0","info":{"title":"demo","version":"1.0"},"paths":{}}"#)
//!         .expect("register document");
//!
//!     let app = Route::new().nest("/docs", SwaggerUi::new(Config::default().title("Demo")));
//!     Server::new(TcpListener::bind("0.0.0.0:3000"))
//!         .run(app)
//!         .await
//! }
//! ```
//!
//! Behind a reverse proxy that strips a path prefix, set the
//! `X-Forwarded-Prefix` header so the redirect and the document URL point at
//! the externally visible location.

#![forbid(unsafe_code)]
#![deny(unreachable_pub)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

mod config;
mod endpoint;
mod error;
mod mount;
pub mod registry;
mod template;

pub use config::{Config, Filter, JsExpr, OAuthConfig, SyntaxHighlight};
pub use endpoint::{handler_default, SwaggerUi};
pub use error::{ReadDocError, RegisterError, RenderError};
pub use registry::{DocSource, Registry};
