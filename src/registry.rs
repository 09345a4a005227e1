//! Named API documents served by [`SwaggerUi`](crate::SwaggerUi).
//!
//! Documents are produced elsewhere (for example by `poem-openapi`) and
//! registered under a name. The endpoint looks its document up by
//! [`Config::instance_name`](crate::Config::instance_name) on every
//! `doc.json` request.
//!
//! ```
//! use poem_swagger::registry;
//!
//! registry::register("registry-doc-example", r#"{"openapi":"3.0.0"}"#).unwrap();
//! assert_eq!(
//!     registry::read_doc("registry-doc-example").unwrap(),
//!     r#"{"openapi":"3.0.0"}"#
//! );
//! ```

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{ReadDocError, RegisterError};

/// Name used when no instance name is given.
pub const DEFAULT_INSTANCE: &str = "swagger";

/// A source of a serialized API document.
pub trait DocSource: Send + Sync + 'static {
    /// Returns the document.
    fn read_doc(&self) -> String;
}

impl DocSource for String {
    fn read_doc(&self) -> String {
        self.clone()
    }
}

impl DocSource for &'static str {
    fn read_doc(&self) -> String {
        (*self).to_string()
    }
}

impl DocSource for serde_json::Value {
    fn read_doc(&self) -> String {
        self.to_string()
    }
}

struct FnSource<F>(F);

impl<F> DocSource for FnSource<F>
where
    F: Fn() -> String + Send + Sync + 'static,
{
    fn read_doc(&self) -> String {
        (self.0)()
    }
}

/// A set of named API documents.
#[derive(Default)]
pub struct Registry {
    docs: RwLock<HashMap<String, Arc<dyn DocSource>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a document under `name`.
    ///
    /// An empty name registers the default instance.
    pub fn register(
        &self,
        name: impl Into<String>,
        source: impl DocSource,
    ) -> Result<(), RegisterError> {
        let name = resolve_name(name.into());
        let mut docs = self.docs.write();
        if docs.contains_key(&name) {
            return Err(RegisterError::AlreadyRegistered(name));
        }
        docs.insert(name, Arc::new(source));
        Ok(())
    }

    /// Registers a function that produces the document on every lookup.
    pub fn register_fn<F>(&self, name: impl Into<String>, f: F) -> Result<(), RegisterError>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.register(name, FnSource(f))
    }

    /// Returns `true` if a document is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        let name = resolve_name(name);
        self.docs.read().contains_key(name.as_str())
    }

    /// Returns the document registered under `name`.
    ///
    /// An empty name reads the default instance.
    pub fn read_doc(&self, name: &str) -> Result<String, ReadDocError> {
        let source = {
            let docs = self.docs.read();
            if docs.is_empty() {
                return Err(ReadDocError::NoneRegistered);
            }
            let name = resolve_name(name);
            docs.get(name.as_str())
                .cloned()
                .ok_or(ReadDocError::NotFound(name))?
        };
        Ok(source.read_doc())
    }
}

fn resolve_name(name: impl Into<String>) -> String {
    let name = name.into();
    if name.is_empty() {
        DEFAULT_INSTANCE.to_string()
    } else {
        name
    }
}

static GLOBAL: Lazy<Arc<Registry>> = Lazy::new(Default::default);

/// Returns the process-wide registry.
pub fn global() -> Arc<Registry> {
    GLOBAL.clone()
}

/// Registers a document in the process-wide registry.
pub fn register(name: impl Into<String>, source: impl DocSource) -> Result<(), RegisterError> {
    GLOBAL.register(name, source)
}

/// Registers a document function in the process-wide registry.
pub fn register_fn<F>(name: impl Into<String>, f: F) -> Result<(), RegisterError>
where
    F: Fn() -> String + Send + Sync + 'static,
{
    GLOBAL.register_fn(name, f)
}

/// Reads a document from the process-wide registry.
pub fn read_doc(name: &str) -> Result<String, ReadDocError> {
    GLOBAL.read_doc(name)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn empty_registry() {
        let registry = Registry::new();
        assert_eq!(registry.read_doc("swagger"), Err(ReadDocError::NoneRegistered));
    }

    #[test]
    fn unknown_name() {
        let registry = Registry::new();
        registry.register("a", "{}").unwrap();
        assert_eq!(
            registry.read_doc("b"),
            Err(ReadDocError::NotFound("b".to_string()))
        );
    }

    #[test]
    fn default_name() {
        let registry = Registry::new();
        registry
            .register("", serde_json::json!({ "openapi": "3.0.0" }))
            .unwrap();
        assert!(registry.contains(DEFAULT_INSTANCE));
        assert_eq!(registry.read_doc("").unwrap(), r#"{"openapi":"3.0.0"}"#);
        assert_eq!(
            registry.read_doc("swagger").unwrap(),
            r#"{"openapi":"3.0.0"}"#
        );
    }

    #[test]
    fn register_twice() {
        let registry = Registry::new();
        registry.register("a", "1".to_string()).unwrap();
        assert_eq!(
            registry.register("a", "2"),
            Err(RegisterError::AlreadyRegistered("a".to_string()))
        );
        assert_eq!(registry.read_doc("a").unwrap(), "1");
    }

    #[test]
    fn register_fn_reads_every_time() {
        let registry = Registry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry
            .register_fn("counter", {
                let counter = counter.clone();
                move || counter.fetch_add(1, Ordering::SeqCst).to_string()
            })
            .unwrap();

        assert_eq!(registry.read_doc("counter").unwrap(), "0");
        assert_eq!(registry.read_doc("counter").unwrap(), "1");
    }

    #[test]
    fn global_registry() {
        register("registry-tests-global", "{}").unwrap();
        assert!(global().contains("registry-tests-global"));
        assert_eq!(read_doc("registry-tests-global").unwrap(), "{}");
    }
}
