//! Directive registry
//!
//! Tells the parser which directive names exist: builtins map to a parsing
//! routine, middleware names only need to be known so their tokens can be
//! collected.

use crate::parser::builtins;
use crate::parser::parser::BuiltinFn;
use sitefile_core::Settings;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Middleware directives accepted by [`DirectiveRegistry::standard`]
pub const STANDARD_MIDDLEWARE: &[&str] = &[
    "gzip", "header", "log", "rewrite", "redir", "ext", "errors", "proxy", "fastcgi", "browse",
];

/// Directive registry
#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    builtins: HashMap<String, BuiltinFn>,
    middleware: HashSet<String>,
}

impl DirectiveRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `root` and `tls` builtins and the standard middleware
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register_builtin("root", builtins::root);
        registry.register_builtin("tls", builtins::tls);
        for name in STANDARD_MIDDLEWARE {
            registry.register_middleware(*name);
        }
        registry
    }

    /// Add the extra middleware names listed in the settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        for name in &settings.middleware {
            self.register_middleware(name);
        }
        self
    }

    /// Register a builtin directive
    pub fn register_builtin(&mut self, name: impl Into<String>, handler: BuiltinFn) {
        let name = name.into();
        tracing::debug!("Registering builtin directive: {}", name);
        if self.middleware.contains(&name) {
            tracing::warn!("Builtin '{}' shadows a middleware directive", name);
        }
        self.builtins.insert(name, handler);
    }

    /// Register a middleware directive name
    pub fn register_middleware(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!("Registering middleware directive: {}", name);
        if self.builtins.contains_key(&name) {
            tracing::warn!("Middleware '{}' is shadowed by a builtin directive", name);
        }
        self.middleware.insert(name);
    }

    /// Parsing routine for a builtin directive
    pub fn builtin(&self, name: &str) -> Option<BuiltinFn> {
        self.builtins.get(name).copied()
    }

    /// Whether `name` is a registered middleware directive
    pub fn is_middleware(&self, name: &str) -> bool {
        self.middleware.contains(name)
    }

    /// Sorted builtin names
    pub fn builtin_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builtins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted middleware names
    pub fn middleware_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.middleware.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("builtins", &self.builtin_names())
            .field("middleware", &self.middleware_names())
            .finish()
    }
}
