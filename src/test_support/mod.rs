//! Test utilities for gibind unit tests.
//!
//! This module provides an in-memory introspection provider so generators
//! can be exercised without metadata files on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use gibind::test_support::{fixtures, MemoryProvider};
//!
//! #[test]
//! fn test_example() {
//!     let provider = MemoryProvider::new()
//!         .with_namespace("Gtk", Some("Gtk"), vec![fixtures::align_enum()]);
//!
//!     // Build a GenerationContext over `provider`...
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::{Entity, ObjectInfo, QualifiedName};
use crate::provider::{IntrospectionProvider, ProviderError};

/// One namespace held by [`MemoryProvider`].
#[derive(Debug, Clone, Default)]
pub struct MemoryNamespace {
    pub symbol_prefix: Option<String>,
    pub dependencies: Vec<String>,
    pub c_includes: Vec<String>,
    pub packages: Vec<String>,
    pub entities: Vec<Entity>,
}

/// In-memory introspection provider.
///
/// Every registered namespace counts as loaded. Prefix lookups are counted
/// so tests can check memoization.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    namespaces: HashMap<String, MemoryNamespace>,
    prefix_lookups: AtomicUsize,
}

impl MemoryProvider {
    /// Create a provider with no namespaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace.
    pub fn with_namespace(
        mut self,
        name: &str,
        symbol_prefix: Option<&str>,
        entities: Vec<Entity>,
    ) -> Self {
        self.namespaces.insert(
            name.to_string(),
            MemoryNamespace {
                symbol_prefix: symbol_prefix.map(str::to_string),
                entities,
                ..Default::default()
            },
        );
        self
    }

    /// Set the dependencies of a registered namespace.
    pub fn with_dependencies(mut self, name: &str, dependencies: &[&str]) -> Self {
        if let Some(ns) = self.namespaces.get_mut(name) {
            ns.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
        }
        self
    }

    /// Set headers and pkg-config packages of a registered namespace.
    pub fn with_build_info(mut self, name: &str, includes: &[&str], packages: &[&str]) -> Self {
        if let Some(ns) = self.namespaces.get_mut(name) {
            ns.c_includes = includes.iter().map(|i| i.to_string()).collect();
            ns.packages = packages.iter().map(|p| p.to_string()).collect();
        }
        self
    }

    /// Number of `symbol_prefix` calls so far.
    pub fn prefix_lookups(&self) -> usize {
        self.prefix_lookups.load(Ordering::SeqCst)
    }
}

impl IntrospectionProvider for MemoryProvider {
    fn load(&mut self, namespace: &str) -> Result<(), ProviderError> {
        if self.namespaces.contains_key(namespace) {
            Ok(())
        } else {
            Err(ProviderError::NamespaceNotFound {
                namespace: namespace.to_string(),
                searched: Vec::new(),
            })
        }
    }

    fn is_loaded(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    fn entities(&self, namespace: &str) -> Vec<Entity> {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.entities.clone())
            .unwrap_or_default()
    }

    fn dependencies(&self, namespace: &str) -> Vec<String> {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.dependencies.clone())
            .unwrap_or_default()
    }

    fn symbol_prefix(&self, namespace: &str) -> Option<String> {
        self.prefix_lookups.fetch_add(1, Ordering::SeqCst);
        self.namespaces
            .get(namespace)
            .and_then(|ns| ns.symbol_prefix.clone())
    }

    fn object(&self, name: &QualifiedName) -> Option<ObjectInfo> {
        self.namespaces
            .get(&name.namespace)?
            .entities
            .iter()
            .find_map(|entity| match entity {
                Entity::Object(object) if object.name == name.name => Some(object.clone()),
                _ => None,
            })
    }

    fn c_includes(&self, namespace: &str) -> Vec<String> {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.c_includes.clone())
            .unwrap_or_default()
    }

    fn packages(&self, namespace: &str) -> Vec<String> {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.packages.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider_lookup() {
        let mut provider = fixtures::gtk_hierarchy();
        assert!(provider.load("Gtk").is_ok());
        assert!(provider.load("Pango").is_err());

        let widget = provider.object(&QualifiedName::new("Gtk", "Widget")).unwrap();
        assert_eq!(widget.native_type, "GtkWidget");
        assert!(provider.object(&QualifiedName::new("Gtk", "Nope")).is_none());
    }
}
