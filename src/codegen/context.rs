//! Per-namespace generation state.

use std::collections::{BTreeSet, HashMap};

use super::registry::ExportRegistry;
use crate::core::{Denylist, InterfaceRef};
use crate::provider::IntrospectionProvider;
use crate::util::naming::go_package_name;
use crate::util::CodegenConfig;

/// Memoized namespace symbol prefixes.
#[derive(Debug, Clone, Default)]
pub struct PrefixCache {
    prefixes: HashMap<String, String>,
}

impl PrefixCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbol prefix of `namespace`, asking the provider at most once.
    ///
    /// Falls back to the namespace name, which is what GObject libraries use
    /// in practice (`Gtk`, `Gdk`, `GObject`).
    pub fn prefix(&mut self, provider: &dyn IntrospectionProvider, namespace: &str) -> &str {
        self.prefixes
            .entry(namespace.to_string())
            .or_insert_with(|| {
                provider
                    .symbol_prefix(namespace)
                    .unwrap_or_else(|| namespace.to_string())
            })
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// State for generating one namespace.
///
/// Created at the start of a namespace run and dropped at its end. Each
/// namespace gets its own context, so nothing here is ever shared between
/// runs.
pub struct GenerationContext<'a> {
    pub provider: &'a dyn IntrospectionProvider,
    pub config: &'a CodegenConfig,
    pub namespace: String,
    pub registry: ExportRegistry,
    prefixes: PrefixCache,
    /// Foreign namespaces referenced by generated Go code.
    references: BTreeSet<String>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        provider: &'a dyn IntrospectionProvider,
        config: &'a CodegenConfig,
        namespace: impl Into<String>,
        denylist: Denylist,
    ) -> Self {
        GenerationContext {
            provider,
            config,
            namespace: namespace.into(),
            registry: ExportRegistry::new(denylist),
            prefixes: PrefixCache::new(),
            references: BTreeSet::new(),
        }
    }

    /// Symbol prefix of `namespace`.
    pub fn symbol_prefix(&mut self, namespace: &str) -> String {
        self.prefixes.prefix(self.provider, namespace).to_string()
    }

    /// Name of the generated shim wrapping `symbol`.
    pub fn shim_name(&self, symbol: &str) -> String {
        format!("{}{}", self.config.shim_prefix, symbol)
    }

    /// C type name of a struct or object reference.
    pub fn native_name(&mut self, iface: &InterfaceRef) -> String {
        if let Some(native) = &iface.native_type {
            return native.clone();
        }
        let namespace = iface
            .namespace
            .clone()
            .unwrap_or_else(|| self.namespace.clone());
        format!("{}{}", self.symbol_prefix(&namespace), iface.name)
    }

    /// Go name of a declared type plus `suffix`, package-qualified when it
    /// lives in another namespace.
    pub fn target_name(&mut self, iface: &InterfaceRef, suffix: &str) -> String {
        self.qualify(iface, format!("{}{}", iface.name, suffix))
    }

    /// Exported constructor wrapping a raw pointer into the Go type of
    /// `iface`.
    pub fn wrapper_name(&mut self, iface: &InterfaceRef) -> String {
        self.qualify(iface, format!("Wrap{}", iface.name))
    }

    /// Whether `iface` is declared in another namespace.
    pub fn is_foreign(&self, iface: &InterfaceRef) -> bool {
        iface.foreign_namespace(&self.namespace).is_some()
    }

    fn qualify(&mut self, iface: &InterfaceRef, name: String) -> String {
        match iface.foreign_namespace(&self.namespace) {
            Some(namespace) => {
                let package = go_package_name(namespace);
                self.references.insert(namespace.to_string());
                format!("{package}.{name}")
            }
            None => name,
        }
    }

    /// Foreign namespaces referenced so far, sorted.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(String::as_str)
    }
}
