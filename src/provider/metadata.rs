//! JSON metadata provider.
//!
//! Reads namespace dumps named `<Namespace>.json` or
//! `<Namespace>-<version>.json` from a list of search directories. Loading a
//! namespace loads its dependencies first-come, the same way the typelib
//! repository resolves `require` calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::{IntrospectionProvider, ProviderError};
use crate::core::{Entity, ObjectInfo, QualifiedName};

/// One namespace as stored in a metadata file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceMetadata {
    pub namespace: String,

    #[serde(default)]
    pub version: Option<String>,

    /// C identifier prefix (e.g. `Gtk`).
    #[serde(default)]
    pub symbol_prefix: Option<String>,

    /// Required namespaces, optionally versioned (`GObject-2.0`).
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub c_includes: Vec<String>,

    /// pkg-config packages.
    #[serde(default)]
    pub packages: Vec<String>,

    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl NamespaceMetadata {
    pub fn new(namespace: impl Into<String>) -> Self {
        NamespaceMetadata {
            namespace: namespace.into(),
            version: None,
            symbol_prefix: None,
            dependencies: Vec::new(),
            c_includes: Vec::new(),
            packages: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Parse metadata from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Dependency names with any `-<version>` suffix removed.
    pub fn dependency_names(&self) -> Vec<String> {
        self.dependencies
            .iter()
            .map(|dep| strip_version(dep).to_string())
            .collect()
    }

    fn object(&self, name: &str) -> Option<&ObjectInfo> {
        self.entities.iter().find_map(|entity| match entity {
            Entity::Object(object) if object.name == name => Some(object),
            _ => None,
        })
    }
}

/// `GObject-2.0` -> `GObject`
fn strip_version(name: &str) -> &str {
    name.split_once('-').map_or(name, |(base, _)| base)
}

/// Provider backed by JSON metadata files.
#[derive(Debug, Default)]
pub struct MetadataProvider {
    search_paths: Vec<PathBuf>,
    /// Namespace name -> metadata file, first match wins.
    index: HashMap<String, PathBuf>,
    loaded: HashMap<String, NamespaceMetadata>,
}

impl MetadataProvider {
    /// Create a provider and index every metadata file under `search_paths`.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        let mut index = HashMap::new();

        for root in &search_paths {
            for entry in WalkDir::new(root)
                .max_depth(2)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().and_then(|e| e.to_str()) != Some("json")
                {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                index
                    .entry(strip_version(stem).to_string())
                    .or_insert_with(|| path.to_path_buf());
            }
        }

        tracing::debug!(
            "indexed {} metadata files under {} search paths",
            index.len(),
            search_paths.len()
        );

        MetadataProvider {
            search_paths,
            index,
            loaded: HashMap::new(),
        }
    }

    /// Register already-parsed metadata, bypassing the file index.
    pub fn insert(&mut self, metadata: NamespaceMetadata) {
        self.loaded.insert(metadata.namespace.clone(), metadata);
    }

    /// Loaded metadata for a namespace.
    pub fn metadata(&self, namespace: &str) -> Option<&NamespaceMetadata> {
        self.loaded.get(namespace)
    }

    /// Path of the metadata file indexed for a namespace.
    pub fn metadata_path(&self, namespace: &str) -> Option<&Path> {
        self.index.get(namespace).map(PathBuf::as_path)
    }

    fn read(&self, namespace: &str) -> Result<NamespaceMetadata, ProviderError> {
        let path = self
            .index
            .get(namespace)
            .ok_or_else(|| ProviderError::NamespaceNotFound {
                namespace: namespace.to_string(),
                searched: self.search_paths.clone(),
            })?;

        let content = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.clone(),
            source,
        })?;

        let metadata =
            NamespaceMetadata::from_json(&content).map_err(|source| ProviderError::Parse {
                path: path.clone(),
                source,
            })?;

        if metadata.namespace != namespace {
            return Err(ProviderError::NamespaceMismatch {
                path: path.clone(),
                expected: namespace.to_string(),
                found: metadata.namespace,
            });
        }

        Ok(metadata)
    }
}

impl IntrospectionProvider for MetadataProvider {
    fn load(&mut self, namespace: &str) -> Result<(), ProviderError> {
        if self.loaded.contains_key(namespace) {
            return Ok(());
        }

        let metadata = self.read(namespace)?;
        let dependencies = metadata.dependency_names();
        tracing::debug!(
            "loaded {} ({} entities, {} dependencies)",
            namespace,
            metadata.entities.len(),
            dependencies.len()
        );

        // Registered before recursing so dependency cycles terminate.
        self.loaded.insert(namespace.to_string(), metadata);

        for dependency in dependencies {
            self.load(&dependency)?;
        }

        Ok(())
    }

    fn is_loaded(&self, namespace: &str) -> bool {
        self.loaded.contains_key(namespace)
    }

    fn entities(&self, namespace: &str) -> Vec<Entity> {
        self.loaded
            .get(namespace)
            .map(|m| m.entities.clone())
            .unwrap_or_default()
    }

    fn dependencies(&self, namespace: &str) -> Vec<String> {
        if namespace == "GLib" {
            return Vec::new();
        }
        self.loaded
            .get(namespace)
            .map(NamespaceMetadata::dependency_names)
            .unwrap_or_default()
    }

    fn symbol_prefix(&self, namespace: &str) -> Option<String> {
        self.loaded
            .get(namespace)
            .and_then(|m| m.symbol_prefix.clone())
    }

    fn object(&self, name: &QualifiedName) -> Option<ObjectInfo> {
        self.loaded
            .get(&name.namespace)
            .and_then(|m| m.object(&name.name))
            .cloned()
    }

    fn c_includes(&self, namespace: &str) -> Vec<String> {
        self.loaded
            .get(namespace)
            .map(|m| m.c_includes.clone())
            .unwrap_or_default()
    }

    fn packages(&self, namespace: &str) -> Vec<String> {
        self.loaded
            .get(namespace)
            .map(|m| m.packages.clone())
            .unwrap_or_default()
    }
}
