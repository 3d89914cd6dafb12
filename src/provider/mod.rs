//! Introspection provider boundary.
//!
//! The provider supplies everything the generators know about a native
//! library: its declared entities, its dependencies and its C prefix. The
//! generators never talk to the library itself.

pub mod metadata;

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::{Entity, ObjectInfo, QualifiedName};
use crate::util::diagnostic::{suggestions, Diagnostic};

pub use metadata::{MetadataProvider, NamespaceMetadata};

/// Source of introspection metadata.
///
/// Loading mutates the provider; everything else is a read, so a loaded
/// provider can be shared between namespace generations on worker threads.
pub trait IntrospectionProvider: Send + Sync {
    /// Make a namespace and its dependencies available.
    fn load(&mut self, namespace: &str) -> Result<(), ProviderError>;

    /// Whether `namespace` has been loaded.
    fn is_loaded(&self, namespace: &str) -> bool;

    /// Declared entities in provider order.
    fn entities(&self, namespace: &str) -> Vec<Entity>;

    /// Names of the namespaces `namespace` depends on.
    fn dependencies(&self, namespace: &str) -> Vec<String>;

    /// C identifier prefix of the namespace (e.g. `Gtk`).
    fn symbol_prefix(&self, namespace: &str) -> Option<String>;

    /// Look up an object class by name in any loaded namespace.
    fn object(&self, name: &QualifiedName) -> Option<ObjectInfo>;

    /// Headers the generated shims must include.
    fn c_includes(&self, _namespace: &str) -> Vec<String> {
        Vec::new()
    }

    /// pkg-config packages providing the library.
    fn packages(&self, _namespace: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Error raised while loading metadata.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ProviderError {
    #[error("namespace `{namespace}` not found")]
    #[diagnostic(
        code(gibind::provider::not_found),
        help(
            "Pass the directory containing {namespace}.json with `-I`/`--metadata-dir` or set GIBIND_METADATA_DIR"
        )
    )]
    NamespaceNotFound {
        namespace: String,
        searched: Vec<PathBuf>,
    },

    #[error("failed to parse metadata {}", path.display())]
    #[diagnostic(code(gibind::provider::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} declares namespace `{found}`, expected `{expected}`", path.display())]
    #[diagnostic(code(gibind::provider::mismatch))]
    NamespaceMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("failed to read metadata {}", path.display())]
    #[diagnostic(code(gibind::provider::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProviderError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProviderError::NamespaceNotFound {
                namespace,
                searched,
            } => {
                let mut diag = Diagnostic::error(format!("namespace `{}` not found", namespace));
                if searched.is_empty() {
                    diag = diag.with_context("no metadata directories were configured");
                }
                for path in searched {
                    diag = diag.with_context(format!("searched {}", path.display()));
                }
                diag.with_suggestion(suggestions::NO_METADATA)
            }
            ProviderError::Parse { path, source } => {
                Diagnostic::error(format!("failed to parse metadata: {}", source))
                    .with_location(path)
                    .with_suggestion(suggestions::BAD_METADATA)
            }
            ProviderError::NamespaceMismatch {
                path,
                expected,
                found,
            } => Diagnostic::error(format!(
                "metadata declares namespace `{}`, expected `{}`",
                found, expected
            ))
            .with_location(path),
            ProviderError::Io { path, source } => {
                Diagnostic::error(format!("failed to read metadata: {}", source)).with_location(path)
            }
        }
    }
}
