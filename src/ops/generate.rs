//! Binding generation for whole namespaces.
//!
//! One namespace run loads the denylist, builds a fresh
//! [`GenerationContext`], dispatches every declared entity in provider order
//! and assembles a single Go file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use miette::Diagnostic as MietteDiagnostic;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::codegen::output::GoFile;
use crate::codegen::{
    generate_enum, generate_function, generate_object, generate_struct, DeclarationOutput,
    GenerationContext,
};
use crate::core::{Denylist, Entity};
use crate::ops::deps::dependency_order;
use crate::provider::{IntrospectionProvider, ProviderError};
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::naming::go_package_name;
use crate::util::{fs, CodegenConfig};

/// Options for generating bindings.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Code generation settings
    pub codegen: CodegenConfig,

    /// Directory with per-namespace denylist files
    pub denylist_dir: Option<PathBuf>,

    /// Go import path under which namespace packages live
    pub import_root: String,

    /// Worker threads for multi-namespace runs
    pub jobs: Option<usize>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            codegen: CodegenConfig::default(),
            denylist_dir: None,
            import_root: "gibind.local/bindings".to_string(),
            jobs: None,
        }
    }
}

/// Error raised by a generation run.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GenerateError {
    #[error("namespace `{0}` is not loaded")]
    #[diagnostic(code(gibind::generate::not_loaded))]
    NotLoaded(String),

    #[error("failed to load metadata for `{namespace}`")]
    #[diagnostic(code(gibind::generate::metadata))]
    MetadataLoad {
        namespace: String,
        #[source]
        source: ProviderError,
    },

    #[error("dependency cycle involving namespace `{0}`")]
    #[diagnostic(
        code(gibind::generate::cycle),
        help("Check the `dependencies` lists of the namespaces involved")
    )]
    DependencyCycle(String),

    #[error("failed to read denylist {}", path.display())]
    #[diagnostic(code(gibind::generate::denylist))]
    Denylist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start worker pool")]
    #[diagnostic(code(gibind::generate::pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl GenerateError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenerateError::NotLoaded(namespace) => {
                Diagnostic::error(format!("namespace `{}` is not loaded", namespace))
                    .with_suggestion(suggestions::NO_METADATA)
            }
            GenerateError::MetadataLoad { namespace, source } => source
                .to_diagnostic()
                .with_context(format!("while loading `{}`", namespace)),
            GenerateError::DependencyCycle(namespace) => Diagnostic::error(format!(
                "dependency cycle involving namespace `{}`",
                namespace
            ))
            .with_suggestion(suggestions::DEPENDENCY_CYCLE),
            GenerateError::Denylist { path, source } => {
                Diagnostic::error(format!("failed to read denylist: {}", source))
                    .with_location(path)
            }
            GenerateError::ThreadPool(e) => {
                Diagnostic::error(format!("failed to start worker pool: {}", e))
            }
        }
    }
}

/// Counts of generated and skipped declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub functions: usize,
    pub structs: usize,
    pub objects: usize,
    pub enums: usize,
    /// Top-level entities that produced nothing
    pub skipped: usize,
    /// Native symbols recorded, including casting shims
    pub symbols: usize,
}

/// Generated bindings for one namespace.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceBindings {
    pub namespace: String,
    pub package: String,
    /// The complete Go file
    #[serde(skip)]
    pub source: String,
    pub imports: Vec<String>,
    pub stats: GenerationStats,
}

impl NamespaceBindings {
    /// Path of the Go file below `out_dir`.
    pub fn relative_path(&self) -> PathBuf {
        Path::new(&self.package).join(format!("{}.go", self.package))
    }
}

/// Load `namespaces` (and their dependencies) into the provider.
pub fn load_namespaces(
    provider: &mut dyn IntrospectionProvider,
    namespaces: &[String],
) -> Result<(), GenerateError> {
    for namespace in namespaces {
        provider
            .load(namespace)
            .map_err(|source| GenerateError::MetadataLoad {
                namespace: namespace.clone(),
                source,
            })?;
    }
    Ok(())
}

/// Generate the Go file for one loaded namespace.
pub fn generate_namespace(
    provider: &dyn IntrospectionProvider,
    namespace: &str,
    opts: &GenerateOptions,
) -> Result<NamespaceBindings, GenerateError> {
    if !provider.is_loaded(namespace) {
        return Err(GenerateError::NotLoaded(namespace.to_string()));
    }

    let denylist = match &opts.denylist_dir {
        Some(dir) => Denylist::load(dir, namespace).map_err(|source| GenerateError::Denylist {
            path: dir.join(namespace),
            source,
        })?,
        None => Denylist::new(),
    };

    let mut ctx = GenerationContext::new(provider, &opts.codegen, namespace, denylist);
    let mut body = DeclarationOutput::empty();
    let mut stats = GenerationStats::default();

    for entity in provider.entities(namespace) {
        let output = match &entity {
            Entity::Function(func) => generate_function(&mut ctx, func, None),
            Entity::Struct(info) => generate_struct(&mut ctx, info),
            Entity::Object(info) => generate_object(&mut ctx, info),
            Entity::Enum(info) => generate_enum(&mut ctx, info),
            Entity::Callback(_) | Entity::Interface(_) | Entity::Union(_) | Entity::Constant(_) => {
                tracing::debug!("skipping {} {}: not generated", entity.kind(), entity.name());
                DeclarationOutput::empty()
            }
        };

        if output.is_empty() {
            stats.skipped += 1;
            continue;
        }
        match entity {
            Entity::Function(_) => stats.functions += 1,
            Entity::Struct(_) => stats.structs += 1,
            Entity::Object(_) => stats.objects += 1,
            Entity::Enum(_) => stats.enums += 1,
            _ => {}
        }
        body.append(output);
    }
    stats.symbols = ctx.registry.emitted_count();

    let package = go_package_name(namespace);
    let imports: Vec<String> = ctx
        .references()
        .map(|ns| format!("{}/{}", opts.import_root, go_package_name(ns)))
        .collect();

    let file = GoFile {
        namespace: namespace.to_string(),
        package: package.clone(),
        pkg_config: provider.packages(namespace),
        includes: provider.c_includes(namespace),
        imports: imports.clone(),
        native: body.native,
        target: body.target,
    };

    tracing::info!(
        "{}: {} functions, {} structs, {} objects, {} enums ({} skipped)",
        namespace,
        stats.functions,
        stats.structs,
        stats.objects,
        stats.enums,
        stats.skipped
    );

    Ok(NamespaceBindings {
        namespace: namespace.to_string(),
        package,
        source: file.render(),
        imports,
        stats,
    })
}

/// Generate `roots` and every namespace they depend on, dependencies first.
///
/// Namespaces are independent once loaded, so they are generated on a rayon
/// pool, each with its own context.
pub fn generate_all(
    provider: &dyn IntrospectionProvider,
    roots: &[String],
    opts: &GenerateOptions,
) -> Result<Vec<NamespaceBindings>, GenerateError> {
    let order = dependency_order(provider, roots)?;
    generate_many(provider, &order, opts)
}

/// Generate exactly `namespaces`, in the given order.
pub fn generate_many(
    provider: &dyn IntrospectionProvider,
    namespaces: &[String],
    opts: &GenerateOptions,
) -> Result<Vec<NamespaceBindings>, GenerateError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = opts.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    pool.install(|| {
        namespaces
            .par_iter()
            .map(|namespace| generate_namespace(provider, namespace, opts))
            .collect()
    })
}

/// Write a namespace's Go file below `out_dir`, returning its path.
pub fn write_bindings(bindings: &NamespaceBindings, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(bindings.relative_path());
    fs::write_string(&path, &bindings.source)
        .with_context(|| format!("failed to write bindings for {}", bindings.namespace))?;
    tracing::debug!("wrote {}", path.display());
    Ok(path)
}

/// Write a JSON summary of a run.
pub fn write_report(bindings: &[NamespaceBindings], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(bindings).context("failed to serialize report")?;
    fs::write_string(path, &json)
}
