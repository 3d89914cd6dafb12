//! gibind - Go bindings and C shims from GObject introspection metadata
//!
//! This crate provides the core library functionality for gibind,
//! including metadata loading, type mapping, marshaling and per-namespace
//! code generation.

pub mod codegen;
pub mod core;
pub mod ops;
pub mod provider;
pub mod util;

/// Test utilities for gibind unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory introspection provider and
/// fixture namespaces.
#[cfg(test)]
pub mod test_support;

pub use codegen::{DeclarationOutput, ExportRegistry, GenerationContext, UnsupportedType};
pub use core::{Denylist, Entity, QualifiedName, TypeDescriptor, TypeTag};
pub use ops::{GenerateOptions, NamespaceBindings};
pub use provider::{IntrospectionProvider, MetadataProvider};
pub use util::config::Config;
