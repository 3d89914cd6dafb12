//! High-level operations.
//!
//! This module contains the implementation of gibind commands.

pub mod deps;
pub mod generate;

pub use deps::dependency_order;
pub use generate::{
    generate_all, generate_many, generate_namespace, load_namespaces, write_bindings,
    write_report, GenerateError, GenerateOptions, GenerationStats, NamespaceBindings,
};
