//! Go and C code generation from introspected entities.
//!
//! Every declaration produces two halves: Go source for the package body and
//! C source for the cgo preamble. Both halves are built together and either
//! both are kept or both are dropped.

pub mod context;
pub mod enums;
pub mod function;
pub mod indirection;
pub mod marshal;
pub mod object;
pub mod output;
pub mod registry;
pub mod structs;
pub mod typemap;

use std::fmt;

use thiserror::Error;

use crate::core::TypeTag;

pub use context::{GenerationContext, PrefixCache};
pub use enums::generate_enum;
pub use function::{generate_function, Owner};
pub use indirection::Indirection;
pub use object::generate_object;
pub use registry::ExportRegistry;
pub use structs::generate_struct;
pub use typemap::NativeType;

/// Which half of a declaration a type failed to resolve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Go
    Target,
    /// C / cgo
    Native,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Target => write!(f, "GOTYPE"),
            Side::Native => write!(f, "CTYPE"),
        }
    }
}

/// A type with no table entry and no structural mapping.
///
/// The display form is a sentinel naming the tag. It is meant for logs only
/// and never ends up in generated text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("<MISSING {side}: {tag}>")]
pub struct UnsupportedType {
    pub side: Side,
    pub tag: String,
}

impl UnsupportedType {
    pub fn target(tag: &TypeTag) -> Self {
        UnsupportedType {
            side: Side::Target,
            tag: tag.to_string(),
        }
    }

    pub fn native(tag: &TypeTag) -> Self {
        UnsupportedType {
            side: Side::Native,
            tag: tag.to_string(),
        }
    }
}

/// Why a declaration produced no output.
#[derive(Debug, Error)]
pub(crate) enum Abort {
    #[error("deprecated")]
    Deprecated,

    #[error("denylisted")]
    Denied,

    #[error("already emitted")]
    Duplicate,

    #[error("argument `{0}` is inout")]
    InOut(String),

    #[error("method has no owning type")]
    NoOwner,

    #[error("foreign struct")]
    Foreign,

    #[error("GType class struct")]
    GTypeStruct,

    #[error("unsupported type {0}")]
    Unsupported(#[from] UnsupportedType),
}

/// Generated Go and C text for one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationOutput {
    /// Go source
    pub target: String,
    /// C source for the cgo preamble
    pub native: String,
}

impl DeclarationOutput {
    pub fn new(target: impl Into<String>, native: impl Into<String>) -> Self {
        DeclarationOutput {
            target: target.into(),
            native: native.into(),
        }
    }

    /// Nothing was generated.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty() && self.native.is_empty()
    }

    /// Append another declaration, separating non-empty text with a blank line.
    pub fn append(&mut self, other: DeclarationOutput) {
        join_into(&mut self.target, other.target);
        join_into(&mut self.native, other.native);
    }
}

fn join_into(dst: &mut String, text: String) {
    if text.is_empty() {
        return;
    }
    if !dst.is_empty() {
        dst.push_str("\n\n");
    }
    dst.push_str(&text);
}

/// Prefix every line of `lines` with a tab.
pub(crate) fn indent(lines: Vec<String>) -> impl Iterator<Item = String> {
    lines.into_iter().map(|line| format!("\t{line}"))
}
