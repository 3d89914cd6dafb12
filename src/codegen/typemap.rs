//! Go and C spellings of introspected types.
//!
//! Non-composite tags go through the primitive tables. Arrays recurse into
//! their element type and interfaces are resolved by kind. Anything else is
//! an [`UnsupportedType`].

use super::context::GenerationContext;
use super::indirection;
use super::UnsupportedType;
use crate::core::{
    native_primitive, target_primitive, ArrayStorage, Direction, InterfaceKind, TypeDescriptor,
    TypeTag,
};

/// A C type: base name plus pointer depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeType {
    pub base: String,
    pub depth: u8,
}

impl NativeType {
    pub fn new(base: impl Into<String>, depth: u8) -> Self {
        NativeType {
            base: base.into(),
            depth,
        }
    }

    /// `void` with no pointer: nothing is passed or returned.
    pub fn is_void(&self) -> bool {
        self.base == "void" && self.depth == 0
    }

    /// The type one pointer level down.
    pub fn pointee(&self) -> NativeType {
        NativeType::new(self.base.clone(), self.depth.saturating_sub(1))
    }

    /// C spelling of a declaration of `name` with this type.
    pub fn declare(&self, name: &str) -> String {
        if self.depth == 0 {
            format!("{} {}", self.base, name)
        } else {
            format!("{} {}{}", self.base, "*".repeat(self.depth.into()), name)
        }
    }

    /// cgo spelling (`*C.GtkWidget`).
    pub fn cgo(&self) -> String {
        format!("{}C.{}", "*".repeat(self.depth.into()), self.base)
    }
}

/// Where a Go type appears.
///
/// Objects are accepted through their interface but handed back as the
/// concrete implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Param,
    Result,
}

/// Resolve the C type of `ty` passed in `direction`.
pub fn native_type(
    ctx: &mut GenerationContext<'_>,
    ty: &TypeDescriptor,
    direction: Direction,
) -> Result<NativeType, UnsupportedType> {
    let depth = indirection::resolve(ty, direction).native;

    match &ty.tag {
        TypeTag::Void if ty.pointer => Ok(NativeType::new("gpointer", depth - 1)),
        TypeTag::Array(array) => {
            if array.storage != ArrayStorage::C {
                return Err(UnsupportedType::native(&ty.tag));
            }
            let element = native_type(ctx, &array.element, Direction::In)?;
            Ok(NativeType::new(element.base, element.depth + depth))
        }
        TypeTag::Interface(iface) => match iface.kind {
            InterfaceKind::Enum => Ok(NativeType::new("gint", depth)),
            InterfaceKind::Object | InterfaceKind::Struct => {
                Ok(NativeType::new(ctx.native_name(iface), depth))
            }
            InterfaceKind::Other => Err(UnsupportedType::native(&ty.tag)),
        },
        tag => native_primitive(tag)
            .map(|base| NativeType::new(base, depth))
            .ok_or_else(|| UnsupportedType::native(tag)),
    }
}

/// Resolve the Go type of a value of `ty`.
///
/// Output slots are handled by the caller: an `Out` argument surfaces in Go
/// as a plain result of this type.
pub fn target_type(
    ctx: &mut GenerationContext<'_>,
    ty: &TypeDescriptor,
    role: Role,
) -> Result<String, UnsupportedType> {
    let depth = indirection::resolve(ty, Direction::In).target;

    match &ty.tag {
        TypeTag::Void if ty.pointer => Ok("unsafe.Pointer".to_string()),
        TypeTag::Array(array) => {
            if array.storage != ArrayStorage::C {
                return Err(UnsupportedType::target(&ty.tag));
            }
            let element = target_type(ctx, &array.element, Role::Result)?;
            Ok(format!("[]{}", element))
        }
        TypeTag::Interface(iface) => match (iface.kind, role) {
            (InterfaceKind::Enum | InterfaceKind::Struct, _) => Ok(ctx.target_name(iface, "")),
            (InterfaceKind::Object, Role::Param) => Ok(ctx.target_name(iface, "")),
            (InterfaceKind::Object, Role::Result) => {
                Ok(format!("*{}", ctx.target_name(iface, "Impl")))
            }
            (InterfaceKind::Other, _) => Err(UnsupportedType::target(&ty.tag)),
        },
        tag => match target_primitive(tag) {
            Some(name) if !name.is_empty() => Ok(format!("{}{}", "*".repeat(depth.into()), name)),
            _ => Err(UnsupportedType::target(tag)),
        },
    }
}
