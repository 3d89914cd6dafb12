//! Core data model: introspected types, entities and denylists.

pub mod denylist;
pub mod entity;
pub mod types;

pub use denylist::Denylist;
pub use entity::{
    ArgumentInfo, Direction, EnumInfo, EnumValue, Entity, FunctionFlags, FunctionInfo,
    NamedEntity, ObjectInfo, QualifiedName, StructInfo,
};
pub use types::{
    native_primitive, target_primitive, ArrayStorage, ArrayType, InterfaceKind, InterfaceRef,
    Transfer, TypeDescriptor, TypeTag,
};
