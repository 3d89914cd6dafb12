//! Declared entities of an introspected namespace.
//!
//! [`Entity`] is a closed union over everything a namespace can declare.
//! Generators match on it exhaustively, so a new introspection kind shows up
//! as a compile error instead of being silently dropped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{Transfer, TypeDescriptor};

/// A top-level declaration of a namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Function(FunctionInfo),
    Struct(StructInfo),
    Object(ObjectInfo),
    Enum(EnumInfo),
    Callback(NamedEntity),
    Interface(NamedEntity),
    Union(NamedEntity),
    Constant(NamedEntity),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Function(f) => &f.name,
            Entity::Struct(s) => &s.name,
            Entity::Object(o) => &o.name,
            Entity::Enum(e) => &e.name,
            Entity::Callback(n) | Entity::Interface(n) | Entity::Union(n) | Entity::Constant(n) => {
                &n.name
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Function(_) => "function",
            Entity::Struct(_) => "struct",
            Entity::Object(_) => "object",
            Entity::Enum(_) => "enum",
            Entity::Callback(_) => "callback",
            Entity::Interface(_) => "interface",
            Entity::Union(_) => "union",
            Entity::Constant(_) => "constant",
        }
    }
}

/// A declaration that is recognized but has no generation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub name: String,
}

/// Data-flow direction of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    In,
    Out,
    InOut,
}

impl Direction {
    /// `Out` and `InOut` arguments are written through a pointer.
    pub fn is_output(self) -> bool {
        matches!(self, Direction::Out | Direction::InOut)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
            Direction::InOut => write!(f, "inout"),
        }
    }
}

/// Shape of a callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionFlags {
    /// Takes the owning instance as an implicit first argument.
    pub is_method: bool,
    /// Returns a new instance of the owning type.
    pub is_constructor: bool,
    /// Reports failure through a trailing `GError **`.
    pub throws: bool,
}

/// One argument of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentInfo {
    pub name: String,

    #[serde(default)]
    pub direction: Direction,

    #[serde(rename = "type")]
    pub ty: TypeDescriptor,

    #[serde(default)]
    pub transfer: Transfer,
}

impl ArgumentInfo {
    pub fn new(name: impl Into<String>, direction: Direction, ty: TypeDescriptor) -> Self {
        ArgumentInfo {
            name: name.into(),
            direction,
            ty,
            transfer: Transfer::None,
        }
    }

    pub fn with_transfer(mut self, transfer: Transfer) -> Self {
        self.transfer = transfer;
        self
    }
}

/// A function, method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,

    /// The real C symbol.
    pub symbol: String,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub flags: FunctionFlags,

    #[serde(default)]
    pub args: Vec<ArgumentInfo>,

    #[serde(default)]
    pub return_type: Option<TypeDescriptor>,

    #[serde(default)]
    pub return_transfer: Transfer,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        FunctionInfo {
            name: name.into(),
            symbol: symbol.into(),
            deprecated: false,
            flags: FunctionFlags::default(),
            args: Vec::new(),
            return_type: None,
            return_transfer: Transfer::None,
        }
    }

    pub fn with_arg(mut self, arg: ArgumentInfo) -> Self {
        self.args.push(arg);
        self
    }

    pub fn returning(mut self, ty: TypeDescriptor) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_return_transfer(mut self, transfer: Transfer) -> Self {
        self.return_transfer = transfer;
        self
    }

    pub fn method(mut self) -> Self {
        self.flags.is_method = true;
        self
    }

    pub fn constructor(mut self) -> Self {
        self.flags.is_constructor = true;
        self
    }

    pub fn throws(mut self) -> Self {
        self.flags.throws = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// The declared return type, unless it is `void`.
    pub fn return_value(&self) -> Option<&TypeDescriptor> {
        self.return_type.as_ref().filter(|ty| !ty.is_void())
    }
}

/// A record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructInfo {
    pub name: String,

    pub native_type: String,

    /// Declared by another binding layer; nothing to generate.
    #[serde(default)]
    pub foreign: bool,

    /// Class or interface struct carrying a GType's vtable.
    #[serde(default)]
    pub gtype_struct: bool,

    #[serde(default)]
    pub methods: Vec<FunctionInfo>,
}

impl StructInfo {
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        StructInfo {
            name: name.into(),
            native_type: native_type.into(),
            foreign: false,
            gtype_struct: false,
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: FunctionInfo) -> Self {
        self.methods.push(method);
        self
    }
}

/// A class in the GObject hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub name: String,

    pub native_type: String,

    #[serde(default)]
    pub parent: Option<QualifiedName>,

    #[serde(default)]
    pub methods: Vec<FunctionInfo>,
}

impl ObjectInfo {
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        ObjectInfo {
            name: name.into(),
            native_type: native_type.into(),
            parent: None,
            methods: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: QualifiedName) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_method(mut self, method: FunctionInfo) -> Self {
        self.methods.push(method);
        self
    }
}

/// An enumeration or flags type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumInfo {
    pub name: String,

    /// Registered C type name, if any.
    #[serde(default)]
    pub native_type: Option<String>,

    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl EnumInfo {
    pub fn new(name: impl Into<String>) -> Self {
        EnumInfo {
            name: name.into(),
            native_type: None,
            values: Vec::new(),
        }
    }

    pub fn with_native_type(mut self, native_type: impl Into<String>) -> Self {
        self.native_type = Some(native_type.into());
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value,
        });
        self
    }
}

/// A single named value of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// A `Namespace.Name` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    pub namespace: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        QualifiedName {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl FromStr for QualifiedName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
                Ok(QualifiedName::new(namespace, name))
            }
            _ => Err(format!(
                "invalid qualified name '{}'; expected 'Namespace.Name'",
                s
            )),
        }
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.to_string()
    }
}
