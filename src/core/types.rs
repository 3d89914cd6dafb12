//! Introspected type descriptions.
//!
//! A [`TypeDescriptor`] is what the introspection provider reports for an
//! argument, a return value or an array element. Two fixed tables map the
//! non-composite tags to their Go and GLib spellings; composite tags (arrays
//! and interfaces) never go through the tables and are resolved structurally
//! by the code generator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a type as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum TypeTag {
    Void,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    #[serde(rename = "uint8")]
    UInt8,
    #[serde(rename = "uint16")]
    UInt16,
    #[serde(rename = "uint32")]
    UInt32,
    #[serde(rename = "uint64")]
    UInt64,
    Float,
    Double,
    Utf8,
    Filename,
    Unichar,

    /// Sequence of elements. Only C storage is marshaled.
    Array(ArrayType),

    /// `GList`
    #[serde(rename = "glist")]
    List,
    /// `GSList`
    #[serde(rename = "gslist")]
    SList,

    /// Reference to a named enum, object, struct or other declared type.
    Interface(InterfaceRef),

    /// `GType`
    #[serde(rename = "gtype")]
    GType,
    /// `GHashTable`
    #[serde(rename = "ghash")]
    HashTable,
    /// `GError`
    Error,
}

impl TypeTag {
    /// Name of the tag as it appears in metadata and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Void => "void",
            TypeTag::Boolean => "boolean",
            TypeTag::Int8 => "int8",
            TypeTag::Int16 => "int16",
            TypeTag::Int32 => "int32",
            TypeTag::Int64 => "int64",
            TypeTag::UInt8 => "uint8",
            TypeTag::UInt16 => "uint16",
            TypeTag::UInt32 => "uint32",
            TypeTag::UInt64 => "uint64",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Utf8 => "utf8",
            TypeTag::Filename => "filename",
            TypeTag::Unichar => "unichar",
            TypeTag::Array(_) => "array",
            TypeTag::List => "glist",
            TypeTag::SList => "gslist",
            TypeTag::Interface(_) => "interface",
            TypeTag::GType => "gtype",
            TypeTag::HashTable => "ghash",
            TypeTag::Error => "error",
        }
    }

    /// Integer and floating point scalars (booleans excluded).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeTag::Int8
                | TypeTag::Int16
                | TypeTag::Int32
                | TypeTag::Int64
                | TypeTag::UInt8
                | TypeTag::UInt16
                | TypeTag::UInt32
                | TypeTag::UInt64
                | TypeTag::Float
                | TypeTag::Double
        )
    }

    /// UTF-8 or filename-encoded strings.
    pub fn is_string(&self) -> bool {
        matches!(self, TypeTag::Utf8 | TypeTag::Filename)
    }

    /// `GList` or `GSList`.
    pub fn is_list(&self) -> bool {
        matches!(self, TypeTag::List | TypeTag::SList)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Interface(iface) => write!(f, "interface({})", iface.name),
            TypeTag::Array(array) => write!(f, "array({})", array.element.tag),
            other => f.write_str(other.name()),
        }
    }
}

/// How array elements are stored natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayStorage {
    /// Contiguous C array.
    #[default]
    C,
    /// `GArray`
    #[serde(rename = "garray")]
    GArray,
    /// `GPtrArray`
    PtrArray,
    /// `GByteArray`
    ByteArray,
}

/// Array element type and length information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    pub element: Box<TypeDescriptor>,

    #[serde(default)]
    pub storage: ArrayStorage,

    /// Index of the argument carrying the element count.
    #[serde(default)]
    pub length: Option<usize>,

    #[serde(default)]
    pub zero_terminated: bool,

    #[serde(default)]
    pub fixed_size: Option<usize>,
}

impl ArrayType {
    /// A C array of `element` with no length information.
    pub fn of(element: TypeDescriptor) -> Self {
        ArrayType {
            element: Box::new(element),
            storage: ArrayStorage::C,
            length: None,
            zero_terminated: false,
            fixed_size: None,
        }
    }

    pub fn with_length(mut self, index: usize) -> Self {
        self.length = Some(index);
        self
    }

    pub fn zero_terminated(mut self) -> Self {
        self.zero_terminated = true;
        self
    }

    pub fn with_storage(mut self, storage: ArrayStorage) -> Self {
        self.storage = storage;
        self
    }
}

/// What kind of declaration an interface type points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    /// Enums and flags.
    Enum,
    Object,
    Struct,
    /// Callbacks, unions, GInterfaces and anything else.
    Other,
}

/// A resolved reference to a named declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRef {
    pub kind: InterfaceKind,

    /// Owning namespace; `None` means the namespace being generated.
    #[serde(default)]
    pub namespace: Option<String>,

    pub name: String,

    /// C type name (e.g. `GtkWidget`).
    #[serde(default)]
    pub native_type: Option<String>,
}

impl InterfaceRef {
    pub fn new(kind: InterfaceKind, name: impl Into<String>) -> Self {
        InterfaceRef {
            kind,
            namespace: None,
            name: name.into(),
            native_type: None,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_native_type(mut self, native_type: impl Into<String>) -> Self {
        self.native_type = Some(native_type.into());
        self
    }

    /// The namespace this reference lives in, if it differs from `current`.
    pub fn foreign_namespace<'a>(&'a self, current: &str) -> Option<&'a str> {
        self.namespace.as_deref().filter(|ns| *ns != current)
    }
}

/// A type tag plus whether its native form is already behind a pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(flatten)]
    pub tag: TypeTag,

    #[serde(default)]
    pub pointer: bool,
}

impl TypeDescriptor {
    pub fn new(tag: TypeTag) -> Self {
        TypeDescriptor {
            tag,
            pointer: false,
        }
    }

    pub fn pointer(tag: TypeTag) -> Self {
        TypeDescriptor { tag, pointer: true }
    }

    pub fn utf8() -> Self {
        Self::pointer(TypeTag::Utf8)
    }

    pub fn array(array: ArrayType) -> Self {
        Self::pointer(TypeTag::Array(array))
    }

    pub fn interface(iface: InterfaceRef) -> Self {
        let pointer = matches!(iface.kind, InterfaceKind::Object | InterfaceKind::Struct);
        TypeDescriptor {
            tag: TypeTag::Interface(iface),
            pointer,
        }
    }

    /// A `void` return: nothing comes back.
    pub fn is_void(&self) -> bool {
        matches!(self.tag, TypeTag::Void) && !self.pointer
    }

    /// Element type when this is an array.
    pub fn array_type(&self) -> Option<&ArrayType> {
        match &self.tag {
            TypeTag::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Every interface reference reachable from this type.
    pub fn interfaces(&self) -> Vec<&InterfaceRef> {
        match &self.tag {
            TypeTag::Interface(iface) => vec![iface],
            TypeTag::Array(array) => array.element.interfaces(),
            _ => Vec::new(),
        }
    }
}

/// Ownership transfer of a value crossing the native boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transfer {
    /// The receiver does not take ownership.
    #[default]
    None,
    /// The container is transferred, its elements are not.
    Container,
    /// Container and elements are transferred.
    Full,
}

impl Transfer {
    /// Transfer mode applied to the elements of a container.
    pub fn for_elements(self) -> Transfer {
        match self {
            Transfer::Full => Transfer::Full,
            Transfer::None | Transfer::Container => Transfer::None,
        }
    }

    pub fn owns_container(self) -> bool {
        !matches!(self, Transfer::None)
    }
}

/// Go spelling of a non-composite tag.
///
/// `Void` maps to the empty string, meaning "no value". Composite and
/// unsupported tags are absent.
pub fn target_primitive(tag: &TypeTag) -> Option<&'static str> {
    let name = match tag {
        TypeTag::Void => "",
        TypeTag::Boolean => "bool",
        TypeTag::Int8 => "int8",
        TypeTag::Int16 => "int16",
        TypeTag::Int32 => "int32",
        TypeTag::Int64 => "int64",
        TypeTag::UInt8 => "uint8",
        TypeTag::UInt16 => "uint16",
        TypeTag::UInt32 => "uint32",
        TypeTag::UInt64 => "uint64",
        TypeTag::Float => "float32",
        TypeTag::Double => "float64",
        TypeTag::Utf8 | TypeTag::Filename => "string",
        TypeTag::Unichar => "rune",
        TypeTag::List | TypeTag::SList => "unsafe.Pointer",
        TypeTag::Array(_)
        | TypeTag::Interface(_)
        | TypeTag::GType
        | TypeTag::HashTable
        | TypeTag::Error => return None,
    };
    Some(name)
}

/// GLib spelling of a non-composite tag, without pointer suffixes.
pub fn native_primitive(tag: &TypeTag) -> Option<&'static str> {
    let name = match tag {
        TypeTag::Void => "void",
        TypeTag::Boolean => "gboolean",
        TypeTag::Int8 => "gint8",
        TypeTag::Int16 => "gint16",
        TypeTag::Int32 => "gint32",
        TypeTag::Int64 => "gint64",
        TypeTag::UInt8 => "guint8",
        TypeTag::UInt16 => "guint16",
        TypeTag::UInt32 => "guint32",
        TypeTag::UInt64 => "guint64",
        TypeTag::Float => "gfloat",
        TypeTag::Double => "gdouble",
        TypeTag::Utf8 | TypeTag::Filename => "gchar",
        TypeTag::Unichar => "gunichar",
        TypeTag::List => "GList",
        TypeTag::SList => "GSList",
        TypeTag::Array(_)
        | TypeTag::Interface(_)
        | TypeTag::GType
        | TypeTag::HashTable
        | TypeTag::Error => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primitive_tags() -> Vec<TypeTag> {
        vec![
            TypeTag::Boolean,
            TypeTag::Int8,
            TypeTag::Int16,
            TypeTag::Int32,
            TypeTag::Int64,
            TypeTag::UInt8,
            TypeTag::UInt16,
            TypeTag::UInt32,
            TypeTag::UInt64,
            TypeTag::Float,
            TypeTag::Double,
            TypeTag::Utf8,
            TypeTag::Filename,
            TypeTag::Unichar,
            TypeTag::List,
            TypeTag::SList,
        ]
    }

    #[test]
    fn test_primitive_tables_cover_primitives() {
        for tag in primitive_tags() {
            let target = target_primitive(&tag).expect("target entry");
            let native = native_primitive(&tag).expect("native entry");
            assert!(!target.is_empty(), "empty target name for {tag}");
            assert!(!native.is_empty(), "empty native name for {tag}");
        }
    }

    #[test]
    fn test_void_is_no_value() {
        assert_eq!(target_primitive(&TypeTag::Void), Some(""));
        assert_eq!(native_primitive(&TypeTag::Void), Some("void"));
    }

    #[test]
    fn test_composite_tags_are_not_in_tables() {
        let array = TypeTag::Array(ArrayType::of(TypeDescriptor::new(TypeTag::Int32)));
        let iface = TypeTag::Interface(InterfaceRef::new(InterfaceKind::Enum, "Align"));
        for tag in [array, iface, TypeTag::GType, TypeTag::HashTable, TypeTag::Error] {
            assert!(target_primitive(&tag).is_none());
            assert!(native_primitive(&tag).is_none());
        }
    }

    #[test]
    fn test_descriptor_from_json() {
        let ty: TypeDescriptor =
            serde_json::from_str(r#"{"tag": "utf8", "pointer": true}"#).unwrap();
        assert_eq!(ty, TypeDescriptor::utf8());

        let ty: TypeDescriptor = serde_json::from_str(
            r#"{"tag": "array", "pointer": true, "zero_terminated": true,
                "element": {"tag": "uint8"}}"#,
        )
        .unwrap();
        let array = ty.array_type().unwrap();
        assert!(ty.pointer);
        assert!(array.zero_terminated);
        assert_eq!(array.storage, ArrayStorage::C);
        assert_eq!(array.element.tag, TypeTag::UInt8);

        let ty: TypeDescriptor = serde_json::from_str(
            r#"{"tag": "interface", "kind": "object", "namespace": "Gtk",
                "name": "Widget", "native_type": "GtkWidget", "pointer": true}"#,
        )
        .unwrap();
        match &ty.tag {
            TypeTag::Interface(iface) => {
                assert_eq!(iface.kind, InterfaceKind::Object);
                assert_eq!(iface.native_type.as_deref(), Some("GtkWidget"));
                assert_eq!(iface.foreign_namespace("Gtk"), None);
                assert_eq!(iface.foreign_namespace("Gdk"), Some("Gtk"));
            }
            other => panic!("expected interface, got {other:?}"),
        }
    }

    #[test]
    fn test_void_pointer_is_not_void() {
        assert!(TypeDescriptor::new(TypeTag::Void).is_void());
        assert!(!TypeDescriptor::pointer(TypeTag::Void).is_void());
    }

    #[test]
    fn test_transfer_for_elements() {
        assert_eq!(Transfer::Full.for_elements(), Transfer::Full);
        assert_eq!(Transfer::Container.for_elements(), Transfer::None);
        assert!(Transfer::Container.owns_container());
        assert!(!Transfer::None.owns_container());
    }
}
