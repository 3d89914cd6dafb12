//! Go statements converting values across the cgo boundary.
//!
//! Conversions always copy. Strings and arrays passed to C get freshly
//! allocated buffers, and values coming back from C are copied into Go memory
//! before the native buffer is released or goes out of scope.

use super::context::GenerationContext;
use super::typemap::{native_type, target_type, Role};
use super::{indent, UnsupportedType};
use crate::core::{
    ArrayStorage, ArrayType, Direction, InterfaceKind, Transfer, TypeDescriptor, TypeTag,
};

/// Placeholder body for list conversions.
pub const LIST_PLACEHOLDER: &str = "panic(\"gibind: GList marshaling is not implemented\")";

/// Prefix of locals introduced by conversions.
///
/// Argument temps are `c_<name>`, and Go parameters are renamed away from
/// both `c_` and this prefix.
pub const HELPER_PREFIX: &str = "_gb_";

/// Name of the `suffix` helper local belonging to the conversion into `dst`.
fn helper(dst: &str, suffix: &str) -> String {
    format!("{HELPER_PREFIX}{dst}_{suffix}")
}

/// Converted value: the type of the destination plus the statements that
/// declare and fill it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marshaled {
    pub ty: String,
    pub statements: Vec<String>,
}

/// Convert the Go value `src` into a new C value named `dst`.
///
/// `transfer` is the ownership the callee takes. Buffers the callee does not
/// take are freed when the enclosing Go function returns.
pub fn to_native(
    ctx: &mut GenerationContext<'_>,
    ty: &TypeDescriptor,
    transfer: Transfer,
    src: &str,
    dst: &str,
) -> Result<Marshaled, UnsupportedType> {
    let native = native_type(ctx, ty, Direction::In)?;
    let cgo = native.cgo();

    let statements = match &ty.tag {
        TypeTag::Void if ty.pointer => vec![format!("{dst} := {cgo}({src})")],
        TypeTag::Boolean if !ty.pointer => vec![
            format!("{dst} := {cgo}(0)"),
            format!("if {src} {{"),
            format!("\t{dst} = {cgo}(1)"),
            "}".to_string(),
        ],
        TypeTag::Utf8 | TypeTag::Filename => {
            let mut lines = vec![format!(
                "{dst} := ({cgo})(unsafe.Pointer(C.CString({src})))"
            )];
            if !transfer.owns_container() {
                lines.push(format!("defer C.free(unsafe.Pointer({dst}))"));
            }
            lines
        }
        tag if tag.is_numeric() || matches!(tag, TypeTag::Unichar) => {
            if ty.pointer {
                vec![format!("{dst} := ({cgo})(unsafe.Pointer({src}))")]
            } else {
                vec![format!("{dst} := {cgo}({src})")]
            }
        }
        TypeTag::List | TypeTag::SList => vec![
            LIST_PLACEHOLDER.to_string(),
            format!("{dst} := ({cgo})({src})"),
        ],
        TypeTag::Array(array) => return array_to_native(ctx, array, transfer, src, dst, cgo),
        TypeTag::Interface(iface) => match iface.kind {
            InterfaceKind::Enum => vec![format!("{dst} := {cgo}({src})")],
            // Types from other packages expose their pointer only through
            // exported methods returning that package's own cgo types.
            InterfaceKind::Object => {
                let accessor = format!("{src}.As{}()", native.base);
                let value = if ctx.is_foreign(iface) {
                    format!("({cgo})(unsafe.Pointer({accessor}))")
                } else {
                    accessor
                };
                vec![
                    format!("var {dst} {cgo}"),
                    format!("if {src} != nil {{"),
                    format!("\t{dst} = {value}"),
                    "}".to_string(),
                ]
            }
            InterfaceKind::Struct if ctx.is_foreign(iface) => {
                let pointer = if ty.pointer {
                    format!("({cgo})({src}.Native())")
                } else {
                    format!("*(*{cgo})({src}.Native())")
                };
                vec![format!("{dst} := {pointer}")]
            }
            InterfaceKind::Struct if ty.pointer => vec![format!("{dst} := {src}.ptr")],
            InterfaceKind::Struct => vec![format!("{dst} := *{src}.ptr")],
            InterfaceKind::Other => return Err(UnsupportedType::target(&ty.tag)),
        },
        tag => return Err(UnsupportedType::target(tag)),
    };

    Ok(Marshaled {
        ty: cgo,
        statements,
    })
}

fn array_to_native(
    ctx: &mut GenerationContext<'_>,
    array: &ArrayType,
    transfer: Transfer,
    src: &str,
    dst: &str,
    cgo: String,
) -> Result<Marshaled, UnsupportedType> {
    if array.storage != ArrayStorage::C {
        return Err(UnsupportedType::target(&TypeTag::Array(array.clone())));
    }

    let [len, mem, buf, i, e, v] = ["len", "mem", "buf", "i", "e", "v"].map(|s| helper(dst, s));
    let element = to_native(ctx, &array.element, transfer.for_elements(), &e, &v)?;
    let element_cgo = &element.ty;

    // One spare zeroed slot keeps the buffer valid (and terminated) even for
    // an empty slice.
    let mut statements = vec![
        format!("{len} := len({src})"),
        format!(
            "{mem} := C.calloc(C.size_t({len}+1), C.size_t(unsafe.Sizeof(*new({element_cgo}))))"
        ),
    ];
    if !transfer.owns_container() {
        statements.push(format!("defer C.free({mem})"));
    }
    statements.push(format!("{buf} := unsafe.Slice((*{element_cgo})({mem}), {len})"));
    statements.push(format!("for {i}, {e} := range {src} {{"));
    statements.extend(indent(element.statements));
    statements.push(format!("\t{buf}[{i}] = {v}"));
    statements.push("}".to_string());
    statements.push(format!("{dst} := ({cgo})({mem})"));

    Ok(Marshaled {
        ty: cgo,
        statements,
    })
}

/// Convert the C value `src` into a new Go value named `dst`.
///
/// `transfer` is the ownership handed to the caller; owned native buffers
/// are released once copied. `length` names the C value holding the element
/// count when `ty` is an array with a length argument.
pub fn to_target(
    ctx: &mut GenerationContext<'_>,
    ty: &TypeDescriptor,
    transfer: Transfer,
    src: &str,
    dst: &str,
    length: Option<&str>,
) -> Result<Marshaled, UnsupportedType> {
    let target = target_type(ctx, ty, Role::Result)?;

    let statements = match &ty.tag {
        TypeTag::Void if ty.pointer => vec![format!("{dst} := unsafe.Pointer({src})")],
        TypeTag::Boolean if !ty.pointer => vec![
            format!("var {dst} bool"),
            format!("if {src} != 0 {{"),
            format!("\t{dst} = true"),
            "}".to_string(),
        ],
        TypeTag::Utf8 | TypeTag::Filename => {
            let mut lines = vec![
                format!("var {dst} string"),
                format!("if {src} != nil {{"),
                format!("\t{dst} = C.GoString((*C.char)(unsafe.Pointer({src})))"),
            ];
            if transfer == Transfer::Full {
                lines.push(format!("\tC.g_free(C.gpointer({src}))"));
            }
            lines.push("}".to_string());
            lines
        }
        tag if tag.is_numeric() || matches!(tag, TypeTag::Unichar) => {
            if ty.pointer {
                let value = target.trim_start_matches('*');
                vec![
                    format!("var {dst} {target}"),
                    format!("if {src} != nil {{"),
                    format!("\t{dst} = new({value})"),
                    format!("\t*{dst} = {value}(*{src})"),
                    "}".to_string(),
                ]
            } else {
                vec![format!("{dst} := {target}({src})")]
            }
        }
        TypeTag::List | TypeTag::SList => vec![
            LIST_PLACEHOLDER.to_string(),
            format!("{dst} := unsafe.Pointer({src})"),
        ],
        TypeTag::Array(array) => {
            return array_to_target(ctx, array, transfer, src, dst, length, target)
        }
        TypeTag::Interface(iface) => match iface.kind {
            InterfaceKind::Enum => vec![format!("{dst} := {target}({src})")],
            InterfaceKind::Object => {
                let value = if ctx.is_foreign(iface) {
                    format!("{}(unsafe.Pointer({src}))", ctx.wrapper_name(iface))
                } else {
                    format!("&{}{{ptr: {src}}}", target.trim_start_matches('*'))
                };
                vec![
                    format!("var {dst} {target}"),
                    format!("if {src} != nil {{"),
                    format!("\t{dst} = {value}"),
                    "}".to_string(),
                ]
            }
            InterfaceKind::Struct => {
                let mut lines = Vec::new();
                let pointer = if ty.pointer {
                    src.to_string()
                } else {
                    let native = native_type(ctx, ty, Direction::In)?;
                    let copy = helper(dst, "copy");
                    lines.push(format!("{copy} := new({})", native.cgo()));
                    lines.push(format!("*{copy} = {src}"));
                    copy
                };
                if ctx.is_foreign(iface) {
                    let wrap = ctx.wrapper_name(iface);
                    lines.push(format!("{dst} := {wrap}(unsafe.Pointer({pointer}))"));
                } else {
                    lines.push(format!("{dst} := {target}{{ptr: {pointer}}}"));
                }
                lines
            }
            InterfaceKind::Other => return Err(UnsupportedType::target(&ty.tag)),
        },
        tag => return Err(UnsupportedType::target(tag)),
    };

    Ok(Marshaled {
        ty: target,
        statements,
    })
}

fn array_to_target(
    ctx: &mut GenerationContext<'_>,
    array: &ArrayType,
    transfer: Transfer,
    src: &str,
    dst: &str,
    length: Option<&str>,
    target: String,
) -> Result<Marshaled, UnsupportedType> {
    let unsupported = || UnsupportedType::target(&TypeTag::Array(array.clone()));
    if array.storage != ArrayStorage::C {
        return Err(unsupported());
    }

    let element_native = native_type(ctx, &array.element, Direction::In)?;
    let [count, i, e, v] = ["n", "i", "e", "v"].map(|s| helper(dst, s));

    let mut statements = if let Some(length) = length {
        vec![format!("{count} := int({length})")]
    } else if array.zero_terminated {
        let terminator = if element_native.depth > 0 {
            "nil"
        } else if array.element.tag.is_numeric()
            || matches!(array.element.tag, TypeTag::Boolean | TypeTag::Unichar)
        {
            "0"
        } else {
            return Err(unsupported());
        };
        vec![
            format!("{count} := 0"),
            format!("if {src} != nil {{"),
            format!(
                "\tfor *(*{})(unsafe.Add(unsafe.Pointer({src}), uintptr({count})*unsafe.Sizeof(*{src}))) != {terminator} {{",
                element_native.cgo()
            ),
            format!("\t\t{count}++"),
            "\t}".to_string(),
            "}".to_string(),
        ]
    } else if let Some(size) = array.fixed_size {
        vec![format!("{count} := {size}")]
    } else {
        return Err(unsupported());
    };

    let element = to_target(ctx, &array.element, transfer.for_elements(), &e, &v, None)?;

    statements.push(format!("{dst} := make({target}, {count})"));
    statements.push(format!("if {count} > 0 {{"));
    statements.push(format!("\tfor {i}, {e} := range unsafe.Slice({src}, {count}) {{"));
    statements.extend(indent(indent(element.statements).collect()));
    statements.push(format!("\t\t{dst}[{i}] = {v}"));
    statements.push("\t}".to_string());
    statements.push("}".to_string());
    if transfer.owns_container() {
        statements.push(format!("C.g_free(C.gpointer({src}))"));
    }

    Ok(Marshaled {
        ty: target,
        statements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Denylist, InterfaceRef};
    use crate::test_support::MemoryProvider;
    use crate::util::CodegenConfig;

    fn with_context<R>(f: impl FnOnce(&mut GenerationContext<'_>) -> R) -> R {
        let provider = MemoryProvider::new().with_namespace("Gtk", Some("Gtk"), Vec::new());
        let config = CodegenConfig::default();
        let mut ctx = GenerationContext::new(&provider, &config, "Gtk", Denylist::new());
        f(&mut ctx)
    }

    fn text(marshaled: &Marshaled) -> String {
        marshaled.statements.join("\n")
    }

    #[test]
    fn test_numeric_casts() {
        with_context(|ctx| {
            let ty = TypeDescriptor::new(TypeTag::Int32);
            let native = to_native(ctx, &ty, Transfer::None, "width", "c_width").unwrap();
            assert_eq!(native.ty, "C.gint32");
            assert_eq!(native.statements, vec!["c_width := C.gint32(width)"]);

            let target = to_target(ctx, &ty, Transfer::None, "c_width", "width", None).unwrap();
            assert_eq!(target.ty, "int32");
            assert_eq!(target.statements, vec!["width := int32(c_width)"]);
        });
    }

    #[test]
    fn test_boolean_uses_nonzero_as_true() {
        with_context(|ctx| {
            let ty = TypeDescriptor::new(TypeTag::Boolean);
            let native = to_native(ctx, &ty, Transfer::None, "visible", "c_visible").unwrap();
            assert_eq!(
                text(&native),
                "c_visible := C.gboolean(0)\nif visible {\n\tc_visible = C.gboolean(1)\n}"
            );

            let target = to_target(ctx, &ty, Transfer::None, "c_ret", "ret", None).unwrap();
            assert_eq!(text(&target), "var ret bool\nif c_ret != 0 {\n\tret = true\n}");
            assert!(!text(&target).contains("c_ret == 1"));
        });
    }

    #[test]
    fn test_string_ownership() {
        with_context(|ctx| {
            let ty = TypeDescriptor::utf8();

            let borrowed = to_native(ctx, &ty, Transfer::None, "label", "c_label").unwrap();
            assert!(text(&borrowed).contains("C.CString(label)"));
            assert!(text(&borrowed).contains("defer C.free(unsafe.Pointer(c_label))"));

            let taken = to_native(ctx, &ty, Transfer::Full, "label", "c_label").unwrap();
            assert!(!text(&taken).contains("C.free"));

            let copied = to_target(ctx, &ty, Transfer::None, "c_ret", "ret", None).unwrap();
            assert!(text(&copied).contains("ret = C.GoString((*C.char)(unsafe.Pointer(c_ret)))"));
            assert!(!text(&copied).contains("g_free"));

            let owned = to_target(ctx, &ty, Transfer::Full, "c_ret", "ret", None).unwrap();
            assert!(text(&owned).contains("C.g_free(C.gpointer(c_ret))"));
        });
    }

    #[test]
    fn test_object_wraps_pointer() {
        with_context(|ctx| {
            let ty = TypeDescriptor::interface(
                InterfaceRef::new(InterfaceKind::Object, "Widget").with_native_type("GtkWidget"),
            );

            let native = to_native(ctx, &ty, Transfer::None, "child", "c_child").unwrap();
            assert_eq!(native.ty, "*C.GtkWidget");
            assert!(text(&native).contains("c_child = child.AsGtkWidget()"));

            let target = to_target(ctx, &ty, Transfer::None, "c_ret", "ret", None).unwrap();
            assert_eq!(target.ty, "*WidgetImpl");
            assert!(text(&target).contains("ret = &WidgetImpl{ptr: c_ret}"));
        });
    }

    #[test]
    fn test_foreign_types_use_exported_helpers() {
        with_context(|ctx| {
            let object = TypeDescriptor::interface(
                InterfaceRef::new(InterfaceKind::Object, "Object")
                    .in_namespace("GObject")
                    .with_native_type("GObject"),
            );
            let rectangle = InterfaceRef::new(InterfaceKind::Struct, "Rectangle")
                .in_namespace("Gdk")
                .with_native_type("GdkRectangle");
            let by_pointer = TypeDescriptor::interface(rectangle.clone());
            let mut by_value = TypeDescriptor::interface(rectangle);
            by_value.pointer = false;

            let native = text(&to_native(ctx, &object, Transfer::None, "obj", "c_obj").unwrap());
            assert!(native.contains("\tc_obj = (*C.GObject)(unsafe.Pointer(obj.AsGObject()))"));

            let native = to_native(ctx, &by_pointer, Transfer::None, "area", "c_area").unwrap();
            assert_eq!(native.statements, vec!["c_area := (*C.GdkRectangle)(area.Native())"]);
            let native = to_native(ctx, &by_value, Transfer::None, "area", "c_area").unwrap();
            assert_eq!(native.statements, vec!["c_area := *(*C.GdkRectangle)(area.Native())"]);

            let target = to_target(ctx, &object, Transfer::None, "c_ret", "ret", None).unwrap();
            assert_eq!(target.ty, "*gobject.ObjectImpl");
            assert!(text(&target).contains("\tret = gobject.WrapObject(unsafe.Pointer(c_ret))"));

            let target = to_target(ctx, &by_pointer, Transfer::None, "c_ret", "ret", None).unwrap();
            assert_eq!(target.statements, vec!["ret := gdk.WrapRectangle(unsafe.Pointer(c_ret))"]);
            let target = text(&to_target(ctx, &by_value, Transfer::None, "c_ret", "ret", None).unwrap());
            assert!(target.ends_with("ret := gdk.WrapRectangle(unsafe.Pointer(_gb_ret_copy))"));

            assert_eq!(ctx.references().collect::<Vec<_>>(), vec!["GObject", "Gdk"]);
        });
    }

    #[test]
    fn test_enum_is_plain_integer() {
        with_context(|ctx| {
            let ty = TypeDescriptor::interface(InterfaceRef::new(InterfaceKind::Enum, "Align"));
            let native = to_native(ctx, &ty, Transfer::None, "align", "c_align").unwrap();
            assert_eq!(native.statements, vec!["c_align := C.gint(align)"]);

            let target = to_target(ctx, &ty, Transfer::None, "c_ret", "ret", None).unwrap();
            assert_eq!(target.statements, vec!["ret := Align(c_ret)"]);
        });
    }

    #[test]
    fn test_array_buffer_sized_to_source() {
        with_context(|ctx| {
            let ty = TypeDescriptor::array(ArrayType::of(TypeDescriptor::new(TypeTag::Int32)));
            let native = to_native(ctx, &ty, Transfer::None, "values", "c_values").unwrap();
            let body = text(&native);

            assert_eq!(native.ty, "*C.gint32");
            assert!(body.contains("_gb_c_values_len := len(values)"));
            // Always at least one slot, so an empty slice still yields a buffer.
            assert!(body.contains("C.calloc(C.size_t(_gb_c_values_len+1)"));
            assert!(body.contains("unsafe.Slice((*C.gint32)(_gb_c_values_mem), _gb_c_values_len)"));
            assert!(body.contains("\t_gb_c_values_v := C.gint32(_gb_c_values_e)"));
            assert!(body.contains("\t_gb_c_values_buf[_gb_c_values_i] = _gb_c_values_v"));
            assert!(body.ends_with("c_values := (*C.gint32)(_gb_c_values_mem)"));
            assert!(body.contains("defer C.free(_gb_c_values_mem)"));
        });
    }

    #[test]
    fn test_string_array_frees_elements() {
        with_context(|ctx| {
            let ty = TypeDescriptor::array(ArrayType::of(TypeDescriptor::utf8()).zero_terminated());
            let native = to_native(ctx, &ty, Transfer::None, "names", "c_names").unwrap();
            let body = text(&native);
            assert_eq!(native.ty, "**C.gchar");
            assert!(body.contains("\t_gb_c_names_v := (*C.gchar)(unsafe.Pointer(C.CString(_gb_c_names_e)))"));
            assert!(body.contains("\tdefer C.free(unsafe.Pointer(_gb_c_names_v))"));
        });
    }

    #[test]
    fn test_array_to_target_lengths() {
        with_context(|ctx| {
            let counted = TypeDescriptor::array(
                ArrayType::of(TypeDescriptor::new(TypeTag::UInt8)).with_length(1),
            );
            let target =
                to_target(ctx, &counted, Transfer::Full, "c_ret", "ret", Some("c_len")).unwrap();
            let body = text(&target);
            assert_eq!(target.ty, "[]uint8");
            assert!(body.starts_with("_gb_ret_n := int(c_len)"));
            assert!(body.contains("ret := make([]uint8, _gb_ret_n)"));
            assert!(body.contains("range unsafe.Slice(c_ret, _gb_ret_n)"));
            assert!(body.ends_with("C.g_free(C.gpointer(c_ret))"));

            let strv = TypeDescriptor::array(ArrayType::of(TypeDescriptor::utf8()).zero_terminated());
            let body = text(&to_target(ctx, &strv, Transfer::None, "c_ret", "ret", None).unwrap());
            assert!(body.contains("!= nil {"));
            assert!(!body.contains("g_free(C.gpointer(c_ret))"));

            let mut fixed = ArrayType::of(TypeDescriptor::new(TypeTag::Double));
            fixed.fixed_size = Some(4);
            let body = text(
                &to_target(ctx, &TypeDescriptor::array(fixed), Transfer::None, "c_m", "m", None)
                    .unwrap(),
            );
            assert!(body.starts_with("_gb_m_n := 4"));

            let unknown = TypeDescriptor::array(ArrayType::of(TypeDescriptor::new(TypeTag::Int32)));
            assert!(to_target(ctx, &unknown, Transfer::None, "c_x", "x", None).is_err());
        });
    }

    #[test]
    fn test_lists_emit_placeholder() {
        with_context(|ctx| {
            let ty = TypeDescriptor::pointer(TypeTag::List);
            let native = to_native(ctx, &ty, Transfer::None, "items", "c_items").unwrap();
            assert_eq!(native.statements[0], LIST_PLACEHOLDER);

            let target = to_target(ctx, &ty, Transfer::None, "c_ret", "ret", None).unwrap();
            assert_eq!(target.statements[0], LIST_PLACEHOLDER);
        });
    }

    #[test]
    fn test_non_c_arrays_are_unsupported() {
        with_context(|ctx| {
            let ty = TypeDescriptor::array(
                ArrayType::of(TypeDescriptor::new(TypeTag::Int32))
                    .with_storage(ArrayStorage::PtrArray),
            );
            assert!(to_native(ctx, &ty, Transfer::None, "v", "c_v").is_err());
        });
    }
}
