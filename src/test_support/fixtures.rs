//! Test fixtures for common test scenarios.
//!
//! This module provides pre-built entities and providers modeled on the
//! GObject and GTK type hierarchies.

use super::MemoryProvider;
use crate::core::{
    ArgumentInfo, Direction, EnumInfo, Entity, FunctionInfo, InterfaceKind, InterfaceRef,
    NamedEntity, ObjectInfo, QualifiedName, StructInfo, TypeDescriptor, TypeTag,
};

fn object_ref(namespace: &str, name: &str, native: &str) -> TypeDescriptor {
    TypeDescriptor::interface(
        InterfaceRef::new(InterfaceKind::Object, name)
            .in_namespace(namespace)
            .with_native_type(native),
    )
}

/// `GObject.Object` and `GObject.InitiallyUnowned`.
pub fn gobject_entities() -> Vec<Entity> {
    vec![
        Entity::Object(ObjectInfo::new("Object", "GObject")),
        Entity::Object(
            ObjectInfo::new("InitiallyUnowned", "GInitiallyUnowned")
                .with_parent(QualifiedName::new("GObject", "Object")),
        ),
    ]
}

/// `Gtk.Button`, a `Gtk.Bin` with a labelled constructor.
pub fn button() -> ObjectInfo {
    ObjectInfo::new("Button", "GtkButton")
        .with_parent(QualifiedName::new("Gtk", "Bin"))
        .with_method(
            FunctionInfo::new("new_with_label", "gtk_button_new_with_label")
                .constructor()
                .with_arg(ArgumentInfo::new("label", Direction::In, TypeDescriptor::utf8()))
                .returning(object_ref("Gtk", "Widget", "GtkWidget")),
        )
        .with_method(
            FunctionInfo::new("clicked", "gtk_button_clicked").method(),
        )
}

/// `Gtk.Label`, a direct `Gtk.Widget` subclass.
pub fn label() -> ObjectInfo {
    ObjectInfo::new("Label", "GtkLabel")
        .with_parent(QualifiedName::new("Gtk", "Widget"))
        .with_method(
            FunctionInfo::new("set_text", "gtk_label_set_text")
                .method()
                .with_arg(ArgumentInfo::new("str", Direction::In, TypeDescriptor::utf8())),
        )
}

/// Provider with `Gtk.Button -> Bin -> Container -> Widget ->
/// GObject.InitiallyUnowned -> GObject.Object`.
pub fn gtk_hierarchy() -> MemoryProvider {
    let gtk = vec![
        Entity::Object(
            ObjectInfo::new("Widget", "GtkWidget")
                .with_parent(QualifiedName::new("GObject", "InitiallyUnowned")),
        ),
        Entity::Object(
            ObjectInfo::new("Container", "GtkContainer")
                .with_parent(QualifiedName::new("Gtk", "Widget")),
        ),
        Entity::Object(
            ObjectInfo::new("Bin", "GtkBin").with_parent(QualifiedName::new("Gtk", "Container")),
        ),
        Entity::Object(button()),
        Entity::Object(label()),
    ];

    MemoryProvider::new()
        .with_namespace("GObject", Some("G"), gobject_entities())
        .with_namespace("Gtk", Some("Gtk"), gtk)
        .with_dependencies("Gtk", &["GObject"])
}

/// `Demo.Align` with `left`, `center` and `right`.
pub fn align_enum() -> Entity {
    Entity::Enum(
        EnumInfo::new("Align")
            .with_native_type("DemoAlign")
            .with_value("left", 0)
            .with_value("center", 1)
            .with_value("right", 2),
    )
}

/// A small namespace touching every generator.
pub fn demo_entities() -> Vec<Entity> {
    let int32 = TypeDescriptor::new(TypeTag::Int32);

    vec![
        align_enum(),
        Entity::Struct(
            StructInfo::new("Rectangle", "DemoRectangle").with_method(
                FunctionInfo::new("area", "demo_rectangle_area")
                    .method()
                    .returning(int32.clone()),
            ),
        ),
        Entity::Object(
            ObjectInfo::new("Button", "DemoButton")
                .with_parent(QualifiedName::new("GObject", "InitiallyUnowned"))
                .with_method(
                    FunctionInfo::new("set_owner", "demo_button_set_owner")
                        .method()
                        .with_arg(ArgumentInfo::new(
                            "owner",
                            Direction::In,
                            object_ref("GObject", "Object", "GObject"),
                        )),
                ),
        ),
        Entity::Function(FunctionInfo::new("init", "demo_init")),
        Entity::Function(
            FunctionInfo::new("get_size", "demo_get_size")
                .with_arg(ArgumentInfo::new("width", Direction::Out, int32.clone()))
                .with_arg(ArgumentInfo::new("height", Direction::Out, int32.clone()))
                .returning(TypeDescriptor::new(TypeTag::Boolean)),
        ),
        Entity::Function(
            FunctionInfo::new("swap", "demo_swap")
                .with_arg(ArgumentInfo::new("value", Direction::InOut, int32)),
        ),
        Entity::Callback(NamedEntity {
            name: "DestroyNotify".to_string(),
        }),
    ]
}

/// Provider with `Demo` depending on `GObject`.
pub fn demo_provider() -> MemoryProvider {
    MemoryProvider::new()
        .with_namespace("GObject", Some("G"), gobject_entities())
        .with_namespace("Demo", Some("Demo"), demo_entities())
        .with_dependencies("Demo", &["GObject"])
        .with_build_info("Demo", &["demo/demo.h"], &["demo-1.0"])
}
