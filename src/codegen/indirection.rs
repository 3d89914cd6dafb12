//! Pointer depth of a value on each side of the boundary.

use crate::core::{Direction, InterfaceKind, TypeDescriptor, TypeTag};

/// Number of pointer levels of a value in Go and in C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indirection {
    pub target: u8,
    pub native: u8,
}

/// Resolve the indirection of `ty` passed in `direction`.
///
/// Output directions add one level on both sides: the shim receives the
/// address of a slot the library writes into. For arrays the depth is that
/// of the container itself; element depth is resolved separately.
pub fn resolve(ty: &TypeDescriptor, direction: Direction) -> Indirection {
    let inherent = inherent(ty);
    if direction.is_output() {
        Indirection {
            target: inherent.target + 1,
            native: inherent.native + 1,
        }
    } else {
        inherent
    }
}

fn inherent(ty: &TypeDescriptor) -> Indirection {
    let native = u8::from(ty.pointer);
    let target = match &ty.tag {
        // Go slices and strings carry their own pointer.
        TypeTag::Array(_) => {
            return Indirection {
                target: 0,
                native: 1,
            }
        }
        TypeTag::Interface(iface) => match iface.kind {
            InterfaceKind::Object | InterfaceKind::Other => native,
            InterfaceKind::Enum | InterfaceKind::Struct => 0,
        },
        TypeTag::Boolean | TypeTag::Unichar => native,
        tag if tag.is_numeric() => native,
        _ => 0,
    };
    Indirection { target, native }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArrayType, InterfaceRef};

    fn samples() -> Vec<TypeDescriptor> {
        vec![
            TypeDescriptor::new(TypeTag::Int32),
            TypeDescriptor::pointer(TypeTag::Double),
            TypeDescriptor::new(TypeTag::Boolean),
            TypeDescriptor::utf8(),
            TypeDescriptor::pointer(TypeTag::Void),
            TypeDescriptor::pointer(TypeTag::List),
            TypeDescriptor::array(ArrayType::of(TypeDescriptor::utf8())),
            TypeDescriptor::interface(InterfaceRef::new(InterfaceKind::Enum, "Align")),
            TypeDescriptor::interface(InterfaceRef::new(InterfaceKind::Object, "Widget")),
            TypeDescriptor::interface(InterfaceRef::new(InterfaceKind::Struct, "Rectangle")),
            TypeDescriptor::new(TypeTag::GType),
        ]
    }

    #[test]
    fn test_output_adds_one_native_level() {
        for ty in samples() {
            let input = resolve(&ty, Direction::In);
            for direction in [Direction::Out, Direction::InOut] {
                let output = resolve(&ty, direction);
                assert_eq!(output.native, input.native + 1, "{} {}", ty.tag, direction);
                assert_eq!(output.target, input.target + 1, "{} {}", ty.tag, direction);
            }
        }
    }

    #[test]
    fn test_in_direction() {
        let scalar = resolve(&TypeDescriptor::new(TypeTag::Int32), Direction::In);
        assert_eq!(scalar, Indirection::default());

        let object = TypeDescriptor::interface(InterfaceRef::new(InterfaceKind::Object, "Widget"));
        assert_eq!(
            resolve(&object, Direction::In),
            Indirection {
                target: 1,
                native: 1
            }
        );

        let string = resolve(&TypeDescriptor::utf8(), Direction::In);
        assert_eq!(string.target, 0);
        assert_eq!(string.native, 1);

        let array = TypeDescriptor::array(ArrayType::of(TypeDescriptor::new(TypeTag::UInt8)));
        assert_eq!(resolve(&array, Direction::In).native, 1);
        assert_eq!(resolve(&array, Direction::Out).native, 2);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for ty in samples() {
            assert_eq!(resolve(&ty, Direction::Out), resolve(&ty, Direction::Out));
        }
    }
}
