//! GObject classes.
//!
//! A class becomes a Go interface naming its own native view, a concrete
//! `Impl` type holding the pointer, one casting accessor per ancestor and its
//! methods. Casting accessors call a tiny C shim per ancestor type; the shim
//! is shared by every class that derives from that ancestor.

use super::context::GenerationContext;
use super::function::{generate_function, Owner};
use super::DeclarationOutput;
use crate::core::{ObjectInfo, QualifiedName};

/// Upper bound on ancestor lookups for a single class.
const MAX_ANCESTOR_STEPS: usize = 64;

/// Generate the Go declarations and C shims for a class.
pub fn generate_object(ctx: &mut GenerationContext<'_>, info: &ObjectInfo) -> DeclarationOutput {
    if ctx.registry.is_denied(&info.name) || ctx.registry.is_denied(&info.native_type) {
        tracing::debug!("skipping object {}: denylisted", info.name);
        return DeclarationOutput::empty();
    }

    let receiver = ctx.config.receiver_name.clone();
    let name = &info.name;
    let native = &info.native_type;

    let mut target = vec![
        format!("type {name} interface {{\n\tAs{native}() *C.{native}\n}}"),
        format!("type {name}Impl struct {{\n\tptr *C.{native}\n}}"),
        format!(
            "func ({receiver} *{name}Impl) As{native}() *C.{native} {{\n\treturn {receiver}.ptr\n}}"
        ),
        format!(
            "func Wrap{name}(ptr unsafe.Pointer) *{name}Impl {{\n\treturn &{name}Impl{{ptr: (*C.{native})(ptr)}}\n}}"
        ),
    ];
    let mut shims = Vec::new();

    for ancestor in ancestors(ctx, info) {
        let base = &ancestor.native_type;
        if ctx.registry.is_denied(base) {
            tracing::debug!("no accessor {}.As{}: denylisted", name, base);
            continue;
        }

        let cast = format!("{}cast_{}", ctx.config.shim_prefix, base);
        target.push(format!(
            "func ({receiver} *{name}Impl) As{base}() *C.{base} {{\n\treturn C.{cast}(unsafe.Pointer({receiver}.ptr))\n}}"
        ));
        if ctx.registry.mark_emitted(&cast) {
            shims.push(format!(
                "static {base} *{cast}(void *ptr)\n{{\n    return ({base} *)ptr;\n}}"
            ));
        }
    }

    let mut output = DeclarationOutput::new(target.join("\n\n"), shims.join("\n\n"));

    let owner = Owner::object(name, native);
    for method in &info.methods {
        output.append(generate_function(ctx, method, Some(owner)));
    }
    output
}

/// Ancestors of `info`, nearest first, up to and including the first root
/// type.
///
/// Providers have been seen reporting the same parent twice in a row; such
/// repeats are stepped over without producing a second entry.
fn ancestors(ctx: &GenerationContext<'_>, info: &ObjectInfo) -> Vec<ObjectInfo> {
    let mut chain: Vec<ObjectInfo> = Vec::new();
    let mut previous: Option<QualifiedName> = None;
    let mut next = info.parent.clone();
    let mut steps = 0;

    while let Some(name) = next {
        steps += 1;
        if steps > MAX_ANCESTOR_STEPS {
            tracing::warn!("ancestor chain of {} does not reach a root type", info.name);
            break;
        }

        let Some(parent) = ctx.provider.object(&name) else {
            tracing::warn!("unknown ancestor {} of {}", name, info.name);
            break;
        };

        if previous.as_ref() != Some(&name) {
            chain.push(parent.clone());
        }
        if ctx.config.is_root(&name) {
            break;
        }

        next = parent.parent;
        previous = Some(name);
    }

    chain
}
