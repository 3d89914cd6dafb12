//! Record types.

use super::context::GenerationContext;
use super::function::{generate_function, Owner};
use super::{Abort, DeclarationOutput};
use crate::core::StructInfo;

/// Generate a Go value type wrapping a pointer to the record, plus its
/// methods.
pub fn generate_struct(ctx: &mut GenerationContext<'_>, info: &StructInfo) -> DeclarationOutput {
    if let Err(reason) = check(ctx, info) {
        tracing::debug!("skipping struct {}: {}", info.name, reason);
        return DeclarationOutput::empty();
    }

    let receiver = &ctx.config.receiver_name;
    let name = &info.name;
    let native = &info.native_type;
    // `Native` and `Wrap` let other generated packages cross the boundary
    // without touching `ptr`.
    let declarations = [
        format!("type {name} struct {{\n\tptr *C.{native}\n}}"),
        format!(
            "func ({receiver} {name}) Native() unsafe.Pointer {{\n\treturn unsafe.Pointer({receiver}.ptr)\n}}"
        ),
        format!(
            "func Wrap{name}(ptr unsafe.Pointer) {name} {{\n\treturn {name}{{ptr: (*C.{native})(ptr)}}\n}}"
        ),
    ];
    let mut output = DeclarationOutput::new(declarations.join("\n\n"), String::new());

    let owner = Owner::structure(&info.name, &info.native_type);
    for method in &info.methods {
        output.append(generate_function(ctx, method, Some(owner)));
    }
    output
}

fn check(ctx: &GenerationContext<'_>, info: &StructInfo) -> Result<(), Abort> {
    if ctx.registry.is_denied(&info.name) || ctx.registry.is_denied(&info.native_type) {
        return Err(Abort::Denied);
    }
    if info.foreign {
        return Err(Abort::Foreign);
    }
    if info.gtype_struct {
        return Err(Abort::GTypeStruct);
    }
    Ok(())
}
