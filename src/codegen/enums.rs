//! Enumerations and flags.

use super::context::GenerationContext;
use super::DeclarationOutput;
use crate::core::EnumInfo;
use crate::util::naming::to_pascal_case;

/// Generate a named Go type over the C enum and one constant per value.
///
/// Constants are prefixed with the enum name (`AlignLeft`) since Go
/// constants share the package namespace.
pub fn generate_enum(ctx: &mut GenerationContext<'_>, info: &EnumInfo) -> DeclarationOutput {
    let native = match &info.native_type {
        Some(native) => native.clone(),
        None => {
            let namespace = ctx.namespace.clone();
            format!("{}{}", ctx.symbol_prefix(&namespace), info.name)
        }
    };

    let mut target = format!("type {} C.{}", info.name, native);
    if !info.values.is_empty() {
        target.push_str("\n\nconst (\n");
        for value in &info.values {
            target.push_str(&format!(
                "\t{}{} {} = {}\n",
                info.name,
                to_pascal_case(&value.name),
                info.name,
                value.value
            ));
        }
        target.push(')');
    }

    DeclarationOutput::new(target, String::new())
}
