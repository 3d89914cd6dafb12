//! Functions, methods and constructors.
//!
//! Each callable produces a Go wrapper and a static C shim. The Go wrapper
//! converts its parameters, calls the shim through cgo and converts the
//! results back; the shim forwards every argument to the real symbol.

use std::collections::HashMap;

use super::context::GenerationContext;
use super::marshal::{to_native, to_target, HELPER_PREFIX};
use super::typemap::{native_type, target_type, NativeType, Role};
use super::{Abort, DeclarationOutput};
use crate::core::{Direction, FunctionInfo, TypeDescriptor};
use crate::util::naming::{c_identifier, go_identifier, to_pascal_case};

/// Names generated code relies on inside a wrapper body.
const RESERVED_LOCALS: &[&str] = &[
    "ret", "err", "C", "unsafe", "len", "make", "new", "int", "uintptr", "string", "bool",
];

/// Kind of type a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    Object,
    Struct,
}

/// The type a function is declared on.
#[derive(Debug, Clone, Copy)]
pub struct Owner<'a> {
    pub kind: OwnerKind,
    /// Go type name (`Button`)
    pub name: &'a str,
    /// C type name (`GtkButton`)
    pub native_type: &'a str,
}

impl<'a> Owner<'a> {
    pub fn object(name: &'a str, native_type: &'a str) -> Self {
        Owner {
            kind: OwnerKind::Object,
            name,
            native_type,
        }
    }

    pub fn structure(name: &'a str, native_type: &'a str) -> Self {
        Owner {
            kind: OwnerKind::Struct,
            name,
            native_type,
        }
    }
}

/// Generate the Go wrapper and C shim for `func`.
///
/// Returns empty output if the function is deprecated, denylisted, already
/// emitted, has an `inout` argument or uses a type that cannot be mapped.
pub fn generate_function(
    ctx: &mut GenerationContext<'_>,
    func: &FunctionInfo,
    owner: Option<Owner<'_>>,
) -> DeclarationOutput {
    match build(ctx, func, owner) {
        Ok(output) => output,
        Err(reason) => {
            tracing::debug!("skipping {}: {}", func.symbol, reason);
            DeclarationOutput::empty()
        }
    }
}

/// Pieces of the Go wrapper collected while walking the arguments.
#[derive(Default)]
struct GoWrapper {
    params: Vec<String>,
    results: Vec<String>,
    returns: Vec<String>,
    before: Vec<String>,
    after: Vec<String>,
    call_args: Vec<String>,
}

/// Pieces of the C shim.
#[derive(Default)]
struct Shim {
    params: Vec<String>,
    forward: Vec<String>,
}

fn build(
    ctx: &mut GenerationContext<'_>,
    func: &FunctionInfo,
    owner: Option<Owner<'_>>,
) -> Result<DeclarationOutput, Abort> {
    // Marked before any check so a failed symbol is never attempted twice.
    let duplicate = !ctx.registry.mark_emitted(&func.symbol);
    if duplicate {
        return Err(Abort::Duplicate);
    }
    if func.deprecated {
        return Err(Abort::Deprecated);
    }
    if ctx.registry.is_denied(&func.symbol) {
        return Err(Abort::Denied);
    }
    if let Some(arg) = func.args.iter().find(|a| a.direction == Direction::InOut) {
        return Err(Abort::InOut(arg.name.clone()));
    }

    let receiver = ctx.config.receiver_name.clone();
    let mut taken: Vec<&str> = RESERVED_LOCALS.to_vec();
    taken.push(&receiver);

    let go_names: Vec<String> = func
        .args
        .iter()
        .map(|arg| {
            let ident = go_identifier(&arg.name, &taken);
            // Keep parameters out of the temp and helper namespaces.
            if ident.starts_with("c_") || ident.starts_with(HELPER_PREFIX) {
                format!("arg_{ident}")
            } else {
                ident
            }
        })
        .collect();
    let temps: Vec<String> = go_names.iter().map(|name| format!("c_{}", name)).collect();

    // Length arguments of `in` arrays are filled from the slice; length
    // arguments of `out` arrays are read back but not returned separately.
    let mut filled_lengths: HashMap<usize, &str> = HashMap::new();
    let mut hidden_outputs: Vec<usize> = Vec::new();
    for (i, arg) in func.args.iter().enumerate() {
        let Some(length) = arg.ty.array_type().and_then(|a| a.length) else {
            continue;
        };
        let Some(length_arg) = func.args.get(length) else {
            continue;
        };
        match (arg.direction, length_arg.direction) {
            (Direction::In, Direction::In) => {
                filled_lengths.insert(length, &go_names[i]);
            }
            (Direction::Out, Direction::Out) => hidden_outputs.push(length),
            _ => {}
        }
    }
    if let Some(length) = func.return_value().and_then(|ty| ty.array_type()?.length) {
        if func.args.get(length).is_some_and(|a| a.direction == Direction::Out) {
            hidden_outputs.push(length);
        }
    }
    let length_of = |ty: &TypeDescriptor| -> Option<String> {
        let index = ty.array_type()?.length?;
        temps.get(index).cloned()
    };

    let mut go = GoWrapper::default();
    let mut shim = Shim::default();

    let receiver_decl = if func.flags.is_method {
        let owner = owner.ok_or(Abort::NoOwner)?;
        shim.params.push(format!("{} *self", owner.native_type));
        shim.forward.push("self".to_string());
        go.call_args.push(format!("{}.ptr", receiver));
        match owner.kind {
            OwnerKind::Object => format!("({} *{}Impl) ", receiver, owner.name),
            OwnerKind::Struct => format!("({} {}) ", receiver, owner.name),
        }
    } else {
        String::new()
    };

    for (i, arg) in func.args.iter().enumerate() {
        let native = native_type(ctx, &arg.ty, arg.direction)?;
        let c_name = c_identifier(&arg.name);
        shim.params.push(native.declare(&c_name));
        shim.forward.push(c_name);

        let go_name = &go_names[i];
        let temp = &temps[i];

        if arg.direction == Direction::In {
            if let Some(slice) = filled_lengths.get(&i) {
                go.before
                    .push(format!("{} := {}(len({}))", temp, native.cgo(), slice));
            } else {
                let target = target_type(ctx, &arg.ty, Role::Param)?;
                go.params.push(format!("{} {}", go_name, target));
                let converted = to_native(ctx, &arg.ty, arg.transfer, go_name, temp)?;
                go.before.extend(converted.statements);
            }
            go.call_args.push(temp.clone());
        } else {
            go.before
                .push(format!("var {} {}", temp, native.pointee().cgo()));
            go.call_args.push(format!("&{}", temp));
            if !hidden_outputs.contains(&i) {
                let length = length_of(&arg.ty);
                let converted =
                    to_target(ctx, &arg.ty, arg.transfer, temp, go_name, length.as_deref())?;
                go.results.push(converted.ty);
                go.returns.push(go_name.clone());
                go.after.extend(converted.statements);
            }
        }
    }

    let mut native_return = NativeType::new("void", 0);
    if let Some(ret) = func.return_value() {
        native_return = native_type(ctx, ret, Direction::In)?;

        let (result, statements) = match owner {
            Some(owner) if func.flags.is_constructor && owner.kind == OwnerKind::Object => (
                format!("*{}Impl", owner.name),
                vec![
                    format!("var ret *{}Impl", owner.name),
                    "if c_ret != nil {".to_string(),
                    format!(
                        "\tret = &{}Impl{{ptr: (*C.{})(unsafe.Pointer(c_ret))}}",
                        owner.name, owner.native_type
                    ),
                    "}".to_string(),
                ],
            ),
            _ => {
                let length = length_of(ret);
                let converted =
                    to_target(ctx, ret, func.return_transfer, "c_ret", "ret", length.as_deref())?;
                (converted.ty, converted.statements)
            }
        };
        go.results.insert(0, result);
        go.returns.insert(0, "ret".to_string());
        // Return conversion runs before output arguments are read back.
        let outputs = std::mem::replace(&mut go.after, statements);
        go.after.extend(outputs);
    }

    if func.flags.throws {
        shim.params.push("GError **error".to_string());
        shim.forward.push("error".to_string());
        go.before.push("var c_err *C.GError".to_string());
        go.call_args.push("&c_err".to_string());
        go.after.extend([
            "var err error".to_string(),
            "if c_err != nil {".to_string(),
            "\terr = newGError(c_err)".to_string(),
            "}".to_string(),
        ]);
        go.results.push("error".to_string());
        go.returns.push("err".to_string());
    }

    let shim_name = ctx.shim_name(&func.symbol);
    let go_name = match owner {
        Some(owner) if !func.flags.is_method => {
            format!("{}{}", owner.name, to_pascal_case(&func.name))
        }
        _ => to_pascal_case(&func.name),
    };

    let target = render_go(&go, &receiver_decl, &go_name, &shim_name, !native_return.is_void());
    let native = render_shim(&shim, &native_return, &shim_name, &func.symbol);
    Ok(DeclarationOutput::new(target, native))
}

fn render_go(
    go: &GoWrapper,
    receiver: &str,
    name: &str,
    shim: &str,
    returns_value: bool,
) -> String {
    let results = match go.results.as_slice() {
        [] => String::new(),
        [only] => format!(" {}", only),
        many => format!(" ({})", many.join(", ")),
    };

    let mut out = format!(
        "func {}{}({}){} {{\n",
        receiver,
        name,
        go.params.join(", "),
        results
    );
    for line in &go.before {
        out.push_str(&format!("\t{}\n", line));
    }

    let call = format!("C.{}({})", shim, go.call_args.join(", "));
    if returns_value {
        out.push_str(&format!("\tc_ret := {}\n", call));
    } else {
        out.push_str(&format!("\t{}\n", call));
    }

    for line in &go.after {
        out.push_str(&format!("\t{}\n", line));
    }
    if !go.returns.is_empty() {
        out.push_str(&format!("\treturn {}\n", go.returns.join(", ")));
    }
    out.push('}');
    out
}

fn render_shim(shim: &Shim, ret: &NativeType, name: &str, symbol: &str) -> String {
    let params = if shim.params.is_empty() {
        "void".to_string()
    } else {
        shim.params.join(", ")
    };
    let call = format!("{}({})", symbol, shim.forward.join(", "));
    let body = if ret.is_void() {
        format!("{};", call)
    } else {
        format!("return {};", call)
    };
    format!(
        "static {}({})\n{{\n    {}\n}}",
        ret.declare(name),
        params,
        body
    )
}
