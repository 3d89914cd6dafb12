//! Assembly of one generated Go file per namespace.

/// Header line marking the file as generated.
pub const GENERATED_MARKER: &str = "DO NOT EDIT.";

/// Go support code every package carries: the error type handed back by
/// throwing calls.
const GERROR_SUPPORT: &str = r#"// GError is an error reported by a native call.
type GError struct {
	Domain  uint32
	Code    int32
	Message string
}

func (e *GError) Error() string {
	return e.Message
}

func newGError(c *C.GError) *GError {
	defer C.g_error_free(c)
	return &GError{
		Domain:  uint32(c.domain),
		Code:    int32(c.code),
		Message: C.GoString((*C.char)(unsafe.Pointer(c.message))),
	}
}"#;

/// Inputs of a generated Go file.
#[derive(Debug, Clone, Default)]
pub struct GoFile {
    pub namespace: String,
    pub package: String,
    /// pkg-config packages for `#cgo pkg-config`
    pub pkg_config: Vec<String>,
    pub includes: Vec<String>,
    /// Full Go import paths of referenced namespace packages.
    pub imports: Vec<String>,
    /// C shims for the cgo preamble
    pub native: String,
    /// Go declarations
    pub target: String,
}

impl GoFile {
    /// Render the complete file.
    pub fn render(&self) -> String {
        let mut out = format!(
            "// Code generated by gibind from {} introspection metadata. {}\n\n",
            self.namespace, GENERATED_MARKER
        );
        out.push_str(&format!("package {}\n\n", self.package));

        out.push_str("/*\n");
        if !self.pkg_config.is_empty() {
            out.push_str(&format!("#cgo pkg-config: {}\n", self.pkg_config.join(" ")));
        }
        out.push_str("#include <stdlib.h>\n#include <glib.h>\n");
        for include in &self.includes {
            out.push_str(&format!("#include <{}>\n", include));
        }
        if !self.native.is_empty() {
            out.push('\n');
            out.push_str(&self.native);
            out.push('\n');
        }
        out.push_str("*/\nimport \"C\"\n\n");

        out.push_str("import (\n\t\"unsafe\"\n");
        if !self.imports.is_empty() {
            out.push('\n');
            for import in &self.imports {
                out.push_str(&format!("\t\"{}\"\n", import));
            }
        }
        out.push_str(")\n\n");
        out.push_str("var _ unsafe.Pointer\n\n");

        out.push_str(GERROR_SUPPORT);
        out.push('\n');
        if !self.target.is_empty() {
            out.push('\n');
            out.push_str(&self.target);
            out.push('\n');
        }
        out
    }
}
