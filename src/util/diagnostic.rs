//! User-facing error reports.
//!
//! Every error the CLI prints carries its root cause, the context that led
//! to it and, where possible, a concrete next step. Warnings are not
//! reported through here; they go to `tracing`.

use std::fmt;
use std::path::PathBuf;

/// Next steps shared by several error kinds.
pub mod suggestions {
    /// No metadata file was found for a namespace.
    pub const NO_METADATA: &str = "Pass the directory containing <Namespace>.json with \
         `-I`/`--metadata-dir` or set GIBIND_METADATA_DIR";

    /// A metadata file is not valid JSON for the expected shape.
    pub const BAD_METADATA: &str = "Regenerate the metadata dump for this namespace";

    /// Namespaces depend on each other.
    pub const DEPENDENCY_CYCLE: &str =
        "Check the `dependencies` lists of the namespaces involved";

    /// Declarations are missing from the generated file.
    pub const VERBOSE: &str = "Run with `--verbose` to see skipped declarations";
}

const RED_BOLD: &str = "\x1b[1;31m";
const CYAN_BOLD: &str = "\x1b[1;36m";
const RESET: &str = "\x1b[0m";

/// An error report: a headline, the file involved, context notes and help.
#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    pub message: String,
    /// Metadata file, denylist or directory the error is about
    pub location: Option<PathBuf>,
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for a terminal, with ANSI colors if `color` is set.
    pub fn format(&self, color: bool) -> String {
        let paint = |style: &str, text: &str| {
            if color {
                format!("{style}{text}{RESET}")
            } else {
                text.to_string()
            }
        };

        let mut lines = vec![format!("{}: {}", paint(RED_BOLD, "error"), self.message)];
        if let Some(path) = &self.location {
            lines.push(format!("  --> {}", path.display()));
        }
        lines.extend(self.context.iter().map(|note| format!("  = {note}")));

        let help = paint(CYAN_BOLD, "help");
        match self.suggestions.as_slice() {
            [] => {}
            [only] => lines.push(format!("{help}: {only}")),
            many => {
                lines.push(format!("{help}: consider:"));
                lines.extend(
                    many.iter()
                        .enumerate()
                        .map(|(i, step)| format!("  {}. {}", i + 1, step)),
                );
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
