//! Emitted-symbol tracking for one namespace run.

use std::collections::HashSet;

use crate::core::Denylist;

/// Native symbols already emitted, plus the names that must never be.
///
/// One registry exists per namespace generation. Shim symbols carry the
/// namespace prefix, so a registry is never meaningful across namespaces.
#[derive(Debug, Clone, Default)]
pub struct ExportRegistry {
    emitted: HashSet<String>,
    denylist: Denylist,
}

impl ExportRegistry {
    pub fn new(denylist: Denylist) -> Self {
        ExportRegistry {
            emitted: HashSet::new(),
            denylist,
        }
    }

    pub fn already_emitted(&self, symbol: &str) -> bool {
        self.emitted.contains(symbol)
    }

    /// Record `symbol`. Returns `false` if it was already recorded.
    pub fn mark_emitted(&mut self, symbol: &str) -> bool {
        self.emitted.insert(symbol.to_string())
    }

    pub fn is_denied(&self, name: &str) -> bool {
        self.denylist.contains(name)
    }

    /// Number of distinct symbols recorded so far.
    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_is_idempotent() {
        let mut registry = ExportRegistry::default();
        assert!(!registry.already_emitted("gtk_init"));
        assert!(registry.mark_emitted("gtk_init"));
        assert!(!registry.mark_emitted("gtk_init"));
        assert!(registry.already_emitted("gtk_init"));
        assert_eq!(registry.emitted_count(), 1);
    }

    #[test]
    fn test_denylist_lookup() {
        let registry = ExportRegistry::new(["gtk_main", "GtkPrintUnixDialog"].into_iter().collect());
        assert!(registry.is_denied("gtk_main"));
        assert!(registry.is_denied("GtkPrintUnixDialog"));
        assert!(!registry.is_denied("gtk_init"));
    }
}
