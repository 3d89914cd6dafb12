//! Per-namespace denylists.
//!
//! A denylist is a plain text file named after the namespace (for example
//! `denylist/Gtk`). Each non-empty line that does not start with `#` names a
//! symbol, entity or C type that must not be generated.

use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Names excluded from generation for one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Denylist {
    names: HashSet<String>,
}

impl Denylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse denylist file content.
    pub fn parse(content: &str) -> Self {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Denylist { names }
    }

    /// Load `<dir>/<namespace>`. A missing file yields an empty denylist.
    pub fn load(dir: &Path, namespace: &str) -> io::Result<Self> {
        let path = dir.join(namespace);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let denylist = Self::parse(&content);
                tracing::debug!(
                    "loaded {} denylist entries from {}",
                    denylist.len(),
                    path.display()
                );
                Ok(denylist)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("no denylist for {} at {}", namespace, path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Denylist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Denylist {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
