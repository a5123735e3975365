//! Per-file parsing context
//!
//! Everything the extraction steps need to know about the file being walked:
//! its package, its name, its `use` map and its raw lines (for trailing
//! comments). A fresh context is built for every file and passed explicitly;
//! inline modules walk with a derived context scoping their own `use`s.

use std::collections::BTreeMap;
use syn::{Item, UseTree};

#[derive(Debug, Clone)]
pub(crate) struct FileContext<'a> {
    /// Name of the directory holding the file
    pub package: String,

    /// Path of the file as given to the extractor
    pub filename: String,

    /// Short name to full import path (`Amount` to `crate::money::Amount`)
    pub imports: BTreeMap<String, String>,

    lines: Vec<&'a str>,
}

impl<'a> FileContext<'a> {
    pub fn new(package: impl Into<String>, filename: impl Into<String>, source: &'a str) -> Self {
        Self {
            package: package.into(),
            filename: filename.into(),
            imports: BTreeMap::new(),
            lines: source.lines().collect(),
        }
    }

    /// Record every `use` among `items`; inline modules get their own scope
    pub fn collect_imports(&mut self, items: &[Item]) {
        for item in items {
            if let Item::Use(item_use) = item {
                collect_use_tree(&item_use.tree, &mut Vec::new(), &mut self.imports);
            }
        }
    }

    /// Context for the items of an inline `mod`.
    ///
    /// The module's own `use`s shadow the enclosing ones and stay inside it.
    pub fn for_module(&self, items: &[Item]) -> Self {
        let mut inner = self.clone();
        inner.collect_imports(items);
        inner
    }

    /// Full path of an imported short name
    pub fn resolve_import(&self, short: &str) -> Option<&str> {
        self.imports.get(short).map(String::as_str)
    }

    /// 1-based source line
    pub fn line(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1).and_then(|idx| self.lines.get(idx).copied())
    }
}

fn collect_use_tree(tree: &UseTree, prefix: &mut Vec<String>, imports: &mut BTreeMap<String, String>) {
    match tree {
        UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            collect_use_tree(&path.tree, prefix, imports);
            prefix.pop();
        }
        UseTree::Name(name) => {
            let ident = name.ident.to_string();
            if ident == "self" {
                if let Some(last) = prefix.last() {
                    // later imports of the same short name win
                    imports.insert(last.clone(), prefix.join("::"));
                }
            } else {
                imports.insert(ident.clone(), join(prefix, &ident));
            }
        }
        UseTree::Rename(rename) => {
            let ident = rename.ident.to_string();
            let full = if ident == "self" {
                prefix.join("::")
            } else {
                join(prefix, &ident)
            };
            imports.insert(rename.rename.to_string(), full);
        }
        UseTree::Group(group) => {
            for tree in &group.items {
                collect_use_tree(tree, prefix, imports);
            }
        }
        UseTree::Glob(_) => {}
    }
}

fn join(prefix: &[String], last: &str) -> String {
    if prefix.is_empty() {
        last.to_string()
    } else {
        format!("{}::{}", prefix.join("::"), last)
    }
}
