//! Documentation, trailing comments and attribute text

use crate::context::FileContext;
use proc_macro2::Span;
use syn::{Attribute, Expr, Lit, Meta};

/// Extract documentation lines from `///` and `/** */` comments.
///
/// Lines are trimmed and empty lines dropped. Block comments are split on
/// newlines with a leading `*` removed.
pub(crate) fn extract_docs(attrs: &[Attribute]) -> Vec<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        let Meta::NameValue(meta) = &attr.meta else {
            continue;
        };
        let Expr::Lit(expr_lit) = &meta.value else {
            continue;
        };
        let Lit::Str(lit_str) = &expr_lit.lit else {
            continue;
        };

        for line in lit_str.value().lines() {
            let line = line.trim();
            let line = line.strip_prefix('*').map(str::trim).unwrap_or(line);
            if !line.is_empty() {
                docs.push(line.to_string());
            }
        }
    }

    docs
}

/// Raw token text of a `#[serde(...)]` attribute, several attributes joined with `, `
pub(crate) fn serde_tag(attrs: &[Attribute]) -> Option<String> {
    let parts: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => Some(list.tokens.to_string()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Predicates of file-level `#![cfg(...)]` attributes
pub(crate) fn cfg_predicates(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cfg"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => Some(list.tokens.to_string()),
            _ => None,
        })
        .collect()
}

/// A plain `//` comment following `span` on the line where it ends.
///
/// A separating `,`, `;` or the `{` opening a fn body is skipped. Doc
/// comments (`///`, `//!`) do not count.
pub(crate) fn trailing_comment(ctx: &FileContext<'_>, span: Span) -> Vec<String> {
    let end = span.end();
    let Some(line) = ctx.line(end.line) else {
        return Vec::new();
    };

    // proc-macro2 columns count characters
    let rest: String = line.chars().skip(end.column).collect();
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix([',', ';', '{'])
        .unwrap_or(rest)
        .trim_start();

    match rest.strip_prefix("//") {
        Some(comment) if !comment.starts_with('/') && !comment.starts_with('!') => {
            let comment = comment.trim();
            if comment.is_empty() {
                Vec::new()
            } else {
                vec![comment.to_string()]
            }
        }
        _ => Vec::new(),
    }
}
