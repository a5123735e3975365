//! Field shape resolution
//!
//! Maps a Rust type expression onto the model's scalar / pointer / slice /
//! pointer-slice / map shapes. Anything else is unresolved and reported by
//! the caller.

use crate::context::FileContext;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// A resolved type expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Shape {
    pub type_name: String,
    pub package_name: String,
    pub is_slice: bool,
    pub is_pointer: bool,
}

const POINTER_WRAPPERS: &[&str] = &["Box", "Option"];
const MAP_TYPES: &[&str] = &["HashMap", "BTreeMap"];

/// Resolve the shape of `ty`, `None` when it matches no supported shape
pub(crate) fn resolve_shape(ty: &Type, ctx: &FileContext<'_>) -> Option<Shape> {
    match ty {
        Type::Paren(paren) => resolve_shape(&paren.elem, ctx),
        Type::Group(group) => resolve_shape(&group.elem, ctx),
        Type::Reference(reference) => match reference.elem.as_ref() {
            Type::Slice(slice) => {
                let mut shape = named(&slice.elem, ctx)?;
                shape.is_slice = true;
                Some(shape)
            }
            elem => {
                let mut shape = named(elem, ctx)?;
                shape.is_pointer = true;
                Some(shape)
            }
        },
        Type::Path(path) if path.qself.is_none() => {
            let segment = path.path.segments.last()?;
            let ident = segment.ident.to_string();

            if ident == "Vec" {
                let inner = single_type_argument(path)?;
                let mut shape = match pointer_target(inner) {
                    Some(target) => {
                        let mut shape = named(target, ctx)?;
                        shape.is_pointer = true;
                        shape
                    }
                    None => named(inner, ctx)?,
                };
                shape.is_slice = true;
                return Some(shape);
            }

            if POINTER_WRAPPERS.contains(&ident.as_str()) {
                let target = pointer_target(ty)?;
                let mut shape = named(target, ctx)?;
                shape.is_pointer = true;
                return Some(shape);
            }

            if MAP_TYPES.contains(&ident.as_str()) {
                let (key, value) = two_type_arguments(path)?;
                let key = named(key, ctx)?;
                let value = named(value, ctx)?;
                return Some(Shape {
                    type_name: format!("{ident}<{}, {}>", key.type_name, value.type_name),
                    ..Shape::default()
                });
            }

            named(ty, ctx)
        }
        _ => None,
    }
}

/// Render a type the way it is written, without token spacing
pub(crate) fn render_type(ty: &Type) -> String {
    let raw = quote::quote!(#ty).to_string();
    raw.replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
        .replace(" (", "(")
        .replace("( ", "(")
        .replace(" )", ")")
}

/// A plain named type: `Amount`, `money::Amount`, `DateTime<Utc>`
fn named(ty: &Type, ctx: &FileContext<'_>) -> Option<Shape> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    let segments: Vec<String> = path
        .path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect();
    let last = segments.last()?;
    if last == "Vec" || POINTER_WRAPPERS.contains(&last.as_str()) || MAP_TYPES.contains(&last.as_str()) {
        return None;
    }

    let package_name = match segments.as_slice() {
        [single] => ctx
            .resolve_import(single)
            .map(parent_path)
            .unwrap_or_default(),
        [first, middle @ .., _] => {
            let mut package = ctx
                .resolve_import(first)
                .map(str::to_string)
                .unwrap_or_else(|| first.clone());
            for segment in middle {
                package.push_str("::");
                package.push_str(segment);
            }
            package
        }
        [] => return None,
    };

    Some(Shape {
        type_name: render_type(ty),
        package_name,
        ..Shape::default()
    })
}

/// `T` of `Box<T>`, `Option<T>` or `Option<Box<T>>`
fn pointer_target(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let ident = path.path.segments.last()?.ident.to_string();
    let inner = single_type_argument(path)?;
    match ident.as_str() {
        "Box" => Some(inner),
        "Option" => match pointer_target(inner) {
            Some(boxed) if is_box(inner) => Some(boxed),
            _ => Some(inner),
        },
        _ => None,
    }
}

fn is_box(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.path.segments.last().is_some_and(|s| s.ident == "Box"))
}

fn single_type_argument(path: &TypePath) -> Option<&Type> {
    let args = type_arguments(path)?;
    match args.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn two_type_arguments(path: &TypePath) -> Option<(&Type, &Type)> {
    let args = type_arguments(path)?;
    match args.as_slice() {
        [key, value] => Some((*key, *value)),
        _ => None,
    }
}

fn type_arguments(path: &TypePath) -> Option<Vec<&Type>> {
    let segment = path.path.segments.last()?;
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    Some(
        args.args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
    )
}

fn parent_path(full: &str) -> String {
    full.rsplit_once("::")
        .map(|(parent, _)| parent.to_string())
        .unwrap_or_default()
}
