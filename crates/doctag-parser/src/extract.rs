//! Item walker populating the declaration model
//!
//! Each item is tried, in order, as a record (`struct`), a type alias, part of
//! an enumeration (a run of typed `const` items), an interface (`trait`) and
//! an operation (`fn`, or the `fn`s of an `impl` block). The outcomes are
//! mutually exclusive.

use crate::context::FileContext;
use crate::docs::{extract_docs, serde_tag, trailing_comment};
use crate::error::{ExtractError, ExtractResult};
use crate::options::ExtractOptions;
use crate::shape::{Shape, render_type, resolve_shape};
use doctag_model::{
    Diagnostic, DiagnosticKind, EnumLiteral, Enumeration, Field, Interface, Operation,
    ParsedSources, Record, TypeAlias,
};
use syn::spanned::Spanned;
use syn::{
    Attribute, Expr, FnArg, ImplItem, Item, ItemConst, Lit, Pat, ReturnType, Signature,
    TraitItem, Type,
};

/// Types that never name an enumeration
const PRIMITIVES: &[&str] = &[
    "bool", "char", "str", "String", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize", "f32", "f64",
];

/// Accumulates declarations across the files of one extraction run
pub(crate) struct Extractor<'o> {
    options: &'o ExtractOptions,
    sources: ParsedSources,
}

impl<'o> Extractor<'o> {
    pub fn new(options: &'o ExtractOptions) -> Self {
        Self {
            options,
            sources: ParsedSources::default(),
        }
    }

    pub fn finish(self) -> ParsedSources {
        self.sources
    }

    /// Walk every item of a parsed file
    pub fn extract_file(&mut self, file: &syn::File, ctx: &FileContext<'_>) -> ExtractResult<()> {
        self.extract_items(&file.items, ctx)
    }

    fn extract_items(&mut self, items: &[Item], ctx: &FileContext<'_>) -> ExtractResult<()> {
        let mut run: Option<Enumeration> = None;

        for item in items {
            if let Item::Const(item_const) = item {
                if let Some(type_name) = enumeration_type(item_const) {
                    let literal = enum_literal(item_const);
                    match run.as_mut() {
                        Some(current) if current.name == type_name => {
                            current.literals.push(literal);
                        }
                        _ => {
                            self.flush_enumeration(run.take());
                            run = Some(Enumeration {
                                package_name: ctx.package.clone(),
                                filename: ctx.filename.clone(),
                                name: type_name,
                                literals: vec![literal],
                                ..Enumeration::default()
                            });
                        }
                    }
                    continue;
                }
            }
            self.flush_enumeration(run.take());

            match item {
                Item::Struct(item_struct) => {
                    let record = self.record(item_struct, ctx)?;
                    tracing::trace!("Record `{}`", record.name);
                    self.sources.records.push(record);
                }
                Item::Type(item_type) => {
                    self.sources.type_aliases.push(TypeAlias {
                        package_name: ctx.package.clone(),
                        filename: ctx.filename.clone(),
                        doc_lines: extract_docs(&item_type.attrs),
                        name: item_type.ident.to_string(),
                        type_name: render_type(&item_type.ty),
                        annotations: Vec::new(),
                    });
                }
                Item::Trait(item_trait) => {
                    let interface = self.interface(item_trait, ctx)?;
                    self.sources.interfaces.push(interface);
                }
                Item::Fn(item_fn) => {
                    let operation =
                        self.operation(&item_fn.attrs, &item_fn.sig, None, item_fn.span(), ctx)?;
                    self.sources.operations.push(operation);
                }
                Item::Impl(item_impl) => {
                    let receiver_type = self_type_name(&item_impl.self_ty);
                    for impl_item in &item_impl.items {
                        if let ImplItem::Fn(method) = impl_item {
                            let operation = self.operation(
                                &method.attrs,
                                &method.sig,
                                Some(&receiver_type),
                                method.span(),
                                ctx,
                            )?;
                            self.sources.operations.push(operation);
                        }
                    }
                }
                Item::Mod(item_mod) => {
                    if let Some((_, items)) = &item_mod.content {
                        self.extract_items(items, &ctx.for_module(items))?;
                    }
                }
                _ => {}
            }
        }

        self.flush_enumeration(run);
        Ok(())
    }

    fn flush_enumeration(&mut self, run: Option<Enumeration>) {
        if let Some(enumeration) = run {
            tracing::trace!(
                "Enumeration `{}` with {} literal(s)",
                enumeration.name,
                enumeration.literals.len()
            );
            self.sources.enumerations.push(enumeration);
        }
    }

    fn record(&mut self, item: &syn::ItemStruct, ctx: &FileContext<'_>) -> ExtractResult<Record> {
        let name = item.ident.to_string();
        let mut fields = Vec::new();

        for (index, field) in item.fields.iter().enumerate() {
            let field_name = field
                .ident
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| index.to_string());
            let declaration = format!("{name}.{field_name}");

            let mut model_field = self.field(&field_name, &field.ty, &declaration, ctx)?;
            model_field.doc_lines = extract_docs(&field.attrs);
            model_field.tag = serde_tag(&field.attrs);
            model_field.comment_lines = trailing_comment(ctx, field.span());
            fields.push(model_field);
        }

        Ok(Record {
            package_name: ctx.package.clone(),
            filename: ctx.filename.clone(),
            doc_lines: extract_docs(&item.attrs),
            name,
            fields,
            operations: Vec::new(),
            comment_lines: trailing_comment(ctx, item.span()),
            annotations: Vec::new(),
        })
    }

    fn interface(&mut self, item: &syn::ItemTrait, ctx: &FileContext<'_>) -> ExtractResult<Interface> {
        let name = item.ident.to_string();
        let mut methods = Vec::new();

        for trait_item in &item.items {
            if let TraitItem::Fn(method) = trait_item {
                let operation =
                    self.operation(&method.attrs, &method.sig, None, method.span(), ctx)?;
                methods.push(operation);
            }
        }

        Ok(Interface {
            package_name: ctx.package.clone(),
            filename: ctx.filename.clone(),
            doc_lines: extract_docs(&item.attrs),
            name,
            methods,
            comment_lines: trailing_comment(ctx, item.span()),
            annotations: Vec::new(),
        })
    }

    fn operation(
        &mut self,
        attrs: &[Attribute],
        sig: &Signature,
        receiver_type: Option<&str>,
        span: proc_macro2::Span,
        ctx: &FileContext<'_>,
    ) -> ExtractResult<Operation> {
        let name = sig.ident.to_string();
        let qualified = match receiver_type {
            Some(receiver_type) => format!("{receiver_type}::{name}"),
            None => name.clone(),
        };

        let related_record = receiver_type.map(|receiver_type| {
            let receiver = sig.receiver();
            Field {
                name: if receiver.is_some() { "self".into() } else { String::new() },
                type_name: receiver_type.to_string(),
                is_pointer: receiver.is_some_and(|r| r.reference.is_some()),
                ..Field::default()
            }
        });

        let mut input_args = Vec::new();
        for input in &sig.inputs {
            let FnArg::Typed(pat_type) = input else {
                continue;
            };
            let arg_name = match pat_type.pat.as_ref() {
                Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
                other => quote::quote!(#other).to_string(),
            };
            let declaration = format!("{qualified}.{arg_name}");
            let mut field = self.field(&arg_name, &pat_type.ty, &declaration, ctx)?;
            field.doc_lines = extract_docs(&pat_type.attrs);
            input_args.push(field);
        }

        let mut output_args = Vec::new();
        for (index, ty) in output_types(&sig.output).into_iter().enumerate() {
            let declaration = format!("{qualified}.<output {index}>");
            output_args.push(self.field("", ty, &declaration, ctx)?);
        }

        // the trailing comment of a fn sits after its signature
        let signature_end = match &sig.output {
            ReturnType::Type(_, ty) => ty.span(),
            ReturnType::Default => sig.paren_token.span.close(),
        };
        let mut comment_lines = trailing_comment(ctx, signature_end);
        if comment_lines.is_empty() {
            comment_lines = trailing_comment(ctx, span);
        }

        Ok(Operation {
            package_name: ctx.package.clone(),
            filename: ctx.filename.clone(),
            doc_lines: extract_docs(attrs),
            related_record,
            name,
            input_args,
            output_args,
            comment_lines,
            annotations: Vec::new(),
        })
    }

    /// Build a field, recording (or in strict mode failing on) an unresolved shape
    fn field(
        &mut self,
        name: &str,
        ty: &Type,
        declaration: &str,
        ctx: &FileContext<'_>,
    ) -> ExtractResult<Field> {
        let shape = match resolve_shape(ty, ctx) {
            Some(shape) => shape,
            None => {
                let diagnostic = Diagnostic::new(
                    DiagnosticKind::UnresolvedFieldShape,
                    ctx.filename.clone(),
                    declaration,
                    format!("unsupported type `{}`", render_type(ty)),
                );
                if self.options.strict {
                    return Err(ExtractError::Strict(diagnostic));
                }
                tracing::warn!("{}", diagnostic);
                self.sources.diagnostics.push(diagnostic);
                Shape::default()
            }
        };

        Ok(Field {
            package_name: shape.package_name,
            name: name.to_string(),
            type_name: shape.type_name,
            is_slice: shape.is_slice,
            is_pointer: shape.is_pointer,
            ..Field::default()
        })
    }
}

/// Output types of a signature: none for `()`, one per tuple element, `T` and
/// `E` for `Result<T, E>`, otherwise the single type. Unit elements are dropped.
fn output_types(output: &ReturnType) -> Vec<&Type> {
    let ReturnType::Type(_, ty) = output else {
        return Vec::new();
    };

    let types: Vec<&Type> = match ty.as_ref() {
        Type::Tuple(tuple) => tuple.elems.iter().collect(),
        Type::Path(path) if path.qself.is_none() => match path.path.segments.last() {
            Some(segment) if segment.ident == "Result" => match &segment.arguments {
                syn::PathArguments::AngleBracketed(args) => args
                    .args
                    .iter()
                    .filter_map(|arg| match arg {
                        syn::GenericArgument::Type(ty) => Some(ty),
                        _ => None,
                    })
                    .collect(),
                _ => vec![ty.as_ref()],
            },
            _ => vec![ty.as_ref()],
        },
        other => vec![other],
    };

    types.into_iter().filter(|ty| !is_unit(ty)).collect()
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

/// Name of the type an `impl` block is for, generics stripped
fn self_type_name(ty: &Type) -> String {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_else(|| render_type(ty)),
        Type::Reference(reference) => self_type_name(&reference.elem),
        Type::Paren(paren) => self_type_name(&paren.elem),
        other => render_type(other),
    }
}

/// The shared type of a const that may belong to an enumeration
fn enumeration_type(item: &ItemConst) -> Option<String> {
    let Type::Path(path) = item.ty.as_ref() else {
        return None;
    };
    let ident = path.path.get_ident()?.to_string();
    if PRIMITIVES.contains(&ident.as_str()) {
        return None;
    }
    Some(ident)
}

fn enum_literal(item: &ItemConst) -> EnumLiteral {
    let value = match item.expr.as_ref() {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Some(lit_str.value()),
            _ => None,
        },
        _ => None,
    };
    EnumLiteral {
        name: item.ident.to_string(),
        value,
    }
}
