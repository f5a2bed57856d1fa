use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Expr, Fields, Ident, LitStr, Meta, Result};

pub(crate) struct ParsedFilterEntity {
    name: Ident,
    fields: Vec<ParsedField>,
    operations: Vec<OperationSpec>,
}

struct ParsedField {
    ident: Ident,
    rename: Option<String>,
    description: Option<String>,
    directives: Vec<String>,
    ignore: bool,
    declared: bool,
}

struct OperationSpec {
    id: Expr,
    ignore: bool,
}

impl ParsedFilterEntity {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &input.generics,
                "FilterEntity cannot be derived for generic structs",
            ));
        }

        let mut operations = Vec::new();
        for attr in &input.attrs {
            if attr.path().is_ident("filter") {
                Self::parse_container_attr(attr, &mut operations)?;
            }
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let mut parsed = Vec::new();
                    for field in &named.named {
                        parsed.push(ParsedField::from_field(field)?);
                    }
                    parsed
                }
                _ => return Err(Error::new(input.ident.span(), "FilterEntity requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "FilterEntity can only be derived for structs")),
        };

        Ok(Self {
            name: input.ident.clone(),
            fields,
            operations,
        })
    }

    fn parse_container_attr(attr: &Attribute, operations: &mut Vec<OperationSpec>) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("operation") {
                let id: Expr = meta.value()?.parse()?;
                operations.push(OperationSpec { id, ignore: false });
                Ok(())
            } else if meta.path.is_ident("ignore_operation") {
                let id: Expr = meta.value()?.parse()?;
                operations.push(OperationSpec { id, ignore: true });
                Ok(())
            } else {
                Err(meta.error("unsupported filter container attribute; expected `operation` or `ignore_operation`"))
            }
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let type_name = name.to_string();
        let field_candidates = self.fields.iter().map(ParsedField::emit);
        let operation_candidates = self.operations.iter().map(|operation| {
            let id = &operation.id;
            if operation.ignore {
                quote! { ::sift::FieldCandidate::operation(#id).ignored() }
            } else {
                quote! { ::sift::FieldCandidate::operation(#id) }
            }
        });

        quote! {
            impl ::sift::FilterEntity for #name {
                fn filter_candidates() -> ::std::vec::Vec<::sift::FieldCandidate> {
                    ::std::vec![
                        #(#field_candidates,)*
                        #(#operation_candidates,)*
                    ]
                }
            }

            ::sift::inventory::submit! {
                ::sift::EntityRegistration {
                    type_id: ::std::any::TypeId::of::<#name>,
                    type_name: #type_name,
                    candidates_fn: <#name as ::sift::FilterEntity>::filter_candidates,
                }
            }
        }
    }
}

impl ParsedField {
    fn from_field(field: &syn::Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "FilterEntity requires named fields"))?;

        let mut parsed = Self {
            ident,
            rename: None,
            description: None,
            directives: Vec::new(),
            ignore: false,
            declared: false,
        };

        for attr in &field.attrs {
            if attr.path().is_ident("filter") {
                parsed.declared = true;
                parsed.parse_field_attr(attr)?;
            }
        }

        if parsed.description.is_none() {
            parsed.description = doc_comment(&field.attrs);
        }

        Ok(parsed)
    }

    fn parse_field_attr(&mut self, attr: &Attribute) -> Result<()> {
        // `#[filter]` alone only marks the field as declared.
        if matches!(attr.meta, Meta::Path(_)) {
            return Ok(());
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                let value = lit.value();
                if !is_graphql_name(&value) {
                    return Err(Error::new(lit.span(), "filter name must be a non-empty GraphQL name"));
                }
                self.rename = Some(value);
                Ok(())
            } else if meta.path.is_ident("description") {
                let lit: LitStr = meta.value()?.parse()?;
                self.description = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("directive") {
                let lit: LitStr = meta.value()?.parse()?;
                let value = lit.value();
                if !is_graphql_name(&value) {
                    return Err(Error::new(lit.span(), "directive name must be a non-empty GraphQL name"));
                }
                self.directives.push(value);
                Ok(())
            } else if meta.path.is_ident("ignore") {
                self.ignore = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported filter field attribute; expected `name`, `description`, `directive` or `ignore`",
                ))
            }
        })
    }

    fn emit(&self) -> TokenStream2 {
        let member = self.ident.to_string();
        let mut candidate = quote! {
            ::sift::FieldCandidate::member(::sift::MemberRef::of::<Self>(#member))
        };

        if let Some(rename) = &self.rename {
            candidate = quote! { #candidate.named(#rename) };
        }
        if let Some(description) = &self.description {
            candidate = quote! { #candidate.described(#description) };
        }
        for directive in &self.directives {
            candidate = quote! {
                #candidate.with_directive(::sift::DirectiveDefinition {
                    name: ::std::string::String::from(#directive),
                    arguments: ::std::vec::Vec::new(),
                })
            };
        }
        if self.ignore {
            candidate = quote! { #candidate.ignored() };
        }
        if self.declared {
            candidate = quote! { #candidate.declared() };
        }
        candidate
    }
}

/// Joined `///` lines, or `None` when the field has no doc comment.
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit), ..
                }) => Some(lit.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    let joined = lines.join("\n").trim().to_string();
    if joined.is_empty() { None } else { Some(joined) }
}

fn is_graphql_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
