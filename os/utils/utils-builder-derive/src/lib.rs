//! # Const Builder Derive
//!
//! Firmware records such as PMP region descriptions and per-hart scratch
//! areas are assembled once, often in `const` context, and never mutated
//! afterwards. This crate derives the accessors for that shape: a
//! `const fn with_<field>(self, value) -> Self` builder step and a
//! `const fn <field>(&self) -> Ty` getter per named field. No `&mut self`
//! setters are generated.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input, spanned::Spanned};

/// Derive `const` builder steps and by-value getters for each **named** field.
///
/// Field types must be `Copy` for the getter to compile, and must not need
/// drop glue for the builder step to be usable in `const` context.
///
/// - Skip a field entirely: `#[builder(skip)]`
/// - Generate only the builder step: `#[builder(no_getter)]`
///
/// # Example
///
/// ```
/// use utils_builder_derive::ConstBuilder;
///
/// #[derive(ConstBuilder, Default)]
/// struct Window {
///     base: usize,
///     #[builder(no_getter)]
///     order: u8,
///     #[builder(skip)]
///     cookie: u32,
/// }
///
/// const W: Window = Window { base: 0, order: 0, cookie: 7 }
///     .with_base(0x8000_0000)
///     .with_order(12);
/// assert_eq!(W.base(), 0x8000_0000);
/// assert_eq!(W.cookie, 7);
/// ```
#[proc_macro_derive(ConstBuilder, attributes(builder))]
pub fn derive_const_builder(input: TokenStream) -> TokenStream {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = parse_macro_input!(input as DeriveInput);

    let fields = match data {
        Data::Struct(s) => match s.fields {
            Fields::Named(n) => n.named,
            other => {
                return syn::Error::new(other.span(), "ConstBuilder requires named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new(ident.span(), "ConstBuilder can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut methods = Vec::new();

    for field in fields {
        let Some(fname) = &field.ident else { continue };
        let opts = match FieldOptions::parse(&field.attrs) {
            Ok(opts) => opts,
            Err(e) => return e.to_compile_error().into(),
        };
        if opts.skip {
            continue;
        }

        let ty = &field.ty;
        let with_name = format_ident!("with_{}", fname);
        methods.push(quote! {
            #[inline]
            #[must_use]
            pub const fn #with_name(mut self, value: #ty) -> Self {
                self.#fname = value;
                self
            }
        });
        if opts.getter {
            methods.push(quote! {
                #[inline]
                #[must_use]
                pub const fn #fname(&self) -> #ty {
                    self.#fname
                }
            });
        }
    }

    let expanded = quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    };

    TokenStream::from(expanded)
}

struct FieldOptions {
    skip: bool,
    getter: bool,
}

impl FieldOptions {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut opts = Self {
            skip: false,
            getter: true,
        };
        for attr in attrs {
            if !attr.path().is_ident("builder") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    opts.skip = true;
                    Ok(())
                } else if meta.path.is_ident("no_getter") {
                    opts.getter = false;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip` or `no_getter`"))
                }
            })?;
        }
        Ok(opts)
    }
}
