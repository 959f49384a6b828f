use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DeriveInput, Error, Expr, ExprLit, Field, Index, Lit, LitStr, Meta,
    Visibility, parse_macro_input,
};

const ATTR: &str = "validate";

pub fn derive_inspect_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> Result<TokenStream2, Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => {
            let fields = data
                .fields
                .iter()
                .enumerate()
                .map(|(index, field)| describe_field(index, field))
                .collect::<Result<Vec<_>, Error>>()?;

            quote! {
                ::tagcheck::Shape::Struct(::std::vec![#(#fields),*])
            }
        }
        Data::Enum(data) => {
            for field in data.variants.iter().flat_map(|v| v.fields.iter()) {
                reject_rules(&field.attrs)?;
            }
            quote! {
                ::tagcheck::Shape::Other(::core::any::type_name::<Self>())
            }
        }
        Data::Union(data) => {
            for field in &data.fields.named {
                reject_rules(&field.attrs)?;
            }
            quote! {
                ::tagcheck::Shape::Other(::core::any::type_name::<Self>())
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::tagcheck::Inspect for #name #ty_generics #where_clause {
            fn inspect(&self) -> ::tagcheck::Shape<'_> {
                #body
            }
        }
    })
}

fn describe_field(index: usize, field: &Field) -> Result<TokenStream2, Error> {
    let rules = collect_rules(&field.attrs)?;
    let exported = matches!(field.vis, Visibility::Public(_));
    let ty = &field.ty;

    let (name, access) = match &field.ident {
        Some(ident) => (ident.unraw().to_string(), quote!(self.#ident)),
        None => {
            let member = Index::from(index);
            (index.to_string(), quote!(self.#member))
        }
    };

    // Unruled fields are never evaluated. Ruled fields go through `AsFieldValue`
    // when their type implements it, else through `Any` (which needs `'static`).
    let value = if rules.is_empty() {
        quote! {
            ::tagcheck::FieldValue::Unsupported(::core::any::type_name::<#ty>())
        }
    } else {
        quote_spanned! {ty.span()=>
            {
                #[allow(unused_imports)]
                use ::tagcheck::__private::{ClassifyAny as _, ClassifyTyped as _};
                (&::tagcheck::__private::FieldRef(&#access)).classify()
            }
        }
    };

    Ok(quote! {
        ::tagcheck::FieldDescriptor::new(#name, #value)
            .with_exported(#exported)
            .with_rules(#rules)
    })
}

/// Concatenate every `validate` attribute on a field, in order.
fn collect_rules(attrs: &[Attribute]) -> Result<String, Error> {
    let mut parts = Vec::new();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTR)) {
        let rules = match &attr.meta {
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::NameValue(meta) => match &meta.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.clone(),
                other => {
                    return Err(Error::new_spanned(
                        other,
                        "expected a string literal, e.g. #[validate = \"len:5\"]",
                    ));
                }
            },
            Meta::Path(path) => {
                return Err(Error::new_spanned(
                    path,
                    "expected a rule string, e.g. #[validate(\"len:5\")]",
                ));
            }
        };

        // Blank clauses are skipped by the parser; a blank string still counts as rules.
        let value = rules.value();
        if !value.is_empty() {
            parts.push(value);
        }
    }

    Ok(parts.join(";"))
}

fn reject_rules(attrs: &[Attribute]) -> Result<(), Error> {
    match attrs.iter().find(|attr| attr.path().is_ident(ATTR)) {
        Some(attr) => Err(Error::new_spanned(
            attr,
            "#[validate] is only supported on struct fields",
        )),
        None => Ok(()),
    }
}
