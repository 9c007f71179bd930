use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemStruct;

pub fn expand_slice(input: ItemStruct) -> TokenStream {
    let ItemStruct { attrs, vis, ident, fields, .. } = &input;
    let inner_ident = format_ident!("{ident}Inner");

    // Unit structs need a trailing semicolon after the field list.
    let body = match fields {
        syn::Fields::Named(_) => quote! { #fields },
        _ => quote! { #fields; },
    };

    quote! {
        #(#attrs)*
        #[derive(Debug)]
        #vis struct #inner_ident #body

        #[derive(Debug, Clone)]
        #vis struct #ident {
            inner: ::std::sync::Arc<#inner_ident>,
        }

        impl #ident {
            #[must_use]
            pub fn new(inner: #inner_ident) -> Self {
                Self { inner: ::std::sync::Arc::new(inner) }
            }
        }

        impl ::std::ops::Deref for #ident {
            type Target = #inner_ident;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::vows_kernel::domain::registry::FeatureSlice for #ident {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    }
}
