use proc_macro2::Span;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;

use super::*;

/// Dependency selectors supported by the tuple implementations.
const MAX_DEPENDENCIES: usize = 12;

mod kw {
    syn::custom_keyword!(builder);
}

/// The parsed arguments of `selector!`.
pub struct Input {
    builder: Option<syn::Expr>,
    selectors: Punctuated<syn::Expr, syn::Token![,]>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> Result<Self> {
        let builder = utils::parse_key_value::<kw::builder, syn::Expr>(input)?;
        let selectors = Punctuated::parse_terminated(input)?;
        Ok(Self { builder, selectors })
    }
}

/// Expand the selector composition.
pub fn expand(input: Input) -> Result<proc_macro2::TokenStream> {
    let mut selectors: Vec<syn::Expr> = input.selectors.into_iter().collect();
    let Some(combiner) = selectors.pop() else {
        return Err(Error::new(
            Span::call_site(),
            "reselect: expecting at least one selector",
        ));
    };

    // A lone selector has nothing to depend on and needs no cache.
    if selectors.is_empty() {
        return Ok(match &input.builder {
            Some(builder) => quote! { { let _ = &#builder; #combiner } },
            None => quote! { #combiner },
        });
    }

    if selectors.len() > MAX_DEPENDENCIES {
        bail!(
            selectors[MAX_DEPENDENCIES],
            "at most {} dependency selectors are supported, use `build_dynamic` for more",
            MAX_DEPENDENCIES
        );
    }

    let builder = match &input.builder {
        Some(builder) => quote! { (#builder) },
        None => quote! { ::reselect::DEFAULT },
    };

    Ok(quote! {
        #builder.build((#(#selectors,)*), #combiner)
    })
}
