use syn::{
    parse::{Parse, ParseStream},
    token::Token,
};

use super::*;

/// Parse a leading `key = value` pair, followed by an optional comma.
///
/// Only consumes input if the key is directly followed by `=`, so that an
/// expression starting with an identifier equal to the key still parses.
pub fn parse_key_value<K: Token + Default + Parse, V: Parse>(
    input: ParseStream,
) -> Result<Option<V>> {
    if !input.peek(|_| K::default()) || !input.peek2(syn::Token![=]) {
        return Ok(None);
    }

    let _: K = input.parse()?;
    let _: syn::Token![=] = input.parse()?;
    let value: V = input.parse::<V>()?;
    eat_comma(input)?;
    Ok(Some(value))
}

/// Parse a comma if there is one.
pub fn eat_comma(input: ParseStream) -> Result<()> {
    if input.peek(syn::Token![,]) {
        let _: syn::Token![,] = input.parse()?;
    }
    Ok(())
}
