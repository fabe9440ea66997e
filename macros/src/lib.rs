extern crate proc_macro;

macro_rules! bail {
    ($item:expr, $fmt:literal $($tts:tt)*) => {
        return Err(Error::new_spanned(
            &$item,
            format!(concat!("reselect: ", $fmt) $($tts)*)
        ))
    }
}

mod selector;
mod utils;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, Result};

/// Compose selectors into a memoized selector.
///
/// The last argument is the combiner, all others are dependency selectors.
/// The combiner receives references to the dependencies' outputs and only
/// runs if one of them changed since the previous call.
///
/// ```ignore
/// use reselect::{selector, Selector};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let manhattan = selector!(
///     |p: &Point, _: &(), _: &()| p.x,
///     |p: &Point, _: &(), _: &()| p.y,
///     |x: &i32, y: &i32| x.abs() + y.abs(),
/// );
///
/// assert_eq!(manhattan.select(&Point { x: -2, y: 3 }, &(), &()), 5);
/// ```
///
/// A single selector is returned as is, without any caching. A custom
/// builder can be passed first:
///
/// ```ignore
/// use reselect::{selector, Keyed, Selector, SelectorBuilder};
///
/// let builder = SelectorBuilder::new().with_memoizer(Keyed);
/// let square = selector!(
///     builder = builder,
///     |n: &u64, _: &(), _: &()| *n,
///     |n: &u64| n * n,
/// );
///
/// assert_eq!(square.select(&7, &(), &()), 49);
/// ```
///
/// Calling the macro without any selector is an error:
///
/// ```compile_fail
/// let nothing = reselect_macros::selector!();
/// ```
#[proc_macro]
pub fn selector(stream: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(stream as selector::Input);
    selector::expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
