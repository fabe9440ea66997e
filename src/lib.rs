//! Composable memoized selectors.
//!
//! A selector derives a value from a state, some props and optional extra
//! arguments. Selectors built with [`create_selector`] or [`selector!`] wrap
//! a combiner that only reruns if the values selected by their dependencies
//! changed since the last call, according to a pluggable [`Comparator`].
//! Built selectors are selectors themselves and compose to any depth.
//!
//! ```
//! use std::rc::Rc;
//!
//! use reselect::{selector, Selector};
//!
//! struct State {
//!     todos: Rc<Vec<&'static str>>,
//!     limit: usize,
//! }
//!
//! let visible = selector!(
//!     |state: &State, _: &(), _: &()| Rc::clone(&state.todos),
//!     |state: &State, _: &(), _: &()| state.limit,
//!     |todos: &Rc<Vec<&'static str>>, limit: &usize| todos.len().min(*limit),
//! );
//!
//! let todos = Rc::new(vec!["write", "test", "ship"]);
//! let state = State { todos, limit: 2 };
//! assert_eq!(visible.select(&state, &(), &()), 2);
//! ```
//!
//! A selector needs at least a combiner:
//!
//! ```compile_fail
//! let nothing = reselect::selector!();
//! ```
//!
//! A single argument is returned as is, without a cache.

mod builder;
mod compare;
mod error;
mod memoize;
mod selector;
#[cfg(feature = "testing")]
mod testing;

pub use crate::builder::{DEFAULT, SelectorBuilder, create_selector};
pub use crate::compare::{
    Arguments, Comparator, Compare, DefaultComparator, SimpleComparator, array_equals,
    default_comparator, simple_comparator,
};
pub use crate::error::{Error, Result};
pub use crate::memoize::{
    Combiner, Keyed, KeyedMemo, Memo, Memoized, Memoizer, SingleSlot, memoize,
};
pub use crate::selector::{BoxedSelector, Composed, Dependencies, MAX_DEPTH, Selector};

#[cfg(feature = "macros")]
pub use reselect_macros::selector;

/// These are implementation details. Do not rely on them!
#[cfg(feature = "testing")]
#[doc(hidden)]
pub mod internal {
    pub use crate::testing::{Outcomes, last_was_hit, outcomes, reset};
}
