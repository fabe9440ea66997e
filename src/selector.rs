use std::cell::Cell;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use crate::memoize::Memoized;

/// How deep selectors may nest within one call before the graph is
/// considered cyclic.
pub const MAX_DEPTH: usize = 512;

/// Derives a value from a state, props and extra arguments.
///
/// Every closure and function of shape `Fn(&S, &P, &E) -> T` is a selector.
/// The `extra` segment carries any further call arguments: use a tuple for a
/// fixed number of them or a slice for a variadic tail.
///
/// Outputs are owned values. They are compared between calls, so a selector
/// feeding a memoized selector should produce something cheap to compare,
/// typically a number, a string or an `Rc` handle.
pub trait Selector<S: ?Sized, P: ?Sized = (), E: ?Sized = ()> {
    /// The selected value.
    type Output;

    /// Select the value.
    fn select(&self, state: &S, props: &P, extra: &E) -> Self::Output;

    /// Erase the selector's type.
    fn boxed<'a>(self) -> BoxedSelector<'a, S, Self::Output, P, E>
    where
        Self: Sized + 'a,
        S: 'a,
        P: 'a,
        E: 'a,
    {
        Box::new(move |state: &S, props: &P, extra: &E| self.select(state, props, extra))
    }
}

impl<S, P, E, F, T> Selector<S, P, E> for F
where
    S: ?Sized,
    P: ?Sized,
    E: ?Sized,
    F: Fn(&S, &P, &E) -> T,
{
    type Output = T;

    #[inline]
    fn select(&self, state: &S, props: &P, extra: &E) -> T {
        self(state, props, extra)
    }
}

/// A type-erased selector.
pub type BoxedSelector<'a, S, T, P = (), E = ()> = Box<dyn Fn(&S, &P, &E) -> T + 'a>;

/// An ordered list of dependency selectors sharing one call signature.
///
/// This is implemented for tuples of selectors up to length twelve and for
/// `Vec`s of selectors with a common output type.
pub trait Dependencies<S: ?Sized, P: ?Sized, E: ?Sized> {
    /// The outputs of all dependencies, in order.
    type Outputs;

    /// How many dependencies there are.
    fn count(&self) -> usize;

    /// Evaluate every dependency against the same arguments.
    fn select_all(&self, state: &S, props: &P, extra: &E) -> Self::Outputs;
}

impl<S, P, E, X> Dependencies<S, P, E> for Vec<X>
where
    S: ?Sized,
    P: ?Sized,
    E: ?Sized,
    X: Selector<S, P, E>,
{
    type Outputs = Vec<X::Output>;

    fn count(&self) -> usize {
        self.len()
    }

    fn select_all(&self, state: &S, props: &P, extra: &E) -> Self::Outputs {
        self.iter().map(|dep| dep.select(state, props, extra)).collect()
    }
}

macro_rules! tuple_dependencies {
    ($len:literal; $($param:ident $idx:tt),*) => {
        impl<St, Pr, Ex, $($param),*> Dependencies<St, Pr, Ex> for ($($param,)*)
        where
            St: ?Sized,
            Pr: ?Sized,
            Ex: ?Sized,
            $($param: Selector<St, Pr, Ex>,)*
        {
            type Outputs = ($(<$param as Selector<St, Pr, Ex>>::Output,)*);

            #[inline]
            fn count(&self) -> usize {
                $len
            }

            #[inline]
            fn select_all(&self, state: &St, props: &Pr, extra: &Ex) -> Self::Outputs {
                ($(<$param as Selector<St, Pr, Ex>>::select(&self.$idx, state, props, extra),)*)
            }
        }
    };
}

tuple_dependencies! { 1; A 0 }
tuple_dependencies! { 2; A 0, B 1 }
tuple_dependencies! { 3; A 0, B 1, C 2 }
tuple_dependencies! { 4; A 0, B 1, C 2, D 3 }
tuple_dependencies! { 5; A 0, B 1, C 2, D 3, E 4 }
tuple_dependencies! { 6; A 0, B 1, C 2, D 3, E 4, F 5 }
tuple_dependencies! { 7; A 0, B 1, C 2, D 3, E 4, F 5, G 6 }
tuple_dependencies! { 8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7 }
tuple_dependencies! { 9; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8 }
tuple_dependencies! { 10; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9 }
tuple_dependencies! { 11; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10 }
tuple_dependencies! { 12; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11 }

/// A memoized selector built from dependencies and a combiner.
///
/// Cloning is cheap and yields a handle to the same selector: all clones
/// share one cache. This makes it possible to feed one selector into several
/// others while computing it only once per change.
///
/// Composed selectors are neither `Send` nor `Sync`.
pub struct Composed<D, M> {
    inner: Rc<Inner<D, M>>,
}

struct Inner<D, M> {
    dependencies: D,
    memoized: M,
}

impl<D, M> Composed<D, M> {
    pub(crate) fn new(dependencies: D, memoized: M) -> Self {
        Self { inner: Rc::new(Inner { dependencies, memoized }) }
    }

    /// Whether two handles refer to the same selector.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// The cache wrapping the combiner.
    pub fn memoized(&self) -> &M {
        &self.inner.memoized
    }
}

impl<S, P, E, D, M> Selector<S, P, E> for Composed<D, M>
where
    S: ?Sized,
    P: ?Sized,
    E: ?Sized,
    D: Dependencies<S, P, E>,
    M: Memoized<D::Outputs>,
{
    type Output = M::Output;

    fn select(&self, state: &S, props: &P, extra: &E) -> Self::Output {
        let _depth = DepthGuard::enter();
        let args = self.inner.dependencies.select_all(state, props, extra);
        self.inner.memoized.call(args)
    }
}

impl<D, M> Clone for Composed<D, M> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<D, M> Debug for Composed<D, M> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad("Composed(..)")
    }
}

thread_local! {
    /// How many composed selectors are currently executing on this thread.
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one level of selector nesting for as long as it lives.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        let depth = DEPTH.with(|cell| {
            let depth = cell.get() + 1;
            cell.set(depth);
            depth
        });

        // Constructed before the check so that unwinding restores the count.
        let guard = DepthGuard;
        assert!(
            depth <= MAX_DEPTH,
            "reselect: selectors nested more than {MAX_DEPTH} levels deep, \
             the selector graph is probably cyclic",
        );
        guard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|cell| cell.set(cell.get() - 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::create_selector;

    struct State {
        a: i32,
        b: i32,
    }

    fn select_a(state: &State, _: &(), _: &()) -> i32 {
        state.a
    }

    fn select_b(state: &State, _: &(), _: &()) -> i32 {
        state.b
    }

    #[test]
    fn test_functions_are_selectors() {
        let state = State { a: 1, b: 2 };
        assert_eq!(select_a.select(&state, &(), &()), 1);
        assert_eq!((select_a, select_b).select_all(&state, &(), &()), (1, 2));
        assert_eq!((select_a, select_b, select_a).count(), 3);
    }

    #[test]
    fn test_boxed_vec_dependencies() {
        let deps: Vec<BoxedSelector<State, i32>> = vec![
            Box::new(select_b),
            select_a.boxed(),
            Box::new(|state: &State, _: &(), _: &()| state.a * state.b),
        ];

        let state = State { a: 3, b: 4 };
        assert_eq!(deps.count(), 3);
        assert_eq!(deps.select_all(&state, &(), &()), vec![4, 3, 12]);
    }

    fn add(a: &i32, b: &i32) -> i32 {
        a + b
    }

    #[test]
    fn test_clones_share_identity() {
        let sum = create_selector((select_a, select_b), add);
        let other = create_selector((select_a, select_b), add);
        assert!(Composed::ptr_eq(&sum, &sum.clone()));
        assert!(!Composed::ptr_eq(&sum, &other));
        assert_eq!(format!("{sum:?}"), "Composed(..)");
    }

    #[test]
    fn test_depth_is_restored_after_calls() {
        let sum = create_selector((select_a, select_b), |a: &i32, b: &i32| a + b);
        let double = create_selector((sum,), |s: &i32| s * 2);
        assert_eq!(double.select(&State { a: 1, b: 2 }, &(), &()), 6);
        assert_eq!(DEPTH.with(Cell::get), 0);
    }
}
