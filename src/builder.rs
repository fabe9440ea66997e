use crate::compare::{Arguments, DefaultComparator};
use crate::error::{Error, Result};
use crate::memoize::{Combiner, Memo, Memoizer, SingleSlot};
use crate::selector::{Composed, Dependencies, Selector};

/// The default builder: single-slot memoization with the
/// [`DefaultComparator`].
pub const DEFAULT: SelectorBuilder = SelectorBuilder::new();

/// Composes selectors with a fixed memoizer and comparator.
///
/// The builder holds no state of its own. Every selector it builds receives
/// a fresh cache from the memoizer and a clone of the comparator.
///
/// ```
/// use reselect::{Keyed, Selector, SelectorBuilder};
///
/// let builder = SelectorBuilder::new()
///     .with_memoizer(Keyed)
///     .with_comparator(|a: &u32, b: &u32| a == b);
///
/// let area = builder.build(
///     (
///         |size: &(u32, u32), _: &(), _: &()| size.0,
///         |size: &(u32, u32), _: &(), _: &()| size.1,
///     ),
///     |w: &u32, h: &u32| w * h,
/// );
///
/// assert_eq!(area.select(&(3, 4), &(), &()), 12);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct SelectorBuilder<M = SingleSlot, C = DefaultComparator> {
    memoizer: M,
    comparator: C,
}

impl SelectorBuilder {
    /// A builder with the default configuration.
    pub const fn new() -> Self {
        Self { memoizer: SingleSlot, comparator: DefaultComparator }
    }
}

impl<M, C> SelectorBuilder<M, C> {
    /// Use a different memoizer.
    pub fn with_memoizer<N>(self, memoizer: N) -> SelectorBuilder<N, C> {
        SelectorBuilder { memoizer, comparator: self.comparator }
    }

    /// Use a different comparator.
    pub fn with_comparator<K>(self, comparator: K) -> SelectorBuilder<M, K> {
        SelectorBuilder { memoizer: self.memoizer, comparator }
    }

    /// Compose dependency selectors and a combiner into a memoized selector.
    ///
    /// The resulting selector evaluates all dependencies with its own
    /// arguments and passes their outputs to the combiner. The combiner only
    /// runs if some output changed according to the comparator.
    pub fn build<S, P, E, D, F>(&self, dependencies: D, combiner: F) -> Composed<D, M::Memoized>
    where
        S: ?Sized,
        P: ?Sized,
        E: ?Sized,
        D: Dependencies<S, P, E>,
        M: Memoizer<D::Outputs, F, C>,
        C: Clone,
    {
        tracing::debug!(dependencies = dependencies.count(), "building memoized selector");
        let memoized = self.memoizer.memoize(combiner, self.comparator.clone());
        Composed::new(dependencies, memoized)
    }

    /// Compose a runtime-sized list of selectors.
    ///
    /// The combiner receives the outputs as a slice.
    ///
    /// # Errors
    /// Returns [`Error::NoSelectors`] if the list is empty. A lone combiner
    /// would be passed through unchanged by the `selector!` macro,
    /// but a slice combiner is not a selector itself, so there is nothing to
    /// pass through here.
    pub fn build_dynamic<S, P, E, X, F>(
        &self,
        dependencies: Vec<X>,
        combiner: F,
    ) -> Result<Composed<Vec<X>, M::Memoized>>
    where
        S: ?Sized,
        P: ?Sized,
        E: ?Sized,
        X: Selector<S, P, E>,
        M: Memoizer<Vec<X::Output>, F, C>,
        C: Clone,
    {
        if dependencies.is_empty() {
            tracing::debug!("refusing to build a selector without dependencies");
            return Err(Error::NoSelectors);
        }

        Ok(self.build(dependencies, combiner))
    }
}

/// Compose selectors with the [default builder](DEFAULT).
///
/// ```
/// use reselect::{create_selector, Selector};
///
/// struct Cart {
///     price: u32,
///     quantity: u32,
/// }
///
/// let total = create_selector(
///     (
///         |cart: &Cart, _: &(), _: &()| cart.price,
///         |cart: &Cart, _: &(), _: &()| cart.quantity,
///     ),
///     |price: &u32, quantity: &u32| price * quantity,
/// );
///
/// assert_eq!(total.select(&Cart { price: 3, quantity: 2 }, &(), &()), 6);
/// ```
pub fn create_selector<S, P, E, D, F>(
    dependencies: D,
    combiner: F,
) -> Composed<D, Memo<D::Outputs, F, DefaultComparator>>
where
    S: ?Sized,
    P: ?Sized,
    E: ?Sized,
    D: Dependencies<S, P, E>,
    D::Outputs: Arguments<DefaultComparator>,
    F: Combiner<D::Outputs>,
    F::Output: Clone,
{
    DEFAULT.build(dependencies, combiner)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::memoize::Keyed;
    use crate::selector::BoxedSelector;

    fn first(xs: &[i32], _: &(), _: &()) -> i32 {
        xs[0]
    }

    fn last(xs: &[i32], _: &(), _: &()) -> i32 {
        xs[xs.len() - 1]
    }

    #[test]
    fn test_build_dynamic_rejects_empty_list() {
        let deps: Vec<BoxedSelector<[i32], i32>> = vec![];
        let err = DEFAULT.build_dynamic(deps, |xs: &[i32]| xs.len()).unwrap_err();
        assert_eq!(err, Error::NoSelectors);
        assert!(err.to_string().contains("at least one selector"));
    }

    #[test]
    fn test_build_dynamic_memoizes() {
        let calls = Cell::new(0);
        let deps: Vec<BoxedSelector<[i32], i32>> = vec![Box::new(first), Box::new(last)];
        let spread = DEFAULT
            .build_dynamic(deps, |ends: &[i32]| {
                calls.set(calls.get() + 1);
                ends[1] - ends[0]
            })
            .unwrap();

        assert_eq!(spread.select(&[1, 5, 9][..], &(), &()), 8);
        assert_eq!(spread.select(&[1, 7, 9][..], &(), &()), 8);
        assert_eq!(calls.get(), 1);
        assert_eq!(spread.select(&[2, 9][..], &(), &()), 7);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_keyed_builder() {
        let calls = Cell::new(0);
        let builder = SelectorBuilder::new().with_memoizer(Keyed);
        let head = builder.build((first,), |x: &i32| {
            calls.set(calls.get() + 1);
            x * 10
        });

        assert_eq!(head.select(&[1][..], &(), &()), 10);
        assert_eq!(head.select(&[2][..], &(), &()), 20);
        assert_eq!(head.select(&[1][..], &(), &()), 10);
        assert_eq!(calls.get(), 2);
        assert_eq!(head.memoized().len(), 2);
    }

    #[test]
    fn test_builds_are_independent() {
        let calls = Cell::new(0);
        let combine = |x: &i32| {
            calls.set(calls.get() + 1);
            *x
        };

        let one = DEFAULT.build((first,), combine);
        let two = DEFAULT.build((first,), combine);
        one.select(&[1][..], &(), &());
        two.select(&[1][..], &(), &());
        one.select(&[1][..], &(), &());
        assert_eq!(calls.get(), 2);
    }
}
