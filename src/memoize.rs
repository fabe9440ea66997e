use std::cell::RefCell;
use std::hash::Hash;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;
use siphasher::sip128::{Hasher128, SipHasher13};

use crate::compare::Arguments;

/// A function from an argument list to a derived value.
///
/// Implemented for closures taking each tuple element by reference, e.g.
/// `Fn(&A, &B) -> R` for `(A, B)`, and for closures of shape `Fn(&[T]) -> R`
/// for `Vec<T>`.
pub trait Combiner<Args> {
    /// The derived value.
    type Output;

    /// Derive the value from the arguments.
    fn combine(&self, args: &Args) -> Self::Output;
}

impl<Func, T, Out> Combiner<Vec<T>> for Func
where
    Func: Fn(&[T]) -> Out,
{
    type Output = Out;

    #[inline]
    fn combine(&self, args: &Vec<T>) -> Out {
        self(args.as_slice())
    }
}

macro_rules! tuple_combiner {
    ($($param:ident $idx:tt),*) => {
        impl<Func, Out, $($param),*> Combiner<($($param,)*)> for Func
        where
            Func: Fn($(&$param),*) -> Out,
        {
            type Output = Out;

            #[inline]
            fn combine(&self, args: &($($param,)*)) -> Out {
                self($(&args.$idx),*)
            }
        }
    };
}

tuple_combiner! { A 0 }
tuple_combiner! { A 0, B 1 }
tuple_combiner! { A 0, B 1, C 2 }
tuple_combiner! { A 0, B 1, C 2, D 3 }
tuple_combiner! { A 0, B 1, C 2, D 3, E 4 }
tuple_combiner! { A 0, B 1, C 2, D 3, E 4, F 5 }
tuple_combiner! { A 0, B 1, C 2, D 3, E 4, F 5, G 6 }
tuple_combiner! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7 }
tuple_combiner! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8 }
tuple_combiner! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9 }
tuple_combiner! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10 }
tuple_combiner! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11 }

/// A combiner wrapped in a cache.
pub trait Memoized<Args> {
    /// The combiner's output.
    type Output;

    /// Produce the output for the arguments, from the cache if possible.
    fn call(&self, args: Args) -> Self::Output;
}

/// Wraps combiners into caches.
///
/// A selector builder holds one memoizer and asks it for a fresh cache for
/// every selector it builds.
pub trait Memoizer<Args, F, C> {
    /// The cache produced for a combiner.
    type Memoized: Memoized<Args>;

    /// Wrap a combiner, deciding cache validity with the comparator.
    fn memoize(&self, combiner: F, comparator: C) -> Self::Memoized;
}

/// The default memoizer: remembers only the most recent call.
#[derive(Debug, Default, Copy, Clone)]
pub struct SingleSlot;

impl<Args, F, C> Memoizer<Args, F, C> for SingleSlot
where
    Args: Arguments<C>,
    F: Combiner<Args>,
    F::Output: Clone,
{
    type Memoized = Memo<Args, F, C>;

    fn memoize(&self, combiner: F, comparator: C) -> Self::Memoized {
        memoize(combiner, comparator)
    }
}

/// Wrap a combiner in a single-slot cache.
///
/// The combiner runs again only if some position of the argument list is
/// changed according to the comparator.
///
/// ```
/// use reselect::{memoize, DefaultComparator, Memoized};
///
/// let memo = memoize(|a: &i32, b: &i32| a + b, DefaultComparator);
/// assert_eq!(memo.call((1, 2)), 3);
/// ```
pub fn memoize<Args, F, C>(combiner: F, comparator: C) -> Memo<Args, F, C>
where
    Args: Arguments<C>,
    F: Combiner<Args>,
    F::Output: Clone,
{
    Memo { combiner, comparator, slot: RefCell::new(None) }
}

/// A combiner with a single-slot cache. Created by [`memoize`].
pub struct Memo<Args, F: Combiner<Args>, C> {
    combiner: F,
    comparator: C,
    /// The last computed arguments and output. Empty until the first call.
    slot: RefCell<Option<Slot<Args, F::Output>>>,
}

struct Slot<Args, Out> {
    args: Args,
    output: Out,
}

impl<Args, F, C> Memoized<Args> for Memo<Args, F, C>
where
    Args: Arguments<C>,
    F: Combiner<Args>,
    F::Output: Clone,
{
    type Output = F::Output;

    fn call(&self, args: Args) -> Self::Output {
        if let Some(slot) = &*self.slot.borrow()
            && Args::unchanged(&slot.args, &args, &self.comparator)
        {
            tracing::trace!("memoized call hit");

            #[cfg(feature = "testing")]
            crate::testing::register_hit();

            return slot.output.clone();
        }

        tracing::trace!("memoized call missed");

        // The slot is only replaced once the combiner has returned, so a
        // panicking combiner leaves the previous entry in place.
        let output = self.combiner.combine(&args);
        *self.slot.borrow_mut() = Some(Slot { args, output: output.clone() });

        #[cfg(feature = "testing")]
        crate::testing::register_miss();

        output
    }
}

/// A memoizer with unbounded history.
///
/// Remembers the output for every distinct argument list it has seen, keyed
/// by a 128-bit hash of the arguments. The comparator is ignored.
#[derive(Debug, Default, Copy, Clone)]
pub struct Keyed;

impl<Args, F, C> Memoizer<Args, F, C> for Keyed
where
    Args: Hash,
    F: Combiner<Args>,
    F::Output: Clone,
{
    type Memoized = KeyedMemo<Args, F>;

    fn memoize(&self, combiner: F, _: C) -> Self::Memoized {
        KeyedMemo::new(combiner)
    }
}

/// A combiner with a hash-keyed cache. Created by [`Keyed`].
pub struct KeyedMemo<Args, F: Combiner<Args>> {
    combiner: F,
    entries: RefCell<FxHashMap<u128, F::Output>>,
    marker: PhantomData<fn(Args)>,
}

impl<Args, F> KeyedMemo<Args, F>
where
    Args: Hash,
    F: Combiner<Args>,
    F::Output: Clone,
{
    /// Wrap a combiner in an empty cache.
    pub fn new(combiner: F) -> Self {
        Self {
            combiner,
            entries: RefCell::new(FxHashMap::default()),
            marker: PhantomData,
        }
    }

    /// How many outputs are cached.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Forget all cached outputs.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<Args, F> Memoized<Args> for KeyedMemo<Args, F>
where
    Args: Hash,
    F: Combiner<Args>,
    F::Output: Clone,
{
    type Output = F::Output;

    fn call(&self, args: Args) -> Self::Output {
        let key = key(&args);
        if let Some(output) = self.entries.borrow().get(&key) {
            tracing::trace!("keyed call hit");

            #[cfg(feature = "testing")]
            crate::testing::register_hit();

            return output.clone();
        }

        tracing::trace!("keyed call missed");
        let output = self.combiner.combine(&args);
        self.entries.borrow_mut().insert(key, output.clone());

        #[cfg(feature = "testing")]
        crate::testing::register_miss();

        output
    }
}

/// The 128-bit SipHash of an argument list.
fn key<Args: Hash>(args: &Args) -> u128 {
    let mut state = SipHasher13::new();
    args.hash(&mut state);
    state.finish128().as_u128()
}
