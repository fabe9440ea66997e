use std::rc::Rc;
use std::sync::Arc;

/// How a value compares under the built-in comparators.
///
/// A type decides three things:
/// - what _identity_ means for it. Plain values such as numbers and strings
///   are identical when they are equal. Shared handles such as [`Rc`] and
///   [`Arc`] are identical only when they point to the same allocation.
/// - whether an instance is _absent_. Absent values never compare equal to
///   anything, themselves included. [`None`] is the only absent value among
///   the implementations provided here.
/// - whether it supports deep equality. Persistent collection adapters
///   return `Some(_)` from [`structurally_equals`](Self::structurally_equals)
///   so that two distinct but structurally equal instances count as
///   unchanged under the [`DefaultComparator`].
///
/// Owned containers like `Vec<T>` deliberately do not implement this trait:
/// wrap them in an `Rc` to compare by reference, or in a persistent adapter
/// to compare by structure.
pub trait Compare {
    /// Whether `self` and `other` are the very same value.
    fn identical(&self, other: &Self) -> bool;

    /// Whether this value stands for a missing value.
    fn is_absent(&self) -> bool {
        false
    }

    /// The deep-equality capability.
    ///
    /// Returns `None` if the type has none, which makes the default
    /// comparator fall back to [`identical`](Self::identical).
    fn structurally_equals(&self, _other: &Self) -> Option<bool> {
        None
    }
}

macro_rules! compare_by_value {
    ($($ty:ty),* $(,)?) => {
        $(impl Compare for $ty {
            #[inline]
            fn identical(&self, other: &Self) -> bool {
                self == other
            }
        })*
    };
}

compare_by_value! {
    (), bool, char, str, String,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
}

impl<T: Compare> Compare for Option<T> {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.identical(b),
            _ => false,
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn structurally_equals(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (Some(a), Some(b)) => a.structurally_equals(b),
            _ => None,
        }
    }
}

impl<T: Compare + ?Sized> Compare for &T {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        T::identical(self, other)
    }

    #[inline]
    fn is_absent(&self) -> bool {
        T::is_absent(self)
    }

    #[inline]
    fn structurally_equals(&self, other: &Self) -> Option<bool> {
        T::structurally_equals(self, other)
    }
}

impl<T: Compare + ?Sized> Compare for Box<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        T::identical(self, other)
    }

    #[inline]
    fn is_absent(&self) -> bool {
        T::is_absent(self)
    }

    #[inline]
    fn structurally_equals(&self, other: &Self) -> Option<bool> {
        T::structurally_equals(self, other)
    }
}

impl<T: ?Sized> Compare for Rc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Compare for Arc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Compare, const N: usize> Compare for [T; N] {
    fn identical(&self, other: &Self) -> bool {
        self.iter().zip(other).all(|(a, b)| a.identical(b))
    }

    fn structurally_equals(&self, other: &Self) -> Option<bool> {
        let deep = self.iter().zip(other).any(|(a, b)| a.structurally_equals(b).is_some());
        deep.then(|| self.iter().zip(other).all(|(a, b)| default_comparator(a, b)))
    }
}

/// Tuples are identical if all their elements are. They are structurally
/// comparable if at least one element is.
macro_rules! tuple_compare {
    ($($param:ident $idx:tt),*) => {
        impl<$($param: Compare),*> Compare for ($($param,)*) {
            #[inline]
            fn identical(&self, other: &Self) -> bool {
                true $(&& self.$idx.identical(&other.$idx))*
            }

            fn structurally_equals(&self, other: &Self) -> Option<bool> {
                let deep = false $(|| self.$idx.structurally_equals(&other.$idx).is_some())*;
                deep.then(|| true $(&& default_comparator(&self.$idx, &other.$idx))*)
            }
        }
    };
}

tuple_compare! { A 0 }
tuple_compare! { A 0, B 1 }
tuple_compare! { A 0, B 1, C 2 }
tuple_compare! { A 0, B 1, C 2, D 3 }
tuple_compare! { A 0, B 1, C 2, D 3, E 4 }
tuple_compare! { A 0, B 1, C 2, D 3, E 4, F 5 }
tuple_compare! { A 0, B 1, C 2, D 3, E 4, F 5, G 6 }
tuple_compare! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7 }
tuple_compare! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8 }
tuple_compare! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9 }
tuple_compare! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10 }
tuple_compare! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11 }

/// Strict equality: both values present and identical.
pub fn simple_comparator<T: Compare + ?Sized>(a: &T, b: &T) -> bool {
    !a.is_absent() && !b.is_absent() && a.identical(b)
}

/// Deep equality for types that support it, strict equality otherwise.
pub fn default_comparator<T: Compare + ?Sized>(a: &T, b: &T) -> bool {
    match a.structurally_equals(b) {
        Some(equal) => equal,
        None => simple_comparator(a, b),
    }
}

/// Decides whether a value changed between two calls.
///
/// Implemented by [`DefaultComparator`], [`SimpleComparator`] and every
/// closure of shape `Fn(&T, &T) -> bool`.
pub trait Comparator<T: ?Sized> {
    /// Whether `current` counts as unchanged with respect to `previous`.
    fn equals(&self, previous: &T, current: &T) -> bool;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equals(&self, previous: &T, current: &T) -> bool {
        self(previous, current)
    }
}

/// The comparator behind [`default_comparator`].
#[derive(Debug, Default, Copy, Clone)]
pub struct DefaultComparator;

impl<T: Compare + ?Sized> Comparator<T> for DefaultComparator {
    #[inline]
    fn equals(&self, previous: &T, current: &T) -> bool {
        default_comparator(previous, current)
    }
}

/// The comparator behind [`simple_comparator`].
#[derive(Debug, Default, Copy, Clone)]
pub struct SimpleComparator;

impl<T: Compare + ?Sized> Comparator<T> for SimpleComparator {
    #[inline]
    fn equals(&self, previous: &T, current: &T) -> bool {
        simple_comparator(previous, current)
    }
}

/// Compare two sequences position by position.
///
/// False if either side is missing or the lengths differ.
pub fn array_equals<T, C>(previous: Option<&[T]>, current: Option<&[T]>, comparator: &C) -> bool
where
    C: Comparator<T> + ?Sized,
{
    let (Some(previous), Some(current)) = (previous, current) else {
        return false;
    };

    previous.len() == current.len()
        && previous
            .iter()
            .zip(current)
            .all(|(p, c)| comparator.equals(p, c))
}

/// An argument list whose positions can be compared one by one.
///
/// This is implemented for `Vec<T>` and for tuples up to length twelve.
pub trait Arguments<C: ?Sized> {
    /// Whether every position of `current` is unchanged from `previous`.
    fn unchanged(previous: &Self, current: &Self, comparator: &C) -> bool;
}

impl<C, T> Arguments<C> for Vec<T>
where
    C: Comparator<T> + ?Sized,
{
    fn unchanged(previous: &Self, current: &Self, comparator: &C) -> bool {
        array_equals(Some(previous), Some(current), comparator)
    }
}

macro_rules! tuple_arguments {
    ($($param:ident $idx:tt),*) => {
        impl<Cmp, $($param),*> Arguments<Cmp> for ($($param,)*)
        where
            Cmp: ?Sized $(+ Comparator<$param>)*,
        {
            #[inline]
            fn unchanged(previous: &Self, current: &Self, comparator: &Cmp) -> bool {
                true $(&& <Cmp as Comparator<$param>>::equals(
                    comparator,
                    &previous.$idx,
                    &current.$idx,
                ))*
            }
        }
    };
}

tuple_arguments! { A 0 }
tuple_arguments! { A 0, B 1 }
tuple_arguments! { A 0, B 1, C 2 }
tuple_arguments! { A 0, B 1, C 2, D 3 }
tuple_arguments! { A 0, B 1, C 2, D 3, E 4 }
tuple_arguments! { A 0, B 1, C 2, D 3, E 4, F 5 }
tuple_arguments! { A 0, B 1, C 2, D 3, E 4, F 5, G 6 }
tuple_arguments! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7 }
tuple_arguments! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8 }
tuple_arguments! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9 }
tuple_arguments! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10 }
tuple_arguments! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11 }
