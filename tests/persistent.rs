use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use reselect::{
    BoxedSelector, Compare, Error, Selector, SelectorBuilder, SimpleComparator,
    create_selector, default_comparator,
};

/// A minimal persistent list: cheap to clone, shares structure, compares by
/// value through the deep-equality capability.
#[derive(Debug, Clone)]
enum List {
    Nil,
    Cons(Rc<(i32, List)>),
}

impl List {
    fn from_slice(items: &[i32]) -> Self {
        items
            .iter()
            .rev()
            .fold(List::Nil, |tail, &head| List::Cons(Rc::new((head, tail))))
    }

    fn push(&self, head: i32) -> Self {
        List::Cons(Rc::new((head, self.clone())))
    }

    fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        let mut current = self;
        std::iter::from_fn(move || match current {
            List::Nil => None,
            List::Cons(cell) => {
                current = &cell.1;
                Some(cell.0)
            }
        })
    }
}

impl Compare for List {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (List::Nil, List::Nil) => true,
            (List::Cons(a), List::Cons(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn structurally_equals(&self, other: &Self) -> Option<bool> {
        Some(self.iter().eq(other.iter()))
    }
}

struct Store {
    items: List,
    revision: u32,
}

#[test]
fn test_structural_equality_skips_recompute() {
    let calls = Cell::new(0);
    let total = create_selector(
        (|store: &Store, _: &(), _: &()| store.items.clone(),),
        |items: &List| {
            calls.set(calls.get() + 1);
            items.iter().sum::<i32>()
        },
    );

    let store = Store { items: List::from_slice(&[1, 2, 3]), revision: 0 };
    assert_eq!(total.select(&store, &(), &()), 6);

    // Rebuilt with equal contents: no recompute.
    let rebuilt = Store { items: List::from_slice(&[1, 2, 3]), revision: 1 };
    assert_eq!(total.select(&rebuilt, &(), &()), 6);
    assert_eq!(calls.get(), 1);

    let grown = Store { items: rebuilt.items.push(4), revision: 2 };
    assert_eq!(total.select(&grown, &(), &()), 10);
    assert_eq!(calls.get(), 2);
    assert_eq!(grown.revision, 2);
}

#[test]
fn test_simple_comparator_ignores_structure() {
    let calls = Cell::new(0);
    let builder = SelectorBuilder::new().with_comparator(SimpleComparator);
    let total = builder.build(
        (|store: &Store, _: &(), _: &()| store.items.clone(),),
        |items: &List| {
            calls.set(calls.get() + 1);
            items.iter().count()
        },
    );

    let store = Store { items: List::from_slice(&[1, 2]), revision: 0 };
    total.select(&store, &(), &());
    total.select(&store, &(), &());
    assert_eq!(calls.get(), 1);

    let rebuilt = Store { items: List::from_slice(&[1, 2]), revision: 1 };
    total.select(&rebuilt, &(), &());
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_default_comparator_on_lists() {
    let a = List::from_slice(&[100, 200]);
    let b = List::from_slice(&[100, 200]);
    assert!(default_comparator(&a, &b));
    assert!(!default_comparator(&a, &List::from_slice(&[100])));
    assert!(!default_comparator(&Some(a), &None));
}

#[test]
fn test_panicking_combiner_keeps_cache() {
    let calls = Cell::new(0);
    let checked = create_selector((|n: &i32, _: &(), _: &()| *n,), |n: &i32| {
        calls.set(calls.get() + 1);
        assert!(*n != 13, "unlucky number");
        n * 2
    });

    assert_eq!(checked.select(&4, &(), &()), 8);
    let result = catch_unwind(AssertUnwindSafe(|| checked.select(&13, &(), &())));
    assert!(result.is_err());

    // The entry for `4` survived the failed call.
    assert_eq!(checked.select(&4, &(), &()), 8);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_empty_composition_fails() {
    let deps: Vec<BoxedSelector<Store, u32>> = Vec::new();
    let result = SelectorBuilder::new().build_dynamic(deps, |revisions: &[u32]| revisions.len());
    let err = result.unwrap_err();
    assert_eq!(err, Error::NoSelectors);
    assert_eq!(err.to_string(), "reselect: expecting at least one selector");
}
