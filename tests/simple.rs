use std::cell::Cell;

use reselect::{Selector, create_selector};

#[test]
fn test_simple() {
    let calls = Cell::new(0);
    let double = create_selector((|n: &u32, _: &(), _: &()| *n,), |n: &u32| {
        calls.set(calls.get() + 1);
        2 * n
    });

    assert_eq!(double.select(&2, &(), &()), 4); // [Miss] The cache is empty.
    assert_eq!(double.select(&2, &(), &()), 4); // [Hit] Same number.
    assert_eq!(double.select(&4, &(), &()), 8); // [Miss] Different number.
    assert_eq!(double.select(&2, &(), &()), 4); // [Miss] Only the last call is kept.
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_sum_of_pair() {
    let calls = Cell::new(0);
    let sum = create_selector(
        (
            |pair: &(u32, u32), _: &(), _: &()| pair.0,
            |pair: &(u32, u32), _: &(), _: &()| pair.1,
        ),
        |a: &u32, b: &u32| {
            calls.set(calls.get() + 1);
            a + b
        },
    );

    assert_eq!(sum.select(&(2, 4), &(), &()), 6); // [Miss] The cache is empty.
    assert_eq!(sum.select(&(2, 3), &(), &()), 5); // [Miss] Different numbers.
    assert_eq!(sum.select(&(2, 3), &(), &()), 5); // [Hit] Same numbers.
    assert_eq!(sum.select(&(4, 2), &(), &()), 6); // [Miss] Different numbers.
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_tuple_outputs() {
    let calls = Cell::new(0);
    let origin = create_selector(
        (|rect: &[i32; 4], _: &(), _: &()| (rect[0], rect[1]),),
        |corner: &(i32, i32)| {
            calls.set(calls.get() + 1);
            corner.0.abs() + corner.1.abs()
        },
    );

    assert_eq!(origin.select(&[1, -2, 5, 5], &(), &()), 3); // [Miss] The cache is empty.
    assert_eq!(origin.select(&[1, -2, 9, 9], &(), &()), 3); // [Hit] Same corner.
    assert_eq!(origin.select(&[0, -2, 9, 9], &(), &()), 2); // [Miss] Different corner.
    assert_eq!(calls.get(), 2);
}
