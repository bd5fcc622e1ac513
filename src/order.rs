//! The predicates a tree routes values with.
//!
//! A tree is parameterized by two predicates: an [`Order`] that decides whether a value belongs
//! to the right of a node, and an [`Equal`] that decides whether a value names a node. Both are
//! implemented for plain closures, and the wrappers in this module lift any
//! [`compare::Compare`] comparator into them.
//!
//! # Examples
//!
//! ```
//! use midtree::Tree;
//!
//! // Route values equal to a node into its right subtree.
//! let tree = Tree::from_values_with(vec![3, 1, 2], |a: &i32, b: &i32| a >= b,
//!                                   |a: &i32, b: &i32| a == b);
//! assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), [1, 2, 3]);
//! ```

use compare::{Compare, Natural};
use std::cmp::Ordering;

/// Decides which subtree a value is routed into.
///
/// The predicate must be consistent: for any two values it must always route the same way,
/// otherwise in-order traversal stops being sorted and searches miss values.
pub trait Order<T: ?Sized> {
    /// Returns `true` if `value` belongs strictly to the right of a node holding `node`.
    fn goes_right(&self, value: &T, node: &T) -> bool;

    /// Derives a total ordering from the predicate, for sorting.
    ///
    /// Two values that route the same way relative to each other compare `Equal`.
    fn ordering(&self, a: &T, b: &T) -> Ordering {
        match (self.goes_right(a, b), self.goes_right(b, a)) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

/// Decides whether a value names a node for lookup and removal.
pub trait Equal<T: ?Sized> {
    /// Returns `true` if `a` and `b` are the same entry.
    fn equal(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Order<T> for F where F: Fn(&T, &T) -> bool {
    fn goes_right(&self, value: &T, node: &T) -> bool { self(value, node) }
}

impl<T: ?Sized, F> Equal<T> for F where F: Fn(&T, &T) -> bool {
    fn equal(&self, a: &T, b: &T) -> bool { self(a, b) }
}

/// Routes a value right when the comparator orders it after the node.
///
/// Values that compare equal to a node are routed left. This is the default order of a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct After<C>(pub C);

/// Routes a value right when the comparator orders it after or equal to the node.
///
/// # Examples
///
/// ```
/// use midtree::Tree;
/// use midtree::order::{AtOrAfter, Equivalent};
///
/// let mut tree = Tree::from_values_with(vec![2], AtOrAfter::natural(), Equivalent::natural());
/// tree.insert(2);
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.right().map(|node| *node.value()), Some(2));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AtOrAfter<C>(pub C);

/// Treats two values as the same entry when the comparator finds them equal.
///
/// This is the default equality of a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Equivalent<C>(pub C);

impl<T: Ord> After<Natural<T>> {
    /// Orders values by their natural order.
    pub fn natural() -> Self { After(compare::natural()) }
}

impl<T: Ord> AtOrAfter<Natural<T>> {
    /// Orders values by their natural order, routing equal values right.
    pub fn natural() -> Self { AtOrAfter(compare::natural()) }
}

impl<T: Ord> Equivalent<Natural<T>> {
    /// Compares values by their natural order.
    pub fn natural() -> Self { Equivalent(compare::natural()) }
}

impl<T: ?Sized, C> Order<T> for After<C> where C: Compare<T> {
    fn goes_right(&self, value: &T, node: &T) -> bool { self.0.compares_gt(value, node) }
}

impl<T: ?Sized, C> Order<T> for AtOrAfter<C> where C: Compare<T> {
    fn goes_right(&self, value: &T, node: &T) -> bool { self.0.compares_ge(value, node) }
}

impl<T: ?Sized, C> Equal<T> for Equivalent<C> where C: Compare<T> {
    fn equal(&self, a: &T, b: &T) -> bool { self.0.compares_eq(a, b) }
}

#[cfg(test)]
mod test {
    use compare::{Compare, natural};
    use std::cmp::Ordering::*;
    use super::{After, AtOrAfter, Equal, Equivalent, Order};

    #[test]
    fn after_routes_equal_values_left() {
        let order = After::natural();
        assert!(order.goes_right(&2, &1));
        assert!(!order.goes_right(&1, &1));
        assert!(!order.goes_right(&0, &1));
    }

    #[test]
    fn at_or_after_routes_equal_values_right() {
        let order = AtOrAfter::natural();
        assert!(order.goes_right(&2, &1));
        assert!(order.goes_right(&1, &1));
        assert!(!order.goes_right(&0, &1));
    }

    #[test]
    fn ordering_is_total_for_both_biases() {
        assert_eq!(After::natural().ordering(&1, &2), Less);
        assert_eq!(After::natural().ordering(&2, &2), Equal);
        assert_eq!(AtOrAfter::natural().ordering(&2, &2), Equal);
        assert_eq!(AtOrAfter::natural().ordering(&3, &2), Greater);
    }

    #[test]
    fn reversed_comparator() {
        let order = After(natural().rev());
        assert!(order.goes_right(&1, &2));
        assert!(Equivalent(natural().rev()).equal(&4, &4));
    }

    #[test]
    fn closures() {
        let by_len = |a: &&str, b: &&str| a.len() > b.len();
        assert!(by_len.goes_right(&"abc", &"ab"));

        let same_len = |a: &&str, b: &&str| a.len() == b.len();
        assert!(Equal::equal(&same_len, &"ab", &"cd"));
    }
}
