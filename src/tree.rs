//! A binary search tree built by midpoint splitting, with explicit rebalancing.

use compare::Natural;
use log::debug;
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;
use super::node::{self, Dir, IntoIter, Iter, Left, Link, Node, Right};
use super::order::{After, Equal, Equivalent, Order};

/// A binary search tree that keeps subtree sizes and heights and is rebalanced on request.
///
/// Values are routed by two predicates: an [`Order`] that sends a value into a node's right
/// subtree, and an [`Equal`] that decides which node a lookup or removal names. The defaults order
/// values naturally, routing equal values left.
///
/// Insertion and removal never restructure the tree beyond the affected path, so a tree can grow
/// arbitrarily skewed. [`rebalance`](#method.rebalance) rebuilds it with minimal height in linear
/// time.
///
/// The behavior of the tree is unspecified if a value's ordering relative to any other value
/// changes while the value is in the tree.
pub struct Tree<T, O = After<Natural<T>>, E = Equivalent<Natural<T>>> {
    root: Link<T>,
    order: O,
    equal: E,
    marker: PhantomData<Box<Node<T>>>,
}

// The tree owns its nodes outright; links are only followed through `&self` or `&mut self`.
unsafe impl<T, O, E> Send for Tree<T, O, E> where T: Send, O: Send, E: Send {}
unsafe impl<T, O, E> Sync for Tree<T, O, E> where T: Sync, O: Sync, E: Sync {}

impl<T> Tree<T> where T: Ord {
    /// Creates an empty tree ordered according to the natural order of its values.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = midtree::Tree::new();
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn new() -> Self { Tree::with_predicates(After::natural(), Equivalent::natural()) }

    /// Builds a minimal-height tree from the given values, ordered naturally.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree = midtree::Tree::from_values(vec![75, 25, 50]);
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(*root.value(), 50);
    /// assert_eq!(root.size(), 3);
    /// assert_eq!(root.height(), 2);
    /// ```
    pub fn from_values<I>(values: I) -> Self where I: IntoIterator<Item = T> {
        Tree::from_values_with(values, After::natural(), Equivalent::natural())
    }
}

impl<T, O, E> Tree<T, O, E> where O: Order<T>, E: Equal<T> {
    /// Creates an empty tree that routes values with the given predicates.
    pub fn with_predicates(order: O, equal: E) -> Self {
        Tree { root: None, order: order, equal: equal, marker: PhantomData }
    }

    /// Builds a minimal-height tree from the given values, routed with the given predicates.
    ///
    /// The values are sorted with `order` and the tree is built by repeatedly making the middle
    /// of a range its root; on even-length ranges the lower middle is chosen. A tree of `n`
    /// values gets height `ceil(log2(n + 1))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use midtree::Tree;
    ///
    /// let tree = Tree::from_values_with(vec!["ccc", "a", "bb"],
    ///                                   |a: &&str, b: &&str| a.len() > b.len(),
    ///                                   |a: &&str, b: &&str| a.len() == b.len());
    ///
    /// assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
    /// assert!(tree.contains(&"zz"));
    /// ```
    pub fn from_values_with<I>(values: I, order: O, equal: E) -> Self
        where I: IntoIterator<Item = T> {

        let mut values: Vec<T> = values.into_iter().collect();
        values.sort_by(|a, b| order.ordering(a, b));
        Tree { root: node::build(values.into_iter()), order: order, equal: equal, marker: PhantomData }
    }

    /// Checks if the tree is empty.
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize { self.root().map_or(0, Node::size) }

    /// Returns the height of the tree, or 0 if it is empty.
    pub fn tree_height(&self) -> usize { self.root().map_or(0, Node::height) }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Node<T>> { node::link_ref(&self.root) }

    /// Returns a reference to the tree's ordering predicate.
    pub fn order(&self) -> &O { &self.order }

    /// Returns a reference to the tree's equality predicate.
    pub fn equal(&self) -> &E { &self.equal }

    /// Removes all values from the tree.
    pub fn clear(&mut self) { drop(IntoIter::new(self.root.take())); }

    /// Inserts a value as a new leaf.
    ///
    /// The value descends right wherever the ordering predicate says so and left otherwise.
    /// Values equal to ones already in the tree are not rejected. The tree is not rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = midtree::Tree::from_values(vec![25, 50, 75]);
    /// tree.insert(10);
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.size(), 4);
    /// assert_eq!(root.height(), 3);
    /// assert_eq!(tree.find(&10).unwrap().parent().map(|node| *node.value()), Some(25));
    /// ```
    pub fn insert(&mut self, value: T) { node::insert(&mut self.root, &self.order, value) }

    /// Removes a value equal to the given one and returns it, or returns `None` if the tree does
    /// not contain such a value.
    ///
    /// A node with two children takes the value of its in-order predecessor when its left subtree
    /// is at least as tall as its right one, and of its in-order successor otherwise; that
    /// neighbour's node is then unlinked.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = midtree::Tree::from_values(vec![25, 50, 75]);
    ///
    /// assert_eq!(tree.remove(&50), Some(50));
    /// assert_eq!(tree.remove(&50), None);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(*tree.root().unwrap().value(), 25);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        node::remove(&mut self.root, &self.order, &self.equal, value)
    }

    /// Returns the node holding a value equal to the given one, or `None` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree = midtree::Tree::from_values(vec![25, 50, 75]);
    ///
    /// let node = tree.find(&75).unwrap();
    /// assert_eq!(*node.value(), 75);
    /// assert_eq!(node.height(), 1);
    /// assert!(tree.find(&60).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        node::find(self.root(), &self.order, &self.equal, value)
    }

    /// Checks if the tree contains a value equal to the given one.
    pub fn contains(&self, value: &T) -> bool { self.find(value).is_some() }

    /// Returns the height of the node holding the given value, or `None` if there is none.
    pub fn height(&self, value: &T) -> Option<usize> { self.find(value).map(Node::height) }

    /// Returns the depth of the node holding the given value, or `None` if there is none.
    ///
    /// The depth is the tree's height minus the node's height, plus one, so the root has depth
    /// 1. In a skewed tree this can be smaller than the node's distance from the root; see
    /// [`Node::level`] for that.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree = midtree::Tree::from_values(1..8);
    ///
    /// assert_eq!(tree.depth(&4), Some(1));
    /// assert_eq!(tree.depth(&2), Some(2));
    /// assert_eq!(tree.depth(&7), Some(3));
    /// assert_eq!(tree.depth(&8), None);
    /// ```
    pub fn depth(&self, value: &T) -> Option<usize> {
        let height = self.height(value)?;
        Some(self.tree_height() - height + 1)
    }

    /// Checks if no node's subtrees differ in height by more than one.
    ///
    /// An empty tree is balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = midtree::Tree::from_values(vec![1]);
    /// assert!(tree.is_balanced());
    ///
    /// tree.insert(2);
    /// tree.insert(3);
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool { self.root().map_or(true, Node::is_balanced) }

    /// Rebuilds the tree with minimal height.
    ///
    /// The values are taken out in order, which is already sorted, and the tree is rebuilt from
    /// them exactly as [`from_values_with`](#method.from_values_with) builds it. This costs
    /// linear time; no rotations are ever performed.
    pub fn rebalance(&mut self) {
        let before = self.tree_height();
        let values = IntoIter::new(self.root.take());
        let len = values.len();
        self.root = node::build(values);
        debug!("rebalanced {} nodes: height {} -> {}", len, before, self.tree_height());
    }

    /// Returns a reference to the tree's minimum value, or `None` if it is empty.
    pub fn min(&self) -> Option<&T> { self.root().map(|root| Left::extremum_ref(root).value()) }

    /// Returns a reference to the tree's maximum value, or `None` if it is empty.
    pub fn max(&self) -> Option<&T> { self.root().map(|root| Right::extremum_ref(root).value()) }

    /// Returns an iterator over the tree's values in order.
    pub fn iter(&self) -> Iter<'_, T> { Iter::new(self.root()) }

    /// Visits every node breadth-first, left to right within each level.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree = midtree::Tree::from_values(1..8);
    /// let mut values = vec![];
    ///
    /// tree.for_each_level_order(|node| values.push(*node.value()));
    /// assert_eq!(values, [4, 2, 6, 1, 3, 5, 7]);
    /// ```
    pub fn for_each_level_order<'a, F>(&'a self, f: F) where F: FnMut(&'a Node<T>) {
        if let Some(root) = self.root() { root.for_each_level_order(f); }
    }

    /// Visits every node breadth-first, stopping at the first error.
    pub fn try_for_each_level_order<'a, F, R>(&'a self, f: F) -> Result<(), R>
        where F: FnMut(&'a Node<T>) -> Result<(), R> {

        self.root().map_or(Ok(()), |root| root.try_for_each_level_order(f))
    }

    /// Visits every node before its subtrees, left subtree first.
    pub fn for_each_pre_order<'a, F>(&'a self, f: F) where F: FnMut(&'a Node<T>) {
        if let Some(root) = self.root() { root.for_each_pre_order(f); }
    }

    /// Visits every node in pre-order, stopping at the first error.
    pub fn try_for_each_pre_order<'a, F, R>(&'a self, f: F) -> Result<(), R>
        where F: FnMut(&'a Node<T>) -> Result<(), R> {

        self.root().map_or(Ok(()), |root| root.try_for_each_pre_order(f))
    }

    /// Visits every node between its left and right subtrees, so values come out sorted.
    pub fn for_each_in_order<'a, F>(&'a self, f: F) where F: FnMut(&'a Node<T>) {
        if let Some(root) = self.root() { root.for_each_in_order(f); }
    }

    /// Visits every node in order, stopping at the first error.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree = midtree::Tree::from_values(1..10);
    /// let mut seen = vec![];
    ///
    /// let result = tree.try_for_each_in_order(|node| {
    ///     if *node.value() > 3 { return Err(*node.value()); }
    ///     seen.push(*node.value());
    ///     Ok(())
    /// });
    ///
    /// assert_eq!(result, Err(4));
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    pub fn try_for_each_in_order<'a, F, R>(&'a self, f: F) -> Result<(), R>
        where F: FnMut(&'a Node<T>) -> Result<(), R> {

        self.root().map_or(Ok(()), |root| root.try_for_each_in_order(f))
    }

    /// Visits every node after its subtrees, left subtree first.
    pub fn for_each_post_order<'a, F>(&'a self, f: F) where F: FnMut(&'a Node<T>) {
        if let Some(root) = self.root() { root.for_each_post_order(f); }
    }

    /// Visits every node in post-order, stopping at the first error.
    pub fn try_for_each_post_order<'a, F, R>(&'a self, f: F) -> Result<(), R>
        where F: FnMut(&'a Node<T>) -> Result<(), R> {

        self.root().map_or(Ok(()), |root| root.try_for_each_post_order(f))
    }
}

// Dropping a skewed tree node by node would recurse once per level.
impl<T, O, E> Drop for Tree<T, O, E> {
    fn drop(&mut self) { drop(IntoIter::new(self.root.take())); }
}

impl<T, O, E> Clone for Tree<T, O, E> where T: Clone, O: Clone, E: Clone {
    fn clone(&self) -> Self {
        Tree {
            root: node::clone_link(&self.root),
            order: self.order.clone(),
            equal: self.equal.clone(),
            marker: PhantomData,
        }
    }
}

impl<T, O, E> Debug for Tree<T, O, E> where T: Debug, O: Order<T>, E: Equal<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_set().entries(self.iter()).finish() }
}

/// Renders the tree sideways, right subtrees above left ones.
///
/// # Examples
///
/// ```
/// let tree = midtree::Tree::from_values(vec![25, 50, 75]);
///
/// assert_eq!(tree.to_string(), "│     ┌──── 75\n└──── 50\n      └──── 25\n");
/// ```
impl<T, O, E> Display for Tree<T, O, E> where T: Display, O: Order<T>, E: Equal<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.root() {
            Some(root) => Display::fmt(&root.pretty(), f),
            None => Ok(()),
        }
    }
}

impl<T, O, E> Default for Tree<T, O, E> where O: Order<T> + Default, E: Equal<T> + Default {
    fn default() -> Self { Tree::with_predicates(O::default(), E::default()) }
}

impl<T, O, E> Extend<T> for Tree<T, O, E> where O: Order<T>, E: Equal<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, it: I) {
        for value in it { self.insert(value); }
    }
}

impl<T, O, E> FromIterator<T> for Tree<T, O, E>
    where O: Order<T> + Default, E: Equal<T> + Default {

    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> Self {
        Tree::from_values_with(it, O::default(), E::default())
    }
}

impl<'a, T, O, E> IntoIterator for &'a Tree<T, O, E> where O: Order<T>, E: Equal<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, O, E> IntoIterator for Tree<T, O, E> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(mut self) -> IntoIter<T> { IntoIter::new(self.root.take()) }
}
