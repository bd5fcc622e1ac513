//! Depth-first and breadth-first walks over a subtree.
//!
//! Every order comes in two forms: `for_each_*` visits every node, and `try_for_each_*` stops at
//! the first error returned by the callback and hands it back.

use std::collections::VecDeque;
use std::convert::Infallible;
use super::Node;

fn infallible<'a, T, F>(mut f: F) -> impl FnMut(&'a Node<T>) -> Result<(), Infallible>
    where T: 'a, F: FnMut(&'a Node<T>) {

    move |node: &'a Node<T>| -> Result<(), Infallible> { f(node); Ok(()) }
}

fn pre_order<'a, T, F, E>(node: &'a Node<T>, f: &mut F) -> Result<(), E>
    where F: FnMut(&'a Node<T>) -> Result<(), E> {

    f(node)?;
    if let Some(left) = node.left() { pre_order(left, f)?; }
    if let Some(right) = node.right() { pre_order(right, f)?; }
    Ok(())
}

fn in_order<'a, T, F, E>(node: &'a Node<T>, f: &mut F) -> Result<(), E>
    where F: FnMut(&'a Node<T>) -> Result<(), E> {

    if let Some(left) = node.left() { in_order(left, f)?; }
    f(node)?;
    if let Some(right) = node.right() { in_order(right, f)?; }
    Ok(())
}

fn post_order<'a, T, F, E>(node: &'a Node<T>, f: &mut F) -> Result<(), E>
    where F: FnMut(&'a Node<T>) -> Result<(), E> {

    if let Some(left) = node.left() { post_order(left, f)?; }
    if let Some(right) = node.right() { post_order(right, f)?; }
    f(node)
}

impl<T> Node<T> {
    /// Visits the subtree breadth-first, left to right within each level.
    pub fn for_each_level_order<'a, F>(&'a self, f: F) where F: FnMut(&'a Node<T>) {
        match self.try_for_each_level_order(infallible(f)) {
            Ok(()) => (),
            Err(never) => match never {},
        }
    }

    /// Visits the subtree breadth-first, stopping at the first error.
    pub fn try_for_each_level_order<'a, F, E>(&'a self, mut f: F) -> Result<(), E>
        where F: FnMut(&'a Node<T>) -> Result<(), E> {

        let mut queue = VecDeque::new();
        queue.push_back(self);

        while let Some(node) = queue.pop_front() {
            queue.extend(node.left());
            queue.extend(node.right());
            f(node)?;
        }

        Ok(())
    }

    /// Visits a node, then its left subtree, then its right subtree.
    pub fn for_each_pre_order<'a, F>(&'a self, f: F) where F: FnMut(&'a Node<T>) {
        match self.try_for_each_pre_order(infallible(f)) {
            Ok(()) => (),
            Err(never) => match never {},
        }
    }

    /// Visits the subtree in pre-order, stopping at the first error.
    pub fn try_for_each_pre_order<'a, F, E>(&'a self, mut f: F) -> Result<(), E>
        where F: FnMut(&'a Node<T>) -> Result<(), E> {

        pre_order(self, &mut f)
    }

    /// Visits the left subtree, then a node, then its right subtree.
    ///
    /// Values are visited in the order the tree sorts them.
    pub fn for_each_in_order<'a, F>(&'a self, f: F) where F: FnMut(&'a Node<T>) {
        match self.try_for_each_in_order(infallible(f)) {
            Ok(()) => (),
            Err(never) => match never {},
        }
    }

    /// Visits the subtree in order, stopping at the first error.
    pub fn try_for_each_in_order<'a, F, E>(&'a self, mut f: F) -> Result<(), E>
        where F: FnMut(&'a Node<T>) -> Result<(), E> {

        in_order(self, &mut f)
    }

    /// Visits the left subtree, then the right subtree, then a node.
    pub fn for_each_post_order<'a, F>(&'a self, f: F) where F: FnMut(&'a Node<T>) {
        match self.try_for_each_post_order(infallible(f)) {
            Ok(()) => (),
            Err(never) => match never {},
        }
    }

    /// Visits the subtree in post-order, stopping at the first error.
    pub fn try_for_each_post_order<'a, F, E>(&'a self, mut f: F) -> Result<(), E>
        where F: FnMut(&'a Node<T>) -> Result<(), E> {

        post_order(self, &mut f)
    }
}
