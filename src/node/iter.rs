use super::{link_ref, Link, Node};

/// A handle on a node that an in-order walk can split into its children and its item.
trait NodeRef: Sized {
    type Item;
    fn left(&mut self) -> Option<Self>;
    fn right(&mut self) -> Option<Self>;
    fn item(self) -> Self::Item;
}

impl<'a, T> NodeRef for &'a Node<T> {
    type Item = &'a T;
    fn left(&mut self) -> Option<&'a Node<T>> { Node::left(*self) }
    fn right(&mut self) -> Option<&'a Node<T>> { Node::right(*self) }
    fn item(self) -> &'a T { &self.value }
}

fn reclaim<T>(link: Link<T>) -> Option<Box<Node<T>>> { link.map(|node| unsafe { Node::free(node) }) }

// Children are reclaimed as they are detached, so every node is freed exactly once and the boxes
// popped off the stack are leaves.
impl<T> NodeRef for Box<Node<T>> {
    type Item = T;
    fn left(&mut self) -> Option<Box<Node<T>>> { reclaim(self.left.take()) }
    fn right(&mut self) -> Option<Box<Node<T>>> { reclaim(self.right.take()) }
    fn item(self) -> T { self.value }
}

#[derive(Clone)]
struct Walk<N> where N: NodeRef {
    stack: Vec<N>,
    size: usize,
}

impl<N> Walk<N> where N: NodeRef {
    fn new(root: Option<N>, size: usize) -> Self {
        let mut walk = Walk { stack: vec![], size: size };
        walk.descend(root);
        walk
    }

    fn descend(&mut self, mut link: Option<N>) {
        while let Some(mut node) = link {
            link = node.left();
            self.stack.push(node);
        }
    }
}

impl<N> Iterator for Walk<N> where N: NodeRef {
    type Item = N::Item;

    fn next(&mut self) -> Option<N::Item> {
        let mut node = self.stack.pop()?;
        let right = node.right();
        self.descend(right);
        self.size -= 1;
        Some(node.item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

/// An iterator over a subtree's values in order.
pub struct Iter<'a, T: 'a>(Walk<&'a Node<T>>);

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Iter(Walk::new(root, root.map_or(0, |node| node.size)))
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// An iterator that moves a tree's values out in order.
pub struct IntoIter<T>(Walk<Box<Node<T>>>);

impl<T> IntoIter<T> {
    /// Takes ownership of every node reachable from `root`.
    pub(crate) fn new(root: Link<T>) -> Self {
        let size = link_ref(&root).map_or(0, |node| node.size);
        IntoIter(Walk::new(reclaim(root), size))
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
