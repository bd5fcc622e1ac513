mod iter;
mod print;
mod traverse;

#[cfg(test)]
mod test;

use log::trace;
use std::cmp;
use std::fmt::{self, Debug};
use std::ptr::{self, NonNull};
use super::order::{Equal, Order};

pub use self::iter::{IntoIter, Iter};
pub use self::print::Pretty;

/// An owning child link.
///
/// Nodes are allocated with `Box::leak` and only turned back into boxes when they leave the tree,
/// so the parent references children hold stay valid while the tree is mutated around them.
pub type Link<T> = Option<NonNull<Node<T>>>;

/// The side of its parent a node hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The parent's left child.
    Left,
    /// The parent's right child.
    Right,
}

impl Side {
    /// Returns the other side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// Non-owning. Points at the node whose `side` link owns the child holding it.
struct Parent<T> {
    node: NonNull<Node<T>>,
    side: Side,
}

impl<T> Clone for Parent<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Parent<T> {}

/// A vertex of a [`Tree`](crate::Tree).
///
/// Every node caches the number of nodes and the height of the subtree rooted at it, and keeps a
/// back-reference to its parent. Nodes are handed out by lookups and traversals; any node can act
/// as the root of a traversal over its own subtree.
pub struct Node<T> {
    left: Link<T>,
    right: Link<T>,
    parent: Option<Parent<T>>,
    size: usize,
    height: usize,
    value: T,
}

// Links are only followed while the owning tree is borrowed, so a node is exactly as thread-safe
// as the values it holds.
unsafe impl<T> Send for Node<T> where T: Send {}
unsafe impl<T> Sync for Node<T> where T: Sync {}

/// Borrows the node behind a link for as long as the link itself is borrowed.
///
/// Every link stored in a tree points at a live node owned by that tree.
pub fn link_ref<T>(link: &Link<T>) -> Option<&Node<T>> {
    link.map(|node| unsafe { &*node.as_ptr() })
}

fn size<T>(link: &Link<T>) -> usize { link_ref(link).map_or(0, |node| node.size) }

fn height<T>(link: &Link<T>) -> usize { link_ref(link).map_or(0, |node| node.height) }

impl<T> Node<T> {
    fn alloc(node: Node<T>) -> NonNull<Node<T>> { NonNull::from(Box::leak(Box::new(node))) }

    /// Takes back ownership of a node that has been unlinked.
    unsafe fn free(node: NonNull<Node<T>>) -> Box<Node<T>> { Box::from_raw(node.as_ptr()) }

    fn leaf(value: T, parent: Option<Parent<T>>) -> Node<T> {
        Node { left: None, right: None, parent: parent, size: 1, height: 1, value: value }
    }

    /// Allocates a node over two detached subtrees, adopting both.
    fn join(left: Link<T>, value: T, right: Link<T>) -> NonNull<Node<T>> {
        let node = Node::alloc(Node {
            left: left,
            right: right,
            parent: None,
            size: 1 + size(&left) + size(&right),
            height: 1 + cmp::max(height(&left), height(&right)),
            value: value,
        });

        unsafe {
            adopt(node, Side::Left, left);
            adopt(node, Side::Right, right);
        }

        node
    }

    fn link(&self, side: Side) -> Link<T> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Returns a reference to the node's value.
    pub fn value(&self) -> &T { &self.value }

    /// Returns the node's left child, if any.
    pub fn left(&self) -> Option<&Node<T>> { link_ref(&self.left) }

    /// Returns the node's right child, if any.
    pub fn right(&self) -> Option<&Node<T>> { link_ref(&self.right) }

    /// Returns the node's child on the given side, if any.
    pub fn child(&self, side: Side) -> Option<&Node<T>> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// Returns the node's parent, or `None` if the node is the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use midtree::{Side, Tree};
    ///
    /// let tree = Tree::from_values(vec![25, 50, 75]);
    /// let node = tree.find(&75).unwrap();
    ///
    /// assert_eq!(node.parent().map(|parent| *parent.value()), Some(50));
    /// assert_eq!(node.side(), Some(Side::Right));
    /// assert!(tree.root().unwrap().parent().is_none());
    /// ```
    pub fn parent(&self) -> Option<&Node<T>> {
        self.parent.map(|parent| unsafe { &*parent.node.as_ptr() })
    }

    /// Returns which side of its parent the node hangs from, or `None` for the root.
    pub fn side(&self) -> Option<Side> { self.parent.map(|parent| parent.side) }

    /// Returns the number of nodes in the subtree rooted at this node, including itself.
    pub fn size(&self) -> usize { self.size }

    /// Returns the number of nodes on the longest downward path from this node, including itself.
    ///
    /// A leaf has height 1.
    pub fn height(&self) -> usize { self.height }

    /// Checks if the node has no children.
    pub fn is_leaf(&self) -> bool { self.left.is_none() && self.right.is_none() }

    /// Returns the height of the left subtree minus the height of the right subtree.
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Returns the number of nodes on the path from the root to this node, including both.
    ///
    /// The root is at level 1. Unlike [`Tree::depth`](crate::Tree::depth),
    /// which derives a depth from heights, this walks the parent references.
    pub fn level(&self) -> usize {
        let mut level = 1;
        let mut node = self;
        while let Some(parent) = node.parent() {
            level += 1;
            node = parent;
        }
        level
    }

    /// Checks if no node in this subtree has children whose heights differ by more than one.
    ///
    /// The check stops at the first unbalanced node found in post-order.
    pub fn is_balanced(&self) -> bool {
        self.try_for_each_post_order(|node| if node.balance_factor().abs() > 1 { Err(()) } else { Ok(()) })
            .is_ok()
    }

    /// Returns an iterator over the subtree's values in order.
    pub fn iter(&self) -> Iter<'_, T> { Iter::new(Some(self)) }

    /// Returns a value that renders this subtree with `Display`.
    pub fn pretty(&self) -> Pretty<'_, T> { Pretty::new(self) }
}

impl<T> Debug for Node<T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("size", &self.size)
            .field("height", &self.height)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

/// Stores `child` in the `side` link of `node` and points the child back at it.
unsafe fn adopt<T>(node: NonNull<Node<T>>, side: Side, child: Link<T>) {
    match side {
        Side::Left => (*node.as_ptr()).left = child,
        Side::Right => (*node.as_ptr()).right = child,
    }
    if let Some(child) = child {
        (*child.as_ptr()).parent = Some(Parent { node: node, side: side });
    }
}

/// Builds a minimal-height subtree from values that are already in order.
///
/// Each range is split at its midpoint, taking the lower of the two middles on even lengths.
pub fn build<T, I>(mut values: I) -> Link<T> where I: ExactSizeIterator<Item = T> {
    fn build_range<T, I>(values: &mut I, len: usize) -> Link<T> where I: Iterator<Item = T> {
        if len == 0 { return None; }

        let left_len = (len + 1) / 2 - 1;
        let left = build_range(values, left_len);
        let value = values.next()?;
        let right = build_range(values, len - left_len - 1);
        Some(Node::join(left, value, right))
    }

    let len = values.len();
    let root = build_range(&mut values, len);
    trace!("built {} nodes with height {}", len, height(&root));
    root
}

/// Deep-copies a subtree, keeping its shape.
///
/// The copy is made with an explicit stack, so skewed trees of any height can be cloned.
pub fn clone_link<T>(link: &Link<T>) -> Link<T> where T: Clone {
    fn copy_of<T>(node: &Node<T>) -> NonNull<Node<T>> where T: Clone {
        Node::alloc(Node {
            left: None,
            right: None,
            parent: None,
            size: node.size,
            height: node.height,
            value: node.value.clone(),
        })
    }

    let source = link_ref(link)?;
    let root = copy_of(source);
    let mut stack = vec![(source, root)];

    while let Some((source, copy)) = stack.pop() {
        for &side in &[Side::Left, Side::Right] {
            if let Some(child) = source.child(side) {
                let child_copy = copy_of(child);
                unsafe { adopt(copy, side, Some(child_copy)); }
                stack.push((child, child_copy));
            }
        }
    }

    Some(root)
}

pub fn find<'a, T, O, E>(mut link: Option<&'a Node<T>>, order: &O, equal: &E, value: &T)
    -> Option<&'a Node<T>> where O: Order<T>, E: Equal<T> {

    while let Some(node) = link {
        if equal.equal(value, &node.value) { return Some(node); }
        link = if order.goes_right(value, &node.value) { node.right() } else { node.left() };
    }

    None
}

/// Hangs a new leaf at the end of the value's search path and refreshes its ancestors.
pub fn insert<T, O>(root: &mut Link<T>, order: &O, value: T) where O: Order<T> {
    let mut parent = None;
    let mut link = *root;

    while let Some(ptr) = link {
        let node = unsafe { &*ptr.as_ptr() };
        let side = if order.goes_right(&value, &node.value) { Side::Right } else { Side::Left };
        parent = Some(Parent { node: ptr, side: side });
        link = node.link(side);
    }

    let leaf = Node::alloc(Node::leaf(value, parent));

    match parent {
        None => *root = Some(leaf),
        Some(parent) => unsafe {
            adopt(parent.node, parent.side, Some(leaf));
            propagate(parent.node);
        },
    }
}

/// Removes the first node on the search path whose value is equal to `value`.
pub fn remove<T, O, E>(root: &mut Link<T>, order: &O, equal: &E, value: &T) -> Option<T>
    where O: Order<T>, E: Equal<T> {

    let mut link = *root;
    let target = loop {
        let ptr = link?;
        let node = unsafe { &*ptr.as_ptr() };
        if equal.equal(value, &node.value) { break ptr; }
        link = if order.goes_right(value, &node.value) { node.right } else { node.left };
    };

    Some(unsafe { detach(root, target) })
}

// A node with two children trades values with its in-order neighbour on the taller side, and the
// neighbour, which has at most one child, is unlinked in its place.
unsafe fn detach<T>(root: &mut Link<T>, target: NonNull<Node<T>>) -> T {
    let doomed = match ((*target.as_ptr()).left, (*target.as_ptr()).right) {
        (Some(left), Some(right)) => {
            let neighbour = if (*left.as_ptr()).height >= (*right.as_ptr()).height {
                trace!("removing a branch through its predecessor");
                Right::extremum(left)
            } else {
                trace!("removing a branch through its successor");
                Left::extremum(right)
            };
            ptr::swap(ptr::addr_of_mut!((*target.as_ptr()).value),
                      ptr::addr_of_mut!((*neighbour.as_ptr()).value));
            neighbour
        }
        _ => target,
    };

    splice(root, doomed)
}

// Replaces a node that has at most one child by that child.
unsafe fn splice<T>(root: &mut Link<T>, doomed: NonNull<Node<T>>) -> T {
    let node = *Node::free(doomed);
    let child = node.left.or(node.right);

    match node.parent {
        None => {
            if let Some(child) = child { (*child.as_ptr()).parent = None; }
            *root = child;
        }
        Some(parent) => {
            adopt(parent.node, parent.side, child);
            propagate(parent.node);
        }
    }

    node.value
}

// Recomputes the cached stats of a node and of all its ancestors.
unsafe fn propagate<T>(mut node: NonNull<Node<T>>) {
    loop {
        let current = &mut *node.as_ptr();
        current.size = 1 + size(&current.left) + size(&current.right);
        current.height = 1 + cmp::max(height(&current.left), height(&current.right));
        match current.parent {
            Some(parent) => node = parent.node,
            None => break,
        }
    }
}

pub trait Dir: Sized {
    const SIDE: Side;

    /// Follows this direction from `node` for as long as there is a child.
    fn extremum_ref<T>(mut node: &Node<T>) -> &Node<T> {
        while let Some(child) = node.child(Self::SIDE) { node = child; }
        node
    }

    unsafe fn extremum<T>(mut node: NonNull<Node<T>>) -> NonNull<Node<T>> {
        while let Some(child) = (*node.as_ptr()).link(Self::SIDE) { node = child; }
        node
    }
}

pub enum Left {}

impl Dir for Left {
    const SIDE: Side = Side::Left;
}

pub enum Right {}

impl Dir for Right {
    const SIDE: Side = Side::Right;
}
