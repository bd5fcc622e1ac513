use std::fmt::{self, Display};
use super::Node;

/// Renders a subtree sideways, one node per line.
///
/// The right subtree is printed above a node and the left subtree below it, so reading the output
/// from bottom to top visits the values in order.
///
/// # Examples
///
/// ```
/// let tree = midtree::Tree::from_values(vec![1, 2, 3]);
/// let rendered = tree.root().unwrap().pretty().to_string();
///
/// assert_eq!(rendered, "│     ┌──── 3\n└──── 2\n      └──── 1\n");
/// ```
pub struct Pretty<'a, T: 'a> {
    root: &'a Node<T>,
}

impl<'a, T> Pretty<'a, T> {
    pub(crate) fn new(root: &'a Node<T>) -> Self { Pretty { root: root } }
}

fn write_node<T>(f: &mut fmt::Formatter, node: &Node<T>, prefix: &str, is_left: bool)
    -> fmt::Result where T: Display {

    if let Some(right) = node.right() {
        let prefix = format!("{}{}", prefix, if is_left { "│     " } else { "      " });
        write_node(f, right, &prefix, false)?;
    }

    writeln!(f, "{}{}{}", prefix, if is_left { "└──── " } else { "┌──── " }, node.value)?;

    if let Some(left) = node.left() {
        let prefix = format!("{}{}", prefix, if is_left { "      " } else { "│     " });
        write_node(f, left, &prefix, true)?;
    }

    Ok(())
}

impl<'a, T> Display for Pretty<'a, T> where T: Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write_node(f, self.root, "", true) }
}
