use midtree::Tree;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn minimal_height(n: usize) -> usize { (usize::BITS - n.leading_zeros()) as usize }

#[quickcheck]
fn build_is_sorted(values: Vec<i32>) -> bool {
    let tree = Tree::from_values(values.clone());
    let mut sorted = values;
    sorted.sort();
    tree.iter().cloned().collect::<Vec<_>>() == sorted
}

#[quickcheck]
fn build_has_minimal_height(values: Vec<i32>) -> bool {
    let tree = Tree::from_values(values.clone());
    tree.len() == values.len() && tree.tree_height() == minimal_height(values.len()) &&
        tree.is_balanced()
}

#[quickcheck]
fn inserted_values_are_found(tree: Tree<u8>, value: u8) -> bool {
    let mut tree = tree;
    let len = tree.len();
    tree.insert(value);
    tree.contains(&value) && tree.len() == len + 1
}

#[quickcheck]
fn in_order_traversal_is_sorted(tree: Tree<u8>) -> bool {
    let mut values = vec![];
    tree.for_each_in_order(|node| values.push(*node.value()));
    values.windows(2).all(|pair| pair[0] <= pair[1]) && values.len() == tree.len()
}

#[quickcheck]
fn removing_every_value_empties_the_tree(values: Vec<u8>) -> bool {
    let mut tree = Tree::new();
    tree.extend(values.iter().cloned());

    for (removed, value) in values.iter().enumerate() {
        if tree.remove(value) != Some(*value) || tree.len() != values.len() - removed - 1 {
            return false;
        }
    }

    tree.is_empty() && tree.root().is_none()
}

#[quickcheck]
fn removed_value_is_gone(values: Vec<u8>) -> TestResult {
    let mut distinct = values;
    distinct.sort();
    distinct.dedup();
    if distinct.is_empty() { return TestResult::discard(); }

    let mut tree = Tree::new();
    tree.extend(distinct.iter().rev().cloned());
    let target = distinct[distinct.len() / 2];

    TestResult::from_bool(tree.remove(&target) == Some(target) && tree.find(&target).is_none() &&
                          tree.len() == distinct.len() - 1)
}

#[quickcheck]
fn rebalance_restores_minimal_height(tree: Tree<u8>) -> bool {
    let mut tree = tree;
    let before: Vec<_> = tree.iter().cloned().collect();

    tree.rebalance();
    let after: Vec<_> = tree.iter().cloned().collect();

    before == after && tree.is_balanced() && tree.tree_height() == minimal_height(tree.len())
}

#[quickcheck]
fn rebalance_is_idempotent(tree: Tree<u8>) -> bool {
    let mut tree = tree;
    tree.rebalance();
    let once = tree.to_string();
    tree.rebalance();
    tree.to_string() == once
}

#[quickcheck]
fn depth_and_height_meet_at_the_root(tree: Tree<u8>) -> TestResult {
    let root = match tree.root() {
        None => return TestResult::discard(),
        Some(root) => *root.value(),
    };

    TestResult::from_bool(tree.height(&root) == Some(tree.tree_height()) &&
                          tree.depth(&root) == Some(1))
}

#[quickcheck]
fn clone_is_independent(tree: Tree<u8>, value: u8) -> bool {
    let mut copy = tree.clone();
    copy.insert(value);
    copy.len() == tree.len() + 1 &&
        tree.iter().cloned().collect::<Vec<_>>().len() == tree.len()
}
