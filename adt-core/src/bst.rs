//! Binary search tree with parent links
//!
//! Provides:
//! - Ordered insert (duplicates routed left), lookup, min/max
//! - Predecessor/successor via subtree extremes or the parent climb
//! - Delete with in-order-predecessor copy-up for two-child nodes
//! - Iterative in-order, pre-order, and post-order traversal
//!
//! Nodes live in a slot arena and reference each other by index; the parent
//! link is a plain index rather than an owning edge, so no reference cycles
//! arise. The tree is deliberately unbalanced: every operation is O(height),
//! and a pathological insertion order degrades to O(n).

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::str::FromStr;

/// Error type for tree operations
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// Query or delete on a value the tree does not hold.
    NotFound,
    /// Traversal-order token that is not one of `inorder`, `preorder`,
    /// `postorder`.
    InvalidOrder(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NotFound => write!(f, "value not in tree"),
            TreeError::InvalidOrder(token) => write!(
                f,
                "not a valid traversal order: {:?} (options: inorder, preorder, postorder)",
                token
            ),
        }
    }
}

impl std::error::Error for TreeError {}

/// Order in which `traverse` visits nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraverseOrder {
    /// Left, self, right: yields values in ascending order.
    InOrder,
    /// Self, left, right.
    PreOrder,
    /// Left, right, self.
    PostOrder,
}

impl FromStr for TraverseOrder {
    type Err = TreeError;

    fn from_str(token: &str) -> Result<Self, TreeError> {
        match token {
            "inorder" => Ok(TraverseOrder::InOrder),
            "preorder" => Ok(TraverseOrder::PreOrder),
            "postorder" => Ok(TraverseOrder::PostOrder),
            other => Err(TreeError::InvalidOrder(other.to_string())),
        }
    }
}

/// Opaque handle to a node, returned by `lookup`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Unbalanced binary search tree over the node arena.
pub struct BinarySearchTree<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
}

impl<T> BinarySearchTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        BinarySearchTree {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The value behind a node handle, if the node still exists.
    pub fn value_of(&self, id: NodeId) -> Option<&T> {
        self.nodes
            .get(id.0)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.value)
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match &self.nodes[idx] {
            Some(node) => node,
            None => panic!("corrupt tree: slot {} is vacant", idx),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.nodes[idx] {
            Some(node) => node,
            None => panic!("corrupt tree: slot {} is vacant", idx),
        }
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Take a node out of the arena and recycle its slot.
    fn release(&mut self, idx: usize) -> Node<T> {
        match self.nodes[idx].take() {
            Some(node) => {
                self.free.push(idx);
                node
            }
            None => panic!("corrupt tree: releasing vacant slot {}", idx),
        }
    }

    fn subtree_min(&self, mut idx: usize) -> usize {
        while let Some(left) = self.node(idx).left {
            idx = left;
        }
        idx
    }

    fn subtree_max(&self, mut idx: usize) -> usize {
        while let Some(right) = self.node(idx).right {
            idx = right;
        }
        idx
    }

    /// The smallest value, or `None` on an empty tree.
    pub fn min(&self) -> Option<&T> {
        self.root
            .map(|root| &self.node(self.subtree_min(root)).value)
    }

    /// The largest value, or `None` on an empty tree.
    pub fn max(&self) -> Option<&T> {
        self.root
            .map(|root| &self.node(self.subtree_max(root)).value)
    }

    /// Visit every value in the given order.
    ///
    /// Traversal is iterative with an explicit stack, so a degenerate
    /// near-linear tree cannot overflow the call stack. Each call restarts
    /// from the root.
    pub fn traverse<F: FnMut(&T)>(&self, mut visit: F, order: TraverseOrder) {
        match order {
            TraverseOrder::InOrder => {
                let mut stack = Vec::new();
                let mut cursor = self.root;
                loop {
                    while let Some(idx) = cursor {
                        stack.push(idx);
                        cursor = self.node(idx).left;
                    }
                    match stack.pop() {
                        Some(idx) => {
                            let node = self.node(idx);
                            visit(&node.value);
                            cursor = node.right;
                        }
                        None => break,
                    }
                }
            }
            TraverseOrder::PreOrder => {
                let mut stack = Vec::new();
                if let Some(root) = self.root {
                    stack.push(root);
                }
                while let Some(idx) = stack.pop() {
                    let node = self.node(idx);
                    visit(&node.value);
                    if let Some(right) = node.right {
                        stack.push(right);
                    }
                    if let Some(left) = node.left {
                        stack.push(left);
                    }
                }
            }
            TraverseOrder::PostOrder => {
                // reverse of (self, right, left) is (left, right, self)
                let mut stack = Vec::new();
                let mut visit_order = Vec::new();
                if let Some(root) = self.root {
                    stack.push(root);
                }
                while let Some(idx) = stack.pop() {
                    visit_order.push(idx);
                    let node = self.node(idx);
                    if let Some(left) = node.left {
                        stack.push(left);
                    }
                    if let Some(right) = node.right {
                        stack.push(right);
                    }
                }
                for idx in visit_order.into_iter().rev() {
                    visit(&self.node(idx).value);
                }
            }
        }
    }

    /// Consume the tree, yielding its values in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cursor = self.root;
        loop {
            while let Some(idx) = cursor {
                stack.push(idx);
                cursor = self.node(idx).left;
            }
            let idx = match stack.pop() {
                Some(idx) => idx,
                None => break,
            };
            let right = self.node(idx).right;
            let node = match self.nodes[idx].take() {
                Some(node) => node,
                None => panic!("corrupt tree: slot {} is vacant", idx),
            };
            sorted.push(node.value);
            cursor = right;
        }
        self.root = None;
        self.len = 0;
        sorted
    }
}

impl<T: Ord> BinarySearchTree<T> {
    /// Insert a value, attaching a new leaf. Duplicates route left.
    pub fn insert(&mut self, value: T) {
        let mut cursor = match self.root {
            Some(root) => root,
            None => {
                let idx = self.alloc(Node {
                    value,
                    parent: None,
                    left: None,
                    right: None,
                });
                self.root = Some(idx);
                self.len += 1;
                return;
            }
        };

        loop {
            let go_left = value <= self.node(cursor).value;
            let child = if go_left {
                self.node(cursor).left
            } else {
                self.node(cursor).right
            };
            match child {
                Some(next) => cursor = next,
                None => {
                    let idx = self.alloc(Node {
                        value,
                        parent: Some(cursor),
                        left: None,
                        right: None,
                    });
                    if go_left {
                        self.node_mut(cursor).left = Some(idx);
                    } else {
                        self.node_mut(cursor).right = Some(idx);
                    }
                    self.len += 1;
                    return;
                }
            }
        }
    }

    /// Find the node holding `value`.
    pub fn lookup(&self, value: &T) -> Result<NodeId, TreeError> {
        self.find(value).map(NodeId).ok_or(TreeError::NotFound)
    }

    /// `true` if the tree holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// The next smaller value relative to `value`.
    ///
    /// `Err(NotFound)` when `value` is absent; `Ok(None)` when `value` is
    /// the minimum. With a left subtree the answer is its maximum; otherwise
    /// climb parents until leaving a right child.
    pub fn predecessor(&self, value: &T) -> Result<Option<&T>, TreeError> {
        let idx = match self.find(value) {
            Some(idx) => idx,
            None => return Err(TreeError::NotFound),
        };

        if let Some(left) = self.node(idx).left {
            return Ok(Some(&self.node(self.subtree_max(left)).value));
        }

        let mut current = idx;
        while let Some(parent) = self.node(current).parent {
            if self.node(parent).right == Some(current) {
                return Ok(Some(&self.node(parent).value));
            }
            current = parent;
        }
        Ok(None)
    }

    /// The next larger value relative to `value`.
    ///
    /// Mirror image of [`predecessor`](Self::predecessor).
    pub fn successor(&self, value: &T) -> Result<Option<&T>, TreeError> {
        let idx = match self.find(value) {
            Some(idx) => idx,
            None => return Err(TreeError::NotFound),
        };

        if let Some(right) = self.node(idx).right {
            return Ok(Some(&self.node(self.subtree_min(right)).value));
        }

        let mut current = idx;
        while let Some(parent) = self.node(current).parent {
            if self.node(parent).left == Some(current) {
                return Ok(Some(&self.node(parent).value));
            }
            current = parent;
        }
        Ok(None)
    }

    /// Delete one occurrence of `value`, returning it.
    ///
    /// Leaf and one-child nodes are spliced out directly. A two-child node
    /// keeps its place: the in-order predecessor (max of the left subtree,
    /// which never has a right child) is spliced out instead and its value
    /// moves up into the node.
    pub fn delete(&mut self, value: &T) -> Result<T, TreeError> {
        let idx = match self.find(value) {
            Some(idx) => idx,
            None => return Err(TreeError::NotFound),
        };

        let (left, right) = {
            let node = self.node(idx);
            (node.left, node.right)
        };

        let removed = match (left, right) {
            (Some(left), Some(_)) => {
                let pred = self.subtree_max(left);
                self.splice_out(pred);
                let pred_node = self.release(pred);
                mem::replace(&mut self.node_mut(idx).value, pred_node.value)
            }
            _ => {
                self.splice_out(idx);
                self.release(idx).value
            }
        };
        self.len -= 1;
        Ok(removed)
    }

    fn find(&self, value: &T) -> Option<usize> {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = self.node(idx);
            cursor = match value.cmp(&node.value) {
                Ordering::Equal => return Some(idx),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Unlink a node with at most one child, repairing the parent link on
    /// both sides of the splice.
    fn splice_out(&mut self, idx: usize) {
        let (parent, child) = {
            let node = self.node(idx);
            debug_assert!(
                node.left.is_none() || node.right.is_none(),
                "splice_out on a node with two children"
            );
            (node.parent, node.left.or(node.right))
        };

        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                if self.node(parent).left == Some(idx) {
                    self.node_mut(parent).left = child;
                } else {
                    self.node_mut(parent).right = child;
                }
            }
        }
    }

    /// Verify the rep invariant, panicking on any violation.
    ///
    /// Walks every subtree checking the ordering bounds (left ≤ node ≤
    /// right, duplicates allowed), that each child's parent link points back
    /// at its attachment point, and that the reachable node count matches
    /// `len`. Exists for tests and debugging, not as part of the stable
    /// contract.
    pub fn check_rep(&self) {
        let mut count = 0;
        let mut stack: Vec<(usize, Option<&T>, Option<&T>)> = Vec::new();
        if let Some(root) = self.root {
            assert!(self.node(root).parent.is_none(), "root has a parent link");
            stack.push((root, None, None));
        }

        while let Some((idx, low, high)) = stack.pop() {
            count += 1;
            let node = self.node(idx);
            if let Some(low) = low {
                assert!(node.value >= *low, "ordering bound violated below");
            }
            if let Some(high) = high {
                assert!(node.value <= *high, "ordering bound violated above");
            }
            if let Some(left) = node.left {
                assert_eq!(
                    self.node(left).parent,
                    Some(idx),
                    "left child parent link inconsistent"
                );
                stack.push((left, low, Some(&node.value)));
            }
            if let Some(right) = node.right {
                assert_eq!(
                    self.node(right).parent,
                    Some(idx),
                    "right child parent link inconsistent"
                );
                stack.push((right, Some(&node.value), high));
            }
        }
        assert_eq!(count, self.len, "reachable node count does not match len");
    }
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
