//! Height-balanced price index.
//!
//! Nodes live in an arena and refer to their children by index, so rotations
//! only rewrite indices. Insert and range queries walk the tree with explicit
//! stacks instead of recursing.

use std::cmp::Ordering;

use crate::index::DuplicatePolicy;
use crate::listing::Product;

type NodeId = usize;

#[derive(Debug, Clone)]
struct Node<'a> {
    price: u64,
    /// Products at this price, in insertion order. Never empty.
    bucket: Vec<&'a Product>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    height: u32,
}

impl<'a> Node<'a> {
    fn leaf(price: u64, product: &'a Product) -> Self {
        Self {
            price,
            bucket: vec![product],
            left: None,
            right: None,
            height: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new node was created for this price.
    Inserted,
    /// The price already existed and the product joined its bucket.
    Bucketed,
    /// The price already existed and the product was discarded.
    Dropped,
    /// The product has no known price and cannot be indexed.
    Unpriced,
}

#[derive(Debug, Clone, Copy)]
enum Branch {
    Left,
    Right,
}

/// AVL tree keyed by price, borrowing the products it indexes.
#[derive(Debug, Clone)]
pub struct PriceIndex<'a> {
    nodes: Vec<Node<'a>>,
    root: Option<NodeId>,
    policy: DuplicatePolicy,
    len: usize,
}

impl<'a> PriceIndex<'a> {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            policy,
            len: 0,
        }
    }

    /// Indexes every priced product in `products`, in order.
    pub fn from_products(products: &'a [Product], policy: DuplicatePolicy) -> Self {
        let mut index = Self::new(policy);
        for product in products {
            index.insert(product);
        }
        index
    }

    /// Number of products held, counting every bucket entry.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn distinct_prices(&self) -> usize {
        self.nodes.len()
    }

    /// Height of the whole tree; 0 when empty.
    pub fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    pub fn insert(&mut self, product: &'a Product) -> InsertOutcome {
        let Some(price) = product.price else {
            return InsertOutcome::Unpriced;
        };

        let mut path: Vec<(NodeId, Branch)> = Vec::with_capacity(self.height() as usize);
        let mut cursor = self.root;

        while let Some(id) = cursor {
            let node = &self.nodes[id];
            match price.cmp(&node.price) {
                Ordering::Less => {
                    path.push((id, Branch::Left));
                    cursor = node.left;
                }
                Ordering::Greater => {
                    path.push((id, Branch::Right));
                    cursor = node.right;
                }
                Ordering::Equal => {
                    return match self.policy {
                        DuplicatePolicy::Bucket => {
                            self.nodes[id].bucket.push(product);
                            self.len += 1;
                            InsertOutcome::Bucketed
                        }
                        DuplicatePolicy::KeepFirst => InsertOutcome::Dropped,
                    };
                }
            }
        }

        let mut subtree = self.nodes.len();
        self.nodes.push(Node::leaf(price, product));
        self.len += 1;

        // Re-link each ancestor to its (possibly rotated) child, bottom-up.
        while let Some((id, branch)) = path.pop() {
            match branch {
                Branch::Left => self.nodes[id].left = Some(subtree),
                Branch::Right => self.nodes[id].right = Some(subtree),
            }
            subtree = self.rebalance(id, price);
        }
        self.root = Some(subtree);

        InsertOutcome::Inserted
    }

    /// Products priced within `[min, max]`, ascending by price. Products
    /// sharing a price keep their insertion order.
    pub fn range(&self, min: u64, max: u64) -> Vec<&'a Product> {
        let mut results = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut cursor = self.root;

        loop {
            while let Some(id) = cursor {
                stack.push(id);
                let node = &self.nodes[id];
                cursor = if min < node.price { node.left } else { None };
            }

            let Some(id) = stack.pop() else {
                break;
            };
            let node = &self.nodes[id];
            if min <= node.price && node.price <= max {
                results.extend(node.bucket.iter().copied());
            }
            cursor = if max > node.price { node.right } else { None };
        }

        results
    }

    /// Checks search order, cached heights and the balance bound on every
    /// node, and that every arena node is reachable from the root.
    pub fn validate(&self) -> bool {
        let mut visited = 0;
        let mut previous: Option<u64> = None;
        let mut stack: Vec<NodeId> = Vec::new();
        let mut cursor = self.root;

        loop {
            while let Some(id) = cursor {
                stack.push(id);
                cursor = self.nodes[id].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            let node = &self.nodes[id];

            if previous.is_some_and(|p| p >= node.price) {
                return false;
            }
            previous = Some(node.price);

            let (left, right) = (self.height_of(node.left), self.height_of(node.right));
            if node.height != 1 + left.max(right) || left.abs_diff(right) > 1 {
                return false;
            }
            if node.bucket.is_empty() {
                return false;
            }

            visited += 1;
            cursor = node.right;
        }

        let bucketed: usize = self.nodes.iter().map(|n| n.bucket.len()).sum();
        visited == self.nodes.len() && bucketed == self.len
    }

    fn height_of(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.nodes[id].height)
    }

    fn update_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.nodes[id].height = height;
    }

    fn balance(&self, id: NodeId) -> i64 {
        let node = &self.nodes[id];
        i64::from(self.height_of(node.left)) - i64::from(self.height_of(node.right))
    }

    /// Restores the balance bound at `id` after `price` was inserted below
    /// it. Returns the id now rooting this subtree.
    fn rebalance(&mut self, id: NodeId, price: u64) -> NodeId {
        self.update_height(id);
        let balance = self.balance(id);

        if balance > 1 {
            if let Some(left) = self.nodes[id].left {
                let left_price = self.nodes[left].price;
                if price < left_price {
                    return self.rotate_right(id);
                }
                if price > left_price {
                    let pivot = self.rotate_left(left);
                    self.nodes[id].left = Some(pivot);
                    return self.rotate_right(id);
                }
            }
        }

        if balance < -1 {
            if let Some(right) = self.nodes[id].right {
                let right_price = self.nodes[right].price;
                if price > right_price {
                    return self.rotate_left(id);
                }
                if price < right_price {
                    let pivot = self.rotate_right(right);
                    self.nodes[id].right = Some(pivot);
                    return self.rotate_left(id);
                }
            }
        }

        id
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id].right else {
            return id;
        };
        let inner = self.nodes[pivot].left;
        self.nodes[pivot].left = Some(id);
        self.nodes[id].right = inner;
        self.update_height(id);
        self.update_height(pivot);
        pivot
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id].left else {
            return id;
        };
        let inner = self.nodes[pivot].right;
        self.nodes[pivot].right = Some(id);
        self.nodes[id].left = inner;
        self.update_height(id);
        self.update_height(pivot);
        pivot
    }
}
