//! Token → posting list index.
//!
//! Tokens live in a height-balanced (AVL) binary search tree. Nodes are
//! stored in an arena and addressed by their slot, so a slot stays valid for
//! the lifetime of the index: nodes are only ever appended, never removed.

use crate::posting::PostingList;
use crate::EntityId;
use std::cmp::Ordering;

type Slot = usize;

#[derive(Debug)]
struct Node {
    token: String,
    postings: PostingList,
    left: Option<Slot>,
    right: Option<Slot>,
    height: i32,
}

impl Node {
    fn leaf(token: &str) -> Self {
        Self { token: token.to_owned(), postings: PostingList::new(), left: None, right: None, height: 1 }
    }
}

#[derive(Debug, Default)]
pub struct InvertedIndex {
    nodes: Vec<Node>,
    root: Option<Slot>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> i32 { self.height_of(self.root) }

    /// Total number of (token, entity) pairs across all posting lists.
    pub fn posting_count(&self) -> usize { self.nodes.iter().map(|n| n.postings.len()).sum() }

    /// Read-only lookup in O(log T).
    pub fn lookup(&self, token: &str) -> Option<&PostingList> {
        let mut cur = self.root;
        while let Some(slot) = cur {
            let node = &self.nodes[slot];
            cur = match token.cmp(node.token.as_str()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(&node.postings),
            };
        }
        None
    }

    /// Returns the posting list for `token`, inserting an empty one (and
    /// rebalancing the tree) when the token is new.
    pub fn get_or_create(&mut self, token: &str) -> &mut PostingList {
        let (root, slot) = self.insert_at(self.root, token);
        self.root = Some(root);
        &mut self.nodes[slot].postings
    }

    /// Records that entity `id` carries `token`. Returns `true` if the id was
    /// not yet in the token's posting list.
    pub fn add_entity(&mut self, token: &str, id: EntityId) -> bool {
        self.get_or_create(token).insert(id)
    }

    /// In-order (ascending token) traversal.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { index: self, stack: Vec::with_capacity(self.height().max(0) as usize) };
        iter.push_left(self.root);
        iter
    }

    /// Returns `(new subtree root, slot holding token)`.
    fn insert_at(&mut self, node: Option<Slot>, token: &str) -> (Slot, Slot) {
        let Some(n) = node else {
            self.nodes.push(Node::leaf(token));
            let slot = self.nodes.len() - 1;
            return (slot, slot);
        };
        let slot = match token.cmp(self.nodes[n].token.as_str()) {
            Ordering::Equal => return (n, n),
            Ordering::Less => {
                let left = self.nodes[n].left;
                let (child, slot) = self.insert_at(left, token);
                self.nodes[n].left = Some(child);
                slot
            }
            Ordering::Greater => {
                let right = self.nodes[n].right;
                let (child, slot) = self.insert_at(right, token);
                self.nodes[n].right = Some(child);
                slot
            }
        };
        (self.rebalance(n), slot)
    }

    fn height_of(&self, node: Option<Slot>) -> i32 { node.map_or(0, |s| self.nodes[s].height) }

    fn balance_of(&self, n: Slot) -> i32 {
        self.height_of(self.nodes[n].left) - self.height_of(self.nodes[n].right)
    }

    fn update_height(&mut self, n: Slot) {
        let h = 1 + self.height_of(self.nodes[n].left).max(self.height_of(self.nodes[n].right));
        self.nodes[n].height = h;
    }

    fn rebalance(&mut self, n: Slot) -> Slot {
        self.update_height(n);
        let balance = self.balance_of(n);
        if balance > 1 {
            if let Some(left) = self.nodes[n].left {
                // LR: straighten the left child first, then fall through to LL.
                if self.balance_of(left) < 0 {
                    let left = self.rotate_left(left);
                    self.nodes[n].left = Some(left);
                }
                return self.rotate_right(n);
            }
        } else if balance < -1 {
            if let Some(right) = self.nodes[n].right {
                // RL
                if self.balance_of(right) > 0 {
                    let right = self.rotate_right(right);
                    self.nodes[n].right = Some(right);
                }
                return self.rotate_left(n);
            }
        }
        n
    }

    fn rotate_right(&mut self, y: Slot) -> Slot {
        let Some(x) = self.nodes[y].left else { return y };
        let t2 = self.nodes[x].right;
        self.nodes[x].right = Some(y);
        self.nodes[y].left = t2;
        self.update_height(y);
        self.update_height(x);
        x
    }

    fn rotate_left(&mut self, x: Slot) -> Slot {
        let Some(y) = self.nodes[x].right else { return x };
        let t2 = self.nodes[y].left;
        self.nodes[y].left = Some(x);
        self.nodes[x].right = t2;
        self.update_height(x);
        self.update_height(y);
        y
    }
}

pub struct Iter<'a> {
    index: &'a InvertedIndex,
    stack: Vec<Slot>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut node: Option<Slot>) {
        while let Some(slot) = node {
            self.stack.push(slot);
            node = self.index.nodes[slot].left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a PostingList);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.stack.pop()?;
        let index = self.index;
        let node = &index.nodes[slot];
        self.push_left(node.right);
        Some((node.token.as_str(), &node.postings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks the height invariant and |balance| <= 1 at every node, returning
    /// the subtree height.
    fn check_balanced(index: &InvertedIndex, node: Option<Slot>) -> i32 {
        let Some(n) = node else { return 0 };
        let lh = check_balanced(index, index.nodes[n].left);
        let rh = check_balanced(index, index.nodes[n].right);
        assert!((lh - rh).abs() <= 1, "node {:?} unbalanced", index.nodes[n].token);
        assert_eq!(index.nodes[n].height, 1 + lh.max(rh));
        1 + lh.max(rh)
    }

    #[test]
    fn lookup_missing_token() {
        let mut index = InvertedIndex::new();
        assert!(index.lookup("rua").is_none());
        index.add_entity("rua", 1);
        assert!(index.lookup("Rua").is_none());
        assert_eq!(index.lookup("rua").map(|p| p.as_slice()), Some(&[1][..]));
    }

    #[test]
    fn get_or_create_is_stable() {
        let mut index = InvertedIndex::new();
        index.get_or_create("avenida").insert(3);
        index.get_or_create("avenida").insert(1);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("avenida").map(|p| p.as_slice()), Some(&[1, 3][..]));
    }

    #[test]
    fn sorted_inserts_stay_balanced() {
        let mut index = InvertedIndex::new();
        for i in 0..1000u32 {
            index.add_entity(&format!("t{i:05}"), i);
        }
        assert_eq!(index.len(), 1000);
        check_balanced(&index, index.root);
        // AVL bound: h < 1.44 log2(n + 2)
        assert!(index.height() <= 14, "height {}", index.height());
    }

    #[test]
    fn all_rotation_cases() {
        // LL, RR, LR, RL in turn, each on a fresh tree of three keys.
        for keys in [["c", "b", "a"], ["a", "b", "c"], ["c", "a", "b"], ["a", "c", "b"]] {
            let mut index = InvertedIndex::new();
            for k in keys {
                index.add_entity(k, 1);
            }
            assert_eq!(index.height(), 2, "keys {keys:?}");
            let root = index.root.map(|r| index.nodes[r].token.clone());
            assert_eq!(root.as_deref(), Some("b"));
            check_balanced(&index, index.root);
        }
    }

    #[test]
    fn iter_is_in_order() {
        let mut index = InvertedIndex::new();
        for (i, word) in ["rua", "avenida", "praca", "beco", "alameda", "travessa"].iter().enumerate() {
            index.add_entity(word, i as EntityId);
        }
        let tokens: Vec<&str> = index.iter().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec!["alameda", "avenida", "beco", "praca", "rua", "travessa"]);
        assert_eq!(index.posting_count(), 6);
    }
}
