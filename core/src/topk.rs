//! Bounded selection of the closest candidates from a stream.
//!
//! [`BoundedTopK`] is an array-backed binary max-heap keyed on distance:
//! the root is always the worst candidate still kept, so a full heap can
//! decide in O(1) whether a newcomer is worth an O(log K) replacement.

use crate::EntityId;
use serde::Serialize;

/// A scored entity produced while evaluating one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate<'a> {
    pub id: EntityId,
    pub name: &'a str,
    pub distance: f64,
}

#[derive(Debug)]
pub struct BoundedTopK<'a> {
    heap: Vec<Candidate<'a>>,
    capacity: usize,
}

impl<'a> BoundedTopK<'a> {
    pub fn new(capacity: usize) -> Self {
        Self { heap: Vec::with_capacity(capacity), capacity }
    }

    pub fn len(&self) -> usize { self.heap.len() }

    pub fn is_empty(&self) -> bool { self.heap.is_empty() }

    pub fn is_full(&self) -> bool { self.heap.len() >= self.capacity }

    /// The farthest candidate currently kept.
    pub fn peek_worst(&self) -> Option<&Candidate<'a>> { self.heap.first() }

    /// Offers a candidate. Once full, only a candidate strictly closer than
    /// the current worst gets in, and it evicts that worst.
    pub fn insert(&mut self, candidate: Candidate<'a>) {
        if self.heap.len() < self.capacity {
            self.heap.push(candidate);
            self.sift_up(self.heap.len() - 1);
        } else if let Some(worst) = self.heap.first_mut() {
            if candidate.distance < worst.distance {
                *worst = candidate;
                self.sift_down(0);
            }
        }
    }

    /// Consumes the heap, returning its contents by ascending distance.
    pub fn drain_sorted(mut self) -> Vec<Candidate<'a>> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(worst) = self.pop_worst() {
            out.push(worst);
        }
        out.reverse();
        out
    }

    fn pop_worst(&mut self) -> Option<Candidate<'a>> {
        if self.heap.is_empty() {
            return None;
        }
        let worst = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(worst)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].distance <= self.heap[parent].distance {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let (left, right) = (2 * i + 1, 2 * i + 2);
            let mut largest = i;
            if left < len && self.heap[left].distance > self.heap[largest].distance {
                largest = left;
            }
            if right < len && self.heap[right].distance > self.heap[largest].distance {
                largest = right;
            }
            if largest == i {
                break;
            }
            self.heap.swap(i, largest);
            i = largest;
        }
    }
}
