//! Query evaluation: conjunctive token match, then nearest-first selection.

use crate::entity::{EntityStore, Point};
use crate::index::InvertedIndex;
use crate::posting::intersect;
use crate::tokenizer::tokenize;
use crate::topk::{BoundedTopK, Candidate};
use crate::EntityId;

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub id: i64,
    pub text: String,
    pub origin: Point,
    /// Maximum number of results.
    pub cap: usize,
}

/// Read-only view over a built index and entity store.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a InvertedIndex,
    entities: &'a EntityStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a InvertedIndex, entities: &'a EntityStore) -> Self {
        Self { index, entities }
    }

    /// Ids of the entities carrying every token, ascending. Empty when
    /// `tokens` is empty or any token is unknown.
    pub fn matching_ids(&self, tokens: &[&str]) -> Vec<EntityId> {
        let mut lists = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.index.lookup(token) {
                Some(list) if !list.is_empty() => lists.push(list.as_slice()),
                _ => return Vec::new(),
            }
        }
        let Some((first, rest)) = lists.split_first() else { return Vec::new() };
        let mut acc = first.to_vec();
        for list in rest {
            acc = intersect(&acc, list);
            if acc.is_empty() {
                break;
            }
        }
        acc
    }

    /// Up to `cap` entities whose names contain every word of `text`,
    /// nearest to `origin` first. Ties in distance come out in no particular
    /// order.
    pub fn search(&self, text: &str, origin: Point, cap: usize) -> Vec<Candidate<'a>> {
        let tokens = tokenize(text);
        if tokens.is_empty() || cap == 0 {
            return Vec::new();
        }
        let ids = self.matching_ids(&tokens);
        let mut top = BoundedTopK::new(cap.min(ids.len()));
        for id in ids {
            // Posting ids without an entity are skipped.
            let Some(entity) = self.entities.get(id) else { continue };
            top.insert(Candidate { id, name: entity.name.as_str(), distance: origin.distance(&entity.centroid) });
        }
        let results = top.drain_sorted();
        tracing::trace!(text, cap, hits = results.len(), "query evaluated");
        results
    }

    pub fn run(&self, query: &Query) -> Vec<Candidate<'a>> {
        self.search(&query.text, query.origin, query.cap)
    }
}
