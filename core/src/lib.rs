//! Nearest-street lookup over a static address dataset.
//!
//! The build phase feeds address records into a [`CatalogBuilder`], which
//! maintains the token index and the per-street centroids. Once finished,
//! the resulting [`Catalog`] is read-only and answers conjunctive word
//! queries ranked by planar distance from an origin.

pub mod batch;
pub mod catalog;
pub mod entity;
pub mod index;
pub mod posting;
pub mod query;
pub mod record;
pub mod tokenizer;
pub mod topk;

pub type EntityId = u32;

pub use catalog::{BuildStats, Catalog, CatalogBuilder};
pub use entity::{Entity, EntityStore, Point};
pub use index::InvertedIndex;
pub use posting::PostingList;
pub use query::{Query, QueryEngine};
pub use topk::{BoundedTopK, Candidate};
