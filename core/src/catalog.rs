use crate::entity::{Entity, EntityStore, Point};
use crate::index::InvertedIndex;
use crate::query::{Query, QueryEngine};
use crate::record::AddressRecord;
use crate::tokenizer::tokenize;
use crate::topk::Candidate;
use crate::EntityId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records: usize,
    pub entities: usize,
    pub tokens: usize,
    pub postings: usize,
}

/// Build phase: accumulates addresses into the token index and the entity
/// store. Consumed by [`CatalogBuilder::finish`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    index: InvertedIndex,
    entities: EntityStore,
    records: usize,
}

impl CatalogBuilder {
    pub fn new() -> Self { Self::default() }

    /// Folds one address into entity `id` and indexes every token of `name`.
    pub fn add(&mut self, id: EntityId, name: &str, at: Point) {
        self.records += 1;
        if self.entities.update(id, name, at) {
            tracing::trace!(id, name, "new entity");
        }
        for token in tokenize(name) {
            self.index.add_entity(token, id);
        }
    }

    pub fn add_record(&mut self, record: &AddressRecord) {
        self.add(record.entity_id, &record.street_name, record.location);
    }

    pub fn finish(self) -> Catalog {
        let catalog = Catalog { index: self.index, entities: self.entities, records: self.records };
        let stats = catalog.stats();
        tracing::info!(
            records = stats.records,
            entities = stats.entities,
            tokens = stats.tokens,
            postings = stats.postings,
            height = catalog.index.height(),
            "catalog built"
        );
        catalog
    }
}

/// The frozen output of the build phase. Exposes no mutation, so it can be
/// shared freely between concurrent queries.
#[derive(Debug)]
pub struct Catalog {
    index: InvertedIndex,
    entities: EntityStore,
    records: usize,
}

impl Catalog {
    pub fn engine(&self) -> QueryEngine<'_> { QueryEngine::new(&self.index, &self.entities) }

    pub fn search(&self, text: &str, origin: Point, cap: usize) -> Vec<Candidate<'_>> {
        self.engine().search(text, origin, cap)
    }

    pub fn run(&self, query: &Query) -> Vec<Candidate<'_>> { self.engine().run(query) }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> { self.entities.get(id) }

    pub fn stats(&self) -> BuildStats {
        BuildStats {
            records: self.records,
            entities: self.entities.len(),
            tokens: self.index.len(),
            postings: self.index.posting_count(),
        }
    }
}
