use crate::EntityId;

/// Entity ids sharing one token, kept strictly ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    ids: Vec<EntityId>,
}

impl PostingList {
    pub fn new() -> Self { Self::default() }

    /// Inserts `id` at its sorted position unless it is already present.
    /// Returns `true` when the list changed.
    pub fn insert(&mut self, id: EntityId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, id);
                true
            }
        }
    }

    pub fn contains(&self, id: EntityId) -> bool { self.ids.binary_search(&id).is_ok() }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    pub fn as_slice(&self) -> &[EntityId] { &self.ids }
}

impl FromIterator<EntityId> for PostingList {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut ids: Vec<EntityId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }
}

/// Merge-intersects two ascending id sequences in O(n + m).
pub fn intersect(a: &[EntityId], b: &[EntityId]) -> Vec<EntityId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
