use crate::EntityId;
use serde::Serialize;
use std::collections::HashMap;

/// A planar coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }

    /// Euclidean distance treating lat/lon as plane coordinates.
    pub fn distance(&self, other: &Point) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lon = self.lon - other.lon;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }
}

/// A street: every address sharing one entity id, collapsed to its centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub centroid: Point,
    /// Number of addresses averaged into `centroid`.
    pub contributors: u32,
}

impl Entity {
    fn new(id: EntityId, name: &str, at: Point) -> Self {
        Self { id, name: name.to_owned(), centroid: at, contributors: 1 }
    }

    /// Streaming mean update: `mean' = (mean * n + x) / (n + 1)`.
    fn absorb(&mut self, at: Point) {
        let n = f64::from(self.contributors);
        self.centroid.lat = (self.centroid.lat * n + at.lat) / (n + 1.0);
        self.centroid.lon = (self.centroid.lon * n + at.lon) / (n + 1.0);
        self.contributors += 1;
    }
}

#[derive(Debug, Default)]
pub struct EntityStore {
    entities: HashMap<EntityId, Entity>,
}

impl EntityStore {
    pub fn new() -> Self { Self::default() }

    /// Folds one address into entity `id`. The first address seen for an id
    /// fixes its name and seeds the centroid. Returns `true` if the entity
    /// was created by this call.
    pub fn update(&mut self, id: EntityId, name: &str, at: Point) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.absorb(at);
                false
            }
            None => {
                self.entities.insert(id, Entity::new(id, name, at));
                true
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> { self.entities.get(&id) }

    pub fn len(&self) -> usize { self.entities.len() }

    pub fn is_empty(&self) -> bool { self.entities.is_empty() }
}
