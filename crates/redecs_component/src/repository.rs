//! The set of live entities.

use std::collections::{BTreeSet, HashMap};

use crate::entity::{Entity, EntityAllocator};

/// Tracks which entities are alive, plus free-form tags per entity.
///
/// The repository owns the [`EntityAllocator`]; every entity spawned through
/// it gets a fresh ID. Components are not stored here.
#[derive(Debug, Clone, Default)]
pub struct EntityRepository {
    allocator: EntityAllocator,
    entities: HashMap<Entity, BTreeSet<String>>,
}

impl EntityRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new live entity with the given tags.
    pub fn spawn<I, T>(&mut self, tags: I) -> Entity
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let entity = self.allocator.allocate();
        self.entities
            .insert(entity, tags.into_iter().map(Into::into).collect());
        entity
    }

    /// Register an externally chosen entity ID as alive.
    ///
    /// Returns `false` if the ID is invalid or already alive.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if !entity.is_valid() || self.entities.contains_key(&entity) {
            return false;
        }
        self.allocator.reserve(entity);
        self.entities.insert(entity, BTreeSet::new());
        true
    }

    /// Remove an entity. Returns `true` if it was alive.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.entities.remove(&entity).is_some()
    }

    /// Returns `true` if `entity` is alive.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if nothing is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Tags of a live entity.
    #[must_use]
    pub fn tags(&self, entity: Entity) -> Option<&BTreeSet<String>> {
        self.entities.get(&entity)
    }

    /// Add a tag to a live entity. Returns `false` if the entity is not alive.
    pub fn add_tag(&mut self, entity: Entity, tag: impl Into<String>) -> bool {
        match self.entities.get_mut(&entity) {
            Some(tags) => {
                tags.insert(tag.into());
                true
            }
            None => false,
        }
    }

    /// Sorted list of live entities carrying `tag`.
    #[must_use]
    pub fn tagged(&self, tag: &str) -> Vec<Entity> {
        let mut found: Vec<Entity> = self
            .entities
            .iter()
            .filter(|(_, tags)| tags.contains(tag))
            .map(|(&entity, _)| entity)
            .collect();
        found.sort_unstable();
        found
    }

    /// Sorted snapshot of all live entities.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.entities.keys().copied().collect();
        entities.sort_unstable();
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_remove() {
        let mut repo = EntityRepository::new();
        let a = repo.spawn(["player"]);
        let b = repo.spawn(Vec::<String>::new());

        assert_ne!(a, b);
        assert!(repo.contains(a));
        assert_eq!(repo.len(), 2);

        assert!(repo.remove(a));
        assert!(!repo.remove(a));
        assert!(!repo.contains(a));
        assert_eq!(repo.snapshot(), vec![b]);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut repo = EntityRepository::new();
        let a = repo.spawn(Vec::<String>::new());
        repo.remove(a);
        let b = repo.spawn(Vec::<String>::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_tags() {
        let mut repo = EntityRepository::new();
        let a = repo.spawn(["enemy"]);
        let b = repo.spawn(["enemy", "boss"]);
        let _c = repo.spawn(["player"]);

        assert_eq!(repo.tagged("enemy"), vec![a, b]);
        assert_eq!(repo.tagged("boss"), vec![b]);
        assert!(repo.tagged("missing").is_empty());

        assert!(repo.add_tag(a, "boss"));
        assert_eq!(repo.tagged("boss"), vec![a, b]);
        assert!(!repo.add_tag(Entity::from_raw(99), "boss"));
    }

    #[test]
    fn test_insert_external_id() {
        let mut repo = EntityRepository::new();
        assert!(repo.insert(Entity::from_raw(7)));
        assert!(!repo.insert(Entity::from_raw(7)));
        assert!(!repo.insert(Entity::INVALID));

        let next = repo.spawn(Vec::<String>::new());
        assert_eq!(next, Entity::from_raw(8));
    }
}
