//! Per-kind component storage.
//!
//! A [`ComponentStore`] maps [`Entity`] to one component value. There is one
//! store per component kind; an entity missing from a store simply does not
//! have that behaviour.
//!
//! Iteration visits every present entry exactly once but in no particular
//! order. The store cannot be mutated while a `for_each` over it is running;
//! callers that need to iterate-then-mutate take a [`ComponentStore::entities`]
//! snapshot first.

use std::collections::HashMap;
use std::collections::hash_map;

use crate::entity::Entity;

/// Hash-indexed storage for a single component kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStore<C> {
    components: HashMap<Entity, C>,
}

impl<C> ComponentStore<C> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Returns the component attached to `entity`, if any.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&C> {
        self.components.get(&entity)
    }

    /// Returns a mutable reference to the component attached to `entity`.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        self.components.get_mut(&entity)
    }

    /// Attach `component` to `entity`, returning the value it replaced.
    pub fn set(&mut self, entity: Entity, component: C) -> Option<C> {
        self.components.insert(entity, component)
    }

    /// Detach and return the component of `entity`.
    pub fn remove(&mut self, entity: Entity) -> Option<C> {
        self.components.remove(&entity)
    }

    /// Returns `true` if `entity` has a component in this store.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(&entity)
    }

    /// Number of entities with this component.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if no entity has this component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Visit every `(entity, component)` pair once.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Entity, &C),
    {
        for (&entity, component) in &self.components {
            f(entity, component);
        }
    }

    /// Visit every `(entity, component)` pair once, with mutable access to
    /// the component.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(Entity, &mut C),
    {
        for (&entity, component) in &mut self.components {
            f(entity, component);
        }
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.components.iter().map(|(&entity, c)| (entity, c))
    }

    /// Iterate mutably over all entries.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut C)> {
        self.components.iter_mut().map(|(&entity, c)| (entity, c))
    }

    /// Sorted snapshot of the entities present in this store.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.components.keys().copied().collect();
        entities.sort_unstable();
        entities
    }

    /// Remove every component.
    pub fn clear(&mut self) {
        self.components.clear();
    }
}

impl<C> Default for ComponentStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FromIterator<(Entity, C)> for ComponentStore<C> {
    fn from_iter<I: IntoIterator<Item = (Entity, C)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

impl<C> IntoIterator for ComponentStore<C> {
    type Item = (Entity, C);
    type IntoIter = hash_map::IntoIter<Entity, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = ComponentStore::new();
        let e = Entity::from_raw(1);

        assert!(store.get(e).is_none());
        assert_eq!(store.set(e, 10), None);
        assert_eq!(store.get(e), Some(&10));
        assert_eq!(store.set(e, 20), Some(10));
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove(e), Some(20));
        assert!(store.is_empty());
        assert_eq!(store.remove(e), None);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut store = ComponentStore::new();
        let e = Entity::from_raw(3);
        store.set(e, 1.5_f32);
        if let Some(v) = store.get_mut(e) {
            *v *= 2.0;
        }
        assert_eq!(store.get(e), Some(&3.0));
    }

    #[test]
    fn test_for_each_visits_every_entry_once() {
        let store: ComponentStore<u32> = (1..=5).map(|i| (Entity::from_raw(i), i as u32)).collect();

        let mut seen = Vec::new();
        store.for_each(|entity, value| {
            assert_eq!(entity.id() as u32, *value);
            seen.push(entity);
        });
        seen.sort();

        assert_eq!(seen, store.entities());
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_for_each_mut() {
        let mut store: ComponentStore<u32> =
            (1..=3).map(|i| (Entity::from_raw(i), 0)).collect();
        store.for_each_mut(|entity, value| *value = entity.id() as u32 * 10);
        assert_eq!(store.get(Entity::from_raw(2)), Some(&20));
    }

    #[test]
    fn test_entities_snapshot_allows_mutation() {
        let mut store: ComponentStore<u32> =
            (1..=4).map(|i| (Entity::from_raw(i), i as u32)).collect();
        for entity in store.entities() {
            if entity.id() % 2 == 0 {
                store.remove(entity);
            }
        }
        assert_eq!(store.entities(), vec![Entity::from_raw(1), Entity::from_raw(3)]);
    }
}
