//! Game effects: deferred descriptions of follow-up work.
//!
//! Reducers never spawn or destroy entities inline. They describe what should
//! happen in a [`GameEffect`] and the driver applies it right after the
//! reducer returns, turning each applied [`EntityCommand`] into lifecycle
//! events. Effects nest; the driver flattens them depth-first so commands
//! run in the order they were emitted.

use std::fmt;

use redecs_component::{Component, ComponentTypeId, Entity};

use crate::deferred::Deferred;
use crate::state::ComponentAccess;

/// Writes one component value into a state's store.
pub struct ComponentInsert<S> {
    component: ComponentTypeId,
    name: &'static str,
    apply: Box<dyn FnOnce(&mut S, Entity) + Send>,
}

impl<S: 'static> ComponentInsert<S> {
    #[must_use]
    pub fn new<C>(component: C) -> Self
    where
        C: Component,
        S: ComponentAccess<C>,
    {
        Self {
            component: C::component_type_id(),
            name: C::type_name(),
            apply: Box::new(move |state: &mut S, entity| {
                <S as ComponentAccess<C>>::components_mut(state).set(entity, component);
            }),
        }
    }
}

impl<S> ComponentInsert<S> {
    /// The kind of component being written.
    #[must_use]
    pub fn component(&self) -> ComponentTypeId {
        self.component
    }

    /// Human-readable component name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn apply(self, state: &mut S, entity: Entity) {
        (self.apply)(state, entity);
    }
}

impl<S> fmt::Debug for ComponentInsert<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInsert")
            .field("component", &self.name)
            .finish_non_exhaustive()
    }
}

/// Removes one component kind from an entity.
pub struct ComponentRemoval<S> {
    component: ComponentTypeId,
    name: &'static str,
    apply: Box<dyn FnOnce(&mut S, Entity) -> bool + Send>,
}

impl<S: 'static> ComponentRemoval<S> {
    #[must_use]
    pub fn new<C>() -> Self
    where
        C: Component,
        S: ComponentAccess<C>,
    {
        Self {
            component: C::component_type_id(),
            name: C::type_name(),
            apply: Box::new(|state: &mut S, entity| {
                <S as ComponentAccess<C>>::components_mut(state)
                    .remove(entity)
                    .is_some()
            }),
        }
    }
}

impl<S> ComponentRemoval<S> {
    #[must_use]
    pub fn component(&self) -> ComponentTypeId {
        self.component
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if a component was actually removed.
    pub(crate) fn apply(self, state: &mut S, entity: Entity) -> bool {
        (self.apply)(state, entity)
    }
}

impl<S> fmt::Debug for ComponentRemoval<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRemoval")
            .field("component", &self.name)
            .finish_non_exhaustive()
    }
}

/// A new entity, its tags and its initial components.
pub struct SpawnCommand<S> {
    pub tags: Vec<String>,
    pub components: Vec<ComponentInsert<S>>,
}

impl<S> SpawnCommand<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Add a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

impl<S: 'static> SpawnCommand<S> {
    /// Attach an initial component.
    #[must_use]
    pub fn with<C>(mut self, component: C) -> Self
    where
        C: Component,
        S: ComponentAccess<C>,
    {
        self.components.push(ComponentInsert::new(component));
        self
    }
}

impl<S> Default for SpawnCommand<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for SpawnCommand<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpawnCommand")
            .field("tags", &self.tags)
            .field("components", &self.components)
            .finish()
    }
}

/// An entity-directed mutation applied by the driver.
pub enum EntityCommand<S> {
    /// Allocate a new entity. Emits `Added` then one `ComponentSet` per
    /// initial component.
    Spawn(SpawnCommand<S>),
    /// Destroy a live entity. Emits `Removed`.
    Destroy(Entity),
    /// Attach or replace a component on a live entity. Emits `ComponentSet`.
    Set {
        entity: Entity,
        insert: ComponentInsert<S>,
    },
    /// Detach a component. Emits `ComponentRemoved` if one was present.
    Remove {
        entity: Entity,
        removal: ComponentRemoval<S>,
    },
}

impl<S> EntityCommand<S> {
    /// Start building a spawn command.
    #[must_use]
    pub fn spawn() -> SpawnCommand<S> {
        SpawnCommand::new()
    }

    #[must_use]
    pub fn destroy(entity: Entity) -> Self {
        Self::Destroy(entity)
    }
}

impl<S: 'static> EntityCommand<S> {
    #[must_use]
    pub fn set<C>(entity: Entity, component: C) -> Self
    where
        C: Component,
        S: ComponentAccess<C>,
    {
        Self::Set {
            entity,
            insert: ComponentInsert::new(component),
        }
    }

    #[must_use]
    pub fn remove<C>(entity: Entity) -> Self
    where
        C: Component,
        S: ComponentAccess<C>,
    {
        Self::Remove {
            entity,
            removal: ComponentRemoval::new::<C>(),
        }
    }
}

impl<S> From<SpawnCommand<S>> for EntityCommand<S> {
    fn from(spawn: SpawnCommand<S>) -> Self {
        Self::Spawn(spawn)
    }
}

impl<S> fmt::Debug for EntityCommand<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(spawn) => f.debug_tuple("Spawn").field(spawn).finish(),
            Self::Destroy(entity) => f.debug_tuple("Destroy").field(entity).finish(),
            Self::Set { entity, insert } => f
                .debug_struct("Set")
                .field("entity", entity)
                .field("insert", insert)
                .finish(),
            Self::Remove { entity, removal } => f
                .debug_struct("Remove")
                .field("entity", entity)
                .field("removal", removal)
                .finish(),
        }
    }
}

/// Follow-up work returned by a reducer.
#[must_use = "effects do nothing unless handed back to the game loop"]
pub enum GameEffect<S> {
    /// Nothing to do.
    None,
    /// Entity mutations, applied in order.
    Commands(Vec<EntityCommand<S>>),
    /// Work that completes later and re-enters the pipeline with its own
    /// effect.
    Deferred(Deferred<S>),
    /// Several effects, applied in order.
    Many(Vec<GameEffect<S>>),
}

/// One unit of work after flattening a [`GameEffect`].
#[derive(Debug)]
pub enum EffectStep<S> {
    Command(EntityCommand<S>),
    Deferred(Deferred<S>),
}

impl<S> GameEffect<S> {
    pub fn none() -> Self {
        Self::None
    }

    pub fn command(command: impl Into<EntityCommand<S>>) -> Self {
        Self::Commands(vec![command.into()])
    }

    pub fn commands<I>(commands: I) -> Self
    where
        I: IntoIterator<Item = EntityCommand<S>>,
    {
        Self::Commands(commands.into_iter().collect())
    }

    pub fn deferred(deferred: Deferred<S>) -> Self {
        Self::Deferred(deferred)
    }

    pub fn many<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = GameEffect<S>>,
    {
        Self::Many(effects.into_iter().collect())
    }

    /// Sequence `self` before `other`.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::None, other) => other,
            (this, Self::None) => this,
            (Self::Many(mut effects), other) => {
                effects.push(other);
                Self::Many(effects)
            }
            (this, other) => Self::Many(vec![this, other]),
        }
    }

    /// Returns `true` if applying this effect would do nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Commands(commands) => commands.is_empty(),
            Self::Deferred(_) => false,
            Self::Many(effects) => effects.iter().all(Self::is_none),
        }
    }

    /// Depth-first flattening in emission order.
    #[must_use]
    pub fn flatten(self) -> Vec<EffectStep<S>> {
        let mut steps = Vec::new();
        self.flatten_into(&mut steps);
        steps
    }

    fn flatten_into(self, steps: &mut Vec<EffectStep<S>>) {
        match self {
            Self::None => {}
            Self::Commands(commands) => steps.extend(commands.into_iter().map(EffectStep::Command)),
            Self::Deferred(deferred) => steps.push(EffectStep::Deferred(deferred)),
            Self::Many(effects) => {
                for effect in effects {
                    effect.flatten_into(steps);
                }
            }
        }
    }
}

impl<S> Default for GameEffect<S> {
    fn default() -> Self {
        Self::None
    }
}

impl<S> FromIterator<GameEffect<S>> for GameEffect<S> {
    fn from_iter<I: IntoIterator<Item = GameEffect<S>>>(iter: I) -> Self {
        Self::many(iter)
    }
}

impl<S> From<EntityCommand<S>> for GameEffect<S> {
    fn from(command: EntityCommand<S>) -> Self {
        Self::command(command)
    }
}

impl<S> fmt::Debug for GameEffect<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Commands(commands) => f.debug_tuple("Commands").field(commands).finish(),
            Self::Deferred(deferred) => f.debug_tuple("Deferred").field(deferred).finish(),
            Self::Many(effects) => f.debug_tuple("Many").field(effects).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use redecs_component::ComponentStore;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Marker(u32);

    impl Component for Marker {
        fn type_name() -> &'static str {
            "Marker"
        }
    }

    #[derive(Default)]
    struct State {
        markers: ComponentStore<Marker>,
    }

    crate::component_access!(State { markers: Marker });

    fn destroyed(steps: &[EffectStep<State>]) -> Vec<u64> {
        steps
            .iter()
            .filter_map(|step| match step {
                EffectStep::Command(EntityCommand::Destroy(e)) => Some(e.id()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_flatten_preserves_emission_order() {
        let effect: GameEffect<State> = GameEffect::many([
            GameEffect::command(EntityCommand::destroy(Entity::from_raw(1))),
            GameEffect::many([
                GameEffect::commands([
                    EntityCommand::destroy(Entity::from_raw(2)),
                    EntityCommand::destroy(Entity::from_raw(3)),
                ]),
                GameEffect::none(),
            ]),
            GameEffect::command(EntityCommand::destroy(Entity::from_raw(4))),
        ]);

        let steps = effect.flatten();
        assert_eq!(destroyed(&steps), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_flatten_keeps_deferred_in_place() {
        let effect: GameEffect<State> = GameEffect::many([
            GameEffect::command(EntityCommand::destroy(Entity::from_raw(1))),
            GameEffect::deferred(Deferred::ready("later", GameEffect::none())),
            GameEffect::command(EntityCommand::destroy(Entity::from_raw(2))),
        ]);

        let steps = effect.flatten();
        assert_eq!(steps.len(), 3);
        assert!(matches!(steps[1], EffectStep::Deferred(_)));
    }

    #[test]
    fn test_merge() {
        let a: GameEffect<State> = GameEffect::command(EntityCommand::destroy(Entity::from_raw(1)));
        assert!(matches!(GameEffect::none().merge(GameEffect::<State>::none()), GameEffect::None));

        let merged = a
            .merge(GameEffect::none())
            .merge(GameEffect::command(EntityCommand::destroy(Entity::from_raw(2))))
            .merge(GameEffect::command(EntityCommand::destroy(Entity::from_raw(3))));
        assert_eq!(destroyed(&merged.flatten()), vec![1, 2, 3]);
    }

    #[test]
    fn test_is_none() {
        assert!(GameEffect::<State>::none().is_none());
        assert!(GameEffect::<State>::commands([]).is_none());
        assert!(GameEffect::<State>::many([GameEffect::none(), GameEffect::commands([])]).is_none());
        assert!(!GameEffect::<State>::command(EntityCommand::destroy(Entity::from_raw(1))).is_none());
    }

    #[test]
    fn test_component_insert_and_removal_apply() {
        let mut state = State::default();
        let entity = Entity::from_raw(5);

        let insert = ComponentInsert::<State>::new(Marker(9));
        assert_eq!(insert.component(), Marker::component_type_id());
        assert_eq!(insert.name(), "Marker");
        insert.apply(&mut state, entity);
        assert_eq!(state.markers.get(entity), Some(&Marker(9)));

        assert!(ComponentRemoval::<State>::new::<Marker>().apply(&mut state, entity));
        assert!(!ComponentRemoval::<State>::new::<Marker>().apply(&mut state, entity));
    }

    #[test]
    fn test_spawn_builder() {
        let spawn = EntityCommand::<State>::spawn().tag("player").with(Marker(1));
        assert_eq!(spawn.tags, vec!["player".to_string()]);
        assert_eq!(spawn.components.len(), 1);
        assert!(format!("{spawn:?}").contains("Marker"));
    }
}
