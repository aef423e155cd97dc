//! Entity lifecycle events.

use redecs_component::{ComponentTypeId, Entity};

/// A lifecycle notification broadcast to every reducer once per occurrence.
///
/// Events are produced by the driver while applying
/// [`EntityCommand`](crate::EntityCommand)s and are never stored past the
/// tick that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityEvent {
    /// A new entity became alive.
    Added(Entity),
    /// An entity was destroyed. Its components are still in their stores
    /// until cleanup reducers react to this event.
    Removed(Entity),
    /// A component was attached to or replaced on an entity.
    ComponentSet {
        entity: Entity,
        component: ComponentTypeId,
    },
    /// A component was detached from an entity.
    ComponentRemoved {
        entity: Entity,
        component: ComponentTypeId,
    },
}

impl EntityEvent {
    /// The entity the event is about.
    #[must_use]
    pub fn entity(&self) -> Entity {
        match *self {
            Self::Added(entity)
            | Self::Removed(entity)
            | Self::ComponentSet { entity, .. }
            | Self::ComponentRemoved { entity, .. } => entity,
        }
    }
}
