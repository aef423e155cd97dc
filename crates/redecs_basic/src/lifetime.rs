//! Timed entity lifetimes.

use redecs_component::{Component, Entity};
use redecs_reducer::{ComponentAccess, EntityCommand, GameEffect, Reducer};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Seconds until the entity is destroyed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Lifetime {
    pub remaining: f64,
}

impl Lifetime {
    #[must_use]
    pub fn seconds(remaining: f64) -> Self {
        Self { remaining }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

impl Component for Lifetime {
    fn type_name() -> &'static str {
        "Lifetime"
    }
}

/// Counts lifetimes down and emits a destroy command when one runs out.
///
/// The expired [`Lifetime`] is removed immediately so the entity is only
/// destroyed once.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifetimeReducer;

impl<S, E> Reducer<S, E> for LifetimeReducer
where
    S: ComponentAccess<Lifetime>,
{
    fn reduce(&self, state: &mut S, delta: f64, _environment: &E) -> GameEffect<S> {
        let lifetimes = <S as ComponentAccess<Lifetime>>::components_mut(state);

        let mut expired: Vec<Entity> = Vec::new();
        lifetimes.for_each_mut(|entity, lifetime| {
            lifetime.remaining -= delta;
            if lifetime.is_expired() {
                expired.push(entity);
            }
        });
        expired.sort_unstable();

        for &entity in &expired {
            lifetimes.remove(entity);
            trace!(%entity, "lifetime expired");
        }
        GameEffect::commands(expired.into_iter().map(EntityCommand::destroy))
    }
}
