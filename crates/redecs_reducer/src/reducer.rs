//! The reducer protocol.

use std::borrow::Cow;
use std::marker::PhantomData;

use redecs_component::Component;

use crate::effect::GameEffect;
use crate::event::EntityEvent;
use crate::state::ComponentAccess;

/// A unit of game logic run by the [`GameLoop`](crate::GameLoop).
///
/// `S` is the shared state bag and `E` the environment: an immutable bag of
/// capabilities (resource managers, renderer sinks, input) owned by the loop.
///
/// Each tick the loop calls [`Reducer::reduce`] on every reducer in
/// registration order. A reducer has exclusive access to the state for the
/// duration of the call and sees everything earlier reducers did in the same
/// tick. Lifecycle events are delivered through [`Reducer::reduce_event`].
pub trait Reducer<S, E> {
    /// Name used in logs.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// Per-tick reduction. `delta` is the time since the previous tick in
    /// seconds.
    fn reduce(&self, state: &mut S, delta: f64, environment: &E) -> GameEffect<S>;

    /// React to an entity lifecycle event. Does nothing by default.
    fn reduce_event(&self, state: &mut S, event: &EntityEvent, environment: &E) {
        let _ = (state, event, environment);
    }
}

impl<S, E, R> Reducer<S, E> for Box<R>
where
    R: Reducer<S, E> + ?Sized,
{
    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }

    fn reduce(&self, state: &mut S, delta: f64, environment: &E) -> GameEffect<S> {
        (**self).reduce(state, delta, environment)
    }

    fn reduce_event(&self, state: &mut S, event: &EntityEvent, environment: &E) {
        (**self).reduce_event(state, event, environment);
    }
}

/// A reducer built from a closure. See [`reducer_fn`].
pub struct FnReducer<F> {
    name: Cow<'static, str>,
    f: F,
}

/// Adapt a per-tick closure into a [`Reducer`] that ignores events.
pub fn reducer_fn<S, E, F>(name: impl Into<Cow<'static, str>>, f: F) -> FnReducer<F>
where
    F: Fn(&mut S, f64, &E) -> GameEffect<S>,
{
    FnReducer {
        name: name.into(),
        f,
    }
}

impl<S, E, F> Reducer<S, E> for FnReducer<F>
where
    F: Fn(&mut S, f64, &E) -> GameEffect<S>,
{
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_ref())
    }

    fn reduce(&self, state: &mut S, delta: f64, environment: &E) -> GameEffect<S> {
        (self.f)(state, delta, environment)
    }
}

/// Drops an entity's `C` component when the entity is removed.
///
/// Register one per component kind so destroyed entities do not leave
/// orphaned components behind.
pub struct ComponentCleanup<C> {
    _component: PhantomData<fn() -> C>,
}

impl<C> ComponentCleanup<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _component: PhantomData,
        }
    }
}

impl<C> Default for ComponentCleanup<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E, C> Reducer<S, E> for ComponentCleanup<C>
where
    C: Component,
    S: ComponentAccess<C>,
{
    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("cleanup<{}>", C::type_name()))
    }

    fn reduce(&self, _state: &mut S, _delta: f64, _environment: &E) -> GameEffect<S> {
        GameEffect::none()
    }

    fn reduce_event(&self, state: &mut S, event: &EntityEvent, _environment: &E) {
        if let EntityEvent::Removed(entity) = *event {
            <S as ComponentAccess<C>>::components_mut(state).remove(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use redecs_component::{ComponentStore, Entity};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health(u32);

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Default)]
    struct State {
        health: ComponentStore<Health>,
        ticks: u32,
    }

    crate::component_access!(State { health: Health });

    #[test]
    fn test_fn_reducer() {
        let reducer = reducer_fn("counter", |state: &mut State, _delta, _env: &()| {
            state.ticks += 1;
            GameEffect::none()
        });
        let mut state = State::default();

        assert_eq!(Reducer::<State, ()>::name(&reducer), "counter");
        let _ = reducer.reduce(&mut state, 0.1, &());
        let _ = reducer.reduce(&mut state, 0.1, &());
        assert_eq!(state.ticks, 2);
    }

    #[test]
    fn test_cleanup_removes_on_removed_event() {
        let cleanup = ComponentCleanup::<Health>::new();
        let mut state = State::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        state.health.set(a, Health(10));
        state.health.set(b, Health(20));

        cleanup.reduce_event(&mut state, &EntityEvent::Added(a), &());
        assert_eq!(state.health.len(), 2);

        cleanup.reduce_event(&mut state, &EntityEvent::Removed(a), &());
        assert!(state.health.get(a).is_none());
        assert_eq!(state.health.get(b), Some(&Health(20)));
        assert_eq!(Reducer::<State, ()>::name(&cleanup), "cleanup<Health>");
    }

    #[test]
    fn test_boxed_reducer_delegates() {
        let boxed: Box<dyn Reducer<State, ()>> = Box::new(reducer_fn(
            "boxed",
            |state: &mut State, _delta, _env: &()| {
                state.ticks += 10;
                GameEffect::none()
            },
        ));
        let mut state = State::default();
        let _ = boxed.reduce(&mut state, 0.0, &());
        assert_eq!(state.ticks, 10);
        assert_eq!(boxed.name(), "boxed");
    }
}
