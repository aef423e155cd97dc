//! Linear and angular motion.

use redecs_component::{Component, Entity};
use redecs_math::{Transform, Vec2};
use redecs_reducer::{ComponentAccess, GameEffect, Reducer};
use serde::{Deserialize, Serialize};

/// Motion per second.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    /// World units per second.
    pub linear: Vec2,
    /// Degrees per second, counter-clockwise.
    pub angular: f32,
}

impl Velocity {
    /// No motion.
    pub const ZERO: Self = Self {
        linear: Vec2::ZERO,
        angular: 0.0,
    };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            linear: Vec2::new(x, y),
            angular: 0.0,
        }
    }

    #[must_use]
    pub fn with_angular(mut self, degrees_per_second: f32) -> Self {
        self.angular = degrees_per_second;
        self
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// Moves every entity that has both a [`Velocity`] and a [`Transform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementReducer;

impl<S, E> Reducer<S, E> for MovementReducer
where
    S: ComponentAccess<Velocity> + ComponentAccess<Transform>,
{
    fn reduce(&self, state: &mut S, delta: f64, _environment: &E) -> GameEffect<S> {
        let dt = delta as f32;
        let moving: Vec<(Entity, Velocity)> = <S as ComponentAccess<Velocity>>::components(state)
            .iter()
            .map(|(entity, velocity)| (entity, *velocity))
            .collect();

        let transforms = <S as ComponentAccess<Transform>>::components_mut(state);
        for (entity, velocity) in moving {
            if let Some(transform) = transforms.get_mut(entity) {
                transform.position += velocity.linear * dt;
                transform.rotation += velocity.angular * dt;
            }
        }
        GameEffect::none()
    }
}

#[cfg(test)]
mod tests {
    use redecs_component::ComponentStore;

    use super::*;

    #[derive(Default)]
    struct State {
        velocities: ComponentStore<Velocity>,
        transforms: ComponentStore<Transform>,
    }

    redecs_reducer::component_access!(State {
        velocities: Velocity,
        transforms: Transform,
    });

    #[test]
    fn test_moves_entities_with_both_components() {
        let mut state = State::default();
        let mover = Entity::from_raw(1);
        let still = Entity::from_raw(2);
        let no_transform = Entity::from_raw(3);

        state.velocities.set(mover, Velocity::new(10.0, -4.0).with_angular(90.0));
        state.transforms.set(mover, Transform::from_position(Vec2::new(1.0, 1.0)));
        state.transforms.set(still, Transform::IDENTITY);
        state.velocities.set(no_transform, Velocity::new(1.0, 1.0));

        let effect = MovementReducer.reduce(&mut state, 0.5, &());
        assert!(effect.is_none());

        let moved = state.transforms.get(mover).copied().unwrap_or_default();
        assert_eq!(moved.position, Vec2::new(6.0, -1.0));
        assert_eq!(moved.rotation, 45.0);
        assert_eq!(state.transforms.get(still), Some(&Transform::IDENTITY));
        assert!(state.transforms.get(no_transform).is_none());
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let mut state = State::default();
        let e = Entity::from_raw(1);
        state.velocities.set(e, Velocity::new(100.0, 100.0));
        state.transforms.set(e, Transform::IDENTITY);

        let _ = MovementReducer.reduce(&mut state, 0.0, &());
        assert_eq!(state.transforms.get(e), Some(&Transform::IDENTITY));
    }
}
