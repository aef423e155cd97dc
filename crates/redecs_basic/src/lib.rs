//! Basic gameplay components and the reducers that drive them.
//!
//! - [`Velocity`] + [`MovementReducer`] integrate motion into
//!   [`Transform`](redecs_math::Transform)s.
//! - [`Lifetime`] + [`LifetimeReducer`] destroy entities after a delay.

pub mod lifetime;
pub mod movement;

pub use lifetime::{Lifetime, LifetimeReducer};
pub use movement::{MovementReducer, Velocity};
