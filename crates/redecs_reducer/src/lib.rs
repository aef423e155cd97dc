//! # redecs_reducer
//!
//! The scheduling core of the ECS. Game logic is written as [`Reducer`]s:
//! each tick a reducer gets exclusive access to the shared state, mutates it,
//! and returns a [`GameEffect`] describing follow-up work. Entity lifecycle
//! changes produced by effects are broadcast back to every reducer as
//! [`EntityEvent`]s.
//!
//! The [`GameLoop`] owns the state, the environment and the ordered reducer
//! list, and runs each tick in fixed phases:
//!
//! 1. Poll pending [`Deferred`] continuations and apply the ones that
//!    resolved.
//! 2. Dispatch queued events.
//! 3. Run every reducer in order, applying its effect as soon as it returns.
//! 4. Dispatch the events produced by step 3.
//!
//! ## Usage
//!
//! ```rust
//! use redecs_reducer::{
//!     ComponentStore, EntityCommand, EntityRepository, GameEffect, GameLoop, GameState,
//!     LoopConfig, reducer_fn,
//! };
//! use redecs_component::Component;
//!
//! #[derive(Debug, Clone)]
//! struct Score(u32);
//!
//! impl Component for Score {
//!     fn type_name() -> &'static str { "Score" }
//! }
//!
//! #[derive(Default)]
//! struct World {
//!     entities: EntityRepository,
//!     scores: ComponentStore<Score>,
//! }
//!
//! impl GameState for World {
//!     fn entities(&self) -> &EntityRepository { &self.entities }
//!     fn entities_mut(&mut self) -> &mut EntityRepository { &mut self.entities }
//! }
//!
//! redecs_reducer::component_access!(World { scores: Score });
//!
//! let mut game = GameLoop::new(LoopConfig::default(), World::default(), ());
//! game.add_reducer(reducer_fn("spawner", |world: &mut World, _dt, _env: &()| {
//!     if world.entities.is_empty() {
//!         GameEffect::command(EntityCommand::spawn().with(Score(0)))
//!     } else {
//!         GameEffect::none()
//!     }
//! }));
//!
//! game.tick(1.0 / 60.0);
//! assert_eq!(game.state().scores.len(), 1);
//! ```

pub mod deferred;
pub mod effect;
pub mod error;
pub mod event;
pub mod game_loop;
pub mod reducer;
pub mod state;

pub use deferred::{Deferred, DeferredHandle};
pub use effect::{ComponentInsert, ComponentRemoval, EffectStep, EntityCommand, GameEffect, SpawnCommand};
pub use error::LoopError;
pub use event::EntityEvent;
pub use game_loop::{GameLoop, LoopConfig, TickReport};
pub use reducer::{ComponentCleanup, FnReducer, Reducer, reducer_fn};
pub use state::{ComponentAccess, GameState};

pub use redecs_component::{Component, ComponentStore, ComponentTypeId, Entity, EntityRepository};
