//! The demo's state and environment.

use std::sync::Arc;

use redecs_basic::{Lifetime, Velocity};
use redecs_component::{ComponentStore, EntityRepository};
use redecs_math::Transform;
use redecs_reducer::{ComponentCleanup, GameLoop, GameState, LoopConfig};
use redecs_render::{
    RenderContext, RenderQueue, Shape, Sprite, SpriteAnimation, TextureCache,
};

#[derive(Debug, Default)]
pub struct DemoWorld {
    pub entities: EntityRepository,
    pub transforms: ComponentStore<Transform>,
    pub sprites: ComponentStore<Sprite>,
    pub animations: ComponentStore<SpriteAnimation>,
    pub shapes: ComponentStore<Shape>,
    pub velocities: ComponentStore<Velocity>,
    pub lifetimes: ComponentStore<Lifetime>,
}

impl GameState for DemoWorld {
    fn entities(&self) -> &EntityRepository {
        &self.entities
    }

    fn entities_mut(&mut self) -> &mut EntityRepository {
        &mut self.entities
    }
}

redecs_reducer::component_access!(DemoWorld {
    transforms: Transform,
    sprites: Sprite,
    animations: SpriteAnimation,
    shapes: Shape,
    velocities: Velocity,
    lifetimes: Lifetime,
});

pub type DemoEnvironment = RenderContext<Arc<TextureCache>, Arc<RenderQueue>>;

/// The demo loop with every reducer installed.
///
/// Gameplay runs before rendering so batches reflect this tick's motion.
/// Cleanup reducers come last; they only act on `Removed` events.
pub fn build_game(config: LoopConfig, environment: DemoEnvironment) -> GameLoop<DemoWorld, DemoEnvironment> {
    GameLoop::new(config, DemoWorld::default(), environment)
        .with_reducer(redecs_render::SpriteAnimationReducer)
        .with_reducer(redecs_basic::MovementReducer)
        .with_reducer(redecs_basic::LifetimeReducer)
        .with_reducer(redecs_render::ShapeRenderingReducer)
        .with_reducer(redecs_render::SpriteRenderingReducer)
        .with_reducer(ComponentCleanup::<Transform>::new())
        .with_reducer(ComponentCleanup::<Sprite>::new())
        .with_reducer(ComponentCleanup::<SpriteAnimation>::new())
        .with_reducer(ComponentCleanup::<Shape>::new())
        .with_reducer(ComponentCleanup::<Velocity>::new())
        .with_reducer(ComponentCleanup::<Lifetime>::new())
}
