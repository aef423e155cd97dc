//! Spawn commands for the demo scene.

use redecs_basic::{Lifetime, Velocity};
use redecs_math::{Transform, Vec2};
use redecs_reducer::{EntityCommand, GameEffect};
use redecs_render::{Color, Shape, Sprite, SpriteAnimation};

use crate::world::DemoWorld;

pub const HERO_TEXTURE: &str = "hero";

type Command = EntityCommand<DemoWorld>;

const WALK_FRAMES: [&str; 3] = ["walk_0", "walk_1", "walk_2"];

/// A static floor and a spinning marker. Needs no textures.
pub fn backdrop() -> GameEffect<DemoWorld> {
    GameEffect::commands([
        Command::from(
            Command::spawn()
                .tag("floor")
                .with(Transform::from_position(Vec2::new(0.0, -120.0)).with_z_index(-10))
                .with(Shape::rect(640.0, 40.0, Color::rgb(0.25, 0.2, 0.15))),
        ),
        Command::from(
            Command::spawn()
                .tag("marker")
                .with(Transform::IDENTITY.with_z_index(-5))
                .with(Velocity::ZERO.with_angular(45.0))
                .with(Shape::polygon(
                    [Vec2::new(0.0, 12.0), Vec2::new(-10.0, -8.0), Vec2::new(10.0, -8.0)],
                    Color::RED,
                )),
        ),
    ])
}

/// `count` walking heroes spread along the floor. Every other one expires
/// after a few seconds.
pub fn heroes(count: usize) -> GameEffect<DemoWorld> {
    GameEffect::commands((0..count).map(|i| {
        let x = -280.0 + i as f32 * 48.0;
        let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
        let mut spawn = Command::spawn()
            .tag("hero")
            .with(Transform::from_position(Vec2::new(x, -84.0)).with_z_index(i as i32))
            .with(Sprite::new(HERO_TEXTURE).with_frame(WALK_FRAMES[0]))
            .with(SpriteAnimation::new(WALK_FRAMES, 0.12))
            .with(Velocity::new(24.0 * direction, 0.0));
        if i % 2 == 1 {
            spawn = spawn.with(Lifetime::seconds(3.0 + i as f64 * 0.5));
        }
        Command::from(spawn)
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use redecs_reducer::LoopConfig;
    use redecs_render::{RenderContext, RenderQueue, TextureAtlas, TextureCache};

    use super::*;
    use crate::world::build_game;

    fn game() -> (redecs_reducer::GameLoop<DemoWorld, crate::world::DemoEnvironment>, Arc<TextureCache>, Arc<RenderQueue>) {
        let cache = Arc::new(TextureCache::new());
        let queue = Arc::new(RenderQueue::new());
        let env = RenderContext::new(Arc::clone(&cache), Arc::clone(&queue));
        (build_game(LoopConfig::default(), env), cache, queue)
    }

    #[test]
    fn test_backdrop_renders_without_textures() {
        let (mut game, _cache, queue) = game();
        game.apply_effect(backdrop());
        game.tick(1.0 / 60.0);

        assert_eq!(game.state().entities.len(), 2);
        assert_eq!(queue.drain().len(), 2);
    }

    #[test]
    fn test_heroes_render_once_texture_arrives() {
        let (mut game, cache, queue) = game();
        game.apply_effect(heroes(4));
        game.tick(1.0 / 60.0);
        assert!(queue.drain().is_empty());

        cache.insert(
            HERO_TEXTURE,
            TextureAtlas::from_json(include_str!("../assets/hero.json")).expect("bundled atlas"),
        );
        game.tick(1.0 / 60.0);
        assert_eq!(queue.drain().len(), 4);
    }

    #[test]
    fn test_expired_heroes_lose_all_components() {
        let (mut game, _cache, _queue) = game();
        game.apply_effect(heroes(2));
        assert_eq!(game.state().entities.tagged("hero").len(), 2);

        for _ in 0..5 {
            game.tick(1.0);
        }

        let world = game.state();
        assert_eq!(world.entities.tagged("hero").len(), 1);
        assert_eq!(world.sprites.len(), 1);
        assert_eq!(world.transforms.len(), 1);
        assert_eq!(world.animations.len(), 1);
        assert_eq!(world.velocities.len(), 1);
        assert!(world.lifetimes.is_empty());
    }
}
