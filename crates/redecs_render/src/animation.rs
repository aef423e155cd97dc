//! Frame-by-frame sprite animation.

use redecs_component::{Component, Entity};
use redecs_reducer::{ComponentAccess, GameEffect, Reducer};
use serde::{Deserialize, Serialize};

use crate::sprite::Sprite;

/// Cycles a sprite through named atlas frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteAnimation {
    /// Frame names, in playback order.
    pub frames: Vec<String>,
    /// Seconds each frame is shown.
    pub frame_duration: f64,
    /// Seconds since the animation started.
    #[serde(default)]
    pub elapsed: f64,
    /// Restart after the last frame instead of holding it.
    pub looping: bool,
}

impl SpriteAnimation {
    /// A looping animation.
    #[must_use]
    pub fn new<I, T>(frames: I, frame_duration: f64) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
            frame_duration,
            elapsed: 0.0,
            looping: true,
        }
    }

    /// Plays once and holds the last frame.
    #[must_use]
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    fn frame_index(&self) -> usize {
        let len = self.frames.len();
        if len == 0 || self.frame_duration <= 0.0 {
            return 0;
        }
        let step = (self.elapsed / self.frame_duration).floor().max(0.0) as usize;
        if self.looping { step % len } else { step.min(len - 1) }
    }

    /// Name of the frame to show now.
    #[must_use]
    pub fn current_frame(&self) -> Option<&str> {
        self.frames.get(self.frame_index()).map(String::as_str)
    }

    /// `true` once a non-looping animation has shown its last frame for a
    /// full frame duration.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.looping && self.elapsed >= self.frames.len() as f64 * self.frame_duration
    }
}

impl Component for SpriteAnimation {
    fn type_name() -> &'static str {
        "SpriteAnimation"
    }
}

/// Advances every [`SpriteAnimation`] and writes its current frame into the
/// entity's [`Sprite`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteAnimationReducer;

impl<S, E> Reducer<S, E> for SpriteAnimationReducer
where
    S: ComponentAccess<SpriteAnimation> + ComponentAccess<Sprite>,
{
    fn reduce(&self, state: &mut S, delta: f64, _environment: &E) -> GameEffect<S> {
        let mut current: Vec<(Entity, String)> = Vec::new();
        <S as ComponentAccess<SpriteAnimation>>::components_mut(state).for_each_mut(|entity, animation| {
            if !animation.is_finished() {
                animation.elapsed += delta;
            }
            if let Some(frame) = animation.current_frame() {
                current.push((entity, frame.to_owned()));
            }
        });

        let sprites = <S as ComponentAccess<Sprite>>::components_mut(state);
        for (entity, frame) in current {
            if let Some(sprite) = sprites.get_mut(entity)
                && sprite.texture.frame_id.as_deref() != Some(frame.as_str())
            {
                sprite.texture.frame_id = Some(frame);
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
    struct World {
        animations: ComponentStore<SpriteAnimation>,
        sprites: ComponentStore<Sprite>,
    }

    redecs_reducer::component_access!(World {
        animations: SpriteAnimation,
        sprites: Sprite,
    });

    fn frame_of(world: &World, entity: Entity) -> Option<&str> {
        world.sprites.get(entity).and_then(|s| s.texture.frame_id.as_deref())
    }

    #[test]
    fn test_looping_wraps() {
        let mut anim = SpriteAnimation::new(["a", "b", "c"], 0.5);
        assert_eq!(anim.current_frame(), Some("a"));
        anim.elapsed = 0.75;
        assert_eq!(anim.current_frame(), Some("b"));
        anim.elapsed = 1.5;
        assert_eq!(anim.current_frame(), Some("a"));
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_once_holds_last_frame() {
        let mut anim = SpriteAnimation::new(["a", "b"], 1.0).once();
        anim.elapsed = 1.5;
        assert!(!anim.is_finished());
        anim.elapsed = 10.0;
        assert_eq!(anim.current_frame(), Some("b"));
        assert!(anim.is_finished());
    }

    #[test]
    fn test_degenerate_animations() {
        let empty = SpriteAnimation::new(Vec::<String>::new(), 1.0);
        assert_eq!(empty.current_frame(), None);

        let mut frozen = SpriteAnimation::new(["a", "b"], 0.0);
        frozen.elapsed = 5.0;
        assert_eq!(frozen.current_frame(), Some("a"));
    }

    #[test]
    fn test_reducer_updates_sprite_frame() {
        let mut world = World::default();
        let walker = Entity::from_raw(1);
        let no_sprite = Entity::from_raw(2);
        world.sprites.set(walker, Sprite::new("hero"));
        world
            .animations
            .set(walker, SpriteAnimation::new(["walk_0", "walk_1"], 0.25));
        world.animations.set(no_sprite, SpriteAnimation::new(["x"], 0.25));

        let _ = SpriteAnimationReducer.reduce(&mut world, 0.1, &());
        assert_eq!(frame_of(&world, walker), Some("walk_0"));

        let _ = SpriteAnimationReducer.reduce(&mut world, 0.2, &());
        assert_eq!(frame_of(&world, walker), Some("walk_1"));

        let _ = SpriteAnimationReducer.reduce(&mut world, 0.2, &());
        assert_eq!(frame_of(&world, walker), Some("walk_0"));
        assert!(world.sprites.get(no_sprite).is_none());
    }
}
