//! Turns `Transform` + `Sprite` into one textured quad per entity.

use redecs_math::{Mat3, MatrixExt, Rect, Transform, Triangle, Vec2};
use redecs_reducer::{ComponentAccess, GameEffect, Reducer};
use tracing::{debug, trace};

use crate::atlas::TextureAtlas;
use crate::batch::{FragmentType, RenderBatch, RenderTriangle};
use crate::environment::RenderingEnvironment;
use crate::sprite::{Sprite, TextureRef};

/// Source rectangle of `texture` in atlas pixels.
///
/// A named frame resolves to the first atlas frame with exactly that name.
/// No frame name, or a name the atlas does not have, selects the whole
/// image.
#[must_use]
pub fn source_rect(atlas: &TextureAtlas, texture: &TextureRef) -> Rect {
    let Some(frame_id) = texture.frame_id.as_deref() else {
        return atlas.image_rect();
    };
    match atlas.frame(frame_id) {
        Some(frame) => frame.frame.to_rect(),
        None => {
            debug!(
                texture_id = %texture.texture_id,
                frame_id,
                "frame not in atlas, drawing full image"
            );
            atlas.image_rect()
        }
    }
}

/// Local-to-world matrix for a sprite whose source is `source_size` pixels.
///
/// Translate, rotate and scale by `transform`, then shift by half the
/// source size. Each step right-multiplies, so local points are scaled
/// first and translated last.
#[must_use]
pub fn sprite_matrix(transform: &Transform, source_size: Vec2) -> Mat3 {
    transform.to_matrix().translated_by(source_size * 0.5)
}

/// The quad `render` split along its min-x/max-y to max-x/min-y diagonal,
/// each half paired with the same corners of `source`.
#[must_use]
pub fn quad_triangles(render: Rect, source: Rect) -> [RenderTriangle; 2] {
    let corners = |r: Rect| {
        (
            Vec2::new(r.min_x(), r.min_y()),
            Vec2::new(r.max_x(), r.min_y()),
            Vec2::new(r.min_x(), r.max_y()),
            Vec2::new(r.max_x(), r.max_y()),
        )
    };
    let (r_min, r_xmax, r_ymax, r_max) = corners(render);
    let (t_min, t_xmax, t_ymax, t_max) = corners(source);

    let top = RenderTriangle::textured(
        Triangle::new(r_ymax, r_xmax, r_max),
        Triangle::new(t_ymax, t_xmax, t_max),
    );
    let bottom = RenderTriangle::textured(
        Triangle::new(r_min, r_xmax, r_ymax),
        Triangle::new(t_min, t_xmax, t_ymax),
    );
    [top, bottom]
}

/// The batch for one sprite with a resolved atlas.
#[must_use]
pub fn sprite_batch(transform: &Transform, sprite: &Sprite, atlas: &TextureAtlas) -> RenderBatch {
    let source = source_rect(atlas, &sprite.texture);
    let render = Rect::from_center(Vec2::ZERO, source.size);

    RenderBatch {
        triangles: quad_triangles(render, source).to_vec(),
        transform: sprite_matrix(transform, source.size),
        fragment: FragmentType::Texture(sprite.texture.texture_id.clone()),
        z_index: transform.z_index,
    }
}

/// Enqueues one [`RenderBatch`] per entity that has a [`Sprite`], a
/// [`Transform`] and a loaded texture.
///
/// Entities missing any of the three are skipped for the tick. The reducer
/// never writes state and never returns an effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteRenderingReducer;

impl<S, E> Reducer<S, E> for SpriteRenderingReducer
where
    S: ComponentAccess<Sprite> + ComponentAccess<Transform>,
    E: RenderingEnvironment,
{
    fn reduce(&self, state: &mut S, _delta: f64, environment: &E) -> GameEffect<S> {
        let transforms = <S as ComponentAccess<Transform>>::components(state);
        let resources = environment.resource_manager();
        let renderer = environment.renderer();

        <S as ComponentAccess<Sprite>>::components(state).for_each(|entity, sprite| {
            let Some(transform) = transforms.get(entity) else {
                return;
            };
            let Some(atlas) = resources.texture(&sprite.texture.texture_id) else {
                trace!(%entity, texture_id = %sprite.texture.texture_id, "texture not loaded");
                return;
            };
            renderer.enqueue(vec![sprite_batch(transform, sprite, &atlas)]);
        });

        GameEffect::none()
    }
}
