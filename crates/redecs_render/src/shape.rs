//! Solid-colour shapes.

use redecs_component::Component;
use redecs_math::{Transform, Triangle, Vec2};
use redecs_reducer::{ComponentAccess, GameEffect, Reducer};
use serde::{Deserialize, Serialize};

use crate::batch::{Color, FragmentType, RenderBatch, RenderTriangle};
use crate::environment::RenderingEnvironment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Axis-aligned rectangle centred on the entity.
    Rect { width: f32, height: f32 },
    /// Convex polygon, points in local space, in winding order.
    Polygon(Vec<Vec2>),
}

/// Draws a filled shape at the entity's transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub fill: Color,
}

impl Shape {
    #[must_use]
    pub fn rect(width: f32, height: f32, fill: Color) -> Self {
        Self {
            kind: ShapeKind::Rect { width, height },
            fill,
        }
    }

    #[must_use]
    pub fn polygon(points: impl IntoIterator<Item = Vec2>, fill: Color) -> Self {
        Self {
            kind: ShapeKind::Polygon(points.into_iter().collect()),
            fill,
        }
    }

    /// Outline points in local space.
    #[must_use]
    pub fn points(&self) -> Vec<Vec2> {
        match &self.kind {
            ShapeKind::Rect { width, height } => {
                let (hw, hh) = (width * 0.5, height * 0.5);
                vec![
                    Vec2::new(-hw, -hh),
                    Vec2::new(hw, -hh),
                    Vec2::new(hw, hh),
                    Vec2::new(-hw, hh),
                ]
            }
            ShapeKind::Polygon(points) => points.clone(),
        }
    }

    /// Fan triangulation from the first point. Fewer than three points
    /// yield nothing.
    #[must_use]
    pub fn triangles(&self) -> Vec<Triangle> {
        let points = self.points();
        let Some((&first, rest)) = points.split_first() else {
            return Vec::new();
        };
        rest.windows(2)
            .map(|pair| Triangle::new(first, pair[0], pair[1]))
            .collect()
    }
}

impl Component for Shape {
    fn type_name() -> &'static str {
        "Shape"
    }
}

/// Enqueues one colour-filled [`RenderBatch`] per entity with a [`Shape`]
/// and a [`Transform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeRenderingReducer;

impl<S, E> Reducer<S, E> for ShapeRenderingReducer
where
    S: ComponentAccess<Shape> + ComponentAccess<Transform>,
    E: RenderingEnvironment,
{
    fn reduce(&self, state: &mut S, _delta: f64, environment: &E) -> GameEffect<S> {
        let transforms = <S as ComponentAccess<Transform>>::components(state);
        let renderer = environment.renderer();

        <S as ComponentAccess<Shape>>::components(state).for_each(|entity, shape| {
            let Some(transform) = transforms.get(entity) else {
                return;
            };
            let triangles = shape.triangles();
            if triangles.is_empty() {
                return;
            }
            renderer.enqueue(vec![RenderBatch {
                triangles: triangles.into_iter().map(RenderTriangle::solid).collect(),
                transform: transform.to_matrix(),
                fragment: FragmentType::Color(shape.fill),
                z_index: transform.z_index,
            }]);
        });

        GameEffect::none()
    }
}
