//! What the render reducers hand to the renderer.

use redecs_math::{Mat3, Triangle};
use serde::{Deserialize, Serialize};

/// Linear RGBA, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How the renderer fills a batch's triangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FragmentType {
    /// Flat colour.
    Color(Color),
    /// Sample the named texture at each triangle's texture coordinates.
    Texture(String),
}

/// One render triangle plus, for textured batches, its source triangle in
/// texture pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderTriangle {
    pub triangle: Triangle,
    pub texture: Option<Triangle>,
}

impl RenderTriangle {
    #[must_use]
    pub fn textured(triangle: Triangle, texture: Triangle) -> Self {
        Self {
            triangle,
            texture: Some(texture),
        }
    }

    #[must_use]
    pub fn solid(triangle: Triangle) -> Self {
        Self {
            triangle,
            texture: None,
        }
    }
}

/// Triangles that share one transform and one fragment type.
///
/// Triangle positions are local; `transform` maps them into world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderBatch {
    pub triangles: Vec<RenderTriangle>,
    pub transform: Mat3,
    pub fragment: FragmentType,
    /// Draw order, lower first.
    pub z_index: i32,
}

impl RenderBatch {
    /// Render triangles mapped through the batch transform.
    #[must_use]
    pub fn world_triangles(&self) -> Vec<Triangle> {
        self.triangles
            .iter()
            .map(|t| t.triangle.transformed(&self.transform))
            .collect()
    }

    #[must_use]
    pub fn texture_id(&self) -> Option<&str> {
        match &self.fragment {
            FragmentType::Texture(id) => Some(id),
            FragmentType::Color(_) => None,
        }
    }
}
