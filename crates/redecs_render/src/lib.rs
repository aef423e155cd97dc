//! # redecs_render
//!
//! Rendering reducers for the ECS. Each tick they read [`Transform`] plus a
//! visual component ([`Sprite`], [`Shape`]), resolve textures through the
//! environment's [`ResourceManager`], and hand [`RenderBatch`]es to its
//! [`RendererSink`]. Nothing is read back: the GPU backend behind the sink
//! owns sorting, submission and presentation.
//!
//! Missing resources are not errors. A sprite whose texture is not loaded yet
//! is skipped for the frame; a frame name that is not in the atlas falls back
//! to the whole image.
//!
//! [`Transform`]: redecs_math::Transform

pub mod animation;
pub mod atlas;
pub mod batch;
pub mod environment;
pub mod error;
pub mod renderer;
pub mod resource;
pub mod shape;
pub mod sprite;
pub mod sprite_reducer;

pub use animation::{SpriteAnimation, SpriteAnimationReducer};
pub use atlas::{AtlasFrame, AtlasMeta, AtlasSize, FrameRect, TextureAtlas};
pub use batch::{Color, FragmentType, RenderBatch, RenderTriangle};
pub use environment::{RenderContext, RenderingEnvironment};
pub use error::AtlasError;
pub use renderer::{RenderQueue, RendererSink};
pub use resource::{ResourceManager, TextureCache};
pub use shape::{Shape, ShapeKind, ShapeRenderingReducer};
pub use sprite::{Sprite, TextureRef};
pub use sprite_reducer::{SpriteRenderingReducer, quad_triangles, source_rect, sprite_batch, sprite_matrix};
