//! What render reducers need from the game's environment.

use crate::renderer::RendererSink;
use crate::resource::ResourceManager;

/// Access to textures and to the renderer.
///
/// Games implement this on their own environment type; [`RenderContext`]
/// covers the common case of exactly these two services.
pub trait RenderingEnvironment {
    fn resource_manager(&self) -> &dyn ResourceManager;
    fn renderer(&self) -> &dyn RendererSink;
}

/// A plain pairing of a resource manager and a renderer.
#[derive(Debug, Clone, Default)]
pub struct RenderContext<M, Q> {
    pub resources: M,
    pub renderer: Q,
}

impl<M, Q> RenderContext<M, Q> {
    #[must_use]
    pub fn new(resources: M, renderer: Q) -> Self {
        Self { resources, renderer }
    }
}

impl<M, Q> RenderingEnvironment for RenderContext<M, Q>
where
    M: ResourceManager,
    Q: RendererSink,
{
    fn resource_manager(&self) -> &dyn ResourceManager {
        &self.resources
    }

    fn renderer(&self) -> &dyn RendererSink {
        &self.renderer
    }
}
