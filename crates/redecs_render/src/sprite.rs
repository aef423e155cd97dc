//! The sprite component.

use redecs_component::Component;
use serde::{Deserialize, Serialize};

/// A texture plus an optional named frame inside its atlas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef {
    pub texture_id: String,
    #[serde(default)]
    pub frame_id: Option<String>,
}

impl TextureRef {
    /// The whole texture.
    #[must_use]
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            frame_id: None,
        }
    }

    /// One named frame of the texture's atlas.
    #[must_use]
    pub fn frame(texture_id: impl Into<String>, frame_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            frame_id: Some(frame_id.into()),
        }
    }
}

/// Draws a textured quad at the entity's transform.
///
/// Set once at spawn; only animation logic rewrites the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: TextureRef,
}

impl Sprite {
    #[must_use]
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture: TextureRef::new(texture_id),
        }
    }

    #[must_use]
    pub fn with_frame(mut self, frame_id: impl Into<String>) -> Self {
        self.texture.frame_id = Some(frame_id.into());
        self
    }
}

impl Component for Sprite {
    fn type_name() -> &'static str {
        "Sprite"
    }
}
