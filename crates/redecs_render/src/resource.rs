//! Texture lookup.
//!
//! Reducers only ever ask "is this texture loaded, and what does its atlas
//! look like". Loading happens elsewhere, typically from a deferred effect,
//! and shows up in the cache whenever it completes.

use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::atlas::TextureAtlas;
use crate::error::AtlasError;

/// Resolves texture ids to loaded atlases.
pub trait ResourceManager {
    /// The atlas for `texture_id`, or `None` if it is not loaded.
    fn texture(&self, texture_id: &str) -> Option<Arc<TextureAtlas>>;
}

impl<T: ResourceManager + ?Sized> ResourceManager for Arc<T> {
    fn texture(&self, texture_id: &str) -> Option<Arc<TextureAtlas>> {
        (**self).texture(texture_id)
    }
}

/// Thread-safe texture store.
///
/// Readers never block loaders: a load running on another task inserts with
/// `&self` while the game loop keeps reading.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: DashMap<String, Arc<TextureAtlas>>,
}

impl TextureCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `atlas` under `texture_id`, replacing any previous entry.
    pub fn insert(&self, texture_id: impl Into<String>, atlas: TextureAtlas) -> Arc<TextureAtlas> {
        let texture_id = texture_id.into();
        let atlas = Arc::new(atlas);
        info!(
            texture_id = %texture_id,
            frames = atlas.frames.len(),
            width = atlas.meta.size.w,
            height = atlas.meta.size.h,
            "texture loaded"
        );
        self.textures.insert(texture_id, Arc::clone(&atlas));
        atlas
    }

    /// Parse a TexturePacker document and store it.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Parse`] if the document is malformed. The
    /// cache is left unchanged.
    pub fn load_json(&self, texture_id: impl Into<String>, json: &str) -> Result<Arc<TextureAtlas>, AtlasError> {
        let atlas = TextureAtlas::from_json(json)?;
        Ok(self.insert(texture_id, atlas))
    }

    /// Read a TexturePacker document from disk and store it.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Io`] if the file cannot be read and
    /// [`AtlasError::Parse`] if it is malformed.
    pub fn load_file(
        &self,
        texture_id: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Arc<TextureAtlas>, AtlasError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_json(texture_id, &json)
    }

    /// Drop a texture. Sprites using it stop rendering.
    pub fn remove(&self, texture_id: &str) -> Option<Arc<TextureAtlas>> {
        self.textures.remove(texture_id).map(|(_, atlas)| atlas)
    }

    #[must_use]
    pub fn contains(&self, texture_id: &str) -> bool {
        self.textures.contains_key(texture_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Loaded texture ids, sorted.
    #[must_use]
    pub fn texture_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.textures.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl ResourceManager for TextureCache {
    fn texture(&self, texture_id: &str) -> Option<Arc<TextureAtlas>> {
        self.textures.get(texture_id).map(|entry| Arc::clone(entry.value()))
    }
}
