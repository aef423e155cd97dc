//! Texture atlas metadata.
//!
//! An atlas is one image plus named sub-rectangles ("frames"). The JSON
//! layout is the one TexturePacker emits: `frames` is either an array of
//! `{ "filename", "frame": {x, y, w, h} }` objects or an object keyed by
//! frame name, and `meta.size` holds the image size in pixels. Unknown
//! fields are ignored.

use std::collections::BTreeMap;

use redecs_math::{Rect, Vec2};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AtlasError;

/// Pixel rectangle of a frame inside the atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl FrameRect {
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

impl From<Rect> for FrameRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.min_x(),
            y: rect.min_y(),
            w: rect.width(),
            h: rect.height(),
        }
    }
}

/// A named frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasFrame {
    pub filename: String,
    pub frame: FrameRect,
    #[serde(default)]
    pub rotated: bool,
    #[serde(default)]
    pub trimmed: bool,
}

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasSize {
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasMeta {
    /// Image file the frames refer to.
    #[serde(default)]
    pub image: Option<String>,
    pub size: AtlasSize,
}

/// Frame list plus image metadata for one texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureAtlas {
    #[serde(deserialize_with = "deserialize_frames")]
    pub frames: Vec<AtlasFrame>,
    pub meta: AtlasMeta,
}

impl TextureAtlas {
    /// An atlas with no frames for an image of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            frames: Vec::new(),
            meta: AtlasMeta {
                image: None,
                size: AtlasSize {
                    w: width,
                    h: height,
                },
            },
        }
    }

    /// Add a frame.
    #[must_use]
    pub fn with_frame(mut self, filename: impl Into<String>, rect: Rect) -> Self {
        self.frames.push(AtlasFrame {
            filename: filename.into(),
            frame: rect.into(),
            rotated: false,
            trimmed: false,
        });
        self
    }

    /// Parse a TexturePacker JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Parse`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, AtlasError> {
        Ok(serde_json::from_str(json)?)
    }

    /// First frame whose name is exactly `name`.
    #[must_use]
    pub fn frame(&self, name: &str) -> Option<&AtlasFrame> {
        self.frames.iter().find(|f| f.filename == name)
    }

    /// Image size as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.meta.size.w, self.meta.size.h)
    }

    /// The whole image, at the origin.
    #[must_use]
    pub fn image_rect(&self) -> Rect {
        Rect::from_size(self.size())
    }
}

#[derive(Deserialize)]
struct FrameEntry {
    frame: FrameRect,
    #[serde(default)]
    rotated: bool,
    #[serde(default)]
    trimmed: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameList {
    List(Vec<AtlasFrame>),
    Map(BTreeMap<String, FrameEntry>),
}

/// Accepts both frame layouts. Map-form frames come out sorted by name.
fn deserialize_frames<'de, D>(deserializer: D) -> Result<Vec<AtlasFrame>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FrameList::deserialize(deserializer)? {
        FrameList::List(frames) => frames,
        FrameList::Map(frames) => frames
            .into_iter()
            .map(|(filename, entry)| AtlasFrame {
                filename,
                frame: entry.frame,
                rotated: entry.rotated,
                trimmed: entry.trimmed,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_ATLAS: &str = r#"{
        "frames": [
            {
                "filename": "idle_0",
                "frame": { "x": 10, "y": 20, "w": 32, "h": 32 },
                "rotated": false,
                "trimmed": false,
                "spriteSourceSize": { "x": 0, "y": 0, "w": 32, "h": 32 },
                "sourceSize": { "w": 32, "h": 32 }
            },
            {
                "filename": "idle_1",
                "frame": { "x": 42, "y": 20, "w": 32, "h": 32 }
            }
        ],
        "meta": {
            "app": "https://www.codeandweb.com/texturepacker",
            "image": "hero.png",
            "size": { "w": 256, "h": 128 },
            "scale": "1"
        }
    }"#;

    const MAP_ATLAS: &str = r#"{
        "frames": {
            "walk_1": { "frame": { "x": 32, "y": 0, "w": 16, "h": 16 } },
            "walk_0": { "frame": { "x": 0, "y": 0, "w": 16, "h": 16 }, "rotated": true }
        },
        "meta": { "size": { "w": 64, "h": 16 } }
    }"#;

    #[test]
    fn test_parse_list_form() {
        let atlas = TextureAtlas::from_json(LIST_ATLAS).expect("valid atlas");
        assert_eq!(atlas.frames.len(), 2);
        assert_eq!(atlas.meta.image.as_deref(), Some("hero.png"));
        assert_eq!(atlas.size(), Vec2::new(256.0, 128.0));

        let idle = atlas.frame("idle_0").expect("frame present");
        assert_eq!(idle.frame.to_rect(), Rect::new(10.0, 20.0, 32.0, 32.0));
        assert!(!atlas.frames[1].rotated);
    }

    #[test]
    fn test_parse_map_form_sorted_by_name() {
        let atlas = TextureAtlas::from_json(MAP_ATLAS).expect("valid atlas");
        let names: Vec<&str> = atlas.frames.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["walk_0", "walk_1"]);
        assert!(atlas.frames[0].rotated);
        assert_eq!(atlas.meta.image, None);
    }

    #[test]
    fn test_frame_lookup_is_exact() {
        let atlas = TextureAtlas::from_json(LIST_ATLAS).expect("valid atlas");
        assert!(atlas.frame("idle").is_none());
        assert!(atlas.frame("IDLE_0").is_none());
        assert!(atlas.frame("idle_1").is_some());
    }

    #[test]
    fn test_frame_rect_round_trips_through_rect() {
        let frame = FrameRect {
            x: 4.0,
            y: 8.0,
            w: 16.0,
            h: 2.0,
        };
        let rect = frame.to_rect();
        assert_eq!(rect, Rect::new(4.0, 8.0, 16.0, 2.0));
        assert_eq!(FrameRect::from(rect), frame);
        // `frame` is still usable after the by-value conversion.
        assert_eq!(frame.to_rect().center(), Vec2::new(12.0, 9.0));
    }

    #[test]
    fn test_missing_meta_is_an_error() {
        let err = TextureAtlas::from_json(r#"{ "frames": [] }"#).unwrap_err();
        assert!(matches!(err, AtlasError::Parse(_)));
    }

    #[test]
    fn test_builder_matches_parsed() {
        let built = TextureAtlas::new(64.0, 16.0)
            .with_frame("walk_0", Rect::new(0.0, 0.0, 16.0, 16.0))
            .with_frame("walk_1", Rect::new(32.0, 0.0, 16.0, 16.0));
        let parsed = TextureAtlas::from_json(MAP_ATLAS).expect("valid atlas");

        assert_eq!(built.image_rect(), parsed.image_rect());
        assert_eq!(built.frame("walk_1"), parsed.frame("walk_1"));
    }
}
