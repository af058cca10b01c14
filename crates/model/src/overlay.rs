//! Overlay record types.
//!
//! An overlay is a text box or an image composited on top of the video.
//! Records live only in memory for the lifetime of the editor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point, Size};

/// Top-left position given to every new overlay.
pub const DEFAULT_POSITION: Point = Point { x: 50.0, y: 50.0 };

/// Initial size of a text overlay.
pub const TEXT_OVERLAY_SIZE: Size = Size {
    width: 250.0,
    height: 80.0,
};

/// Initial size of a logo or image overlay.
pub const MEDIA_OVERLAY_SIZE: Size = Size {
    width: 150.0,
    height: 150.0,
};

/// Smallest size a resize can produce.
pub const MIN_OVERLAY_SIZE: Size = Size {
    width: 50.0,
    height: 30.0,
};

/// Process-unique overlay identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(String);

impl OverlayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an overlay shows. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// Literal text in a styled box.
    #[default]
    Text,
    /// Image fetched from a URL, typically a channel logo.
    Logo,
    /// Image fetched from a URL.
    Image,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 3] = [OverlayKind::Text, OverlayKind::Logo, OverlayKind::Image];

    /// Whether `content` is a URL to fetch rather than literal text.
    pub fn is_media(&self) -> bool {
        !matches!(self, OverlayKind::Text)
    }

    /// Size an overlay of this kind starts with.
    pub fn default_size(&self) -> Size {
        match self {
            OverlayKind::Text => TEXT_OVERLAY_SIZE,
            OverlayKind::Logo | OverlayKind::Image => MEDIA_OVERLAY_SIZE,
        }
    }

    /// Lowercase name, as shown in the overlay list.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayKind::Text => "text",
            OverlayKind::Logo => "logo",
            OverlayKind::Image => "image",
        }
    }

    /// Capitalized name, as shown in the type picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            OverlayKind::Text => "Text",
            OverlayKind::Logo => "Logo",
            OverlayKind::Image => "Image",
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single overlay record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub id: OverlayId,

    #[serde(rename = "type")]
    pub kind: OverlayKind,

    /// Literal text for `Text`, an image URL otherwise.
    pub content: String,

    pub position_x: f32,
    pub position_y: f32,
    pub width: f32,
    pub height: f32,

    /// Stacking order; higher draws on top. Never reassigned.
    pub z_index: u32,

    /// Hidden overlays stay in the list but are neither drawn nor hit-tested.
    pub is_visible: bool,
}

impl Overlay {
    pub fn position(&self) -> Point {
        Point::new(self.position_x, self.position_y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position(), self.size())
    }
}

/// Input collected by the add-overlay form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOverlay {
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub content: String,
}

impl NewOverlay {
    pub fn new(kind: OverlayKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(OverlayKind::Text, content)
    }
}

/// Partial update merged into an existing overlay. `None` fields are kept.
///
/// Identity, kind and stacking order are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPatch {
    pub content: Option<String>,
    pub position_x: Option<f32>,
    pub position_y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub is_visible: Option<bool>,
}

impl OverlayPatch {
    pub fn position(p: Point) -> Self {
        Self {
            position_x: Some(p.x),
            position_y: Some(p.y),
            ..Default::default()
        }
    }

    pub fn size(s: Size) -> Self {
        Self {
            width: Some(s.width),
            height: Some(s.height),
            ..Default::default()
        }
    }

    pub fn visibility(visible: bool) -> Self {
        Self {
            is_visible: Some(visible),
            ..Default::default()
        }
    }

    pub fn touches_position(&self) -> bool {
        self.position_x.is_some() || self.position_y.is_some()
    }

    pub fn touches_size(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }

    /// Copy every set field onto `overlay`, without any clamping.
    pub fn merge_into(&self, overlay: &mut Overlay) {
        if let Some(content) = &self.content {
            overlay.content.clone_from(content);
        }
        if let Some(x) = self.position_x {
            overlay.position_x = x;
        }
        if let Some(y) = self.position_y {
            overlay.position_y = y;
        }
        if let Some(w) = self.width {
            overlay.width = w;
        }
        if let Some(h) = self.height {
            overlay.height = h;
        }
        if let Some(visible) = self.is_visible {
            overlay.is_visible = visible;
        }
    }
}

/// Source of fresh overlay ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> OverlayId;
}

/// Random UUID v4 strings.
#[derive(Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> OverlayId {
        OverlayId(uuid_v4(rand::random::<u128>()))
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> OverlayId {
        let id = OverlayId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Format 128 random bits as a version 4, RFC 4122 variant UUID.
fn uuid_v4(bits: u128) -> String {
    let bits = (bits & !(0xF << 76)) | (0x4 << 76);
    let bits = (bits & !(0x3 << 62)) | (0x2 << 62);
    format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        (bits >> 96) as u32,
        ((bits >> 80) & 0xFFFF) as u16,
        ((bits >> 64) & 0xFFFF) as u16,
        ((bits >> 48) & 0xFFFF) as u16,
        bits & 0xFFFF_FFFF_FFFF,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes_by_kind() {
        assert_eq!(OverlayKind::Text.default_size(), Size::new(250.0, 80.0));
        assert_eq!(OverlayKind::Logo.default_size(), Size::new(150.0, 150.0));
        assert_eq!(OverlayKind::Image.default_size(), Size::new(150.0, 150.0));
    }

    #[test]
    fn test_uuid_v4_layout() {
        let id = uuid_v4(u128::MAX);
        assert_eq!(id.len(), 36);
        let groups: Vec<&str> = id.split('-').collect();
        assert_eq!(groups.iter().map(|g| g.len()).collect::<Vec<_>>(), [8, 4, 4, 4, 12]);
        assert!(groups[2].starts_with('4'));
        assert!(matches!(groups[3].chars().next(), Some('8' | '9' | 'a' | 'b')));
    }

    #[test]
    fn test_random_ids_differ() {
        let mut gen = RandomIdGenerator;
        assert_ne!(gen.next_id(), gen.next_id());
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = SequentialIdGenerator::new("ov");
        assert_eq!(gen.next_id().as_str(), "ov-1");
        assert_eq!(gen.next_id().as_str(), "ov-2");
    }

    #[test]
    fn test_patch_merge_keeps_unset_fields() {
        let mut overlay = Overlay {
            id: OverlayId::new("a"),
            kind: OverlayKind::Text,
            content: "LIVE".to_string(),
            position_x: 50.0,
            position_y: 50.0,
            width: 250.0,
            height: 80.0,
            z_index: 1,
            is_visible: true,
        };
        OverlayPatch {
            position_x: Some(10.0),
            ..Default::default()
        }
        .merge_into(&mut overlay);
        assert_eq!(overlay.position(), Point::new(10.0, 50.0));
        assert_eq!(overlay.content, "LIVE");
        assert!(overlay.is_visible);
    }

    #[test]
    fn test_overlay_serializes_with_camel_case_fields() {
        let overlay = Overlay {
            id: OverlayId::new("a"),
            kind: OverlayKind::Logo,
            content: "https://example.com/logo.png".to_string(),
            position_x: 1.0,
            position_y: 2.0,
            width: 150.0,
            height: 150.0,
            z_index: 3,
            is_visible: false,
        };
        let value = serde_json::to_value(&overlay).unwrap();
        assert_eq!(value["type"], "logo");
        assert_eq!(value["positionX"], 1.0);
        assert_eq!(value["zIndex"], 3);
        assert_eq!(value["isVisible"], false);
        assert_eq!(value["id"], "a");
    }
}
