//! The authoritative overlay list.
//!
//! Every mutation builds a new list value and swaps it in; a snapshot taken
//! with [`OverlayStore::overlays`] never changes underneath its holder.
//! Operations addressed to an unknown id are ignored.

use std::fmt;
use std::sync::Arc;

use crate::geometry::Size;
use crate::overlay::{
    IdGenerator, NewOverlay, Overlay, OverlayId, OverlayPatch, RandomIdGenerator,
    DEFAULT_POSITION, MIN_OVERLAY_SIZE,
};

/// Holds the overlay list and mediates every change to it.
pub struct OverlayStore {
    overlays: Arc<[Overlay]>,
    ids: Box<dyn IdGenerator>,
    surface: Option<Size>,
}

impl Default for OverlayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OverlayStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayStore")
            .field("overlays", &self.overlays)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

impl OverlayStore {
    /// Empty store issuing random UUID ids.
    pub fn new() -> Self {
        Self::with_id_generator(RandomIdGenerator)
    }

    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            overlays: Arc::from(Vec::new()),
            ids: Box::new(ids),
            surface: None,
        }
    }

    /// Current list snapshot, in insertion order.
    pub fn overlays(&self) -> Arc<[Overlay]> {
        Arc::clone(&self.overlays)
    }

    pub fn get(&self, id: &OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| &o.id == id)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Bounds used to clamp positions, if the surface has been laid out.
    pub fn surface(&self) -> Option<Size> {
        self.surface
    }

    pub fn set_surface_size(&mut self, surface: Size) {
        self.surface = Some(surface);
    }

    /// Visible overlays in drawing order (ascending z-index, ties keep list
    /// order).
    pub fn render_order(&self) -> Vec<&Overlay> {
        let mut visible: Vec<&Overlay> = self.overlays.iter().filter(|o| o.is_visible).collect();
        visible.sort_by_key(|o| o.z_index);
        visible
    }

    /// Append a new overlay built from form input and return its id.
    pub fn add(&mut self, new_overlay: NewOverlay) -> OverlayId {
        let id = self.ids.next_id();
        let size = new_overlay.kind.default_size();
        let overlay = Overlay {
            id: id.clone(),
            kind: new_overlay.kind,
            content: new_overlay.content,
            position_x: DEFAULT_POSITION.x,
            position_y: DEFAULT_POSITION.y,
            width: size.width,
            height: size.height,
            z_index: self.overlays.len() as u32 + 1,
            is_visible: true,
        };
        tracing::info!(overlay = %id, kind = %overlay.kind, z_index = overlay.z_index, "overlay added");

        self.overlays = self
            .overlays
            .iter()
            .cloned()
            .chain(std::iter::once(overlay))
            .collect();
        id
    }

    /// Merge `patch` into the overlay with `id`.
    ///
    /// Sizes are floored at [`MIN_OVERLAY_SIZE`]. When the patch moves the
    /// overlay and the surface size is known, the position is clamped so the
    /// overlay stays inside the surface.
    pub fn update(&mut self, id: &OverlayId, patch: OverlayPatch) {
        let surface = self.surface;
        self.replace_matching(id, "update", |overlay| {
            patch.merge_into(overlay);
            if patch.touches_size() {
                let size = overlay.size().at_least(MIN_OVERLAY_SIZE);
                overlay.width = size.width;
                overlay.height = size.height;
            }
            if let (true, Some(surface)) = (patch.touches_position(), surface) {
                let position = overlay.position().clamp_within(overlay.size(), surface);
                overlay.position_x = position.x;
                overlay.position_y = position.y;
            }
        });
    }

    /// Remove the overlay with `id`. No undo.
    pub fn delete(&mut self, id: &OverlayId) {
        if self.get(id).is_none() {
            tracing::debug!(overlay = %id, "delete ignored: no such overlay");
            return;
        }
        self.overlays = self
            .overlays
            .iter()
            .filter(|o| &o.id != id)
            .cloned()
            .collect();
        tracing::info!(overlay = %id, "overlay deleted");
    }

    /// Flip the visibility of the overlay with `id`.
    pub fn toggle_visibility(&mut self, id: &OverlayId) {
        self.replace_matching(id, "toggle_visibility", |overlay| {
            overlay.is_visible = !overlay.is_visible;
        });
    }

    fn replace_matching(&mut self, id: &OverlayId, op: &str, apply: impl FnOnce(&mut Overlay)) {
        let Some(index) = self.overlays.iter().position(|o| &o.id == id) else {
            tracing::debug!(overlay = %id, op, "ignored: no such overlay");
            return;
        };
        let mut next = self.overlays.to_vec();
        apply(&mut next[index]);
        self.overlays = Arc::from(next);
    }
}
