//! Drag and resize gestures for a single overlay.
//!
//! Each overlay element owns one [`OverlayGesture`]. A press on the body
//! starts a drag, a press on the bottom-right handle starts a resize; the
//! two never run together. Moves are measured against the anchors captured
//! at press time, so the result does not drift with event rate.

use crate::geometry::{Point, Size};
use crate::listeners::{PointerListeners, PointerSubscription};
use crate::overlay::{Overlay, OverlayId, OverlayPatch, MIN_OVERLAY_SIZE};

/// Side of the square resize handle in the bottom-right corner.
pub const RESIZE_HANDLE_SIDE: f32 = 16.0;

/// Side of the delete button in the top-right corner.
pub const DELETE_BUTTON_SIDE: f32 = 20.0;

/// Gap between the delete button and the overlay edges.
pub const DELETE_BUTTON_INSET: f32 = 4.0;

/// Part of an overlay under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    Body,
    ResizeHandle,
    DeleteButton,
}

/// Classify `pointer` against a visible overlay. Hidden overlays never hit.
pub fn hit_region(overlay: &Overlay, pointer: Point) -> Option<HitRegion> {
    if !overlay.is_visible {
        return None;
    }
    let bounds = overlay.bounds();
    if !bounds.contains(pointer) {
        return None;
    }
    if bounds.bottom_right_square(RESIZE_HANDLE_SIDE).contains(pointer) {
        return Some(HitRegion::ResizeHandle);
    }
    if bounds
        .top_right_square(DELETE_BUTTON_SIDE, DELETE_BUTTON_INSET)
        .contains(pointer)
    {
        return Some(HitRegion::DeleteButton);
    }
    Some(HitRegion::Body)
}

/// Current phase of an overlay's gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging {
        anchor_pointer: Point,
        anchor_position: Point,
    },
    Resizing {
        anchor_pointer: Point,
        anchor_size: Size,
    },
}

/// Per-element gesture state. Anchors live here, never on the record.
#[derive(Debug)]
pub struct OverlayGesture {
    owner: OverlayId,
    phase: GesturePhase,
    subscription: Option<PointerSubscription>,
}

impl OverlayGesture {
    pub fn new(owner: OverlayId) -> Self {
        Self {
            owner,
            phase: GesturePhase::Idle,
            subscription: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, GesturePhase::Idle)
    }

    /// Handle a press on `region`. Returns `true` when a gesture started.
    ///
    /// Presses while a gesture is already running, presses on the delete
    /// button and presses on hidden overlays are ignored.
    pub fn pointer_down(
        &mut self,
        region: HitRegion,
        pointer: Point,
        overlay: &Overlay,
        listeners: &PointerListeners,
    ) -> bool {
        if self.is_active() || !overlay.is_visible {
            return false;
        }

        self.phase = match region {
            HitRegion::Body => GesturePhase::Dragging {
                anchor_pointer: pointer,
                anchor_position: overlay.position(),
            },
            HitRegion::ResizeHandle => GesturePhase::Resizing {
                anchor_pointer: pointer,
                anchor_size: overlay.size(),
            },
            HitRegion::DeleteButton => return false,
        };
        self.subscription = Some(listeners.subscribe(self.owner.clone()));
        tracing::debug!(overlay = %self.owner, ?region, "gesture started");
        true
    }

    /// Compute the update for a pointer move, or `None` when idle.
    ///
    /// Drags keep the overlay inside `surface`; resizes never go below
    /// [`MIN_OVERLAY_SIZE`].
    pub fn pointer_move(
        &self,
        pointer: Point,
        overlay: &Overlay,
        surface: Size,
    ) -> Option<OverlayPatch> {
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Dragging {
                anchor_pointer,
                anchor_position,
            } => {
                let delta = pointer.delta_from(anchor_pointer);
                let position = anchor_position
                    .offset(delta)
                    .clamp_within(overlay.size(), surface);
                Some(OverlayPatch::position(position))
            }
            GesturePhase::Resizing {
                anchor_pointer,
                anchor_size,
            } => {
                let delta = pointer.delta_from(anchor_pointer);
                let size = anchor_size.grow(delta).at_least(MIN_OVERLAY_SIZE);
                Some(OverlayPatch::size(size))
            }
        }
    }

    /// Release anywhere ends the gesture.
    pub fn pointer_up(&mut self) {
        if self.is_active() {
            tracing::debug!(overlay = %self.owner, "gesture ended");
        }
        self.reset();
    }

    /// Abandon the gesture without a release (element hidden or removed).
    pub fn cancel(&mut self) {
        if self.is_active() {
            tracing::debug!(overlay = %self.owner, "gesture cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.subscription = None;
    }
}
