//! The composition root: owns the overlay list and every overlay's gesture.
//!
//! Views never touch the store directly. They emit [`StudioCommand`]s or
//! report raw pointer input, and this type turns both into store updates.

use std::collections::HashMap;

use studio_model::geometry::{Point, Size};
use studio_model::gesture::{hit_region, GesturePhase, HitRegion, OverlayGesture};
use studio_model::listeners::PointerListeners;
use studio_model::overlay::{NewOverlay, OverlayId, OverlayPatch};
use studio_model::store::OverlayStore;

/// A mutation requested by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum StudioCommand {
    Add(NewOverlay),
    Update(OverlayId, OverlayPatch),
    Delete(OverlayId),
    ToggleVisibility(OverlayId),
}

/// What a primary press on the composition surface landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// A drag or resize started on this overlay.
    Gesture(OverlayId),
    /// The overlay's delete button was pressed; it is gone.
    Deleted(OverlayId),
    /// No overlay under the pointer.
    Missed,
}

#[derive(Debug, Default)]
pub struct Composition {
    store: OverlayStore,
    listeners: PointerListeners,
    gestures: HashMap<OverlayId, OverlayGesture>,
}

impl Composition {
    pub fn new(store: OverlayStore) -> Self {
        Self {
            store,
            listeners: PointerListeners::new(),
            gestures: HashMap::new(),
        }
    }

    pub fn store(&self) -> &OverlayStore {
        &self.store
    }

    pub fn set_surface_size(&mut self, surface: Size) {
        self.store.set_surface_size(surface);
    }

    pub fn apply(&mut self, command: StudioCommand) {
        match command {
            StudioCommand::Add(new_overlay) => {
                self.store.add(new_overlay);
            }
            StudioCommand::Update(id, patch) => self.store.update(&id, patch),
            StudioCommand::Delete(id) => self.store.delete(&id),
            StudioCommand::ToggleVisibility(id) => self.store.toggle_visibility(&id),
        }
        self.reconcile_elements();
    }

    /// Topmost visible overlay under `pointer` and the part that was hit.
    pub fn topmost_hit(&self, pointer: Point) -> Option<(OverlayId, HitRegion)> {
        self.store
            .render_order()
            .into_iter()
            .rev()
            .find_map(|overlay| hit_region(overlay, pointer).map(|r| (overlay.id.clone(), r)))
    }

    /// Route a primary press at surface coordinates `pointer`.
    pub fn press(&mut self, pointer: Point) -> PressOutcome {
        let Some((id, region)) = self.topmost_hit(pointer) else {
            return PressOutcome::Missed;
        };

        if region == HitRegion::DeleteButton {
            self.apply(StudioCommand::Delete(id.clone()));
            return PressOutcome::Deleted(id);
        }

        let Some(overlay) = self.store.get(&id) else {
            return PressOutcome::Missed;
        };
        let gesture = self
            .gestures
            .entry(id.clone())
            .or_insert_with(|| OverlayGesture::new(id.clone()));
        if gesture.pointer_down(region, pointer, overlay, &self.listeners) {
            PressOutcome::Gesture(id)
        } else {
            PressOutcome::Missed
        }
    }

    /// Forward a global pointer move to every overlay with a live gesture.
    pub fn pointer_moved(&mut self, pointer: Point) {
        let surface = self
            .store
            .surface()
            .unwrap_or(Size::new(f32::INFINITY, f32::INFINITY));

        let patches: Vec<(OverlayId, OverlayPatch)> = self
            .listeners
            .subscribers()
            .into_iter()
            .filter_map(|id| {
                let overlay = self.store.get(&id)?;
                let patch = self.gestures.get(&id)?.pointer_move(pointer, overlay, surface)?;
                Some((id, patch))
            })
            .collect();

        for (id, patch) in patches {
            self.apply(StudioCommand::Update(id, patch));
        }
    }

    /// Forward a global pointer release, ending every live gesture.
    pub fn pointer_released(&mut self) {
        for id in self.listeners.subscribers() {
            if let Some(gesture) = self.gestures.get_mut(&id) {
                gesture.pointer_up();
            }
        }
    }

    pub fn is_gesture_active(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn gesture_phase(&self, id: &OverlayId) -> GesturePhase {
        self.gestures
            .get(id)
            .map(OverlayGesture::phase)
            .unwrap_or_default()
    }

    /// Drop gesture state for deleted overlays and abandon gestures on
    /// hidden ones, releasing their pointer listeners.
    fn reconcile_elements(&mut self) {
        let store = &self.store;
        self.gestures.retain(|id, _| store.get(id).is_some());
        for (id, gesture) in self.gestures.iter_mut() {
            if store.get(id).is_some_and(|o| !o.is_visible) {
                gesture.cancel();
            }
        }
    }
}
