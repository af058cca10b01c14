//! Overlay Studio Model
//!
//! Defines the core data contracts and editing logic for the overlay editor:
//! - **Overlay:** the positioned, sized, stackable record shown on the video
//! - **Store:** the authoritative overlay list and its four mutations
//! - **Gesture:** the per-overlay drag/resize state machine
//! - **Listeners:** scoped registrations for global pointer events
//! - **Panel:** the add-overlay form and list preview rules
//!
//! All coordinates are logical pixels relative to the top-left corner of the
//! composition surface.

pub mod geometry;
pub mod gesture;
pub mod listeners;
pub mod overlay;
pub mod panel;
pub mod store;

pub use geometry::*;
pub use gesture::*;
pub use listeners::*;
pub use overlay::*;
pub use panel::*;
pub use store::*;
