//! Overlay Studio Playback
//!
//! The video under the overlays. Decoding and output are delegated to a
//! [`MediaElement`]; [`PlaybackSurface`] keeps the play/mute/volume controls
//! consistent with what the element is actually doing.

pub mod media;
pub mod pipeline;
pub mod surface;

pub use media::*;
pub use pipeline::GstMediaElement;
pub use surface::*;
