//! Play/pause, mute and volume state bound to a media element.

use studio_common::error::StudioResult;

use crate::media::{MediaElement, MediaEvent, VideoFrame};

/// Granularity of the volume slider.
pub const VOLUME_STEP: f64 = 0.1;

/// Wraps a media element and mirrors its state for the controls.
///
/// The binding goes both ways: commands issued through the surface update
/// the mirrored state immediately, and events coming from the element
/// (clicks handled by the player itself, end of stream) are folded back in
/// by [`PlaybackSurface::sync`].
#[derive(Debug)]
pub struct PlaybackSurface<M: MediaElement> {
    media: M,
    source: String,
    is_playing: bool,
    is_muted: bool,
    volume: f64,
    last_error: Option<String>,
}

impl<M: MediaElement> PlaybackSurface<M> {
    pub fn new(media: M, source: impl Into<String>) -> Self {
        Self {
            media,
            source: source.into(),
            is_playing: false,
            is_muted: false,
            volume: 1.0,
            last_error: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Most recent error reported by the element, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Pause when playing, play otherwise.
    pub fn toggle_play(&mut self) -> StudioResult<()> {
        if self.is_playing {
            self.media.pause()?;
        } else {
            self.media.play()?;
        }
        self.is_playing = !self.is_playing;
        Ok(())
    }

    pub fn toggle_mute(&mut self) -> StudioResult<()> {
        let muted = !self.is_muted;
        self.media.set_muted(muted)?;
        self.is_muted = muted;
        Ok(())
    }

    /// Apply a slider value, clamped to `[0, 1]` and snapped to
    /// [`VOLUME_STEP`].
    pub fn set_volume(&mut self, volume: f64) -> StudioResult<()> {
        let volume = snap_volume(volume);
        self.media.set_volume(volume)?;
        self.volume = volume;
        Ok(())
    }

    /// Fold pending element events into the mirrored state.
    pub fn sync(&mut self) {
        while let Some(event) = self.media.poll_event() {
            match event {
                MediaEvent::Played => self.is_playing = true,
                MediaEvent::Paused | MediaEvent::Ended => self.is_playing = false,
                MediaEvent::Error(message) => {
                    tracing::warn!(source = %self.source, %message, "media element error");
                    self.is_playing = false;
                    self.last_error = Some(message);
                }
            }
        }
    }

    /// Newly decoded frame, if any.
    pub fn poll_frame(&mut self) -> Option<VideoFrame> {
        self.media.poll_frame()
    }

    pub fn play_label(&self) -> &'static str {
        if self.is_playing {
            "Pause"
        } else {
            "Play"
        }
    }

    pub fn mute_label(&self) -> &'static str {
        if self.is_muted {
            "Unmute"
        } else {
            "Mute"
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }
}

fn snap_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 0.0;
    }
    let steps = (volume.clamp(0.0, 1.0) / VOLUME_STEP).round();
    (steps * VOLUME_STEP).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use studio_common::error::StudioError;

    use super::*;

    #[derive(Debug, Default)]
    struct FakeMedia {
        commands: Vec<String>,
        events: VecDeque<MediaEvent>,
        fail_play: bool,
    }

    impl MediaElement for FakeMedia {
        fn play(&mut self) -> StudioResult<()> {
            if self.fail_play {
                return Err(StudioError::playback("play refused"));
            }
            self.commands.push("play".to_string());
            Ok(())
        }

        fn pause(&mut self) -> StudioResult<()> {
            self.commands.push("pause".to_string());
            Ok(())
        }

        fn set_muted(&mut self, muted: bool) -> StudioResult<()> {
            self.commands.push(format!("muted={muted}"));
            Ok(())
        }

        fn set_volume(&mut self, volume: f64) -> StudioResult<()> {
            self.commands.push(format!("volume={volume:.1}"));
            Ok(())
        }

        fn poll_event(&mut self) -> Option<MediaEvent> {
            self.events.pop_front()
        }

        fn poll_frame(&mut self) -> Option<VideoFrame> {
            None
        }
    }

    fn surface() -> PlaybackSurface<FakeMedia> {
        PlaybackSurface::new(FakeMedia::default(), "file:///clip.mp4")
    }

    #[test]
    fn test_toggle_play_issues_commands_and_mirrors_state() {
        let mut surface = surface();
        assert_eq!(surface.play_label(), "Play");

        surface.toggle_play().unwrap();
        assert!(surface.is_playing());
        assert_eq!(surface.play_label(), "Pause");

        surface.toggle_play().unwrap();
        assert!(!surface.is_playing());
        assert_eq!(surface.media().commands, vec!["play", "pause"]);
    }

    #[test]
    fn test_element_events_drive_state() {
        let mut surface = surface();
        surface.media.events.push_back(MediaEvent::Played);
        surface.sync();
        assert!(surface.is_playing());

        surface.media.events.push_back(MediaEvent::Paused);
        surface.sync();
        assert!(!surface.is_playing());

        surface.toggle_play().unwrap();
        surface.media.events.push_back(MediaEvent::Ended);
        surface.sync();
        assert!(!surface.is_playing());
        assert_eq!(surface.play_label(), "Play");
    }

    #[test]
    fn test_failed_play_keeps_state() {
        let mut surface = surface();
        surface.media.fail_play = true;
        assert!(surface.toggle_play().is_err());
        assert!(!surface.is_playing());
    }

    #[test]
    fn test_error_event_stops_and_records() {
        let mut surface = surface();
        surface.toggle_play().unwrap();
        surface
            .media
            .events
            .push_back(MediaEvent::Error("resource not found".to_string()));
        surface.sync();
        assert!(!surface.is_playing());
        assert_eq!(surface.last_error(), Some("resource not found"));
    }

    #[test]
    fn test_toggle_mute() {
        let mut surface = surface();
        surface.toggle_mute().unwrap();
        assert!(surface.is_muted());
        assert_eq!(surface.mute_label(), "Unmute");
        surface.toggle_mute().unwrap();
        assert!(!surface.is_muted());
        assert_eq!(surface.media().commands, vec!["muted=true", "muted=false"]);
    }

    #[test]
    fn test_volume_is_clamped_and_stepped() {
        let mut surface = surface();
        surface.set_volume(0.44).unwrap();
        assert!((surface.volume() - 0.4).abs() < 1e-9);
        surface.set_volume(3.0).unwrap();
        assert!((surface.volume() - 1.0).abs() < 1e-9);
        surface.set_volume(-1.0).unwrap();
        assert_eq!(surface.volume(), 0.0);
        assert_eq!(
            surface.media().commands,
            vec!["volume=0.4", "volume=1.0", "volume=0.0"]
        );
    }

    #[test]
    fn test_snap_volume_handles_nan() {
        assert_eq!(snap_volume(f64::NAN), 0.0);
    }
}
