//! The media element capability consumed by the playback surface.

use std::collections::VecDeque;

use studio_common::error::StudioResult;

/// Notification raised by the media element itself.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback started or resumed.
    Played,
    /// Playback paused.
    Paused,
    /// The stream reached its end.
    Ended,
    /// The element hit an unrecoverable error.
    Error(String),
}

/// A decoded video frame, tightly packed RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl VideoFrame {
    /// Width divided by height, or `None` for an empty frame.
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.width > 0 && self.height > 0).then(|| self.width as f32 / self.height as f32)
    }
}

/// A native media player bound to one source.
///
/// Commands may complete asynchronously; the element reports what actually
/// happened through [`MediaElement::poll_event`].
pub trait MediaElement {
    fn play(&mut self) -> StudioResult<()>;

    fn pause(&mut self) -> StudioResult<()>;

    fn set_muted(&mut self, muted: bool) -> StudioResult<()>;

    /// Linear volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64) -> StudioResult<()>;

    /// Next pending notification, if any. Never blocks.
    fn poll_event(&mut self) -> Option<MediaEvent>;

    /// Frame decoded since the last call, if any. Never blocks.
    fn poll_frame(&mut self) -> Option<VideoFrame>;
}

/// Stand-in used when no media backend could be opened.
///
/// Commands succeed and are echoed back as events, so the controls stay
/// usable; nothing is ever decoded.
#[derive(Debug)]
pub struct DetachedMedia {
    events: VecDeque<MediaEvent>,
    muted: bool,
    volume: f64,
}

impl DetachedMedia {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            muted: false,
            volume: 1.0,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl Default for DetachedMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement for DetachedMedia {
    fn play(&mut self) -> StudioResult<()> {
        self.events.push_back(MediaEvent::Played);
        Ok(())
    }

    fn pause(&mut self) -> StudioResult<()> {
        self.events.push_back(MediaEvent::Paused);
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> StudioResult<()> {
        self.muted = muted;
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) -> StudioResult<()> {
        self.volume = volume;
        Ok(())
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }

    fn poll_frame(&mut self) -> Option<VideoFrame> {
        None
    }
}

impl<M: MediaElement + ?Sized> MediaElement for Box<M> {
    fn play(&mut self) -> StudioResult<()> {
        (**self).play()
    }

    fn pause(&mut self) -> StudioResult<()> {
        (**self).pause()
    }

    fn set_muted(&mut self, muted: bool) -> StudioResult<()> {
        (**self).set_muted(muted)
    }

    fn set_volume(&mut self, volume: f64) -> StudioResult<()> {
        (**self).set_volume(volume)
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        (**self).poll_event()
    }

    fn poll_frame(&mut self) -> Option<VideoFrame> {
        (**self).poll_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_media_echoes_commands() {
        let mut media = DetachedMedia::new();
        media.play().unwrap();
        media.pause().unwrap();
        assert_eq!(media.poll_event(), Some(MediaEvent::Played));
        assert_eq!(media.poll_event(), Some(MediaEvent::Paused));
        assert_eq!(media.poll_event(), None);
        assert!(media.poll_frame().is_none());
    }

    #[test]
    fn test_detached_media_keeps_audio_settings() {
        let mut media = DetachedMedia::default();
        assert!(!media.is_muted());
        assert_eq!(media.volume(), 1.0);

        media.set_muted(true).unwrap();
        media.set_volume(0.3).unwrap();
        assert!(media.is_muted());
        assert_eq!(media.volume(), 0.3);
        assert_eq!(media.poll_event(), None);
    }

    #[test]
    fn test_frame_aspect_ratio() {
        let frame = VideoFrame {
            width: 1280,
            height: 720,
            rgba: vec![0; 1280 * 720 * 4],
        };
        assert!((frame.aspect_ratio().unwrap() - 16.0 / 9.0).abs() < 1e-6);

        let empty = VideoFrame {
            width: 0,
            height: 0,
            rgba: vec![],
        };
        assert!(empty.aspect_ratio().is_none());
    }
}
