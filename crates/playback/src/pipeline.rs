//! GStreamer-backed media element.
//!
//! A `playbin` decodes the stream and hands RGBA frames to an `appsink`
//! that the UI drains once per repaint. Play/pause map to pipeline states,
//! mute and volume to playbin properties, and bus messages become
//! [`MediaEvent`]s.

use std::sync::OnceLock;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use studio_common::error::{StudioError, StudioResult};

use crate::media::{MediaElement, MediaEvent, VideoFrame};

pub struct GstMediaElement {
    uri: String,
    playbin: gst::Element,
    appsink: gst_app::AppSink,
    bus: gst::Bus,
    ended: bool,
    has_frame: bool,
}

impl GstMediaElement {
    /// Build a playbin for `uri` and preroll it so the first frame can be
    /// shown before playback starts.
    pub fn open(uri: impl Into<String>) -> StudioResult<Self> {
        init_gstreamer()?;
        let uri = uri.into();

        let appsink = gst_app::AppSink::builder()
            .caps(
                &gst::Caps::builder("video/x-raw")
                    .field("format", "RGBA")
                    .build(),
            )
            .build();
        appsink.set_max_buffers(2);
        appsink.set_drop(true);

        let playbin = gst::ElementFactory::make("playbin")
            .name("overlay-studio-player")
            .property("uri", uri.as_str())
            .property("video-sink", &appsink)
            .build()
            .map_err(|e| StudioError::playback(format!("Failed to create playbin: {e}")))?;

        let bus = playbin
            .bus()
            .ok_or_else(|| StudioError::playback("playbin has no bus"))?;

        playbin.set_state(gst::State::Paused).map_err(|e| {
            StudioError::playback(format!("Failed to preroll {uri}: {e:?}"))
        })?;

        tracing::info!(%uri, "media element opened");
        Ok(Self {
            uri,
            playbin,
            appsink,
            bus,
            ended: false,
            has_frame: false,
        })
    }

    fn set_state(&self, state: gst::State) -> StudioResult<()> {
        self.playbin.set_state(state).map_err(|e| {
            StudioError::playback(format!(
                "Failed to set {} to {state:?}: {e:?}",
                self.uri
            ))
        })?;
        Ok(())
    }

    fn is_from_playbin(&self, msg: &gst::Message) -> bool {
        msg.src()
            .map(|src| src == self.playbin.upcast_ref::<gst::Object>())
            .unwrap_or(false)
    }
}

impl MediaElement for GstMediaElement {
    fn play(&mut self) -> StudioResult<()> {
        if self.ended {
            // Playing again after end-of-stream starts over.
            self.playbin
                .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, gst::ClockTime::ZERO)
                .map_err(|e| StudioError::playback(format!("Failed to rewind {}: {e}", self.uri)))?;
            self.ended = false;
        }
        self.set_state(gst::State::Playing)
    }

    fn pause(&mut self) -> StudioResult<()> {
        self.set_state(gst::State::Paused)
    }

    fn set_muted(&mut self, muted: bool) -> StudioResult<()> {
        self.playbin.set_property("mute", muted);
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) -> StudioResult<()> {
        self.playbin.set_property("volume", volume.clamp(0.0, 1.0));
        Ok(())
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        while let Some(msg) = self.bus.pop() {
            match msg.view() {
                gst::MessageView::StateChanged(change) if self.is_from_playbin(&msg) => {
                    if let Some(event) = state_change_event(change.old(), change.current()) {
                        return Some(event);
                    }
                }
                gst::MessageView::Eos(_) => {
                    tracing::debug!(uri = %self.uri, "end of stream");
                    self.ended = true;
                    if let Err(e) = self.set_state(gst::State::Paused) {
                        tracing::warn!(error = %e, "Failed to pause after end of stream");
                    }
                    return Some(MediaEvent::Ended);
                }
                gst::MessageView::Error(e) => {
                    let message = format!(
                        "{} ({})",
                        e.error(),
                        e.debug().map(|d| d.to_string()).unwrap_or_default()
                    );
                    tracing::warn!(uri = %self.uri, error = %message, "pipeline error");
                    return Some(MediaEvent::Error(message));
                }
                _ => {}
            }
        }
        None
    }

    fn poll_frame(&mut self) -> Option<VideoFrame> {
        let sample = match self.appsink.try_pull_sample(gst::ClockTime::ZERO) {
            Some(sample) => sample,
            // Before playback starts only the preroll buffer is available.
            None if !self.has_frame => self.appsink.try_pull_preroll(gst::ClockTime::ZERO)?,
            None => return None,
        };
        let frame = frame_from_sample(&sample)?;
        self.has_frame = true;
        Some(frame)
    }
}

impl Drop for GstMediaElement {
    fn drop(&mut self) {
        if let Err(e) = self.playbin.set_state(gst::State::Null) {
            tracing::warn!(uri = %self.uri, error = ?e, "Failed to shut down playbin");
        }
    }
}

/// Playbin state transitions the controls care about. Prerolling into
/// `Paused` and teardown are not reported.
fn state_change_event(old: gst::State, current: gst::State) -> Option<MediaEvent> {
    match (old, current) {
        (gst::State::Playing, gst::State::Playing) => None,
        (_, gst::State::Playing) => Some(MediaEvent::Played),
        (gst::State::Playing, gst::State::Paused) => Some(MediaEvent::Paused),
        _ => None,
    }
}

fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let caps = sample.caps()?;
    let structure = caps.structure(0)?;
    let width = structure.get::<i32>("width").ok()?;
    let height = structure.get::<i32>("height").ok()?;
    let (width, height) = (u32::try_from(width).ok()?, u32::try_from(height).ok()?);

    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;
    let rgba = packed_rgba(map.as_slice(), width, height)?;
    Some(VideoFrame {
        width,
        height,
        rgba,
    })
}

/// Copy `height` rows of `width` RGBA pixels out of a buffer whose rows may
/// be padded.
fn packed_rgba(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    let row = width as usize * 4;
    let rows = height as usize;
    if row == 0 || rows == 0 {
        return None;
    }
    let stride = data.len() / rows;
    if stride < row {
        return None;
    }
    if stride == row {
        return Some(data[..row * rows].to_vec());
    }
    let mut out = Vec::with_capacity(row * rows);
    for chunk in data.chunks(stride).take(rows) {
        out.extend_from_slice(&chunk[..row]);
    }
    Some(out)
}

fn init_gstreamer() -> StudioResult<()> {
    static GST_INIT: OnceLock<Result<(), String>> = OnceLock::new();
    let init_res = GST_INIT.get_or_init(|| gst::init().map_err(|e| e.to_string()));
    match init_res {
        Ok(()) => Ok(()),
        Err(e) => Err(StudioError::playback(format!(
            "Failed to initialize GStreamer: {e}"
        ))),
    }
}
