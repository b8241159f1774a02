use crate::error::App;
use crate::ops::transport::Seek;
use crate::types::player_event::PlayerEvent;
use std::time::{Duration, Instant};

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;

/// Largest seek target, kept below the signed 64-bit nanosecond range
/// GStreamer uses for seek positions.
const MAX_SEEK_SECONDS: f64 = 9_000_000_000.0;

/// A decoded frame, tightly packed RGBA.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Construction parameters, mirroring the properties the UI drives.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub playing: bool,
    pub muted: bool,
    pub volume: f64,
    pub progress_interval: Duration,
}

/// Playback widget backed by a GStreamer `playbin`.
///
/// Decoding, buffering and seeking happen on GStreamer's own threads. The UI
/// polls once per frame: bus messages are drained without blocking, the
/// position is sampled every `progress_interval`, and the newest video frame
/// is pulled from an RGBA appsink.
pub struct GstPlayer {
    playbin: gst::Element,
    sink: gst_app::AppSink,
    bus: gst::Bus,
    playing: bool,
    muted: bool,
    volume: f64,
    progress_interval: Duration,
    last_progress: Option<Instant>,
    duration_reported: bool,
    pending_frame: Option<VideoFrame>,
    has_video: bool,
    /// Set on end of stream, cleared by the next seek.
    ended: bool,
}

impl GstPlayer {
    pub fn new(uri: &str, options: &PlayerOptions) -> Result<Self, App> {
        gst::init().map_err(|e| App::Init(e.to_string()))?;

        let playbin = gst::ElementFactory::make("playbin")
            .name("player")
            .property("uri", uri)
            .build()?;

        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let sink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();
        playbin.set_property("video-sink", &sink);
        playbin.set_property("mute", options.muted);
        playbin.set_property("volume", options.volume.clamp(0.0, 1.0));

        let bus = playbin
            .bus()
            .ok_or_else(|| App::Pipeline("Failed to get GStreamer bus".to_string()))?;

        let target = if options.playing {
            gst::State::Playing
        } else {
            gst::State::Paused
        };
        playbin.set_state(target)?;
        log::info!("Player created for {}", uri);

        Ok(Self {
            playbin,
            sink,
            bus,
            playing: options.playing,
            muted: options.muted,
            volume: options.volume,
            progress_interval: options.progress_interval,
            last_progress: None,
            duration_reported: false,
            pending_frame: None,
            has_video: false,
            ended: false,
        })
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.playing == playing {
            return;
        }
        if playing && self.ended {
            // A pipeline at end of stream re-posts EOS when set to playing.
            self.seek_to(0.0);
        }
        let state = if playing {
            gst::State::Playing
        } else {
            gst::State::Paused
        };
        match self.playbin.set_state(state) {
            Ok(_) => self.playing = playing,
            Err(e) => log::error!("Failed to switch to {:?}: {}", state, e),
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            self.playbin.set_property("mute", muted);
            self.muted = muted;
        }
    }

    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            log::warn!("Ignoring NaN volume");
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        if (self.volume - volume).abs() > f64::EPSILON {
            self.playbin.set_property("volume", volume);
            self.volume = volume;
        }
    }

    /// Whether the media has produced at least one video frame. Audio-only
    /// sources never do.
    pub fn has_video(&self) -> bool {
        self.has_video
    }

    /// Drains pending notifications. Never blocks.
    pub fn poll(&mut self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();

        while let Some(msg) = self.bus.pop() {
            use gst::MessageView;
            match msg.view() {
                MessageView::Eos(..) => {
                    self.ended = true;
                    events.push(PlayerEvent::EndOfStream);
                }
                MessageView::Error(err) => {
                    events.push(PlayerEvent::Error(format!(
                        "{} ({:?})",
                        err.error(),
                        err.debug()
                    )));
                }
                MessageView::Warning(warning) => {
                    log::warn!("GStreamer warning: {}", warning.error());
                }
                _ => (),
            }
        }

        if !self.duration_reported {
            if let Some(duration) = self.playbin.query_duration::<gst::ClockTime>() {
                self.duration_reported = true;
                events.push(PlayerEvent::Duration(clock_to_seconds(duration)));
            }
        }

        if self.playing && self.progress_due() {
            if let Some(position) = self.playbin.query_position::<gst::ClockTime>() {
                self.last_progress = Some(Instant::now());
                events.push(PlayerEvent::Progress {
                    played_seconds: clock_to_seconds(position),
                });
            }
        }

        self.pull_frame();
        events
    }

    /// The newest frame decoded since the last call, if any.
    pub fn take_frame(&mut self) -> Option<VideoFrame> {
        self.pending_frame.take()
    }

    fn progress_due(&self) -> bool {
        match self.last_progress {
            Some(last) => last.elapsed() >= self.progress_interval,
            None => true,
        }
    }

    fn pull_frame(&mut self) {
        let mut latest = None;
        while let Some(sample) = self.sink.try_pull_sample(gst::ClockTime::ZERO) {
            latest = Some(sample);
        }
        let Some(sample) = latest else {
            return;
        };

        let Some(caps) = sample.caps() else {
            return;
        };
        let info = match gst_video::VideoInfo::from_caps(caps) {
            Ok(info) => info,
            Err(e) => {
                log::warn!("Unreadable frame caps: {}", e);
                return;
            }
        };
        let Some(buffer) = sample.buffer() else {
            return;
        };
        let Ok(map) = buffer.map_readable() else {
            log::warn!("Failed to map frame buffer");
            return;
        };

        let stride = info.stride()[0] as usize;
        let Some(data) = pack_rows(map.as_slice(), info.width(), info.height(), stride) else {
            log::warn!(
                "Frame buffer too small: {} bytes for {}x{}",
                map.as_slice().len(),
                info.width(),
                info.height()
            );
            return;
        };

        self.has_video = true;
        self.pending_frame = Some(VideoFrame {
            data,
            width: info.width(),
            height: info.height(),
        });
    }
}

impl Seek for GstPlayer {
    fn seek_to(&mut self, seconds: f64) {
        let target = seconds_to_clock(seconds);
        match self
            .playbin
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, target)
        {
            Ok(()) => self.ended = false,
            Err(e) => log::error!("Seek to {:.3}s failed: {}", seconds, e),
        }
        self.last_progress = Some(Instant::now());
    }
}

impl Drop for GstPlayer {
    fn drop(&mut self) {
        if let Err(e) = self.playbin.set_state(gst::State::Null) {
            log::error!("Failed to stop pipeline: {}", e);
        }
    }
}

/// Seek target for `seconds`. The pipeline cannot seek before zero; NaN
/// counts as zero and huge values pin to `MAX_SEEK_SECONDS`.
fn seconds_to_clock(seconds: f64) -> gst::ClockTime {
    let seconds = if seconds.is_nan() {
        0.0
    } else {
        seconds.clamp(0.0, MAX_SEEK_SECONDS)
    };
    gst::ClockTime::from_nseconds((seconds * 1_000_000_000.0) as u64)
}

fn clock_to_seconds(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

/// Copies `height` rows of `width` RGBA pixels out of a buffer whose rows
/// are `stride` bytes apart. Returns `None` if the buffer is short.
fn pack_rows(src: &[u8], width: u32, height: u32, stride: usize) -> Option<Vec<u8>> {
    let row_len = width as usize * 4;
    let height = height as usize;
    if stride < row_len || height == 0 {
        return None;
    }
    if src.len() < stride * (height - 1) + row_len {
        return None;
    }
    if stride == row_len {
        return Some(src[..row_len * height].to_vec());
    }
    let mut data = Vec::with_capacity(row_len * height);
    for row in src.chunks(stride).take(height) {
        data.extend_from_slice(&row[..row_len]);
    }
    Some(data)
}
