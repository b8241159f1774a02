use crate::ops::transport::TransportCommand;
use crate::types::playback_state::PlaybackState;
use eframe::egui::{self, Color32, CursorIcon, Pos2, Rect, Sense};

const WHITE_SMOKE: Color32 = Color32::from_rgb(0xee, 0xee, 0xee);
const GRAY: Color32 = Color32::from_rgb(0x87, 0x8c, 0x88);
const PRIMARY: Color32 = Color32::from_rgb(0x18, 0x90, 0xff);

const HANDLE_SIZE: f32 = 16.0;
/// Offset from the handle's corner to its center.
const HANDLE_MARGIN: f32 = HANDLE_SIZE / 2.0;
const TRACK_THICKNESS: f32 = 5.0;
const VERTICAL_LENGTH: f32 = 130.0;
const TRACK_ROUNDING: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Time axis, value grows to the right.
    Horizontal,
    /// Volume axis, value grows upwards.
    Vertical,
}

/// The filled part of the track for `value`.
pub fn fill_rect(track: Rect, value: f32, orientation: Orientation) -> Rect {
    let value = value.clamp(0.0, 1.0);
    match orientation {
        Orientation::Horizontal => Rect::from_min_max(
            track.min,
            egui::pos2(track.min.x + value * track.width(), track.max.y),
        ),
        Orientation::Vertical => Rect::from_min_max(
            egui::pos2(track.min.x, track.max.y - value * track.height()),
            track.max,
        ),
    }
}

/// The point on the track's center line that represents `value`.
pub fn value_point(track: Rect, value: f32, orientation: Orientation) -> Pos2 {
    let value = value.clamp(0.0, 1.0);
    match orientation {
        Orientation::Horizontal => {
            egui::pos2(track.min.x + value * track.width(), track.center().y)
        }
        Orientation::Vertical => {
            egui::pos2(track.center().x, track.max.y - value * track.height())
        }
    }
}

/// Handle bounds, shifted by the margin so the handle's center sits on the value point.
pub fn handle_rect(track: Rect, value: f32, orientation: Orientation) -> Rect {
    let point = value_point(track, value, orientation);
    Rect::from_min_size(
        point - egui::vec2(HANDLE_MARGIN, HANDLE_MARGIN),
        egui::vec2(HANDLE_SIZE, HANDLE_SIZE),
    )
}

/// Normalized value under `pointer`, clamped to `[0, 1]`.
pub fn value_at(track: Rect, pointer: Pos2, orientation: Orientation) -> f32 {
    let (offset, extent) = match orientation {
        Orientation::Horizontal => (pointer.x - track.min.x, track.width()),
        Orientation::Vertical => (track.max.y - pointer.y, track.height()),
    };
    if extent <= 0.0 {
        return 0.0;
    }
    (offset / extent).clamp(0.0, 1.0)
}

/// The value a click or drag produces. Always `None` while disabled.
pub fn drag_value(
    track: Rect,
    pointer: Option<Pos2>,
    orientation: Orientation,
    enabled: bool,
    interacting: bool,
) -> Option<f32> {
    if !enabled || !interacting {
        return None;
    }
    pointer.map(|pos| value_at(track, pos, orientation))
}

/// Whether this frame's interaction moves the value: a click, or a drag
/// whose pointer actually moved. Holding the button still changes nothing.
pub fn is_change(clicked: bool, dragged: bool, drag_delta: egui::Vec2) -> bool {
    clicked || (dragged && drag_delta != egui::Vec2::ZERO)
}

/// A draggable bar mapping pointer position to a value in `[0, 1]`.
pub struct Scrubber {
    value: f32,
    orientation: Orientation,
    enabled: bool,
}

impl Scrubber {
    pub fn new(value: f32, orientation: Orientation) -> Self {
        Self {
            value: if value.is_finite() { value } else { 0.0 },
            orientation,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Draws the bar and returns the new value when the user clicks or drags it.
    pub fn show(self, ui: &mut egui::Ui) -> Option<f32> {
        let outer_size = match self.orientation {
            Orientation::Horizontal => egui::vec2(ui.available_width(), HANDLE_SIZE),
            Orientation::Vertical => egui::vec2(HANDLE_SIZE, VERTICAL_LENGTH),
        };
        let sense = if self.enabled {
            Sense::click_and_drag()
        } else {
            Sense::hover()
        };
        let (outer, response) = ui.allocate_exact_size(outer_size, sense);
        let track = match self.orientation {
            Orientation::Horizontal => {
                Rect::from_center_size(outer.center(), egui::vec2(outer.width(), TRACK_THICKNESS))
            }
            Orientation::Vertical => {
                Rect::from_center_size(outer.center(), egui::vec2(TRACK_THICKNESS, outer.height()))
            }
        };

        if self.enabled && response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        let accent = if self.enabled { PRIMARY } else { GRAY };
        let painter = ui.painter();
        painter.rect_filled(track, TRACK_ROUNDING, WHITE_SMOKE);
        painter.rect_filled(
            fill_rect(track, self.value, self.orientation),
            TRACK_ROUNDING,
            accent,
        );
        let handle = handle_rect(track, self.value, self.orientation);
        painter.circle_filled(handle.center(), HANDLE_MARGIN, accent);

        drag_value(
            track,
            response.interact_pointer_pos(),
            self.orientation,
            self.enabled,
            is_change(response.clicked(), response.dragged(), response.drag_delta()),
        )
    }
}

/// Horizontal time scrubber. A change seeks to that fraction of the duration.
pub fn progress_bar(
    ui: &mut egui::Ui,
    state: &PlaybackState,
    enabled: bool,
) -> Option<TransportCommand> {
    Scrubber::new(state.progress_fraction(), Orientation::Horizontal)
        .enabled(enabled)
        .show(ui)
        .map(TransportCommand::SeekFraction)
}

/// Vertical volume scrubber.
pub fn volume_bar(
    ui: &mut egui::Ui,
    state: &PlaybackState,
    enabled: bool,
) -> Option<TransportCommand> {
    Scrubber::new(state.volume_fraction(), Orientation::Vertical)
        .enabled(enabled)
        .show(ui)
        .map(TransportCommand::SetVolume)
}
