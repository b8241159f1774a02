use crate::ops::time_format::format_time;
use crate::ops::transport::TransportCommand;
use crate::types::playback_state::PlaybackState;
use crate::ui::scrubber::{progress_bar, volume_bar};
use eframe::egui;

/// Transport panel: time scrubber on top, buttons, volume and the time
/// readout below. Every control is disabled when `enabled` is false.
pub struct PlayerControls<'a> {
    state: &'a PlaybackState,
    enabled: bool,
}

impl<'a> PlayerControls<'a> {
    pub fn new(state: &'a PlaybackState, enabled: bool) -> Self {
        Self { state, enabled }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> Vec<TransportCommand> {
        let mut commands = Vec::new();

        ui.vertical(|ui| {
            commands.extend(progress_bar(ui, self.state, self.enabled));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let buttons = [
                    ("⏮", TransportCommand::JumpToStart),
                    ("⏪", TransportCommand::SkipBackward),
                    (play_icon(self.state.is_playing), TransportCommand::TogglePlay),
                    ("⏩", TransportCommand::SkipForward),
                    ("⏭", TransportCommand::JumpToEnd),
                    (mute_icon(self.state.is_muted), TransportCommand::ToggleMute),
                ];
                for (label, command) in buttons {
                    let button = egui::Button::new(egui::RichText::new(label).size(18.0)).frame(false);
                    if ui.add_enabled(self.enabled, button).clicked() {
                        commands.push(command);
                    }
                }

                commands.extend(volume_bar(ui, self.state, self.enabled));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.monospace(time_readout(self.state));
                });
            });
        });

        commands
    }
}

/// The icon reflects the state the toggle leads to having: pause while playing.
pub fn play_icon(is_playing: bool) -> &'static str {
    if is_playing { "⏸" } else { "▶" }
}

pub fn mute_icon(is_muted: bool) -> &'static str {
    if is_muted { "🔇" } else { "🔊" }
}

/// `current / total`, each as `HH:mm:ss.SSS`.
pub fn time_readout(state: &PlaybackState) -> String {
    format!(
        "{} / {}",
        format_time(state.current),
        format_time(state.duration)
    )
}
