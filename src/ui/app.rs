use std::time::Duration;

use crate::config::Config;
use crate::ops::transport::{Seek, TransportCommand};
use crate::renderer::gst_player::{GstPlayer, PlayerOptions};
use crate::types::media_source::MediaSource;
use crate::types::session::PlayerSession;
use eframe::egui;

use crate::ui::controls::PlayerControls;
use crate::ui::upload_dialog::{DialogEvent, UploadDialog};
use crate::ui::video_player::VideoPlayer;

const TITLE: &str = "Reel Player";

/// Stand-in for the player while no source could be loaded.
struct Detached;

impl Seek for Detached {
    fn seek_to(&mut self, seconds: f64) {
        log::debug!("No player loaded, seek to {:.3}s dropped", seconds);
    }
}

pub struct ReelApp {
    pub session: PlayerSession,
    pub player: Option<GstPlayer>,
    pub video: VideoPlayer,
}

impl ReelApp {
    pub fn new(config: Config) -> Self {
        Self {
            session: PlayerSession::new(config),
            player: None,
            video: VideoPlayer::new(),
        }
    }

    /// Replace the player with one for `source`. Failures are logged and
    /// leave the app without a player.
    fn load(&mut self, source: &MediaSource) {
        self.player = None;
        self.video.clear();

        let uri = match source.uri() {
            Ok(uri) => uri,
            Err(e) => {
                log::error!("Cannot load {}: {}", source.display_name(), e);
                return;
            }
        };
        let playback = &self.session.playback;
        let options = PlayerOptions {
            playing: playback.is_playing,
            muted: playback.is_muted,
            volume: playback.volume,
            progress_interval: Duration::from_millis(self.session.config().progress_interval_ms),
        };
        match GstPlayer::new(&uri, &options) {
            Ok(player) => self.player = Some(player),
            Err(e) => log::error!("Failed to create player for {}: {}", uri, e),
        }
    }

    fn reset(&mut self) {
        self.player = None;
        self.video.clear();
        self.session.reset();
    }

    fn apply(&mut self, command: TransportCommand) {
        match self.player.as_mut() {
            Some(player) => self.session.apply(command, player),
            None => self.session.apply(command, &mut Detached),
        }
    }

    /// Pull events and frames from the player and push the UI-owned
    /// properties back into it.
    fn sync_player(&mut self, ctx: &egui::Context) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        for event in player.poll() {
            self.session.handle_player_event(event);
        }
        if let Some(frame) = player.take_frame() {
            self.video.update_texture(&frame, ctx);
        }

        let playback = &self.session.playback;
        player.set_playing(playback.is_playing);
        player.set_muted(playback.is_muted);
        player.set_volume(playback.volume);

        ctx.request_repaint_after(Duration::from_millis(16));
    }

    fn placeholder(&self) -> String {
        match (&self.player, &self.session.source) {
            (Some(player), Some(source)) if !player.has_video() => {
                format!("♪ {}", source.display_name())
            }
            _ => "No media loaded".to_string(),
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let events =
            UploadDialog::new(&self.session.staged, &mut self.session.url_input).show(ctx);
        for event in events {
            match event {
                DialogEvent::FilePicked(path) => {
                    if let Err(e) = self.session.stage_file(&path) {
                        log::warn!("Rejected {}: {}", path.display(), e);
                    }
                }
                DialogEvent::RemoveStaged(idx) => self.session.remove_staged(idx),
                DialogEvent::Confirm => {
                    if let Some(source) = self.session.confirm() {
                        self.load(&source);
                    }
                }
                DialogEvent::Cancel => self.session.cancel(),
            }
        }
    }
}

impl eframe::App for ReelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_player(ctx);

        let placeholder = self.placeholder();
        let mut commands = Vec::new();
        let mut reset = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.heading(egui::RichText::new(TITLE).size(40.0).strong());
                ui.add_space(12.0);

                if self.session.is_uploaded {
                    self.video.show(ui, &placeholder);
                    ui.add_space(8.0);
                    commands = PlayerControls::new(
                        &self.session.playback,
                        self.session.controls_enabled(),
                    )
                    .show(ui);
                    ui.add_space(12.0);
                    if ui.button("Reset").clicked() {
                        reset = true;
                    }
                } else if ui
                    .add_sized([320.0, 32.0], egui::Button::new("⬆ Upload Video / Link"))
                    .clicked()
                {
                    self.session.show_modal();
                }
            });
        });

        for command in commands {
            self.apply(command);
        }
        if reset {
            self.reset();
        }

        if self.session.is_modal_open {
            self.show_dialog(ctx);
        }
    }
}
