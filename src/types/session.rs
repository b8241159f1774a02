use crate::config::Config;
use crate::error::App;
use crate::ops::transport::{self, Seek, TransportCommand};
use crate::types::media_source::{FileDescriptor, FileStatus, MediaSource};
use crate::types::playback_state::PlaybackState;
use crate::types::player_event::PlayerEvent;
use std::path::Path;

/// PlayerSession is the root UI state: upload dialog inputs, the effective
/// media source and the playback state mirrored from the player.
/// Widgets never mutate it directly; they hand back commands and events.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSession {
    pub is_uploaded: bool,
    pub is_modal_open: bool,
    pub url_input: String,
    pub staged: Vec<FileDescriptor>,
    pub source: Option<MediaSource>,
    pub playback: PlaybackState,
    config: Config,
}

impl PlayerSession {
    pub fn new(config: Config) -> Self {
        PlayerSession {
            is_uploaded: false,
            is_modal_open: false,
            url_input: String::new(),
            staged: Vec::new(),
            source: None,
            playback: PlaybackState::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn show_modal(&mut self) {
        self.is_modal_open = true;
    }

    /// Stage a picked file, replacing whatever was staged before.
    pub fn stage_file(&mut self, path: &Path) -> Result<(), App> {
        let file = FileDescriptor::from_path(path)?;
        log::info!(
            "Staged {} [{}] ({}, {} bytes)",
            file.name,
            file.uid,
            file.mime_type,
            file.size
        );
        self.staged = vec![file];
        Ok(())
    }

    pub fn remove_staged(&mut self, index: usize) {
        if index < self.staged.len() {
            let removed = self.staged.remove(index);
            log::info!("Removed staged file {}", removed.name);
        }
    }

    /// A staged file wins over the URL field; a blank URL resolves nothing.
    pub fn resolve_source(&self) -> Option<MediaSource> {
        if let Some(file) = self.staged.first() {
            return Some(MediaSource::File(file.clone()));
        }
        let url = self.url_input.trim();
        if url.is_empty() {
            None
        } else {
            Some(MediaSource::Url(url.to_string()))
        }
    }

    /// Closes the dialog and switches to the player view.
    ///
    /// Returns the new source only when it differs from the current one, so
    /// the caller reloads the player just for a real change.
    pub fn confirm(&mut self) -> Option<MediaSource> {
        self.is_modal_open = false;
        self.is_uploaded = true;

        let mut resolved = self.resolve_source()?;
        if let Some(current) = &self.source {
            if current.same_media(&resolved) {
                log::debug!("Source unchanged, keeping player");
                return None;
            }
        }
        if let MediaSource::File(file) = &mut resolved {
            file.status = FileStatus::Confirmed;
            log::info!("File {} [{}] is {}", file.name, file.uid, file.status.label());
        }
        log::info!("Media source set to {}", resolved.display_name());
        self.playback.current = None;
        self.playback.duration = None;
        self.playback.ended = false;
        self.source = Some(resolved.clone());
        Some(resolved)
    }

    pub fn cancel(&mut self) {
        self.is_modal_open = false;
        self.is_uploaded = false;
        self.staged.clear();
        self.url_input.clear();
    }

    /// Back to the pre-upload view, discarding everything.
    pub fn reset(&mut self) {
        log::info!("Resetting player session");
        *self = PlayerSession::new(self.config.clone());
    }

    pub fn controls_enabled(&self) -> bool {
        self.is_uploaded
    }

    pub fn apply(&mut self, command: TransportCommand, player: &mut dyn Seek) {
        if !self.controls_enabled() {
            return;
        }
        transport::apply(&mut self.playback, command, self.config.skip_seconds, player);
    }

    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Progress { played_seconds } => {
                self.playback.current = Some(played_seconds);
            }
            PlayerEvent::Duration(seconds) => {
                log::info!("Media duration {:.3}s", seconds);
                self.playback.duration = Some(seconds);
            }
            PlayerEvent::EndOfStream => {
                log::info!("End of stream");
                self.playback.is_playing = false;
                self.playback.ended = true;
            }
            PlayerEvent::Error(message) => {
                log::error!("Player error: {}", message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::transport::tests::RecordingSeek;

    fn session() -> PlayerSession {
        PlayerSession::new(Config::default())
    }

    #[test]
    fn test_confirm_with_url_switches_to_player_view() {
        let mut session = session();
        session.show_modal();
        session.url_input = "https://example.com/v.mp4".to_string();

        let source = session.confirm();

        assert!(session.is_uploaded);
        assert!(!session.is_modal_open);
        assert_eq!(
            source,
            Some(MediaSource::Url("https://example.com/v.mp4".to_string()))
        );
        assert_eq!(session.source, source);
    }

    #[test]
    fn test_confirm_with_nothing_still_flips_uploaded() {
        let mut session = session();
        session.show_modal();
        assert_eq!(session.confirm(), None);
        assert!(session.is_uploaded);
        assert_eq!(session.source, None);
    }

    #[test]
    fn test_confirm_same_source_does_not_reload() {
        let mut session = session();
        session.url_input = "https://example.com/v.mp4".to_string();
        assert!(session.confirm().is_some());
        session.url_input = "  https://example.com/v.mp4 ".to_string();
        assert_eq!(session.confirm(), None);
        session.url_input = "https://example.com/w.mp4".to_string();
        assert!(session.confirm().is_some());
    }

    #[test]
    fn test_staged_file_wins_over_url() {
        let file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        let mut session = session();
        session.url_input = "https://example.com/v.mp4".to_string();
        session.stage_file(file.path()).unwrap();

        match session.confirm() {
            Some(MediaSource::File(fd)) => {
                assert_eq!(fd.status, FileStatus::Confirmed);
                assert_eq!(fd.mime_type, "audio/mpeg");
            }
            other => panic!("expected file source, got {:?}", other),
        }
    }

    #[test]
    fn test_staging_replaces_previous_file() {
        let first = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        let second = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        let mut session = session();
        session.stage_file(first.path()).unwrap();
        session.stage_file(second.path()).unwrap();
        assert_eq!(session.staged.len(), 1);
        assert_eq!(session.staged[0].path, second.path());
    }

    #[test]
    fn test_unsupported_file_keeps_staged_list() {
        let good = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        let mut session = session();
        session.stage_file(good.path()).unwrap();
        let result = session.stage_file(Path::new("/tmp/readme.md"));
        assert!(matches!(result, Err(App::UnsupportedMedia(_))));
        assert_eq!(session.staged.len(), 1);
    }

    #[test]
    fn test_remove_staged_by_index() {
        let file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        let mut session = session();
        session.stage_file(file.path()).unwrap();
        session.remove_staged(3);
        assert_eq!(session.staged.len(), 1);
        session.remove_staged(0);
        assert!(session.staged.is_empty());
    }

    #[test]
    fn test_cancel_discards_selection() {
        let file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        let mut session = session();
        session.show_modal();
        session.stage_file(file.path()).unwrap();
        session.url_input = "https://example.com/v.mp4".to_string();
        session.cancel();
        assert!(!session.is_modal_open);
        assert!(!session.is_uploaded);
        assert!(session.staged.is_empty());
        assert!(session.url_input.is_empty());
        assert_eq!(session.source, None);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut session = session();
        session.url_input = "https://example.com/v.mp4".to_string();
        session.confirm();
        session.handle_player_event(PlayerEvent::Duration(300.0));
        session.handle_player_event(PlayerEvent::Progress {
            played_seconds: 187.25,
        });
        let mut player = RecordingSeek::default();
        session.apply(TransportCommand::ToggleMute, &mut player);

        session.reset();

        assert_eq!(session, PlayerSession::new(Config::default()));
        assert!(!session.is_uploaded);
        assert_eq!(session.source, None);
    }

    #[test]
    fn test_commands_ignored_before_upload() {
        let mut session = session();
        let mut player = RecordingSeek::default();
        session.apply(TransportCommand::SkipForward, &mut player);
        session.apply(TransportCommand::TogglePlay, &mut player);
        assert!(player.seeks.is_empty());
        assert_eq!(session.playback, PlaybackState::new());
    }

    #[test]
    fn test_progress_overwrites_optimistic_seek() {
        let mut session = session();
        session.url_input = "https://example.com/v.mp4".to_string();
        session.confirm();
        session.handle_player_event(PlayerEvent::Duration(100.0));
        let mut player = RecordingSeek::default();
        session.apply(TransportCommand::SeekFraction(0.5), &mut player);
        assert_eq!(session.playback.current, Some(50.0));

        session.handle_player_event(PlayerEvent::Progress {
            played_seconds: 12.0,
        });
        assert_eq!(session.playback.current, Some(12.0));
    }

    #[test]
    fn test_end_of_stream_pauses() {
        let mut session = session();
        assert!(session.playback.is_playing);
        session.handle_player_event(PlayerEvent::EndOfStream);
        assert!(!session.playback.is_playing);
        session.handle_player_event(PlayerEvent::Error("boom".to_string()));
        assert!(!session.playback.is_playing);
    }

    #[test]
    fn test_play_after_end_of_stream_replays() {
        let mut session = session();
        session.url_input = "https://example.com/v.mp4".to_string();
        session.confirm();
        session.handle_player_event(PlayerEvent::Duration(30.0));
        session.handle_player_event(PlayerEvent::Progress {
            played_seconds: 30.0,
        });
        session.handle_player_event(PlayerEvent::EndOfStream);
        assert!(session.playback.ended);

        let mut player = RecordingSeek::default();
        session.apply(TransportCommand::TogglePlay, &mut player);
        assert!(session.playback.is_playing);
        assert!(!session.playback.ended);
        assert_eq!(player.seeks, vec![0.0]);
        assert_eq!(session.playback.current, Some(0.0));

        // Pausing and resuming mid-media does not rewind.
        session.apply(TransportCommand::TogglePlay, &mut player);
        session.apply(TransportCommand::TogglePlay, &mut player);
        assert_eq!(player.seeks, vec![0.0]);
    }

    #[test]
    fn test_skip_uses_configured_seconds() {
        let mut session = PlayerSession::new(Config {
            skip_seconds: 3.0,
            ..Config::default()
        });
        session.url_input = "https://example.com/v.mp4".to_string();
        session.confirm();
        session.handle_player_event(PlayerEvent::Progress {
            played_seconds: 10.0,
        });
        let mut player = RecordingSeek::default();
        session.apply(TransportCommand::SkipBackward, &mut player);
        assert_eq!(player.seeks, vec![7.0]);
    }
}
