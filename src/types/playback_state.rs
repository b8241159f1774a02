use crate::config::Config;

/// Transient playback state mirrored from the player.
///
/// `current` stays `None` until the first progress report and `duration`
/// until the player has read the media's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current: Option<f64>,
    pub duration: Option<f64>,
    pub is_muted: bool,
    pub volume: f64,
    /// The player reached the end of the media and has not seeked since.
    pub ended: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            is_playing: true,
            current: None,
            duration: None,
            is_muted: false,
            volume: 1.0,
            ended: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            is_playing: config.autoplay,
            volume: config.initial_volume.clamp(0.0, 1.0),
            ..Self::new()
        }
    }

    pub fn toggle_playing(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn toggle_muted(&mut self) {
        self.is_muted = !self.is_muted;
    }

    /// Position along the time axis in `[0, 1]`, derived on every call.
    pub fn progress_fraction(&self) -> f32 {
        match (self.current, self.duration) {
            (Some(current), Some(duration)) if duration > 0.0 => {
                (current / duration).clamp(0.0, 1.0) as f32
            }
            _ => 0.0,
        }
    }

    pub fn volume_fraction(&self) -> f32 {
        self.volume.clamp(0.0, 1.0) as f32
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_playing_twice_is_identity() {
        let mut state = PlaybackState::new();
        let original = state.is_playing;
        state.toggle_playing();
        assert_ne!(state.is_playing, original);
        state.toggle_playing();
        assert_eq!(state.is_playing, original);
    }

    #[test]
    fn test_toggle_muted_twice_is_identity() {
        let mut state = PlaybackState::new();
        state.toggle_muted();
        assert!(state.is_muted);
        state.toggle_muted();
        assert!(!state.is_muted);
    }

    #[test]
    fn test_progress_fraction_unknown_is_zero() {
        let mut state = PlaybackState::new();
        assert_eq!(state.progress_fraction(), 0.0);
        state.current = Some(5.0);
        assert_eq!(state.progress_fraction(), 0.0);
        state.duration = Some(0.0);
        assert_eq!(state.progress_fraction(), 0.0);
    }

    #[test]
    fn test_progress_fraction_tracks_current() {
        let mut state = PlaybackState::new();
        state.duration = Some(200.0);
        state.current = Some(50.0);
        assert_eq!(state.progress_fraction(), 0.25);
        state.current = Some(260.0);
        assert_eq!(state.progress_fraction(), 1.0);
        state.current = Some(-4.0);
        assert_eq!(state.progress_fraction(), 0.0);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            autoplay: false,
            initial_volume: 0.4,
            ..Config::default()
        };
        let state = PlaybackState::from_config(&config);
        assert!(!state.is_playing);
        assert_eq!(state.volume, 0.4);
        assert_eq!(state.current, None);
    }
}
