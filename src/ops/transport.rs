use crate::types::playback_state::PlaybackState;

/// The one player capability transport logic needs.
pub trait Seek {
    fn seek_to(&mut self, seconds: f64);
}

/// Commands issued by the transport panel and the scrubbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportCommand {
    TogglePlay,
    JumpToStart,
    SkipBackward,
    SkipForward,
    JumpToEnd,
    ToggleMute,
    /// Seek to a normalized position along the time axis.
    SeekFraction(f32),
    SetVolume(f32),
}

/// Applies `command` to `state`, seeking `player` where the command moves
/// the playhead. Seeks update `state.current` right away; the next progress
/// report from the player overwrites it.
///
/// Skips are not clamped to `[0, duration]`; the player decides what an
/// out-of-range seek means.
pub fn apply(
    state: &mut PlaybackState,
    command: TransportCommand,
    skip_seconds: f64,
    player: &mut dyn Seek,
) {
    match command {
        TransportCommand::TogglePlay => {
            // Playing again after the end restarts from the beginning.
            if state.ended && !state.is_playing {
                seek(state, player, 0.0);
            }
            state.toggle_playing();
        }
        TransportCommand::ToggleMute => state.toggle_muted(),
        TransportCommand::JumpToStart => seek(state, player, 0.0),
        TransportCommand::SkipBackward => {
            let target = state.current.unwrap_or(0.0) - skip_seconds;
            seek(state, player, target);
        }
        TransportCommand::SkipForward => {
            let target = state.current.unwrap_or(0.0) + skip_seconds;
            seek(state, player, target);
        }
        TransportCommand::JumpToEnd => match state.duration {
            Some(duration) => seek(state, player, duration - 1.0),
            None => log::debug!("Jump to end ignored, duration unknown"),
        },
        TransportCommand::SeekFraction(fraction) => match state.duration {
            Some(duration) => {
                let fraction = f64::from(fraction.clamp(0.0, 1.0));
                seek(state, player, fraction * duration);
            }
            None => log::debug!("Seek ignored, duration unknown"),
        },
        TransportCommand::SetVolume(volume) => {
            state.volume = f64::from(volume.clamp(0.0, 1.0));
        }
    }
}

fn seek(state: &mut PlaybackState, player: &mut dyn Seek, seconds: f64) {
    log::debug!("Seek to {:.3}s", seconds);
    player.seek_to(seconds);
    state.current = Some(seconds);
    state.ended = false;
}
