pub mod media_source;
pub mod playback_state;
pub mod player_event;
pub mod session;
