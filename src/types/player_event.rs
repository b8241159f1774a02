/// Notifications reported by the playback widget.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Periodic position report while the media plays.
    Progress { played_seconds: f64 },
    /// Reported once, when the media's metadata is known.
    Duration(f64),
    EndOfStream,
    /// Decode or network failure inside the player. Logged, never shown.
    Error(String),
}
