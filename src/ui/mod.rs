pub mod app;
pub mod controls;
pub mod scrubber;
pub mod upload_dialog;
pub mod video_player;
