pub mod time_format;
pub mod transport;
