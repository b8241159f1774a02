use crate::error::App;
use std::path::{Path, PathBuf};

/// Extensions the upload dialog accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["mp4", "mp3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Picked in the dialog, not yet confirmed.
    Staged,
    Confirmed,
}

impl FileStatus {
    pub fn label(self) -> &'static str {
        match self {
            FileStatus::Staged => "staged",
            FileStatus::Confirmed => "confirmed",
        }
    }
}

/// A file handle as handed over by the file picker. Only metadata is read;
/// the player opens the file itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDescriptor {
    pub status: FileStatus,
    pub uid: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

impl FileDescriptor {
    pub fn new(name: String, path: PathBuf, size: u64, mime_type: String) -> Self {
        FileDescriptor {
            status: FileStatus::Staged,
            uid: uuid::Uuid::new_v4().to_string(),
            name,
            size,
            mime_type,
            path,
        }
    }

    /// Describe a file on disk, rejecting anything that is not `.mp4`/`.mp3`.
    pub fn from_path(path: &Path) -> Result<Self, App> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let mime_type = mime_type_for(path)
            .ok_or_else(|| App::UnsupportedMedia(path.display().to_string()))?;
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        Ok(FileDescriptor::new(
            name,
            path.to_path_buf(),
            size,
            mime_type.to_string(),
        ))
    }
}

fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "mp4" => Some("video/mp4"),
        "mp3" => Some("audio/mpeg"),
        _ => None,
    }
}

/// What the player is told to load.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSource {
    File(FileDescriptor),
    Url(String),
}

impl MediaSource {
    /// The URI handed to the playback widget.
    pub fn uri(&self) -> Result<String, App> {
        match self {
            MediaSource::File(file) => {
                let abs_path = std::fs::canonicalize(&file.path)
                    .map_err(|e| App::InvalidUri(format!("{}: {e}", file.path.display())))?;
                Ok(path_to_file_uri(&abs_path.to_string_lossy()))
            }
            MediaSource::Url(url) => {
                if url.contains("://") {
                    Ok(url.clone())
                } else {
                    Err(App::InvalidUri(url.clone()))
                }
            }
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            MediaSource::File(file) => &file.name,
            MediaSource::Url(url) => url,
        }
    }

    /// Two sources are the same media when they point at the same file or URL,
    /// regardless of the per-selection uid.
    pub fn same_media(&self, other: &MediaSource) -> bool {
        match (self, other) {
            (MediaSource::File(a), MediaSource::File(b)) => a.path == b.path,
            (MediaSource::Url(a), MediaSource::Url(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(windows)]
fn path_to_file_uri(path: &str) -> String {
    let mut path = path.replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    format!("file:///{}", path)
}

#[cfg(not(windows))]
fn path_to_file_uri(path: &str) -> String {
    format!("file://{}", path)
}
