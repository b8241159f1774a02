use crate::types::media_source::{ACCEPTED_EXTENSIONS, FileDescriptor};
use eframe::egui;
use std::path::PathBuf;

/// What the user did in the dialog this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    FilePicked(PathBuf),
    RemoveStaged(usize),
    Confirm,
    Cancel,
}

/// Modal "Upload" window: one media file or a URL.
///
/// Only one file can be staged; the file button hides while one is.
pub struct UploadDialog<'a> {
    staged: &'a [FileDescriptor],
    url_input: &'a mut String,
}

impl<'a> UploadDialog<'a> {
    pub fn new(staged: &'a [FileDescriptor], url_input: &'a mut String) -> Self {
        Self { staged, url_input }
    }

    pub fn show(self, ctx: &egui::Context) -> Vec<DialogEvent> {
        let mut events = Vec::new();
        let mut open = true;

        egui::Window::new("Upload")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    if self.staged.is_empty() {
                        if ui.button("⬆ Upload Video").clicked() {
                            if let Some(path) = pick_media_file() {
                                events.push(DialogEvent::FilePicked(path));
                            }
                        }
                    } else {
                        for (idx, file) in self.staged.iter().enumerate() {
                            ui.horizontal(|ui| {
                                ui.label(staged_label(file))
                                    .on_hover_text(file.path.display().to_string());
                                if ui.small_button("🗑").on_hover_text("Remove").clicked() {
                                    events.push(DialogEvent::RemoveStaged(idx));
                                }
                            });
                        }
                    }

                    ui.add_space(12.0);
                    ui.separator();
                    ui.label("OR");
                    ui.separator();
                    ui.add_space(12.0);

                    ui.horizontal(|ui| {
                        ui.label("Enter video URL");
                        ui.text_edit_singleline(self.url_input);
                    });
                    ui.add_space(16.0);
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Upload").clicked() {
                        events.push(DialogEvent::Confirm);
                    }
                    if ui.button("Cancel").clicked() {
                        events.push(DialogEvent::Cancel);
                    }
                });
            });

        // The window's close button counts as cancel.
        if !open {
            events.push(DialogEvent::Cancel);
        }
        events
    }
}

fn pick_media_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Upload Video")
        .add_filter("Media", &ACCEPTED_EXTENSIONS)
        .pick_file()
}

/// One staged file row: name, type, size and upload status.
fn staged_label(file: &FileDescriptor) -> String {
    format!(
        "📎 {} ({}, {}, {})",
        file.name,
        file.mime_type,
        human_size(file.size),
        file.status.label()
    )
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
