use eframe::egui;

use crate::renderer::gst_player::VideoFrame;

const PREVIEW_SIZE: egui::Vec2 = egui::vec2(640.0, 360.0);

/// Displays the frames the player decodes.
#[derive(Default)]
pub struct VideoPlayer {
    pub texture: Option<egui::TextureHandle>,
}

impl VideoPlayer {
    pub fn new() -> Self {
        Self { texture: None }
    }

    /// Upload `frame` into the egui texture, reusing the texture allocation.
    pub fn update_texture(&mut self, frame: &VideoFrame, ctx: &egui::Context) {
        let color_img = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(color_img, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(
                    "player_video_frame",
                    color_img,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
    }

    pub fn clear(&mut self) {
        self.texture = None;
    }

    /// `placeholder` is shown when there is no frame to draw.
    pub fn show(&self, ui: &mut egui::Ui, placeholder: &str) {
        match &self.texture {
            Some(texture) => {
                let size = fit_within(texture.size_vec2(), PREVIEW_SIZE);
                ui.image((texture.id(), size));
            }
            None => {
                let (rect, _) = ui.allocate_exact_size(PREVIEW_SIZE, egui::Sense::hover());
                ui.painter().rect_filled(rect, 4.0, egui::Color32::BLACK);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    placeholder,
                    egui::FontId::proportional(16.0),
                    egui::Color32::GRAY,
                );
            }
        }
    }
}

/// Scales `size` to fit `bounds`, keeping the aspect ratio.
fn fit_within(size: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y);
    size * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_keeps_aspect() {
        let fitted = fit_within(egui::vec2(1280.0, 720.0), PREVIEW_SIZE);
        assert_eq!(fitted, egui::vec2(640.0, 360.0));
        let fitted = fit_within(egui::vec2(400.0, 400.0), PREVIEW_SIZE);
        assert_eq!(fitted, egui::vec2(360.0, 360.0));
    }

    #[test]
    fn test_fit_within_degenerate() {
        assert_eq!(fit_within(egui::Vec2::ZERO, PREVIEW_SIZE), PREVIEW_SIZE);
    }
}
