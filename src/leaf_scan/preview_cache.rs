use super::core::Preview;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// GPU texture for the current preview. Acquired the first time a preview is
/// drawn, released as soon as a different preview (or none) is drawn, and on exit.
pub struct PreviewCache {
    logger: Arc<dyn Logger + Send + Sync>,
    current: Option<(u64, Option<egui::TextureHandle>)>,
}

impl PreviewCache {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("preview"),
            current: None,
        }
    }

    /// `None` when there is no preview or its bytes are not a decodable image.
    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        preview: Option<&Preview>,
    ) -> Option<&egui::TextureHandle> {
        let Some(preview) = preview else {
            self.release();
            return None;
        };

        if self.current_id() != Some(preview.id) {
            self.release();
            let texture = match decode_preview(&preview.bytes) {
                Ok(image) => Some(ctx.load_texture(
                    format!("preview-{}", preview.id),
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                Err(e) => {
                    let _ = self
                        .logger
                        .error(&format!("Failed to decode preview {}: {}", preview.id, e));
                    None
                }
            };
            self.current = Some((preview.id, texture));
        }

        self.current.as_ref().and_then(|(_, texture)| texture.as_ref())
    }

    pub fn current_id(&self) -> Option<u64> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    pub fn release(&mut self) {
        if let Some((id, _)) = self.current.take() {
            let _ = self.logger.info(&format!("Released preview {}", id));
        }
    }
}

pub fn decode_preview(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        &rgba.into_raw(),
    ))
}
