use std::time::Duration;

use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::viewport::Viewport;

/// A complete pass over a viewport, handed to the consumer as an immutable snapshot.
///
/// `scale_factor` tags which request the image answers. A consumer whose desired
/// scale has moved on should keep showing the image as a preview rather than drop it.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub pixel_buffer: PixelBuffer,
    pub viewport: Viewport,
    pub scale_factor: f64,
    pub pass: usize,
    pub max_iterations: u32,
    /// Set on the last image of an uninterrupted render.
    pub is_final: bool,
    pub render_duration: Duration,
}

impl RenderedImage {
    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.viewport.device_pixel_ratio()
    }
}
