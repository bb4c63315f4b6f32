use crate::controllers::progressive::{ProgressiveRenderer, RendererError};
use crate::core::data::viewport::Viewport;

/// Anything that accepts viewports to render.
pub trait RenderRequester {
    fn request(&self, viewport: Viewport) -> Result<(), RendererError>;
}

impl RenderRequester for ProgressiveRenderer {
    fn request(&self, viewport: Viewport) -> Result<(), RendererError> {
        ProgressiveRenderer::request(self, viewport)
    }
}

impl<T: RenderRequester + ?Sized> RenderRequester for &T {
    fn request(&self, viewport: Viewport) -> Result<(), RendererError> {
        (**self).request(viewport)
    }
}
