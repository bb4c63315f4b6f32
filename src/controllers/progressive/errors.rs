use thiserror::Error;

use crate::controllers::progressive::config::ConfigError;
use crate::core::data::viewport::ViewportError;
use crate::core::fractals::mandelbrot::spectral_palette::PaletteError;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("renderer has been shut down")]
    ShutDown,
    #[error("failed to spawn render worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("invalid renderer config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("invalid viewport: {0}")]
    Viewport(#[from] ViewportError),
}
