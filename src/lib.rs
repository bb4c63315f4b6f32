pub mod controllers;
pub mod core;
pub mod presenters;

pub use crate::controllers::cli::render_still::{CliRenderController, CliRenderError};
pub use crate::controllers::explorer::{Explorer, RenderRequester, ScrollDirection};
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::controllers::progressive::{
    ChannelSink, ConfigError, ImageSink, ProgressiveRenderer, RendererConfig, RendererError,
};
pub use crate::core::actions::cancellation::{CancelToken, NeverCancel};
pub use crate::core::actions::render_pass::render_pass::{PassParams, PassSummary, render_pass};
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::rendered_image::RenderedImage;
pub use crate::core::data::viewport::Viewport;
pub use crate::core::fractals::mandelbrot::escape::{ESCAPE_LIMIT, escape_iterations};
pub use crate::core::fractals::mandelbrot::passes::PassSchedule;
pub use crate::core::fractals::mandelbrot::spectral_palette::SpectralPalette;
pub use crate::presenters::file::ppm::PpmFilePresenter;
