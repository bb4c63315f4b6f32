use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use log::info;
use thiserror::Error;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::progressive::{
    ChannelSink, ProgressiveRenderer, RendererConfig, RendererError,
};
use crate::core::data::rendered_image::RenderedImage;
use crate::core::data::viewport::Viewport;

#[derive(Debug, Error)]
pub enum CliRenderError {
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("render worker stopped before the final pass")]
    WorkerStopped,
    #[error("no final image after {0:?}")]
    Timeout(Duration),
    #[error("nothing has been rendered yet")]
    NothingRendered,
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders one viewport to completion and writes the final pass to a file.
pub struct CliRenderController<P: FilePresenterPort> {
    presenter: P,
    config: RendererConfig,
    timeout: Option<Duration>,
    image: Option<RenderedImage>,
}

impl<P: FilePresenterPort> CliRenderController<P> {
    pub fn new(presenter: P, config: RendererConfig) -> Self {
        Self {
            presenter,
            config,
            timeout: None,
            image: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn generate(&mut self, viewport: Viewport) -> Result<&RenderedImage, CliRenderError> {
        let (sink, receiver) = ChannelSink::new();
        let mut renderer = ProgressiveRenderer::new(self.config.clone(), Arc::new(sink))?;

        info!(
            "rendering {}x{} around ({}, {}) at scale {}",
            viewport.width(),
            viewport.height(),
            viewport.center_x(),
            viewport.center_y(),
            viewport.scale()
        );
        renderer.request(viewport)?;

        let image = loop {
            let image = match self.timeout {
                Some(timeout) => receiver.recv_timeout(timeout).map_err(|err| match err {
                    RecvTimeoutError::Timeout => CliRenderError::Timeout(timeout),
                    RecvTimeoutError::Disconnected => CliRenderError::WorkerStopped,
                })?,
                None => receiver
                    .recv()
                    .map_err(|_| CliRenderError::WorkerStopped)?,
            };

            info!(
                "pass {} ({} iterations) in {:?}",
                image.pass, image.max_iterations, image.render_duration
            );

            if image.is_final {
                break image;
            }
        };

        renderer.shutdown();

        Ok(self.image.insert(image))
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), CliRenderError> {
        let image = self.image.as_ref().ok_or(CliRenderError::NothingRendered)?;
        self.presenter.present(&image.pixel_buffer, &filepath)?;
        info!("saved to {}", filepath.as_ref().display());

        Ok(())
    }
}
