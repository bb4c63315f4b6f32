use std::sync::mpsc::{self, Receiver, Sender};

use log::debug;

use crate::core::data::rendered_image::RenderedImage;

/// Receives every completed pass.
///
/// Called on the render worker thread. Implementations hand the image over
/// to their own thread and return quickly; the worker does not start the
/// next pass until this returns.
pub trait ImageSink: Send + Sync {
    fn image_ready(&self, image: RenderedImage);
}

impl<F> ImageSink for F
where
    F: Fn(RenderedImage) + Send + Sync,
{
    fn image_ready(&self, image: RenderedImage) {
        self(image)
    }
}

/// Sink forwarding images into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<RenderedImage>,
}

impl ChannelSink {
    #[must_use]
    pub fn new() -> (Self, Receiver<RenderedImage>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl ImageSink for ChannelSink {
    fn image_ready(&self, image: RenderedImage) {
        if self.sender.send(image).is_err() {
            debug!("image receiver dropped, discarding pass");
        }
    }
}
