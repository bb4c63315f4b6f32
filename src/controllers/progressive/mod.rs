//! Progressive renderer for interactive fractal exploration.
//!
//! A single background worker renders the latest requested viewport in
//! passes of increasing iteration depth and hands each finished pass to an
//! [`ImageSink`].
//!
//! # Architecture
//!
//! Follows the same ports & adapters split as the rest of the crate:
//! - **Input**: [`Viewport`](crate::core::data::viewport::Viewport) requests,
//!   coalesced so only the newest one is rendered
//! - **Output**: the [`ImageSink`] port, called on the worker thread
//! - **Core**: the cancellable `render_pass` action from `core/`

pub mod config;
pub mod errors;
pub mod ports;
mod renderer;

pub use config::{ConfigError, RendererConfig};
pub use errors::RendererError;
pub use ports::image_sink::{ChannelSink, ImageSink};
pub use renderer::ProgressiveRenderer;
