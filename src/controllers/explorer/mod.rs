//! Headless consumer of the progressive renderer.
//!
//! Holds what a viewer window tracks between frames: where it looks, at which
//! scale, and the newest image received. Turning input events into calls on
//! [`Explorer`] and drawing its image is left to the UI layer.

#[allow(clippy::module_inception)]
mod explorer;
pub mod ports;

pub use explorer::{
    DEFAULT_CENTER_X, DEFAULT_CENTER_Y, DEFAULT_SCALE, Explorer, SCROLL_STEP, ScrollDirection,
    ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
pub use ports::render_requester::RenderRequester;
