//! Port definitions for the progressive renderer.

pub mod image_sink;
