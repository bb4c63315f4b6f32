pub mod colour;
pub mod complex;
pub mod pixel_buffer;
pub mod rendered_image;
pub mod viewport;
