pub mod escape;
pub mod passes;
pub mod spectral_palette;
