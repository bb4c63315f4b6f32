use crate::core::data::colour::Colour;

/// Maps the escape count of an escaped point to a colour.
///
/// Bounded points never reach the map; the render pass paints them black.
pub trait ColourMap: Send + Sync {
    fn colour_for(&self, iterations: u32) -> Colour;

    fn display_name(&self) -> &str;
}
