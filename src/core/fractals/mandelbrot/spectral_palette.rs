//! Palette sampled from the visible spectrum.
//!
//! Entry `i` of an `N`-entry palette is the colour of light at
//! `380 + i * 400 / N` nanometres, so escape counts cycle through violet, blue,
//! green, yellow and red before wrapping.

use crate::core::actions::render_pass::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use thiserror::Error;

pub const DEFAULT_PALETTE_SIZE: usize = 512;

const WAVELENGTH_MIN: f64 = 380.0;
const WAVELENGTH_SPAN: f64 = 400.0;
const GAMMA: f64 = 0.8;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one colour")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectralPalette {
    colours: Vec<Colour>,
}

impl SpectralPalette {
    pub fn build(size: usize) -> Result<Self, PaletteError> {
        if size == 0 {
            return Err(PaletteError::Empty);
        }

        Ok(Self::sample(size))
    }

    fn sample(size: usize) -> Self {
        let colours = (0..size)
            .map(|i| {
                colour_from_wavelength(WAVELENGTH_MIN + i as f64 * WAVELENGTH_SPAN / size as f64)
            })
            .collect();

        Self { colours }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }
}

impl Default for SpectralPalette {
    fn default() -> Self {
        Self::sample(DEFAULT_PALETTE_SIZE)
    }
}

impl ColourMap for SpectralPalette {
    #[inline]
    fn colour_for(&self, iterations: u32) -> Colour {
        self.colours[iterations as usize % self.colours.len()]
    }

    fn display_name(&self) -> &str {
        "Spectral"
    }
}

/// Piecewise-linear approximation of visible light, dimmed towards both ends
/// of the spectrum and gamma corrected.
#[must_use]
pub fn colour_from_wavelength(wavelength: f64) -> Colour {
    let w = wavelength;

    // bands are closed; the first match wins on shared edges
    let (r, g, b) = if (380.0..=440.0).contains(&w) {
        ((440.0 - w) / (440.0 - 380.0), 0.0, 1.0)
    } else if (440.0..=490.0).contains(&w) {
        (0.0, (w - 440.0) / (490.0 - 440.0), 1.0)
    } else if (490.0..=510.0).contains(&w) {
        (0.0, 1.0, (510.0 - w) / (510.0 - 490.0))
    } else if (510.0..=580.0).contains(&w) {
        ((w - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if (580.0..=645.0).contains(&w) {
        (1.0, (645.0 - w) / (645.0 - 580.0), 0.0)
    } else if (645.0..=780.0).contains(&w) {
        (1.0, 0.0, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    };

    let intensity = if w > 700.0 {
        0.3 + 0.7 * (780.0 - w) / (780.0 - 700.0)
    } else if w < 420.0 {
        0.3 + 0.7 * (w - 380.0) / (420.0 - 380.0)
    } else {
        1.0
    };

    Colour {
        r: quantize(r * intensity),
        g: quantize(g * intensity),
        b: quantize(b * intensity),
    }
}

#[inline]
fn quantize(channel: f64) -> u8 {
    (channel.powf(GAMMA) * 255.0) as u8
}
