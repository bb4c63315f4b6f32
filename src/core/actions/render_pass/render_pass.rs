use thiserror::Error;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::render_pass::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::escape::{
    ESCAPE_LIMIT, escape_iterations_within, is_bounded,
};

/// Error type for a single render pass.
///
/// Cancellation is expected control flow for callers that restart work, not
/// a failure to report.
#[derive(Debug, Error)]
pub enum RenderPassError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error(
        "raster {raster_width}x{raster_height} does not match viewport {viewport_width}x{viewport_height}"
    )]
    RasterMismatch {
        raster_width: u32,
        raster_height: u32,
        viewport_width: u32,
        viewport_height: u32,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassParams {
    pub max_iterations: u32,
    /// Squared escape radius.
    pub escape_limit: f64,
}

impl PassParams {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            escape_limit: ESCAPE_LIMIT,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub escaped_pixels: u64,
    /// No pixel escaped within the budget.
    pub all_black: bool,
}

/// Renders every pixel of `viewport` into `raster` at a fixed iteration budget.
///
/// Rows are filled top to bottom and pixels left to right. The cancel token
/// is polled before each row and before each pixel, so an abandoned pass
/// costs at most one pixel's iterations. On cancellation `raster` holds a
/// partially overwritten image and must not be shown.
pub fn render_pass<CMap, C>(
    viewport: &Viewport,
    params: PassParams,
    colour_map: &CMap,
    raster: &mut PixelBuffer,
    cancel: &C,
) -> Result<PassSummary, RenderPassError>
where
    CMap: ColourMap + ?Sized,
    C: CancelToken + ?Sized,
{
    if raster.width() != viewport.width() || raster.height() != viewport.height() {
        return Err(RenderPassError::RasterMismatch {
            raster_width: raster.width(),
            raster_height: raster.height(),
            viewport_width: viewport.width(),
            viewport_height: viewport.height(),
        });
    }

    let mut escaped_pixels = 0u64;

    for y in 0..viewport.height() {
        if cancel.is_cancelled() {
            return Err(Cancelled.into());
        }

        let imag = viewport.row_imag(y);
        let Some(row) = raster.row_mut(y) else {
            break;
        };

        for (x, pixel) in (0u32..).zip(row.chunks_exact_mut(BYTES_PER_PIXEL)) {
            if cancel.is_cancelled() {
                return Err(Cancelled.into());
            }

            let c = Complex::new(viewport.column_real(x), imag);
            let iterations =
                escape_iterations_within(c, params.max_iterations, params.escape_limit);

            let Colour { r, g, b } = if is_bounded(iterations, params.max_iterations) {
                Colour::BLACK
            } else {
                escaped_pixels += 1;
                colour_map.colour_for(iterations)
            };

            pixel.copy_from_slice(&[r, g, b]);
        }
    }

    Ok(PassSummary {
        escaped_pixels,
        all_black: escaped_pixels == 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::fractals::mandelbrot::spectral_palette::SpectralPalette;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StubColourMap {}

    impl ColourMap for StubColourMap {
        fn colour_for(&self, iterations: u32) -> Colour {
            Colour::new(iterations.min(255) as u8, 1, 2)
        }

        fn display_name(&self) -> &str {
            "Stub"
        }
    }

    fn viewport(center_x: f64, center_y: f64, scale: f64, width: i32, height: i32) -> Viewport {
        Viewport::new(center_x, center_y, scale, width, height, 1.0).unwrap()
    }

    #[test]
    fn test_interior_viewport_is_all_black() {
        let viewport = viewport(-0.1, 0.0, 0.001, 4, 4);
        let mut raster = PixelBuffer::new(4, 4);

        let summary = render_pass(
            &viewport,
            PassParams::new(96),
            &StubColourMap {},
            &mut raster,
            &NeverCancel,
        )
        .unwrap();

        assert!(summary.all_black);
        assert_eq!(summary.escaped_pixels, 0);
        assert!(raster.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_exterior_viewport_uses_colour_map() {
        let viewport = viewport(3.0, 3.0, 0.01, 3, 2);
        let mut raster = PixelBuffer::new(3, 2);

        let summary = render_pass(
            &viewport,
            PassParams::new(96),
            &StubColourMap {},
            &mut raster,
            &NeverCancel,
        )
        .unwrap();

        assert!(!summary.all_black);
        assert_eq!(summary.escaped_pixels, 6);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(raster.pixel(x, y).unwrap(), Colour::new(1, 1, 2));
            }
        }
    }

    #[test]
    fn test_pixels_match_escape_evaluator() {
        let viewport = viewport(-0.75, 0.1, 0.05, 6, 5);
        let mut raster = PixelBuffer::new(6, 5);
        let palette = SpectralPalette::default();

        render_pass(
            &viewport,
            PassParams::new(96),
            &palette,
            &mut raster,
            &NeverCancel,
        )
        .unwrap();

        for y in 0..5 {
            for x in 0..6 {
                let c = viewport.point_at(x, y);
                let iterations = escape_iterations_within(c, 96, ESCAPE_LIMIT);
                let expected = if iterations == 96 {
                    Colour::BLACK
                } else {
                    palette.colour_for(iterations)
                };
                assert_eq!(raster.pixel(x, y).unwrap(), expected, "pixel {},{}", x, y);
            }
        }
    }

    #[test]
    fn test_repeated_passes_are_pixel_identical() {
        let viewport = viewport(-0.637011, -0.0395159, 0.01, 16, 12);
        let palette = SpectralPalette::default();
        let mut first = PixelBuffer::new(16, 12);
        let mut second = PixelBuffer::new(16, 12);

        for raster in [&mut first, &mut second] {
            render_pass(
                &viewport,
                PassParams::new(1056),
                &palette,
                raster,
                &NeverCancel,
            )
            .unwrap();
        }

        assert_eq!(first, second);
    }

    #[test]
    fn test_cancelled_before_first_row() {
        let viewport = viewport(0.0, 0.0, 0.01, 4, 4);
        let mut raster = PixelBuffer::new(4, 4);
        let cancel_token = || true;

        let result = render_pass(
            &viewport,
            PassParams::new(96),
            &StubColourMap {},
            &mut raster,
            &cancel_token,
        );

        assert!(matches!(result, Err(RenderPassError::Cancelled(_))));
    }

    #[test]
    fn test_cancellation_polled_per_row_and_per_pixel() {
        let viewport = viewport(3.0, 3.0, 0.01, 3, 5);
        let mut raster = PixelBuffer::new(3, 5);
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        render_pass(
            &viewport,
            PassParams::new(96),
            &StubColourMap {},
            &mut raster,
            &cancel_token,
        )
        .unwrap();

        // one poll per row start plus one per pixel
        assert_eq!(poll_count.load(Ordering::Relaxed), 5 + 15);
    }

    #[test]
    fn test_cancels_mid_row() {
        let viewport = viewport(3.0, 3.0, 0.01, 4, 4);
        let mut raster = PixelBuffer::new(4, 4);
        let poll_count = AtomicUsize::new(0);
        // row start, then three pixels of the first row
        let cancel_token = || poll_count.fetch_add(1, Ordering::Relaxed) >= 4;

        let result = render_pass(
            &viewport,
            PassParams::new(96),
            &StubColourMap {},
            &mut raster,
            &cancel_token,
        );

        assert!(matches!(result, Err(RenderPassError::Cancelled(_))));
        assert_eq!(raster.pixel(2, 0).unwrap(), Colour::new(1, 1, 2));
        assert_eq!(raster.pixel(3, 0).unwrap(), Colour::BLACK);
    }

    #[test]
    fn test_raster_mismatch_is_rejected() {
        let viewport = viewport(0.0, 0.0, 0.01, 4, 4);
        let mut raster = PixelBuffer::new(4, 3);

        let result = render_pass(
            &viewport,
            PassParams::new(96),
            &StubColourMap {},
            &mut raster,
            &NeverCancel,
        );

        assert!(matches!(
            result,
            Err(RenderPassError::RasterMismatch {
                raster_height: 3,
                viewport_height: 4,
                ..
            })
        ));
    }
}
