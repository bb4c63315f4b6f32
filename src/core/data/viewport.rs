use crate::core::data::complex::Complex;
use crate::core::data::pixel_buffer::BYTES_PER_PIXEL;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("viewport pixel size must be positive: {width}x{height}")]
    NonPositiveSize { width: i32, height: i32 },
    #[error("viewport scale must be positive and finite: {0}")]
    NonPositiveScale(f64),
    #[error("viewport center must be finite: ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("device pixel ratio must be positive and finite: {0}")]
    NonPositivePixelRatio(f64),
    #[error("viewport {width}x{height} is too large for a raster")]
    TooLarge { width: i32, height: i32 },
}

/// A region of the complex plane mapped onto an output raster.
///
/// The raster is centred on `(center_x, center_y)` and each pixel step covers
/// `scale` units of the plane in both axes. Fields are only reachable through
/// [`Viewport::new`], so a `Viewport` always has a positive size and scale
/// and its raster size fits in memory addressing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    center_x: f64,
    center_y: f64,
    scale: f64,
    width: u32,
    height: u32,
    device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(
        center_x: f64,
        center_y: f64,
        scale: f64,
        width: i32,
        height: i32,
        device_pixel_ratio: f64,
    ) -> Result<Self, ViewportError> {
        if width <= 0 || height <= 0 {
            return Err(ViewportError::NonPositiveSize { width, height });
        }

        let raster_bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL));
        if !raster_bytes.is_some_and(|bytes| bytes <= isize::MAX as usize) {
            return Err(ViewportError::TooLarge { width, height });
        }

        if !(scale.is_finite() && scale > 0.0) {
            return Err(ViewportError::NonPositiveScale(scale));
        }

        if !(center_x.is_finite() && center_y.is_finite()) {
            return Err(ViewportError::NonFiniteCoordinate {
                x: center_x,
                y: center_y,
            });
        }

        if !(device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0) {
            return Err(ViewportError::NonPositivePixelRatio(device_pixel_ratio));
        }

        Ok(Self {
            center_x,
            center_y,
            scale,
            width: width as u32,
            height: height as u32,
            device_pixel_ratio,
        })
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.center_x
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.center_y
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Imaginary coordinate of raster row `row`.
    #[must_use]
    pub fn row_imag(&self, row: u32) -> f64 {
        let offset = i64::from(row) - i64::from(self.height / 2);
        self.center_y + offset as f64 * self.scale
    }

    /// Real coordinate of raster column `column`.
    #[must_use]
    pub fn column_real(&self, column: u32) -> f64 {
        let offset = i64::from(column) - i64::from(self.width / 2);
        self.center_x + offset as f64 * self.scale
    }

    #[must_use]
    pub fn point_at(&self, column: u32, row: u32) -> Complex {
        Complex::new(self.column_real(column), self.row_imag(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let viewport = Viewport::new(-0.5, 0.25, 0.01, 640, 480, 2.0).unwrap();

        assert_eq!(viewport.center_x(), -0.5);
        assert_eq!(viewport.center_y(), 0.25);
        assert_eq!(viewport.scale(), 0.01);
        assert_eq!(viewport.width(), 640);
        assert_eq!(viewport.height(), 480);
        assert_eq!(viewport.device_pixel_ratio(), 2.0);
    }

    #[test]
    fn test_rejects_non_positive_size() {
        assert_eq!(
            Viewport::new(0.0, 0.0, 0.01, 0, 10, 1.0),
            Err(ViewportError::NonPositiveSize {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            Viewport::new(0.0, 0.0, 0.01, 10, -3, 1.0),
            Err(ViewportError::NonPositiveSize {
                width: 10,
                height: -3
            })
        );
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert_eq!(
            Viewport::new(0.0, 0.0, 0.0, 10, 10, 1.0),
            Err(ViewportError::NonPositiveScale(0.0))
        );
        assert_eq!(
            Viewport::new(0.0, 0.0, -1.0, 10, 10, 1.0),
            Err(ViewportError::NonPositiveScale(-1.0))
        );
        assert!(Viewport::new(0.0, 0.0, f64::INFINITY, 10, 10, 1.0).is_err());
        assert!(Viewport::new(0.0, 0.0, f64::NAN, 10, 10, 1.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite_center_and_ratio() {
        assert!(matches!(
            Viewport::new(f64::NAN, 0.0, 0.01, 10, 10, 1.0),
            Err(ViewportError::NonFiniteCoordinate { .. })
        ));
        assert_eq!(
            Viewport::new(0.0, 0.0, 0.01, 10, 10, 0.0),
            Err(ViewportError::NonPositivePixelRatio(0.0))
        );
    }

    #[test]
    fn test_rejects_unaddressable_raster() {
        assert_eq!(
            Viewport::new(0.0, 0.0, 0.01, i32::MAX, i32::MAX, 1.0),
            Err(ViewportError::TooLarge {
                width: i32::MAX,
                height: i32::MAX
            })
        );
        assert!(Viewport::new(0.0, 0.0, 0.01, i32::MAX, 1, 1.0).is_ok());
    }

    #[test]
    fn test_center_pixel_maps_to_center() {
        let viewport = Viewport::new(-0.75, 0.1, 0.5, 4, 6, 1.0).unwrap();

        assert_eq!(viewport.point_at(2, 3), Complex::new(-0.75, 0.1));
    }

    #[test]
    fn test_top_left_pixel_offsets_by_half_size() {
        let viewport = Viewport::new(0.0, 0.0, 0.5, 4, 6, 1.0).unwrap();

        // row 0 is -height/2 steps from the center, column 0 is -width/2 steps
        assert_eq!(viewport.point_at(0, 0), Complex::new(-1.0, -1.5));
        assert_eq!(viewport.point_at(3, 5), Complex::new(0.5, 1.0));
    }

    #[test]
    fn test_odd_sizes_cover_every_row_and_column() {
        let viewport = Viewport::new(0.0, 0.0, 1.0, 3, 3, 1.0).unwrap();

        assert_eq!(viewport.point_at(0, 0), Complex::new(-1.0, -1.0));
        assert_eq!(viewport.point_at(2, 2), Complex::new(1.0, 1.0));
    }
}
