use crate::core::data::colour::Colour;
use thiserror::Error;

pub const BYTES_PER_PIXEL: usize = 3;

fn dimensions_to_buffer_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelBufferError {
    #[error("pixel at x:{x}, y:{y} outside of {width}x{height} buffer")]
    PixelOutsideBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("cannot allocate a {width}x{height} raster")]
    AllocationFailed { width: u32, height: u32 },
}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGB raster, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; dimensions_to_buffer_size(width, height)],
        }
    }

    /// Like [`PixelBuffer::new`], but reports a raster that cannot be
    /// allocated instead of aborting.
    pub fn try_new(width: u32, height: u32) -> Result<Self, PixelBufferError> {
        let too_large = PixelBufferError::AllocationFailed { width, height };
        let size = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or(too_large.clone())?;

        let mut buffer = PixelBufferData::new();
        buffer.try_reserve_exact(size).map_err(|_| too_large)?;
        buffer.resize(size, 0);

        Ok(Self {
            width,
            height,
            buffer,
        })
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
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn row_stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Mutable bytes of row `y`, or `None` past the last row.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }

        let stride = self.row_stride();
        let start = y as usize * stride;
        self.buffer.get_mut(start..start + stride)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(x, y)?;

        Ok(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(x, y)?;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize, PixelBufferError> {
        if x >= self.width || y >= self.height {
            return Err(PixelBufferError::PixelOutsideBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_zeroed_buffer() {
        let buffer = PixelBuffer::new(10, 10);

        assert_eq!(buffer.width(), 10);
        assert_eq!(buffer.height(), 10);
        assert_eq!(buffer.buffer_size(), 300); // 10 * 10 * 3
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_try_new_matches_new() {
        assert_eq!(PixelBuffer::try_new(4, 3).unwrap(), PixelBuffer::new(4, 3));
    }

    #[test]
    fn test_try_new_reports_unallocatable_raster() {
        assert_eq!(
            PixelBuffer::try_new(u32::MAX, u32::MAX),
            Err(PixelBufferError::AllocationFailed {
                width: u32::MAX,
                height: u32::MAX
            })
        );
        assert!(PixelBuffer::try_new(u32::MAX, 1 << 20).is_err());
    }

    #[test]
    fn test_set_pixel_writes_rgb_at_row_major_offset() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.set_pixel(2, 1, Colour::new(1, 2, 3)).unwrap();

        assert_eq!(&buffer.buffer()[15..18], &[1, 2, 3]);
        assert_eq!(buffer.pixel(2, 1).unwrap(), Colour::new(1, 2, 3));
    }

    #[test]
    fn test_set_pixel_outside_bounds() {
        let mut buffer = PixelBuffer::new(3, 2);
        let result = buffer.set_pixel(3, 0, Colour::BLACK);

        assert_eq!(
            result,
            Err(PixelBufferError::PixelOutsideBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            })
        );
    }

    #[test]
    fn test_row_mut_covers_single_row() {
        let mut buffer = PixelBuffer::new(4, 3);

        let row = buffer.row_mut(1).unwrap();
        assert_eq!(row.len(), 12);
        row.fill(7);

        assert!(buffer.buffer()[..12].iter().all(|&b| b == 0));
        assert!(buffer.buffer()[12..24].iter().all(|&b| b == 7));
        assert!(buffer.buffer()[24..].iter().all(|&b| b == 0));
        assert!(buffer.row_mut(3).is_none());
    }
}
