use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Binary PPM (`P6`) writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct PpmFilePresenter {}

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    pub fn write_to<W: Write>(&self, buffer: &PixelBuffer, mut writer: W) -> std::io::Result<()> {
        // P6 means binary RGB, then width, height and max colour value
        writeln!(writer, "P6")?;
        writeln!(writer, "{} {}", buffer.width(), buffer.height())?;
        writeln!(writer, "255")?;
        writer.write_all(buffer.buffer())?;
        writer.flush()
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(filepath)?;
        self.write_to(buffer, BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;

    #[test]
    fn test_write_to_emits_header_then_pixels() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set_pixel(1, 0, Colour::new(10, 20, 30)).unwrap();
        let mut out = Vec::new();

        PpmFilePresenter::new().write_to(&buffer, &mut out).unwrap();

        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[0, 0, 0, 10, 20, 30]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_present_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.ppm");
        let buffer = PixelBuffer::new(3, 2);

        PpmFilePresenter::new().present(&buffer, &path).unwrap();

        let contents = std::fs::read(&path).unwrap();
        assert!(contents.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(contents.len(), b"P6\n3 2\n255\n".len() + 18);
    }

    #[test]
    fn test_present_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.ppm");

        let result = PpmFilePresenter::new().present(&PixelBuffer::new(2, 2), &path);

        assert!(result.is_err());
    }
}
