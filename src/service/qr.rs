use crate::error::InventoryError;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

/// Renders a string (a bin link) into a PNG image.
pub trait QrRenderer: Send + Sync {
    fn render_png(&self, data: &str) -> Result<Vec<u8>, InventoryError>;
}

/// Grayscale QR renderer backed by the `qrcode` crate.
pub struct PngQrRenderer {
    min_dimension: u32,
}

impl PngQrRenderer {
    pub fn new(min_dimension: u32) -> Self {
        Self { min_dimension }
    }
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self::new(200)
    }
}

impl QrRenderer for PngQrRenderer {
    fn render_png(&self, data: &str) -> Result<Vec<u8>, InventoryError> {
        let code = QrCode::new(data.as_bytes())?;
        let img = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_dimension, self.min_dimension)
            .build();

        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}
