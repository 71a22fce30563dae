//! # QR Rasterization
//!
//! Turns a payload into a black-on-white grayscale image with a one-module
//! quiet zone. The PDF writer scales the image to its target box, so the
//! pixel size only controls sharpness.

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

use crate::error::KairoError;

/// Default raster width for label QR codes.
pub const DEFAULT_QR_PX: u32 = 200;

/// Quiet zone around the symbol, in modules.
const QUIET_ZONE: usize = 1;

/// Render `data` as a QR image roughly `size_px` wide.
///
/// Each module is a whole number of pixels, so the result may be slightly
/// smaller than requested; it is never smaller than one pixel per module.
pub fn render(data: &str, size_px: u32) -> Result<GrayImage, KairoError> {
    let code = QrCode::with_error_correction_level(data, EcLevel::M)
        .map_err(|e| KairoError::Qr(format!("QR code generation failed: {}", e)))?;

    let modules = code.width();
    let total = modules + 2 * QUIET_ZONE;
    let cell = (size_px as usize / total).max(1);
    let side = (total * cell) as u32;

    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));
    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx, qy)] != Color::Dark {
                continue;
            }
            let px0 = (qx + QUIET_ZONE) * cell;
            let py0 = (qy + QUIET_ZONE) * cell;
            for cy in 0..cell {
                for cx in 0..cell {
                    img.put_pixel((px0 + cx) as u32, (py0 + cy) as u32, Luma([0u8]));
                }
            }
        }
    }

    Ok(img)
}

/// Render `data` and encode it as PNG bytes.
pub fn render_png(data: &str, size_px: u32) -> Result<Vec<u8>, KairoError> {
    let img = render(data, size_px)?;
    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| KairoError::Image(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_square_with_quiet_zone() {
        let img = render("https://kairoframe.lobo99.info/kf-0001", DEFAULT_QR_PX).unwrap();
        assert_eq!(img.width(), img.height());
        assert!(img.width() <= DEFAULT_QR_PX);
        assert!(img.width() > DEFAULT_QR_PX / 2);

        // Quiet zone: the whole first row is white
        assert!((0..img.width()).all(|x| img.get_pixel(x, 0)[0] == 255));
        // Some dark modules exist
        assert!(img.pixels().any(|p| p[0] == 0));
    }

    #[test]
    fn test_render_tiny_size_still_one_px_per_module() {
        let img = render("kf-0001", 1).unwrap();
        // Version 1 symbol: 21 modules + 2 quiet
        assert_eq!(img.width(), 23);
    }

    #[test]
    fn test_render_png_signature() {
        let png = render_png("kf-0001", 64).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_oversized_payload_errors() {
        let data = "x".repeat(8000);
        assert!(matches!(render(&data, 200), Err(KairoError::Qr(_))));
    }
}
