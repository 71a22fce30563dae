//! # Code Generation
//!
//! Converts IR programs to PDF bytes with printpdf.
//!
//! IR coordinates have their origin at the top-left of the page; PDF puts
//! it at the bottom-left, so every y is flipped against the page height.

use image::{DynamicImage, RgbImage, Rgba};
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Px, Rgb,
};
use tracing::debug;

use super::ops::{Op, Program, Stroke};
use crate::error::KairoError;
use crate::layout::Rect;
use crate::metrics::{self, PT_PER_MM};
use crate::qr;

/// Helvetica-Bold ascender height, as a fraction of the font size.
const CAPTION_ASCENT: f32 = 0.718;

const LAYER_NAME: &str = "Labels";

/// External images the program refers to.
#[derive(Debug, Clone)]
pub struct Assets {
    /// Logo, already flattened onto white. `None` skips `Op::Logo`.
    pub logo: Option<RgbImage>,
    /// Raster width for QR codes.
    pub qr_px: u32,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            logo: None,
            qr_px: qr::DEFAULT_QR_PX,
        }
    }
}

impl Assets {
    /// Assets with a logo, compositing any transparency onto white.
    pub fn with_logo(logo: &DynamicImage) -> Self {
        Self {
            logo: Some(flatten_on_white(logo)),
            ..Self::default()
        }
    }
}

/// Composite an RGBA image against a white background.
fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        rgb.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}

impl Program {
    /// Compile the IR program to a PDF document.
    pub fn to_pdf(&self, title: &str, assets: &Assets) -> Result<Vec<u8>, KairoError> {
        let page_w = Mm(self.page.width_mm);
        let page_h = Mm(self.page.height_mm);

        let (doc, page1, layer1) = PdfDocument::new(title, page_w, page_h, LAYER_NAME);
        let font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| KairoError::Pdf(e.to_string()))?;

        let mut writer = PageWriter {
            layer: doc.get_page(page1).get_layer(layer1),
            page_height: self.page.height_mm,
            font,
        };

        for op in &self.ops {
            match op {
                Op::NewPage => {
                    let (page, layer) = doc.add_page(page_w, page_h, LAYER_NAME);
                    writer.layer = doc.get_page(page).get_layer(layer);
                }
                Op::SetStroke(stroke) => writer.set_stroke(stroke),
                Op::Rect(rect) => writer.outline(rect),
                Op::Logo(rect) => {
                    if let Some(logo) = &assets.logo {
                        writer.image_fit(logo, rect);
                    }
                }
                Op::QrCode { data, rect } => {
                    let img = qr::render(data, assets.qr_px)?;
                    let rgb = DynamicImage::ImageLuma8(img).to_rgb8();
                    writer.image_fit(&rgb, rect);
                }
                Op::Text {
                    content,
                    font_size_pt,
                    center_x,
                    top_y,
                } => writer.text_centered(content, *font_size_pt, *center_x, *top_y),
            }
        }

        debug!(
            pages = self.page_count(),
            labels = self.label_count(),
            "compiled label sheet"
        );

        doc.save_to_bytes()
            .map_err(|e| KairoError::Pdf(e.to_string()))
    }
}

/// Drawing state for the current page.
struct PageWriter {
    layer: PdfLayerReference,
    page_height: f32,
    font: IndirectFontRef,
}

impl PageWriter {
    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn set_stroke(&self, stroke: &Stroke) {
        let [r, g, b] = stroke.rgb;
        self.layer.set_outline_color(Color::Rgb(Rgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            None,
        )));
        self.layer.set_outline_thickness(stroke.width_mm * PT_PER_MM);
    }

    fn outline(&self, rect: &Rect) {
        let corners = [
            (rect.x, rect.y),
            (rect.right(), rect.y),
            (rect.right(), rect.bottom()),
            (rect.x, rect.bottom()),
        ];
        let points = corners
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), Mm(self.flip(y))), false))
            .collect();
        self.layer.add_line(Line {
            points,
            is_closed: true,
        });
    }

    /// Place `img` inside `rect`, keeping its aspect ratio, centered.
    fn image_fit(&self, img: &RgbImage, rect: &Rect) {
        let (width_px, height_px) = img.dimensions();
        if width_px == 0 || height_px == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }

        let aspect = width_px as f32 / height_px as f32;
        let (w, h) = if rect.width / rect.height > aspect {
            (rect.height * aspect, rect.height)
        } else {
            (rect.width, rect.width / aspect)
        };
        let x = rect.x + (rect.width - w) / 2.0;
        let bottom = rect.y + (rect.height + h) / 2.0;

        let image = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: img.as_raw().clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI that makes the pixel width come out at `w` millimeters
        let dpi = width_px as f32 / (w / 25.4);
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(self.flip(bottom))),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    fn text_centered(&self, content: &str, size_pt: f32, center_x: f32, top_y: f32) {
        let width = metrics::text_width_mm(content, size_pt);
        let baseline = top_y + CAPTION_ASCENT * size_pt / PT_PER_MM;
        self.layer.use_text(
            content,
            size_pt,
            Mm(center_x - width / 2.0),
            Mm(self.flip(baseline)),
            &self.font,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::PageSpec;

    #[test]
    fn test_empty_program_is_single_blank_page() {
        let pdf = Program::new(PageSpec::A4)
            .to_pdf("empty", &Assets::default())
            .unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_flatten_on_white() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let flat = flatten_on_white(&DynamicImage::ImageRgba8(img));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_pdf_contains_caption_font() {
        let mut program = Program::new(PageSpec::A4);
        program.push(Op::Text {
            content: "KF-0001".into(),
            font_size_pt: 8.0,
            center_x: 50.0,
            top_y: 20.0,
        });
        let pdf = program.to_pdf("caption", &Assets::default()).unwrap();
        let haystack = String::from_utf8_lossy(&pdf);
        assert!(haystack.contains("Helvetica-Bold"));
    }
}
