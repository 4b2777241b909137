//! Image backend on top of libvips, with text rasterized by pango and cairo.

mod color;
mod origin;

pub use crate::image::color::Color;
pub use crate::image::origin::Origin;

use crate::error::{Error, Result};
use crate::layer::{Anchor, Bitmap, Canvas, LabelLayer};
use crate::text::Font;

use cairo::ImageSurface;
use libvips::{ops, VipsApp, VipsImage};
use std::path::Path;

pub struct ImgBackend {
    vips_app: VipsApp,
}

impl Bitmap for VipsImage {
    fn width(&self) -> i32 {
        self.get_width()
    }

    fn height(&self) -> i32 {
        self.get_height()
    }
}

impl ImgBackend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            vips_app: VipsApp::default("cubatrice-cards")
                .map_err(|e| Error::VipsError(e.to_string()))?,
        })
    }

    pub fn err(&self, e: libvips::error::Error) -> Error {
        let buffer = self.vips_app.error_buffer().unwrap_or_default();
        Error::VipsError(format!("{e}\n{buffer}"))
    }

    /// Brings any image to 8 bit sRGB with an alpha band.
    fn reinterpret(&self, img: &VipsImage) -> Result<VipsImage> {
        let img = ops::cast(img, ops::BandFormat::Uchar).map_err(|e| self.err(e))?;
        let img = ops::copy_with_opts(
            &img,
            &ops::CopyOptions {
                interpretation: ops::Interpretation::Srgb,
                width: img.get_width(),
                height: img.get_height(),
                bands: img.get_bands(),
                format: ops::BandFormat::Uchar,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))?;
        if img.get_bands() == 3 {
            ops::bandjoin_const(&img, &mut [255.0]).map_err(|e| self.err(e))
        } else {
            Ok(img)
        }
    }

    pub fn open(&self, fp: impl AsRef<Path>) -> Result<VipsImage> {
        let fp = fp.as_ref().to_string_lossy();
        let img = VipsImage::new_from_file(&fp).map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn copy(&self, img: &VipsImage) -> Result<VipsImage> {
        ops::copy(img).map_err(|e| self.err(e))
    }

    pub fn scale(&self, img: &VipsImage, sx: f64, sy: f64) -> Result<VipsImage> {
        ops::resize_with_opts(
            img,
            sx,
            &ops::ResizeOptions {
                vscale: sy,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))
    }

    /// Stretches `img` to exactly `w` by `h` pixels.
    pub fn resize(&self, img: &VipsImage, w: i32, h: i32) -> Result<VipsImage> {
        let (iw, ih) = (img.get_width() as f64, img.get_height() as f64);
        self.scale(img, w as f64 / iw, h as f64 / ih)
    }

    /// Composites `src` over `base`, placing the point of `src` given by
    /// `ox` and `oy` at `(x, y)`.
    pub fn overlay(
        &self,
        base: &VipsImage,
        src: &VipsImage,
        x: i32,
        y: i32,
        ox: Origin,
        oy: Origin,
    ) -> Result<VipsImage> {
        let (bw, bh) = (base.get_width(), base.get_height());
        let (w, h) = (src.get_width() as f64, src.get_height() as f64);
        let ox = ox.apply(w).round() as i32;
        let oy = oy.apply(h).round() as i32;
        let src = ops::embed(src, x - ox, y - oy, bw, bh).map_err(|e| self.err(e))?;
        ops::composite_2(base, &src, ops::BlendMode::Over).map_err(|e| self.err(e))
    }

    pub fn cairo_to_vips(&self, img: ImageSurface) -> Result<VipsImage> {
        let mut buffer = Vec::new();
        img.write_to_png(&mut buffer)
            .map_err(|_| Error::ImageConversion("cairo", "vips"))?;
        let mut img = VipsImage::new_from_buffer(&buffer, "").map_err(|e| self.err(e))?;
        // Decode now, `buffer` does not outlive this call.
        img.image_wio_input().map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    /// Rasterizes a single line of text. Also returns the baseline, in
    /// pixels from the top of the image.
    pub fn print(
        &self,
        font: &Font,
        text: &str,
        size: u32,
        color: Color,
    ) -> Result<(VipsImage, i32)> {
        let layout = font.layout(text, size);
        let (_, logical) = layout.pixel_extents();
        let surface = ImageSurface::create(
            cairo::Format::ARgb32,
            logical.width().max(1),
            logical.height().max(1),
        )
        .map_err(Error::cairo)?;
        {
            let cr = cairo::Context::new(&surface).map_err(Error::cairo)?;
            let (r, g, b, a) = color.rgba();
            cr.set_source_rgba(r, g, b, a);
            cr.move_to(-logical.x() as f64, -logical.y() as f64);
            pangocairo::functions::show_layout(&cr, &layout);
        }
        let baseline = layout.baseline() / pango::SCALE - logical.y();
        Ok((self.cairo_to_vips(surface)?, baseline))
    }

    pub fn write(&self, img: &VipsImage, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        img.image_write_to_file(&path.to_string_lossy())
            .map_err(|e| Error::image_write(path, self.err(e)))
    }
}

/// Draws on vips images with one font and color.
pub struct VipsCanvas<'a> {
    pub backend: &'a ImgBackend,
    pub font: &'a Font,
    pub color: Color,
}

impl Canvas for VipsCanvas<'_> {
    type Image = VipsImage;

    fn copy(&self, img: &VipsImage) -> Result<VipsImage> {
        self.backend.copy(img)
    }

    fn print(&self, img: VipsImage, label: &LabelLayer) -> Result<VipsImage> {
        if label.text.is_empty() {
            return Ok(img);
        }
        let (text, baseline) = self.backend.print(self.font, &label.text, label.size, self.color)?;
        let (ox, oy) = match label.anchor {
            Anchor::LeftBaseline => (Origin::Absolute(0.0), Origin::Absolute(baseline as f64)),
            Anchor::Middle => (Origin::Relative(0.5), Origin::Relative(0.5)),
        };
        let (x, y) = (label.x.round() as i32, label.y.round() as i32);
        self.backend.overlay(&img, &text, x, y, ox, oy)
    }

    fn blit(&self, img: VipsImage, src: &VipsImage, x: i32, y: i32) -> Result<VipsImage> {
        let origin = Origin::default();
        self.backend.overlay(&img, src, x, y, origin, origin)
    }
}
