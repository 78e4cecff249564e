//! Raster canvas using tiny-skia
//!
//! Shapes are drawn straight onto a [`Pixmap`]. Labels go through resvg,
//! which lays the text out with the system fonts and renders it onto the
//! same pixmap.

use std::io;
use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use resvg::usvg;
use tiny_skia::{Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{Viewport, arc_cubics};
use super::svg::text_element;
use super::{Canvas, Palette, Region, Segment};
use crate::config::ShapeColor;
use crate::domain::Point;
use crate::layout::{Ink, Label};

fn paint_for(color: ShapeColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn stroke_of(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

/// Canvas backed by a tiny-skia pixmap
pub struct PixmapCanvas {
    pixmap: Pixmap,
    viewport: Viewport,
    palette: Palette,
    font_family: String,
    text_options: usvg::Options<'static>,
}

impl PixmapCanvas {
    /// Allocate a pixmap the size of `viewport`, cleared to the background color
    pub fn new(viewport: Viewport, palette: Palette, font_family: &str) -> anyhow::Result<Self> {
        let mut pixmap = Pixmap::new(viewport.width, viewport.height).with_context(|| {
            format!(
                "Failed to allocate a {}x{} pixmap",
                viewport.width, viewport.height
            )
        })?;
        let [r, g, b, a] = palette.background.to_rgba_u8();
        pixmap.fill(Color::from_rgba8(r, g, b, a));

        let mut text_options = usvg::Options::default();
        text_options.fontdb_mut().load_system_fonts();
        log::debug!(
            "Loaded {} font faces for label rendering",
            text_options.fontdb.len()
        );

        Ok(Self {
            pixmap,
            viewport,
            palette,
            font_family: font_family.to_string(),
            text_options,
        })
    }

    fn move_to(&self, pb: &mut PathBuilder, p: Point) {
        let (x, y) = self.viewport.to_pixel(p);
        pb.move_to(x, y);
    }

    fn line_to(&self, pb: &mut PathBuilder, p: Point) {
        let (x, y) = self.viewport.to_pixel(p);
        pb.line_to(x, y);
    }

    fn arc_to(&self, pb: &mut PathBuilder, radius: f64, start_angle: f64, sweep: f64) {
        for cubic in arc_cubics(radius, start_angle, sweep) {
            let (x1, y1) = self.viewport.to_pixel(cubic.ctrl1);
            let (x2, y2) = self.viewport.to_pixel(cubic.ctrl2);
            let (x, y) = self.viewport.to_pixel(cubic.to);
            pb.cubic_to(x1, y1, x2, y2, x, y);
        }
    }

    fn stroke(&mut self, pb: PathBuilder, ink: Ink, width: f32) {
        let Some(path) = pb.finish() else {
            return;
        };
        let paint = paint_for(self.palette.resolve(ink));
        self.pixmap
            .stroke_path(&path, &paint, &stroke_of(width), Transform::identity(), None);
    }

    /// Convert into an RGBA image
    pub fn into_image(self) -> anyhow::Result<RgbaImage> {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        // The background is opaque, so premultiplied and straight alpha agree
        RgbaImage::from_raw(w, h, self.pixmap.take())
            .context("Pixmap size does not match its dimensions")
    }

    /// Encode as PNG and write to `path`
    pub fn save(self, path: &Path) -> anyhow::Result<()> {
        let img = self.into_image()?;
        save_rgba(&img, path)
    }
}

impl Canvas for PixmapCanvas {
    fn line(&mut self, from: Point, to: Point, ink: Ink, width: f32) {
        let mut pb = PathBuilder::new();
        self.move_to(&mut pb, from);
        self.line_to(&mut pb, to);
        self.stroke(pb, ink, width);
    }

    fn arc(&mut self, radius: f64, start_angle: f64, sweep: f64, ink: Ink, width: f32) {
        let mut pb = PathBuilder::new();
        self.move_to(&mut pb, Point::polar(radius, start_angle));
        self.arc_to(&mut pb, radius, start_angle, sweep);
        self.stroke(pb, ink, width);
    }

    fn fill(&mut self, region: &Region, ink: Ink) {
        let mut pb = PathBuilder::new();
        self.move_to(&mut pb, region.start);
        for segment in &region.segments {
            match *segment {
                Segment::LineTo(p) => self.line_to(&mut pb, p),
                Segment::Arc {
                    radius,
                    start_angle,
                    sweep,
                } => self.arc_to(&mut pb, radius, start_angle, sweep),
            }
        }
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };
        let paint = paint_for(self.palette.resolve(ink));
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn text(&mut self, label: &Label) {
        let Viewport { width, height } = self.viewport;
        let element = text_element(
            label,
            &self.viewport,
            &self.font_family,
            self.palette.resolve(Ink::Line),
        );
        let doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">{element}</svg>"#
        );
        match usvg::Tree::from_str(&doc, &self.text_options) {
            Ok(tree) => resvg::render(&tree, Transform::identity(), &mut self.pixmap.as_mut()),
            Err(err) => log::warn!("Could not render label {:?}: {:?}", label.text, err),
        }
    }
}

/// Write an RGBA image as an 8-bit PNG
fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

pub fn save_rgba(img: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_png(io::BufWriter::new(file), img)
        .with_context(|| format!("Failed to encode PNG {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FracpieConfig;
    use crate::domain::Fraction;
    use crate::layout::layout;
    use crate::render::paint;

    fn render(n: i64, d: i64, radius: f64) -> RgbaImage {
        let config = FracpieConfig::default();
        let mut canvas =
            PixmapCanvas::new(Viewport::square(400), Palette::from(&config), "Arial").unwrap();
        paint(&layout(&Fraction::new(n, d).unwrap(), radius), &mut canvas);
        canvas.into_image().unwrap()
    }

    const BLUE: [u8; 4] = [0x1f, 0x77, 0xb4, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    #[test]
    fn test_shaded_quadrants() {
        // 1/4 shades the top-right quadrant only
        let img = render(1, 4, 100.0);
        assert_eq!(img.get_pixel(240, 160).0, BLUE);
        assert_eq!(img.get_pixel(160, 160).0, WHITE);
        assert_eq!(img.get_pixel(160, 240).0, WHITE);
        assert_eq!(img.get_pixel(240, 240).0, WHITE);
    }

    #[test]
    fn test_whole_number_fills_every_quadrant() {
        let img = render(8, 4, 100.0);
        for (x, y) in [(240, 160), (160, 160), (160, 240), (240, 240)] {
            assert_eq!(img.get_pixel(x, y).0, BLUE, "pixel at {x},{y}");
        }
        // outside the circle stays background
        assert_eq!(img.get_pixel(5, 5).0, WHITE);
    }

    #[test]
    fn test_divider_drawn_over_fill() {
        // 3/4: the divider at 3 o'clock runs between two shaded wedges
        let img = render(3, 4, 100.0);
        let px = img.get_pixel(250, 200).0;
        assert_ne!(px, BLUE);
        assert!(px[0] < 0x1f + 40, "expected a dark divider pixel, got {px:?}");
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.png");
        let config = FracpieConfig::default();
        let mut canvas =
            PixmapCanvas::new(Viewport::square(64), Palette::from(&config), "Arial").unwrap();
        canvas.arc(20.0, 90.0, -360.0, Ink::Line, 1.0);
        canvas.save(&path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (64, 64));
    }
}
