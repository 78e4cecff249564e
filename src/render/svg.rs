//! SVG canvas
//!
//! Builds a standalone SVG document in memory. Text is emitted as real
//! `<text>` elements, so labels stay selectable and scale with the image.

use std::fmt::Write;
use std::path::Path;

use anyhow::Context;

use super::geometry::{Viewport, arc_cubics};
use super::{Canvas, Palette, Region, Segment};
use crate::config::ShapeColor;
use crate::domain::Point;
use crate::layout::{Align, FontStyle, Ink, Label};

/// Escape text for use in XML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<text>` element for `label`, positioned in pixel space
pub fn text_element(
    label: &Label,
    viewport: &Viewport,
    font_family: &str,
    color: ShapeColor,
) -> String {
    let (x, y) = viewport.to_pixel(label.at);
    let anchor = match label.align {
        Align::Left => "start",
        Align::Center => "middle",
        Align::Right => "end",
    };
    let style = match label.font.style {
        FontStyle::Normal => "normal",
        FontStyle::Italic => "italic",
    };
    format!(
        r#"<text x="{x:.2}" y="{y:.2}" font-family="{}" font-size="{}" font-style="{style}" text-anchor="{anchor}" fill="{}">{}</text>"#,
        escape(font_family),
        label.font.size,
        color.to_hex(),
        escape(&label.text),
    )
}

/// Canvas accumulating SVG elements
pub struct SvgCanvas {
    viewport: Viewport,
    palette: Palette,
    font_family: String,
    title: String,
    body: String,
}

impl SvgCanvas {
    pub fn new(viewport: Viewport, palette: Palette, font_family: &str, title: &str) -> Self {
        Self {
            viewport,
            palette,
            font_family: font_family.to_string(),
            title: title.to_string(),
            body: String::new(),
        }
    }

    fn point(&self, p: Point) -> String {
        let (x, y) = self.viewport.to_pixel(p);
        format!("{x:.2},{y:.2}")
    }

    /// Path data for an arc continuing from the current point
    fn arc_data(&self, d: &mut String, radius: f64, start_angle: f64, sweep: f64) {
        for cubic in arc_cubics(radius, start_angle, sweep) {
            let _ = write!(
                d,
                " C {} {} {}",
                self.point(cubic.ctrl1),
                self.point(cubic.ctrl2),
                self.point(cubic.to)
            );
        }
    }

    /// Finish the document
    pub fn finish(self) -> String {
        let Viewport { width, height } = self.viewport;
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(out, "<title>{}</title>", escape(&self.title));
        let _ = writeln!(
            out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            self.palette.background.to_hex()
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    /// Finish the document and write it to `path`
    pub fn save(self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.finish())
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl Canvas for SvgCanvas {
    fn line(&mut self, from: Point, to: Point, ink: Ink, width: f32) {
        let (x1, y1) = self.viewport.to_pixel(from);
        let (x2, y2) = self.viewport.to_pixel(to);
        let _ = writeln!(
            self.body,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="{width}" stroke-linecap="round"/>"#,
            self.palette.resolve(ink).to_hex()
        );
    }

    fn arc(&mut self, radius: f64, start_angle: f64, sweep: f64, ink: Ink, width: f32) {
        let mut d = format!("M {}", self.point(Point::polar(radius, start_angle)));
        self.arc_data(&mut d, radius, start_angle, sweep);
        let _ = writeln!(
            self.body,
            r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{width}"/>"#,
            self.palette.resolve(ink).to_hex()
        );
    }

    fn fill(&mut self, region: &Region, ink: Ink) {
        let mut d = format!("M {}", self.point(region.start));
        for segment in &region.segments {
            match *segment {
                Segment::LineTo(p) => {
                    let _ = write!(d, " L {}", self.point(p));
                }
                Segment::Arc {
                    radius,
                    start_angle,
                    sweep,
                } => self.arc_data(&mut d, radius, start_angle, sweep),
            }
        }
        d.push_str(" Z");
        let _ = writeln!(
            self.body,
            r#"<path d="{d}" fill="{}" stroke="none"/>"#,
            self.palette.resolve(ink).to_hex()
        );
    }

    fn text(&mut self, label: &Label) {
        let element = text_element(
            label,
            &self.viewport,
            &self.font_family,
            self.palette.resolve(Ink::Line),
        );
        self.body.push_str(&element);
        self.body.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FracpieConfig;
    use crate::domain::Fraction;
    use crate::layout::layout;
    use crate::render::paint;

    fn render(n: i64, d: i64) -> String {
        let fraction = Fraction::new(n, d).unwrap();
        let config = FracpieConfig::default();
        let mut canvas = SvgCanvas::new(
            Viewport::square(800),
            Palette::from(&config),
            &config.label_font,
            &format!("Fraction: {fraction}"),
        );
        paint(&layout(&fraction, 200.0), &mut canvas);
        canvas.finish()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_document_structure() {
        let svg = render(7, 4);
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("<title>Fraction: 7/4</title>"));
        assert_eq!(svg.matches(r##"fill="#1f77b4""##).count(), 3);
        assert!(svg.contains(">Mixed: 1 3/4 — Remainder reduced: 3/4</text>"));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_dividers_after_fills() {
        let svg = render(3, 4);
        let last_fill = svg.rfind(r##"fill="#1f77b4""##).unwrap();
        // two edges for each of the last two wedges, then four dividers
        assert_eq!(svg[last_fill..].matches("<line").count(), 8);
    }

    #[test]
    fn test_whole_units_note_is_italic() {
        let svg = render(9, 4);
        assert!(svg.contains(r#"font-style="italic""#));
        assert!(svg.contains("(Represents 2 whole circle(s): drawn 1 circle + remainder)"));
    }

    #[test]
    fn test_text_element_position() {
        let label = Label {
            text: "x".into(),
            at: Point::new(0.0, -230.0),
            align: Align::Center,
            font: crate::layout::Font {
                size: 14.0,
                style: FontStyle::Normal,
            },
        };
        let el = text_element(&label, &Viewport::square(800), "Arial", ShapeColor::BLACK);
        assert!(el.contains(r#"x="400.00" y="630.00""#));
        assert!(el.contains(r##"fill="#000000""##));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        let config = FracpieConfig::default();
        let mut canvas = SvgCanvas::new(Viewport::square(100), Palette::from(&config), "Arial", "t");
        canvas.line(Point::ORIGIN, Point::new(10.0, 0.0), Ink::Line, 1.0);
        canvas.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<line"));
    }
}
