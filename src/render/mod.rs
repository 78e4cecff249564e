//! Diagram rendering module
//!
//! This module contains:
//! - The [`Canvas`] trait, the only drawing capabilities the layout needs
//! - [`paint`], which replays layout commands onto a canvas in order
//! - Geometry shared by the canvases
//! - Raster canvas using tiny-skia (saved as PNG)
//! - Vector canvas writing SVG

pub mod geometry;
pub mod image;
pub mod svg;

use std::path::Path;

use crate::config::{FracpieConfig, OutputFormat, ShapeColor};
use crate::domain::{Fraction, Point, TOP};
use crate::layout::{DrawCommand, Ink, Label, Wedge, layout, placement};
use self::geometry::Viewport;
use self::image::PixmapCanvas;
use self::svg::SvgCanvas;

/// Piece of the border of a closed region
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    LineTo(Point),
    /// Arc around the origin from the current point; negative sweep is clockwise
    Arc {
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

/// Closed outline starting at `start`
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub start: Point,
    pub segments: Vec<Segment>,
}

impl Region {
    /// Pie slice: centre, out along the leading edge, clockwise arc, back
    pub fn wedge(wedge: &Wedge) -> Self {
        Self {
            start: Point::ORIGIN,
            segments: vec![
                Segment::LineTo(Point::polar(wedge.radius, wedge.start_angle)),
                Segment::Arc {
                    radius: wedge.radius,
                    start_angle: wedge.start_angle,
                    sweep: -wedge.arc_angle,
                },
                Segment::LineTo(Point::ORIGIN),
            ],
        }
    }
}

/// Concrete colors for each [`Ink`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub line: ShapeColor,
    pub shade: ShapeColor,
    pub background: ShapeColor,
}

impl Palette {
    pub fn resolve(&self, ink: Ink) -> ShapeColor {
        match ink {
            Ink::Line => self.line,
            Ink::Shade => self.shade,
        }
    }
}

impl From<&FracpieConfig> for Palette {
    fn from(config: &FracpieConfig) -> Self {
        Self {
            line: config.line_color,
            shade: config.fill_color,
            background: config.background,
        }
    }
}

/// Drawing backend capabilities, all in diagram space
pub trait Canvas {
    fn line(&mut self, from: Point, to: Point, ink: Ink, width: f32);
    /// Stroke an arc around the origin; negative sweep is clockwise
    fn arc(&mut self, radius: f64, start_angle: f64, sweep: f64, ink: Ink, width: f32);
    fn fill(&mut self, region: &Region, ink: Ink);
    fn text(&mut self, label: &Label);
}

/// Replay `commands` onto `canvas` strictly in order
///
/// Later commands paint over earlier ones, which is what keeps dividers
/// visible over shaded wedges.
pub fn paint(commands: &[DrawCommand], canvas: &mut impl Canvas) {
    for command in commands {
        match command {
            DrawCommand::Circle { radius, ink, width } => {
                canvas.arc(*radius, TOP, -360.0, *ink, *width);
            }
            DrawCommand::Wedge(wedge) => paint_wedge(wedge, canvas),
            DrawCommand::Line {
                from,
                to,
                ink,
                width,
            } => canvas.line(*from, *to, *ink, *width),
            DrawCommand::Text(label) => canvas.text(label),
        }
    }
}

/// Lay out `fraction` and write the diagram to `path` in `format`
pub fn render_to_file(
    fraction: &Fraction,
    config: &FracpieConfig,
    format: OutputFormat,
    path: &Path,
) -> anyhow::Result<()> {
    let commands = layout(fraction, config.radius);
    let viewport = Viewport::fitting(config.radius, config.canvas_size)
        .widened_for(commands.iter().filter_map(DrawCommand::as_label));
    let palette = Palette::from(config);
    log::debug!(
        "Rendering {} commands onto {}x{} {}",
        commands.len(),
        viewport.width,
        viewport.height,
        format.extension()
    );

    match format {
        OutputFormat::Png => {
            let mut canvas = PixmapCanvas::new(viewport, palette, &config.label_font)?;
            paint(&commands, &mut canvas);
            canvas.save(path)
        }
        OutputFormat::Svg => {
            let title = format!("Fraction: {fraction}");
            let mut canvas = SvgCanvas::new(viewport, palette, &config.label_font, &title);
            paint(&commands, &mut canvas);
            canvas.save(path)
        }
    }
}

fn paint_wedge(wedge: &Wedge, canvas: &mut impl Canvas) {
    if let Some(ink) = wedge.fill {
        canvas.fill(&Region::wedge(wedge), ink);
    }

    let edge = Point::polar(wedge.radius, wedge.start_angle);
    let back = Point::polar(wedge.radius, wedge.end_angle());
    let width = placement::LINE_WIDTH;
    canvas.line(Point::ORIGIN, edge, Ink::Line, width);
    canvas.arc(
        wedge.radius,
        wedge.start_angle,
        -wedge.arc_angle,
        Ink::Line,
        width,
    );
    canvas.line(back, Point::ORIGIN, Ink::Line, width);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls instead of drawing
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Canvas for Recorder {
        fn line(&mut self, _from: Point, _to: Point, _ink: Ink, _width: f32) {
            self.calls.push("line".into());
        }

        fn arc(&mut self, _radius: f64, _start: f64, sweep: f64, _ink: Ink, _width: f32) {
            self.calls.push(format!("arc {sweep}"));
        }

        fn fill(&mut self, _region: &Region, ink: Ink) {
            self.calls.push(format!("fill {ink:?}"));
        }

        fn text(&mut self, label: &Label) {
            self.calls.push(format!("text {}", label.text));
        }
    }

    #[test]
    fn test_paint_order() {
        let commands = layout(&Fraction::new(1, 2).unwrap(), 100.0);
        let mut rec = Recorder::default();
        paint(&commands, &mut rec);

        let calls: Vec<&str> = rec.calls.iter().map(String::as_str).collect();
        assert_eq!(
            &calls[..11],
            &[
                "arc -360",
                // shaded wedge: fill, then its outline
                "fill Shade",
                "line",
                "arc -180",
                "line",
                // unshaded wedge
                "line",
                "arc -180",
                "line",
                // dividers
                "line",
                "line",
                "text Original: 1/2",
            ]
        );
        assert_eq!(calls.len(), 13);
    }

    #[test]
    fn test_wedge_region_closes_at_centre() {
        let wedge = Wedge {
            radius: 10.0,
            start_angle: 90.0,
            arc_angle: 90.0,
            fill: Some(Ink::Shade),
        };
        let region = Region::wedge(&wedge);
        assert_eq!(region.start, Point::ORIGIN);
        assert_eq!(region.segments.last(), Some(&Segment::LineTo(Point::ORIGIN)));
        assert!(matches!(
            region.segments[1],
            Segment::Arc { sweep, .. } if sweep == -90.0
        ));
    }

    #[test]
    fn test_render_to_file_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let fraction = Fraction::new(7, 4).unwrap();
        let config = FracpieConfig {
            radius: 50.0,
            canvas_size: 300,
            ..Default::default()
        };

        let png = dir.path().join("f.png");
        render_to_file(&fraction, &config, OutputFormat::Png, &png).unwrap();
        assert!(std::fs::metadata(&png).unwrap().len() > 0);

        let svg = dir.path().join("f.svg");
        render_to_file(&fraction, &config, OutputFormat::Svg, &svg).unwrap();
        let text = std::fs::read_to_string(&svg).unwrap();
        assert!(text.contains(r#"height="300""#));
    }

    #[test]
    fn test_long_labels_widen_small_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let fraction = Fraction::new(i64::MAX, 97).unwrap();
        let config = FracpieConfig {
            radius: 20.0,
            canvas_size: 200,
            ..Default::default()
        };
        let svg = dir.path().join("wide.svg");
        render_to_file(&fraction, &config, OutputFormat::Svg, &svg).unwrap();
        let text = std::fs::read_to_string(&svg).unwrap();
        assert!(!text.contains(r#"width="200""#));
        assert!(text.contains(r#"height="240""#));
    }

    #[test]
    fn test_render_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("f.svg");
        let fraction = Fraction::new(1, 3).unwrap();
        let err = render_to_file(&fraction, &FracpieConfig::default(), OutputFormat::Svg, &path)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }

    #[test]
    fn test_palette_from_config() {
        let config = FracpieConfig::default();
        let palette = Palette::from(&config);
        assert_eq!(palette.resolve(Ink::Shade).to_hex(), "#1f77b4");
        assert_eq!(palette.resolve(Ink::Line), ShapeColor::BLACK);
    }
}
