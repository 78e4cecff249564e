//! Shared geometry for the canvases
//!
//! Both the raster and the SVG canvas map diagram space onto the same pixel
//! grid and approximate arcs with the same cubic bezier segments.

use crate::domain::Point;
use crate::layout::{Align, Label};

/// Bezier control distance for a quarter circle: 4/3 * (sqrt(2) - 1)
pub const BEZIER_K: f64 = 0.552_284_749_830_793_4;

/// Largest sweep covered by a single bezier segment, in degrees
pub const MAX_SEGMENT_SWEEP: f64 = 90.0;

/// Room kept around the circle for labels, in diagram units
pub const MARGIN: f64 = 100.0;

/// Average glyph advance as a fraction of the font size
pub const GLYPH_WIDTH_EM: f64 = 0.6;

/// Horizontal room kept beside the widest label, in pixels
pub const LABEL_PADDING: f64 = 10.0;

/// Estimated rendered width of `label`, in pixels
pub fn label_width(label: &Label) -> f64 {
    label.text.chars().count() as f64 * label.font.size as f64 * GLYPH_WIDTH_EM
}

/// Pixel area the diagram is drawn into, with the circle centred
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Square canvas of at least `min_side` that leaves [`MARGIN`] around the circle
    pub fn fitting(radius: f64, min_side: u32) -> Self {
        let needed = (2.0 * (radius + MARGIN)).ceil();
        let side = if needed > min_side as f64 {
            needed.min(u32::MAX as f64) as u32
        } else {
            min_side
        };
        Self::square(side.max(1))
    }

    /// Widen the canvas until every label fits horizontally
    ///
    /// The height is left alone; [`MARGIN`] already covers the label rows.
    pub fn widened_for<'a>(self, labels: impl IntoIterator<Item = &'a Label>) -> Self {
        let half = labels
            .into_iter()
            .map(|label| {
                let w = label_width(label);
                let x = label.at.x;
                let (left, right) = match label.align {
                    Align::Left => (x, x + w),
                    Align::Center => (x - w * 0.5, x + w * 0.5),
                    Align::Right => (x - w, x),
                };
                left.abs().max(right.abs())
            })
            .fold(0.0_f64, f64::max);
        let needed = (2.0 * (half + LABEL_PADDING)).ceil();
        if needed > self.width as f64 {
            Self {
                width: needed.min(u32::MAX as f64) as u32,
                ..self
            }
        } else {
            self
        }
    }

    /// Diagram space (y up, origin centred) to pixel space (y down)
    #[inline]
    pub fn to_pixel(&self, p: Point) -> (f32, f32) {
        let cx = self.width as f64 * 0.5;
        let cy = self.height as f64 * 0.5;
        ((cx + p.x) as f32, (cy - p.y) as f32)
    }
}

/// One cubic segment: two control points and the end point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cubic {
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// Approximate an arc around the origin with cubic segments
///
/// Starts at `Point::polar(radius, start_angle)`; a negative `sweep` runs
/// clockwise.
pub fn arc_cubics(radius: f64, start_angle: f64, sweep: f64) -> Vec<Cubic> {
    if sweep == 0.0 || radius <= 0.0 {
        return Vec::new();
    }
    let count = (sweep.abs() / MAX_SEGMENT_SWEEP).ceil().max(1.0) as usize;
    let step = sweep / count as f64;
    let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan();

    (0..count)
        .map(|i| {
            let a0 = (start_angle + step * i as f64).to_radians();
            let a1 = (start_angle + step * (i + 1) as f64).to_radians();
            let (s0, c0) = a0.sin_cos();
            let (s1, c1) = a1.sin_cos();
            Cubic {
                ctrl1: Point::new(radius * (c0 - k * s0), radius * (s0 + k * c0)),
                ctrl2: Point::new(radius * (c1 + k * s1), radius * (s1 - k * c1)),
                to: Point::new(radius * c1, radius * s1),
            }
        })
        .collect()
}
