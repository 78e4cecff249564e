//! Drawing primitives emitted by the layout engine
//!
//! Commands carry geometry in diagram space and refer to colors by role, so
//! they can be replayed onto any [`Canvas`](crate::render::Canvas).

use crate::domain::Point;

/// Color role, resolved to a concrete color by the canvas palette
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    /// Outline, dividers and label text
    Line,
    /// Shaded sectors
    Shade,
}

/// Horizontal anchoring of a text label around its position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub size: f32,
    pub style: FontStyle,
}

/// One pie slice: centre, out along `start_angle`, clockwise arc, back to centre
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wedge {
    pub radius: f64,
    /// Heading of the leading edge in degrees
    pub start_angle: f64,
    /// Clockwise sweep in degrees
    pub arc_angle: f64,
    /// Fill for shaded wedges, `None` leaves the interior untouched
    pub fill: Option<Ink>,
}

impl Wedge {
    pub fn end_angle(&self) -> f64 {
        self.start_angle - self.arc_angle
    }

    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub at: Point,
    pub align: Align,
    pub font: Font,
}

/// Ordered drawing instruction
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Circle outline around the origin
    Circle { radius: f64, ink: Ink, width: f32 },
    Wedge(Wedge),
    /// Straight stroke, used for the radial dividers
    Line {
        from: Point,
        to: Point,
        ink: Ink,
        width: f32,
    },
    Text(Label),
}

impl DrawCommand {
    pub fn as_wedge(&self) -> Option<&Wedge> {
        match self {
            DrawCommand::Wedge(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&Label> {
        match self {
            DrawCommand::Text(l) => Some(l),
            _ => None,
        }
    }
}
