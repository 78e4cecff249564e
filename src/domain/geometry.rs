//! Points and angles in diagram space
//!
//! Diagram space is centred on the circle, with x to the right and y up.
//! Angles are in degrees, counter-clockwise from the positive x axis.

/// A point in diagram space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the origin in the direction of `degrees`
    pub fn polar(radius: f64, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self {
            x: radius * rad.cos(),
            y: radius * rad.sin(),
        }
    }

    /// Distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Heading of 12 o'clock
pub const TOP: f64 = 90.0;

/// Sweep of one sector when the circle is cut into `count` equal parts
pub fn sector_angle(count: u64) -> f64 {
    360.0 / count as f64
}
