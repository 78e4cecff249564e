//! Sector layout engine
//!
//! Turns a [`Fraction`] into an ordered list of [`DrawCommand`]s:
//! - the circle outline
//! - one wedge per sector, clockwise from 12 o'clock, shaded or not
//! - radial dividers on every sector boundary, after all wedges so no fill
//!   can cover them
//! - the text labels below (and sometimes above) the circle
//!
//! The circle is always cut by the denominator as entered, not the reduced
//! one, so `6/8` shows eight sectors.

pub mod command;
pub mod labels;

pub use command::*;

use crate::domain::{Fraction, MixedForm, Point, TOP, sector_angle};

/// Placement constants in diagram units
pub mod placement {
    /// Distance below the circle of each of the three bottom labels
    pub const LABEL_OFFSETS: [f64; 3] = [30.0, 55.0, 80.0];
    /// Distance above the circle of the whole-units note
    pub const NOTE_OFFSET: f64 = 10.0;
    pub const LABEL_SIZE: f32 = 14.0;
    pub const NOTE_SIZE: f32 = 12.0;
    /// Stroke width of the outline and dividers
    pub const LINE_WIDTH: f32 = 1.0;
}

/// One angular slice of the circle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    pub index: u64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub shaded: bool,
}

impl Sector {
    pub fn arc_angle(&self) -> f64 {
        self.start_angle - self.end_angle
    }
}

/// Number of sectors to shade
///
/// A whole number (remainder zero, at least one unit) fills the single drawn
/// circle; anything else shades exactly `remainder` sectors.
pub fn shaded_count(mixed: &MixedForm) -> u64 {
    if mixed.remainder == 0 && mixed.whole > 0 {
        mixed.denominator.get()
    } else {
        mixed.remainder
    }
}

/// Sectors in clockwise order starting at 12 o'clock
pub fn sectors(fraction: &Fraction) -> Vec<Sector> {
    let count = fraction.denominator();
    let angle = sector_angle(count);
    let shaded = shaded_count(&fraction.to_mixed());

    (0..count)
        .map(|i| {
            let start_angle = TOP - i as f64 * angle;
            Sector {
                index: i,
                start_angle,
                end_angle: start_angle - angle,
                shaded: i < shaded,
            }
        })
        .collect()
}

fn label(text: String, y: f64, size: f32, style: FontStyle) -> DrawCommand {
    DrawCommand::Text(Label {
        text,
        at: Point::new(0.0, y),
        align: Align::Center,
        font: Font { size, style },
    })
}

/// Build the full drawing for `fraction` with a circle of `radius`
pub fn layout(fraction: &Fraction, radius: f64) -> Vec<DrawCommand> {
    let mixed = fraction.to_mixed();
    let sectors = sectors(fraction);
    log::debug!(
        "Laying out {} as {} sectors, {} shaded",
        fraction,
        sectors.len(),
        shaded_count(&mixed)
    );

    let mut commands = Vec::with_capacity(2 * sectors.len() + 5);

    commands.push(DrawCommand::Circle {
        radius,
        ink: Ink::Line,
        width: placement::LINE_WIDTH,
    });

    for sector in &sectors {
        commands.push(DrawCommand::Wedge(Wedge {
            radius,
            start_angle: sector.start_angle,
            arc_angle: sector.arc_angle(),
            fill: sector.shaded.then_some(Ink::Shade),
        }));
    }

    // Dividers go on top of every wedge
    for sector in &sectors {
        commands.push(DrawCommand::Line {
            from: Point::ORIGIN,
            to: Point::polar(radius, sector.start_angle),
            ink: Ink::Line,
            width: placement::LINE_WIDTH,
        });
    }

    let [first, second, third] = placement::LABEL_OFFSETS;
    let size = placement::LABEL_SIZE;
    commands.push(label(
        labels::original(fraction),
        -radius - first,
        size,
        FontStyle::Normal,
    ));
    commands.push(label(
        labels::simplified(fraction),
        -radius - second,
        size,
        FontStyle::Normal,
    ));
    commands.push(label(
        labels::mixed_and_remainder(&mixed),
        -radius - third,
        size,
        FontStyle::Normal,
    ));

    if let Some(note) = labels::whole_units(&mixed) {
        commands.push(label(
            note,
            radius + placement::NOTE_OFFSET,
            placement::NOTE_SIZE,
            FontStyle::Italic,
        ));
    }

    commands
}
