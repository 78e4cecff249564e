//! Draw a fraction as a pie chart.
//!
//! [`domain`] parses and normalizes fractions, [`layout`] turns one into an
//! ordered list of drawing commands, and [`render`] replays those commands
//! onto a PNG or SVG canvas. [`cli`] is the thin shell the binary runs.

pub mod cli;
pub mod config;
pub mod domain;
pub mod layout;
pub mod render;
