//! Pure domain types with minimal dependencies
//!
//! Nothing in here knows about canvases, files or the terminal, so every
//! type can be exercised directly from unit tests.

pub mod error;
pub mod fraction;
pub mod geometry;

pub use error::*;
pub use fraction::*;
pub use geometry::*;
