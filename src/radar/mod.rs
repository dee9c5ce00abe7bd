//! Radar animation and the other marine images.

mod compositor;
pub mod error;
pub mod images;

pub use compositor::*;
