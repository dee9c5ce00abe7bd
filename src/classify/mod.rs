//! Resolves a [`crate::CanonicalCondition`] from the icon, tooltip and free-text
//! signals of a forecast day.

mod classifier;
pub mod tables;

pub use classifier::*;
