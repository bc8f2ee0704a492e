//! Domain models for the pillbox system.

mod dose;
mod medication;
mod person;
mod schedule;

pub use dose::*;
pub use medication::*;
pub use person::*;
pub use schedule::*;
