//! Data models for the roster engine.
//!
//! Input records mirror what the storage layer holds; calendar types are
//! derived per request and never persisted.

mod calendar;
mod day;
mod hours;
mod month;
mod roster;
mod work;

pub use calendar::*;
pub use day::*;
pub use hours::*;
pub use month::*;
pub use roster::*;
pub use work::*;
