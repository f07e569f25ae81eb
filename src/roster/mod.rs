//! Roster calendar resolution.
//!
//! Pure computation over already-fetched templates, day overrides and work
//! allocations: the resolver picks a template and its A/B week, the
//! compositor layers the day override on top, and the aggregator builds the
//! month grid with totals.

mod aggregator;
mod compositor;
mod resolver;
mod update;

pub use aggregator::*;
pub use compositor::*;
pub use resolver::*;
pub use update::*;
