//! Domain types for the bike-station map.
//!
//! This module contains the validated value types shared by the feed,
//! the matchers and the web layer. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod path;
mod point;
mod ranked;
mod station;
mod threshold;

pub use error::DomainError;
pub use path::CyclePath;
pub use point::Point;
pub use ranked::RankedStation;
pub use station::{Station, StationId};
pub use threshold::Threshold;
