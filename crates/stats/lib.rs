//! Aggregations over the match, delivery and umpire datasets.
//!
//! Every function here is a single pass (two for the season filtered ones) over
//! in-memory records and returns its accumulator by value.

pub mod economy;
pub mod error;
pub mod join;
pub mod normalize;
pub mod rank;
pub mod reports;
pub mod series;
pub mod totals;

pub use error::{Result, StatsError};
pub use rank::Direction;
pub use series::CategorySeries;
pub use totals::Totals;
