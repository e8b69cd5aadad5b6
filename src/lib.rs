//! Scoring of spatial crime-prediction grids against observed events.
//!
//! [`model::top_slice::top_slice`] flags the highest-ranked fraction of a
//! masked array and [`model::hit_rate::hit_rates`] measures how many events
//! land in the flagged cells of a [`model::grid::GridPrediction`].

pub mod array;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use array::{MaskedArray, SelectionMask};
pub use error::{EvalError, Result};
pub use model::coverage::Coverage;
pub use model::grid::{GridGeometry, GridPrediction};
pub use model::hit_rate::{hit_counts, hit_rates, inverse_hit_rates, maximum_hit_rate};
pub use model::points::{TimedPoint, TimedPoints};
pub use model::top_slice::top_slice;
