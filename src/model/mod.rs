pub mod coverage;
pub mod grid;
pub mod hit_rate;
pub mod points;
pub mod top_slice;
