pub mod series;
pub mod bucket;
pub mod grid;

pub use series::*;
pub use bucket::*;
pub use grid::*;
