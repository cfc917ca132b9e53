pub mod resample;
pub mod weekly;

pub use resample::*;
pub use weekly::*;
