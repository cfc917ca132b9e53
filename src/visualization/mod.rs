pub mod color;
pub mod data;
pub mod generator;
pub mod runtime;
pub mod templates;

pub use color::*;
pub use data::*;
pub use generator::*;
pub use runtime::*;
