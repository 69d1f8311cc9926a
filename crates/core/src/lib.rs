#![forbid(unsafe_code)]

pub mod error;
pub mod math;
pub mod model;
pub mod params;
pub mod sparse;
pub mod status;

mod kernel;

pub use error::*;
pub use math::*;
pub use model::*;
pub use params::*;
pub use sparse::*;
pub use status::*;
