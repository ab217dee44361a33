//! Safe SQL builder: identifiers from code and mapping tables only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
