//! Request extractors shared by the handlers.

pub mod media_type;
pub mod request;

pub use media_type::{MediaType, Negotiated};
pub use request::{AppJson, AppPath, AppQuery};
