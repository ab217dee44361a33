//! Request validation ahead of repository writes.

mod validation;
pub use validation::RequestValidator;
