//! Storage entities, client DTOs, list parameters and paging.

mod dto;
mod entities;
mod paging;
mod params;

pub use dto::*;
pub use entities::*;
pub use paging::PagedList;
pub use params::*;
