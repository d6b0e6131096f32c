//! Request extractors that reject with [`AppError`](crate::error::AppError).

mod body;
mod id;
mod listing;

pub use body::JsonBody;
pub use id::IdPath;
pub use listing::{CinemaFilters, FilmeFilters, Listing, NoFilters};
