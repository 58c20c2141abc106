//! SQL statement construction for the CRUD surface.

mod builder;
mod params;
mod patch;

pub use builder::{select_list, update, ChangeSet, Filter, QueryBuf};
pub use params::SqlValue;
pub use patch::Patch;
