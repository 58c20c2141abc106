//! REST request handlers, one module per resource.

pub mod careers;
pub mod study_experience;
pub mod work_experience;
