//! Common types used across the application.

pub mod id;
pub mod pagination;
pub mod period;

pub use id::*;
pub use pagination::{MAX_PAGE_SIZE, PageRequest, PageResponse};
pub use period::{Period, PeriodError};
