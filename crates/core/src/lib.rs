pub mod grammar;
pub mod limits;
pub mod models;
pub mod traits;

pub use grammar::parse_job_id;
pub use models::*;
pub use traits::*;

pub use locator_errors::{ErrorCode, LocatorError, LocatorResult};
