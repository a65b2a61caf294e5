pub mod array;
pub mod job;
pub mod job_id;
pub mod server;
pub mod tracking;

pub use array::*;
pub use job::*;
pub use job_id::*;
pub use server::*;
pub use tracking::*;
