pub mod hostname;
pub mod registry;

pub use hostname::*;
pub use registry::*;
