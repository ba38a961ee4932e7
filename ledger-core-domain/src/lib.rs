pub mod models;
pub mod registry;
pub mod utils;

pub use models::*;
pub use registry::*;
pub use utils::*;
