pub mod account_registry;
pub mod product_catalog;
pub mod student_roster;

// Re-exports
pub use account_registry::*;
pub use product_catalog::*;
pub use student_roster::*;
