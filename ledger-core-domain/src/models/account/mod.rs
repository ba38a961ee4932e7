pub mod account;
pub mod transaction;

// Re-exports
pub use account::*;
pub use transaction::*;
