pub mod identifiable;
pub mod validated;

pub mod account;
pub mod grading;
pub mod payment;
pub mod product;

// Re-exports
pub use identifiable::*;
pub use validated::*;
