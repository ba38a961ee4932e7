pub mod product;

// Re-exports
pub use product::*;
