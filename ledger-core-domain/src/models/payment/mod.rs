pub mod gateway;
pub mod processor;

// Re-exports
pub use gateway::*;
pub use processor::*;
