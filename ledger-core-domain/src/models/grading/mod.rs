pub mod aggregation;
pub mod course;
pub mod grade;
pub mod student;

// Re-exports
pub use aggregation::*;
pub use course::*;
pub use grade::*;
pub use student::*;
