// src/analysis/mod.rs
pub mod grades;
pub mod history;

// Re-export commonly used types
pub use grades::{
    Grade,
    GradeColor,
    GradeChart,
    GradeSlice,
};
pub use history::{HistoryChart, HistoryPoint};
