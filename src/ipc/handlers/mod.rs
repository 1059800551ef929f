pub mod cohorts;
pub mod core;
pub mod exports;
pub mod staffing;
