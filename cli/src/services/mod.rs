//! Services
//!
//! Services coordinate the data sources and the calculation engine.

pub mod gather;
pub mod report;

pub use gather::{GatherService, GatheredInputs};
pub use report::{Report, ReportService};
