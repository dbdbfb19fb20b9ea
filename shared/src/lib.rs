//! Training Zones Shared Library
//!
//! The calculation engine behind the training zones tools: VO2Max
//! estimation, running training paces, heart rate zones and cycling power
//! zones. Every calculation is a pure function of its inputs.

pub mod efforts;
pub mod errors;
pub mod inputs;
pub mod paces;
pub mod units;
pub mod validation;
pub mod vo2max;
pub mod zones;

// Re-export commonly used items
pub use efforts::*;
pub use errors::*;
pub use inputs::*;
pub use paces::*;
pub use units::*;
pub use validation::*;
pub use vo2max::*;
pub use zones::*;
