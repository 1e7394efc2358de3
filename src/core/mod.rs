pub mod composition;
pub mod engine;
pub mod planner;
pub mod selector;
pub mod summary;

pub use crate::domain::model::{BlendComposition, PlanSummary, Tank, TransferPlan, TransferStep};
pub use crate::utils::error::Result;

/// Default fractional tolerance for volume comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;
