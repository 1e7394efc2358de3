pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{InMemoryHistory, InMemoryInventory};
pub use config::{CliConfig, Settings};
pub use core::engine::{BlendEngine, PlanOptions};
pub use core::DEFAULT_TOLERANCE;
pub use domain::model::{
    BlendComposition, PlanSummary, SavedPlan, Tank, TransferPlan, TransferStep,
};
pub use utils::error::{BlendError, Result};
