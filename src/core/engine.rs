use crate::core::composition::compose;
use crate::core::planner::generate_plan;
use crate::core::selector::select_targets;
use crate::core::summary::summarize;
use crate::core::DEFAULT_TOLERANCE;
use crate::domain::model::{PlanSummary, Tank, TransferPlan};
use crate::utils::error::Result;
use crate::utils::validation::validate_inventory;

/// Knobs for one planning run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOptions {
    /// Fractional tolerance for volume comparisons.
    pub tolerance: f64,
    /// Redistribute the pooled volume into snapshot-empty tanks afterwards.
    pub fill_empty: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            fill_empty: false,
        }
    }
}

/// The blend planning engine: compose, select, generate, summarize.
///
/// Pure and synchronous. Each run is independent and operates only on the
/// snapshot it is handed, so concurrent runs over different inventories
/// never interfere.
pub struct BlendEngine {
    options: PlanOptions,
}

impl BlendEngine {
    pub fn new(options: PlanOptions) -> Self {
        Self { options }
    }

    /// Plans the transfers for one inventory snapshot.
    ///
    /// A zero-volume inventory yields an empty plan. Insufficient total
    /// capacity aborts with no partial plan.
    pub fn plan(&self, inventory: &[Tank]) -> Result<TransferPlan> {
        validate_inventory(inventory)?;

        let composition = compose(inventory);
        if composition.is_empty() {
            tracing::debug!("inventory holds no wine, returning empty plan");
            return Ok(TransferPlan::default());
        }
        tracing::debug!(
            total_volume = composition.total_volume,
            blends = composition.volumes.len(),
            "computed blend composition"
        );

        let targets = select_targets(inventory, &composition, self.options.tolerance)?;
        tracing::debug!(
            targets = ?targets.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            "selected consolidation targets"
        );

        let plan = generate_plan(
            inventory,
            &composition,
            &targets,
            self.options.tolerance,
            self.options.fill_empty,
        );
        for report in &plan.targets {
            if !report.homogeneous {
                tracing::warn!(
                    target = %report.name,
                    "consolidated tank mix deviates from the global composition"
                );
            }
        }
        tracing::info!(steps = plan.steps.len(), "transfer plan generated");
        Ok(plan)
    }

    /// Convenience wrapper returning the wire shape directly.
    pub fn plan_summary(&self, inventory: &[Tank]) -> Result<PlanSummary> {
        Ok(summarize(&self.plan(inventory)?))
    }
}

impl Default for BlendEngine {
    fn default() -> Self {
        Self::new(PlanOptions::default())
    }
}
