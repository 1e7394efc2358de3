use crate::domain::model::{PlanSummary, TransferPlan};

/// Packages a plan into the wire shape, preserving step order and reusing
/// the percentages computed at plan time.
pub fn summarize(plan: &TransferPlan) -> PlanSummary {
    PlanSummary {
        transfer_plan: plan.steps.clone(),
        blend_percentages: plan.composition.percentages.clone(),
    }
}
