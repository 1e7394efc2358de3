use crate::domain::model::{BlendComposition, Tank};
use crate::utils::error::{BlendError, Result};

/// A tank chosen to receive consolidated volume.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationTarget {
    pub name: String,
    pub capacity: f64,
    /// Volume already sitting in the tank when it was selected.
    pub initial_volume: f64,
}

impl ConsolidationTarget {
    pub fn residual_capacity(&self) -> f64 {
        (self.capacity - self.initial_volume).max(0.0)
    }
}

/// Picks the minimal set of largest-capacity tanks whose summed capacity
/// covers the total system volume.
///
/// Greedy largest-first selection, ties broken by name for determinism. A
/// tank is eligible when it is empty or already holds the blend that will
/// dominate the final mix; an eligible tank keeps its contents in place, so
/// its full capacity counts toward coverage.
pub fn select_targets(
    inventory: &[Tank],
    composition: &BlendComposition,
    tolerance: f64,
) -> Result<Vec<ConsolidationTarget>> {
    if composition.is_empty() {
        return Ok(Vec::new());
    }
    let total_volume = composition.total_volume;
    let dominant = composition.dominant_blend().unwrap_or_default();

    let mut eligible: Vec<&Tank> = inventory
        .iter()
        .filter(|t| !t.holds_wine() || t.blend_key() == dominant)
        .collect();
    eligible.sort_by(|a, b| {
        b.capacity
            .total_cmp(&a.capacity)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut targets = Vec::new();
    let mut covered = 0.0;
    for tank in &eligible {
        targets.push(ConsolidationTarget {
            name: tank.name.clone(),
            capacity: tank.capacity,
            initial_volume: tank.current_volume,
        });
        covered += tank.capacity;
        if covered >= total_volume * (1.0 - tolerance) {
            return Ok(targets);
        }
    }

    let available: f64 = eligible.iter().map(|t| t.capacity).sum();
    Err(BlendError::InsufficientCapacity {
        required: total_volume,
        available,
        shortfall: total_volume - available,
    })
}
