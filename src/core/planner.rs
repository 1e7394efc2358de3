use crate::core::selector::ConsolidationTarget;
use crate::domain::model::{BlendComposition, TargetReport, Tank, TransferPlan, TransferStep};
use std::collections::{BTreeMap, BTreeSet};

/// Mutable fill state of one consolidation target while the plan is built.
struct TargetState {
    name: String,
    capacity: f64,
    fill: f64,
    contents: BTreeMap<String, f64>,
}

impl TargetState {
    fn room(&self) -> f64 {
        (self.capacity - self.fill).max(0.0)
    }

    fn receive(&mut self, blend: &str, volume: f64) {
        self.fill += volume;
        *self.contents.entry(blend.to_string()).or_insert(0.0) += volume;
    }
}

/// Emits the ordered transfer list that pools all wine into the chosen
/// consolidation targets, optionally redistributing the pooled volume into
/// the tanks that were empty at snapshot time.
///
/// Tanks are walked in stable name order at every phase, so an unchanged
/// inventory always yields an identical plan. No zero-volume step is ever
/// emitted; residuals below `tolerance x capacity` are dropped.
pub fn generate_plan(
    inventory: &[Tank],
    composition: &BlendComposition,
    targets: &[ConsolidationTarget],
    tolerance: f64,
    fill_empty: bool,
) -> TransferPlan {
    if composition.is_empty() || targets.is_empty() {
        return TransferPlan::default();
    }

    let target_names: BTreeSet<&str> = targets.iter().map(|t| t.name.as_str()).collect();

    let mut states: Vec<TargetState> = targets
        .iter()
        .map(|target| {
            let mut contents = BTreeMap::new();
            if let Some(tank) = inventory.iter().find(|t| t.name == target.name) {
                if tank.holds_wine() {
                    contents.insert(tank.blend_key(), tank.current_volume);
                }
            }
            TargetState {
                name: target.name.clone(),
                capacity: target.capacity,
                fill: target.initial_volume,
                contents,
            }
        })
        .collect();

    let mut sources: Vec<&Tank> = inventory
        .iter()
        .filter(|t| t.holds_wine() && !target_names.contains(t.name.as_str()))
        .collect();
    sources.sort_by(|a, b| a.name.cmp(&b.name));

    let mut steps = Vec::new();

    // Consolidation phase: each source drains entirely into the targets,
    // spilling to the next target when one fills.
    for source in sources {
        let blend = source.blend_key();
        let mut remaining = source.current_volume;
        for state in states.iter_mut() {
            if remaining <= tolerance * source.capacity {
                break;
            }
            let room = state.room();
            if room <= tolerance * state.capacity {
                continue;
            }
            let moved = remaining.min(room);
            state.receive(&blend, moved);
            steps.push(TransferStep {
                volume: moved,
                blend: blend.clone(),
                from: source.name.clone(),
                to: state.name.clone(),
            });
            remaining -= moved;
        }
    }

    let reports: Vec<TargetReport> = states
        .iter()
        .map(|state| TargetReport {
            name: state.name.clone(),
            final_volume: state.fill,
            homogeneous: matches_composition(state, composition, tolerance),
        })
        .collect();

    if fill_empty {
        split_into_empties(inventory, composition, &target_names, &mut states, &mut steps, tolerance);
    }

    TransferPlan {
        steps,
        composition: composition.clone(),
        targets: reports,
    }
}

/// Whether a target's pooled contents match the global composition within
/// the fractional tolerance. Reporting only, never alters the plan.
fn matches_composition(state: &TargetState, composition: &BlendComposition, tolerance: f64) -> bool {
    if state.fill <= 0.0 {
        return true;
    }
    composition.percentages.iter().all(|(blend, percent)| {
        let share = state.contents.get(blend).copied().unwrap_or(0.0) / state.fill;
        (share - percent / 100.0).abs() <= tolerance
    })
}

/// Split phase: fill the tanks that were empty at snapshot time from the
/// pooled targets, first target drained first so any unallocated remainder
/// stays in the last one.
fn split_into_empties(
    inventory: &[Tank],
    composition: &BlendComposition,
    target_names: &BTreeSet<&str>,
    states: &mut [TargetState],
    steps: &mut Vec<TransferStep>,
    tolerance: f64,
) {
    let mix = composition.mix_label();

    let mut destinations: Vec<&Tank> = inventory
        .iter()
        .filter(|t| !t.holds_wine() && !target_names.contains(t.name.as_str()))
        .collect();
    destinations.sort_by(|a, b| a.name.cmp(&b.name));

    let mut pool_index = 0;
    for destination in destinations {
        let mut need = destination.headroom();
        while need > tolerance * destination.capacity && pool_index < states.len() {
            let state = &mut states[pool_index];
            if state.fill <= tolerance * state.capacity {
                pool_index += 1;
                continue;
            }
            let moved = need.min(state.fill);
            state.fill -= moved;
            steps.push(TransferStep {
                volume: moved,
                blend: mix.clone(),
                from: state.name.clone(),
                to: destination.name.clone(),
            });
            need -= moved;
        }
        if pool_index >= states.len() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::composition::compose;
    use crate::core::selector::select_targets;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-4;

    fn tank(name: &str, blend: Option<&str>, volume: f64, capacity: f64) -> Tank {
        Tank {
            name: name.into(),
            blend: blend.map(Into::into),
            is_empty: volume == 0.0,
            current_volume: volume,
            capacity,
        }
    }

    fn plan(inventory: &[Tank], fill_empty: bool) -> TransferPlan {
        let composition = compose(inventory);
        let targets = select_targets(inventory, &composition, EPS).unwrap();
        generate_plan(inventory, &composition, &targets, EPS, fill_empty)
    }

    #[test]
    fn consolidates_into_single_largest_tank() {
        let inventory = vec![
            tank("a", Some("cab"), 100.0, 150.0),
            tank("b", Some("cab"), 50.0, 200.0),
            tank("c", None, 0.0, 300.0),
        ];
        let result = plan(&inventory, false);

        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[0].from, "a");
        assert_eq!(result.steps[0].to, "c");
        assert_relative_eq!(result.steps[0].volume, 100.0);
        assert_eq!(result.steps[1].from, "b");
        assert_relative_eq!(result.steps[1].volume, 50.0);
        assert_relative_eq!(result.composition.percentages["cab"], 100.0);
    }

    #[test]
    fn overflow_spills_to_next_target() {
        let inventory = vec![
            tank("big1", None, 0.0, 100.0),
            tank("big2", None, 0.0, 100.0),
            tank("s1", Some("cab"), 90.0, 90.0),
            tank("s2", Some("merlot"), 85.0, 90.0),
        ];
        // Total 175 gal needs both 100 gal tanks; s2 splits across them.
        let result = plan(&inventory, false);

        assert_eq!(result.steps.len(), 3);
        assert_eq!((result.steps[0].from.as_str(), result.steps[0].to.as_str()), ("s1", "big1"));
        assert_relative_eq!(result.steps[0].volume, 90.0);
        assert_eq!((result.steps[1].from.as_str(), result.steps[1].to.as_str()), ("s2", "big1"));
        assert_relative_eq!(result.steps[1].volume, 10.0);
        assert_eq!((result.steps[2].from.as_str(), result.steps[2].to.as_str()), ("s2", "big2"));
        assert_relative_eq!(result.steps[2].volume, 75.0);
    }

    #[test]
    fn target_already_holding_wine_is_left_untouched() {
        let inventory = vec![
            tank("big", Some("cab"), 100.0, 500.0),
            tank("small", Some("cab"), 50.0, 100.0),
        ];
        let result = plan(&inventory, false);

        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.steps[0].from, "small");
        assert_eq!(result.steps[0].to, "big");
        assert!(result.steps.iter().all(|s| s.from != s.to));
    }

    #[test]
    fn single_target_reports_homogeneous_mix() {
        let inventory = vec![
            tank("a", Some("cab"), 300.0, 300.0),
            tank("b", Some("merlot"), 100.0, 100.0),
            tank("c", None, 0.0, 500.0),
        ];
        let result = plan(&inventory, false);

        assert_eq!(result.targets.len(), 1);
        let report = &result.targets[0];
        assert_eq!(report.name, "c");
        assert_relative_eq!(report.final_volume, 400.0);
        assert!(report.homogeneous);
    }

    #[test]
    fn split_phase_fills_snapshot_empty_tanks() {
        let inventory = vec![
            tank("a", Some("cab"), 150.0, 150.0),
            tank("b", Some("merlot"), 50.0, 50.0),
            tank("big", None, 0.0, 400.0),
            tank("spare", None, 0.0, 80.0),
        ];
        let result = plan(&inventory, true);

        // Consolidation first: a and b drain into big.
        assert_eq!(result.steps[0].to, "big");
        assert_eq!(result.steps[1].to, "big");
        // Then the spare tank is filled from the pool with the mix.
        let split: Vec<&TransferStep> =
            result.steps.iter().filter(|s| s.to == "spare").collect();
        assert_eq!(split.len(), 1);
        assert_eq!(split[0].from, "big");
        assert_eq!(split[0].blend, "cab/merlot");
        assert_relative_eq!(split[0].volume, 80.0);
    }

    #[test]
    fn no_zero_volume_steps() {
        let inventory = vec![
            tank("a", Some("cab"), 100.0, 100.0),
            tank("dust", Some("cab"), 1e-7, 100.0),
            tank("c", None, 0.0, 300.0),
        ];
        let result = plan(&inventory, false);
        assert!(result.steps.iter().all(|s| s.volume > 0.0));
        assert!(result.steps.iter().all(|s| s.from != "dust"));
    }

    #[test]
    fn rerun_is_deterministic() {
        let inventory = vec![
            tank("delta", Some("cab"), 120.0, 160.0),
            tank("alpha", Some("merlot"), 70.0, 90.0),
            tank("omega", None, 0.0, 400.0),
        ];
        let first = plan(&inventory, true);
        let second = plan(&inventory, true);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_inventory_yields_empty_plan() {
        let inventory = vec![tank("a", None, 0.0, 100.0)];
        let result = plan(&inventory, false);
        assert!(result.is_empty());
        assert!(result.composition.percentages.is_empty());
    }

    #[test]
    fn execution_respects_capacities() {
        let inventory = vec![
            tank("a", Some("cab"), 180.0, 200.0),
            tank("b", Some("merlot"), 90.0, 100.0),
            tank("c", Some("syrah"), 40.0, 50.0),
            tank("d", Some("cab"), 25.0, 30.0),
            tank("e", None, 0.0, 150.0),
        ];
        let result = plan(&inventory, false);
        assert!(!result.steps.is_empty());

        let mut levels: BTreeMap<&str, (f64, f64)> = inventory
            .iter()
            .map(|t| (t.name.as_str(), (t.current_volume, t.capacity)))
            .collect();
        for step in &result.steps {
            let from = levels.get_mut(step.from.as_str()).unwrap();
            from.0 -= step.volume;
            assert!(from.0 >= -1e-9, "tank {} went negative", step.from);
            let to = levels.get_mut(step.to.as_str()).unwrap();
            to.0 += step.volume;
            assert!(to.0 <= to.1 + 1e-9, "tank {} overfilled", step.to);
        }
    }
}
