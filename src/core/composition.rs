use crate::domain::model::{BlendComposition, Tank};
use std::collections::BTreeMap;

/// Derives the global blend composition from an inventory snapshot.
///
/// Only tanks actually holding wine contribute. A zero-volume inventory
/// yields an empty composition rather than a division error.
pub fn compose(inventory: &[Tank]) -> BlendComposition {
    let mut volumes: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_volume = 0.0;

    for tank in inventory.iter().filter(|t| t.holds_wine()) {
        *volumes.entry(tank.blend_key()).or_insert(0.0) += tank.current_volume;
        total_volume += tank.current_volume;
    }

    if total_volume <= 0.0 {
        return BlendComposition::default();
    }

    let percentages = volumes
        .iter()
        .map(|(blend, volume)| (blend.clone(), 100.0 * volume / total_volume))
        .collect();

    BlendComposition {
        volumes,
        percentages,
        total_volume,
    }
}
