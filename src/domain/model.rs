use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowercase canonical form used to key tanks and blends.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// One wine tank as reported by the cellar.
///
/// `blend` is meaningless when `is_empty` is set. Volumes are gallons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub name: String,
    #[serde(default)]
    pub blend: Option<String>,
    #[serde(default = "default_true")]
    pub is_empty: bool,
    #[serde(default)]
    pub current_volume: f64,
    #[serde(default)]
    pub capacity: f64,
}

fn default_true() -> bool {
    true
}

impl Tank {
    pub fn holds_wine(&self) -> bool {
        !self.is_empty && self.current_volume > 0.0
    }

    pub fn headroom(&self) -> f64 {
        (self.capacity - self.current_volume).max(0.0)
    }

    /// Blend key used when accumulating composition totals.
    pub fn blend_key(&self) -> String {
        self.blend
            .as_deref()
            .map(normalize_identifier)
            .unwrap_or_default()
    }
}

/// Partial tank update, absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TankPatch {
    pub blend: Option<String>,
    pub is_empty: Option<bool>,
    pub current_volume: Option<f64>,
    pub capacity: Option<f64>,
}

/// Volume per blend across all non-empty tanks, plus the derived
/// percentage-by-volume of total system volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlendComposition {
    pub volumes: BTreeMap<String, f64>,
    pub percentages: BTreeMap<String, f64>,
    pub total_volume: f64,
}

impl BlendComposition {
    pub fn is_empty(&self) -> bool {
        self.total_volume <= 0.0
    }

    /// The blend that will dominate the final homogeneous mix, ties broken
    /// by name. `None` only when the composition is empty.
    pub fn dominant_blend(&self) -> Option<&str> {
        self.percentages
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.as_str())
    }

    /// Label for the pooled mixture: blend names joined by `/`, highest
    /// percentage first, ties broken by name.
    pub fn mix_label(&self) -> String {
        let mut blends: Vec<(&String, &f64)> = self.percentages.iter().collect();
        blends.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
        blends
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// One planned movement of wine between two tanks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferStep {
    pub volume: f64,
    pub blend: String,
    pub from: String,
    pub to: String,
}

/// Post-consolidation state of one destination tank, reported alongside the
/// plan. `homogeneous` records whether the tank's final mix matches the
/// global composition within tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetReport {
    pub name: String,
    pub final_volume: f64,
    pub homogeneous: bool,
}

/// Ordered transfer sequence plus the composition computed at plan time.
/// Never mutated once returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferPlan {
    pub steps: Vec<TransferStep>,
    pub composition: BlendComposition,
    pub targets: Vec<TargetReport>,
}

impl TransferPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Wire shape handed to callers and persisted by the history store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub transfer_plan: Vec<TransferStep>,
    pub blend_percentages: BTreeMap<String, f64>,
}

/// A named, saved plan summary. Retrieval returns it unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPlan {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: PlanSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_identifier("  Cab Franc "), "cab franc");
    }

    #[test]
    fn dominant_blend_prefers_highest_percentage_then_name() {
        let mut composition = BlendComposition::default();
        composition.percentages.insert("merlot".into(), 50.0);
        composition.percentages.insert("cab".into(), 50.0);
        composition.total_volume = 200.0;
        assert_eq!(composition.dominant_blend(), Some("cab"));

        composition.percentages.insert("syrah".into(), 60.0);
        assert_eq!(composition.dominant_blend(), Some("syrah"));
    }

    #[test]
    fn mix_label_orders_by_descending_percentage() {
        let mut composition = BlendComposition::default();
        composition.percentages.insert("merlot".into(), 25.0);
        composition.percentages.insert("cab".into(), 75.0);
        composition.total_volume = 400.0;
        assert_eq!(composition.mix_label(), "cab/merlot");
    }

    #[test]
    fn empty_tank_does_not_hold_wine() {
        let tank = Tank {
            name: "a1".into(),
            blend: None,
            is_empty: true,
            current_volume: 0.0,
            capacity: 100.0,
        };
        assert!(!tank.holds_wine());
        assert_eq!(tank.headroom(), 100.0);
    }
}
