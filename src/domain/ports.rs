use crate::domain::model::{SavedPlan, Tank, TankPatch};
use crate::utils::error::Result;

/// Owns the process-wide tank state. The engine only ever sees the
/// snapshot returned by [`InventoryStore::snapshot`].
pub trait InventoryStore: Send + Sync {
    /// Immutable copy of the full inventory, ordered by normalized name.
    fn snapshot(&self) -> Vec<Tank>;

    fn get(&self, name: &str) -> Option<Tank>;

    /// Fails with `TankExists` when a tank of the same normalized name is
    /// already stored.
    fn insert(&self, tank: Tank) -> Result<Tank>;

    fn update(&self, name: &str, patch: TankPatch) -> Result<Tank>;

    fn remove(&self, name: &str) -> Result<()>;

    /// Insert-or-replace, used by CSV import.
    fn upsert(&self, tank: Tank) -> Result<Tank>;
}

/// Persists named plan summaries. The engine neither reads nor writes these.
pub trait PlanHistory: Send + Sync {
    fn save(&self, plan: SavedPlan) -> Result<()>;

    fn load(&self, name: &str) -> Result<SavedPlan>;

    fn list(&self) -> Vec<String>;

    fn remove(&self, name: &str) -> Result<()>;
}
