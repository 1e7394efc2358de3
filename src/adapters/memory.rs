use crate::domain::model::{normalize_identifier, SavedPlan, Tank, TankPatch};
use crate::domain::ports::{InventoryStore, PlanHistory};
use crate::utils::error::{BlendError, Result};
use crate::utils::validation::Validate;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Process-lifetime tank storage, keyed by normalized name. State is
/// ephemeral by design and resets on restart.
#[derive(Default)]
pub struct InMemoryInventory {
    tanks: RwLock<BTreeMap<String, Tank>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for InMemoryInventory {
    fn snapshot(&self) -> Vec<Tank> {
        self.tanks
            .read()
            .expect("inventory lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    fn get(&self, name: &str) -> Option<Tank> {
        self.tanks
            .read()
            .expect("inventory lock poisoned")
            .get(&normalize_identifier(name))
            .cloned()
    }

    fn insert(&self, mut tank: Tank) -> Result<Tank> {
        tank.blend = tank.blend.as_deref().map(normalize_identifier);
        tank.validate()?;
        let key = normalize_identifier(&tank.name);
        let mut tanks = self.tanks.write().expect("inventory lock poisoned");
        if tanks.contains_key(&key) {
            return Err(BlendError::TankExists(tank.name));
        }
        tanks.insert(key, tank.clone());
        Ok(tank)
    }

    fn update(&self, name: &str, patch: TankPatch) -> Result<Tank> {
        let key = normalize_identifier(name);
        let mut tanks = self.tanks.write().expect("inventory lock poisoned");
        let current = tanks
            .get(&key)
            .ok_or_else(|| BlendError::TankNotFound(name.to_string()))?;

        let mut updated = current.clone();
        if let Some(blend) = patch.blend {
            updated.blend = Some(normalize_identifier(&blend));
        }
        if let Some(is_empty) = patch.is_empty {
            updated.is_empty = is_empty;
        }
        if let Some(current_volume) = patch.current_volume {
            updated.current_volume = current_volume;
        }
        if let Some(capacity) = patch.capacity {
            updated.capacity = capacity;
        }
        updated.validate()?;
        tanks.insert(key, updated.clone());
        Ok(updated)
    }

    fn remove(&self, name: &str) -> Result<()> {
        let key = normalize_identifier(name);
        let mut tanks = self.tanks.write().expect("inventory lock poisoned");
        tanks
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| BlendError::TankNotFound(name.to_string()))
    }

    fn upsert(&self, mut tank: Tank) -> Result<Tank> {
        tank.blend = tank.blend.as_deref().map(normalize_identifier);
        tank.validate()?;
        let key = normalize_identifier(&tank.name);
        self.tanks
            .write()
            .expect("inventory lock poisoned")
            .insert(key, tank.clone());
        Ok(tank)
    }
}

/// In-memory history of named plan summaries.
#[derive(Default)]
pub struct InMemoryHistory {
    plans: RwLock<BTreeMap<String, SavedPlan>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanHistory for InMemoryHistory {
    fn save(&self, plan: SavedPlan) -> Result<()> {
        let key = normalize_identifier(&plan.name);
        self.plans
            .write()
            .expect("history lock poisoned")
            .insert(key, plan);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<SavedPlan> {
        self.plans
            .read()
            .expect("history lock poisoned")
            .get(&normalize_identifier(name))
            .cloned()
            .ok_or_else(|| BlendError::PlanNotFound(name.to_string()))
    }

    fn list(&self) -> Vec<String> {
        self.plans
            .read()
            .expect("history lock poisoned")
            .values()
            .map(|p| p.name.clone())
            .collect()
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.plans
            .write()
            .expect("history lock poisoned")
            .remove(&normalize_identifier(name))
            .map(|_| ())
            .ok_or_else(|| BlendError::PlanNotFound(name.to_string()))
    }
}
