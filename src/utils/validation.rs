use crate::domain::model::Tank;
use crate::utils::error::{BlendError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Boundary checks for a single tank record. Malformed data is rejected
/// here, never inside the planning algorithm.
impl Validate for Tank {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid(self, "tank name cannot be empty"));
        }
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(invalid(
                self,
                &format!("capacity must be a positive number, got {}", self.capacity),
            ));
        }
        if !self.current_volume.is_finite() || self.current_volume < 0.0 {
            return Err(invalid(
                self,
                &format!(
                    "current_volume must be non-negative, got {}",
                    self.current_volume
                ),
            ));
        }
        if self.current_volume > self.capacity {
            return Err(invalid(
                self,
                &format!(
                    "current_volume {} exceeds capacity {}",
                    self.current_volume, self.capacity
                ),
            ));
        }
        if self.holds_wine() && self.blend_key().is_empty() {
            return Err(invalid(self, "a tank holding wine must name its blend"));
        }
        if self.is_empty && self.current_volume > 0.0 {
            return Err(invalid(
                self,
                &format!(
                    "tank is flagged empty but reports {} gal",
                    self.current_volume
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(tank: &Tank, reason: &str) -> BlendError {
    BlendError::InvalidTankData {
        tank: tank.name.clone(),
        reason: reason.to_string(),
    }
}

pub fn validate_inventory(inventory: &[Tank]) -> Result<()> {
    for tank in inventory {
        tank.validate()?;
    }
    Ok(())
}

pub fn validate_tolerance(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value >= 0.1 {
        return Err(BlendError::Config {
            message: format!("tolerance must be in (0, 0.1), got {}", value),
        });
    }
    Ok(())
}

pub fn validate_bind_address(value: &str) -> Result<std::net::SocketAddr> {
    value.parse().map_err(|_| BlendError::Config {
        message: format!("'{}' is not a valid socket address", value),
    })
}
