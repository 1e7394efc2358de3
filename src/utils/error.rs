use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlendError {
    #[error("Insufficient capacity: need {required} gal but only {available} gal of tank space exists (short {shortfall} gal)")]
    InsufficientCapacity {
        required: f64,
        available: f64,
        shortfall: f64,
    },

    #[error("Inventory holds no wine")]
    EmptyInventory,

    #[error("Invalid tank data for '{tank}': {reason}")]
    InvalidTankData { tank: String, reason: String },

    #[error("Tank '{0}' not found")]
    TankNotFound(String),

    #[error("Tank '{0}' already exists")]
    TankExists(String),

    #[error("Saved plan '{0}' not found")]
    PlanNotFound(String),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, BlendError>;
