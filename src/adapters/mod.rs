pub mod csv_io;
pub mod memory;

pub use memory::{InMemoryHistory, InMemoryInventory};
