pub mod config;
pub mod engine;
pub mod player;
pub mod state;

pub use config::{RakeSetting, TableConfig};
pub use engine::{RebuyOptions, Table};
pub use player::{PlayerId, PlayerState, PlayerStatus};
pub use state::{TablePhase, TableState};
