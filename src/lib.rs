pub mod angle_set;
pub mod brain;
pub mod config;
pub mod corners;
pub mod error;
pub mod grid;
pub mod map_state;
pub mod pathfinding;
pub mod protocol;
pub mod signal;
pub mod snapshot;
pub mod turn_log;
pub mod visibility;

pub use angle_set::AngleSet;
pub use brain::{Brain, Decision};
pub use config::Config;
pub use corners::CornerAngleCache;
pub use error::{Result, ScoutError};
pub use grid::BitGrid;
pub use map_state::MapState;
pub use pathfinding::DistanceField;
pub use protocol::{Move, TurnData};
pub use visibility::VisibilityEngine;
