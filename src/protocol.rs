use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Match configuration sent by the game with every turn
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub stage_key: String,
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_vis_radius")]
    pub vis_radius: i32,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u32,
    #[serde(default = "default_max_gems")]
    pub max_gems: u32,
    #[serde(default = "default_gem_ttl")]
    pub gem_ttl: u32,
    #[serde(default)]
    pub emit_signals: bool,
    #[serde(default = "default_signal_radius")]
    pub signal_radius: f64,
    #[serde(default)]
    pub bot_seed: u64,
}

fn default_vis_radius() -> i32 { 7 }
fn default_max_ticks() -> u32 { 1000 }
fn default_max_gems() -> u32 { 1 }
fn default_gem_ttl() -> u32 { 300 }
fn default_signal_radius() -> f64 { 10.0 }

/// A gem currently in view
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VisibleGem {
    pub position: (i32, i32),
    pub ttl: u32,
}

/// One turn of input, one JSON object per line
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TurnData {
    pub config: MatchConfig,
    #[serde(default)]
    pub wall: Vec<(i32, i32)>,
    #[serde(default)]
    pub floor: Vec<(i32, i32)>,
    pub bot: (i32, i32),
    #[serde(default)]
    pub signal_level: f64,
    #[serde(default)]
    pub visible_gems: Vec<VisibleGem>,
    #[serde(default)]
    pub initiative: bool,
    #[serde(default)]
    pub tick: u32,
}

/// Bot move, written as a single letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::East, Move::West, Move::South, Move::North];

    /// Cell offset, y grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::North => (0, -1),
            Move::South => (0, 1),
            Move::East => (1, 0),
            Move::West => (-1, 0),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Move::North => 'N',
            Move::South => 'S',
            Move::East => 'E',
            Move::West => 'W',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Parse one input line
pub fn parse_turn(line: &str) -> Result<TurnData> {
    Ok(serde_json::from_str(line)?)
}
