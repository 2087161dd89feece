use crate::error::Result;
use crate::grid::BitGrid;
use serde::{Deserialize, Serialize};
use std::fs;

/// Saved viewer state: map knowledge plus the viewpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub width: i32,
    pub height: i32,
    /// Wall cells as row-major indices
    pub walls: Vec<usize>,
    /// Discovered floor cells as row-major indices
    pub discovered: Vec<usize>,
    pub viewer: (i32, i32),
    pub radius: i32,
}

impl MapSnapshot {
    pub fn capture(walls: &BitGrid, discovered: &BitGrid, viewer: (i32, i32), radius: i32) -> Self {
        let indices = |grid: &BitGrid| -> Vec<usize> {
            grid.iter().map(|(x, y)| grid.index(x, y)).collect()
        };
        MapSnapshot {
            width: walls.width(),
            height: walls.height(),
            walls: indices(walls),
            discovered: indices(discovered),
            viewer,
            radius,
        }
    }

    /// Save to file
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Rebuild the wall and discovered grids; out-of-range indices are dropped
    pub fn restore(&self) -> (BitGrid, BitGrid) {
        let rebuild = |cells: &[usize]| {
            let mut grid = BitGrid::new(self.width, self.height);
            let total = (self.width * self.height).max(0) as usize;
            for &index in cells.iter().filter(|&&i| i < total) {
                let (x, y) = grid.coords(index);
                grid.set(x, y);
            }
            grid
        };
        (rebuild(&self.walls), rebuild(&self.discovered))
    }
}
