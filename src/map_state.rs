use crate::grid::BitGrid;
use crate::protocol::TurnData;
use std::collections::{HashMap, HashSet};

/// Everything the bot has learned about the map during a match.
///
/// `walls` and `discovered` only ever grow. `discovered` is the floor knowledge
/// handed to the visibility engine; `last_checked` additionally records when
/// each cell was last known to hold no gem.
#[derive(Clone, Debug)]
pub struct MapState {
    pub width: i32,
    pub height: i32,
    walls: BitGrid,
    discovered: BitGrid,
    last_checked: Vec<Option<u32>>,
    /// Gem position -> last tick it is alive
    gems: HashMap<(i32, i32), u32>,
}

impl MapState {
    pub fn new(width: i32, height: i32) -> Self {
        MapState {
            width,
            height,
            walls: BitGrid::new(width, height),
            discovered: BitGrid::new(width, height),
            last_checked: vec![None; (width * height).max(0) as usize],
            gems: HashMap::new(),
        }
    }

    /// Merge one turn of observations
    pub fn absorb(&mut self, turn: &TurnData) {
        for &(x, y) in &turn.wall {
            if self.walls.in_bounds(x, y) {
                self.walls.set(x, y);
            }
        }
        for &(x, y) in &turn.floor {
            if self.discovered.in_bounds(x, y) {
                self.discovered.set(x, y);
                self.check(x, y, turn.tick);
            }
        }

        for gem in &turn.visible_gems {
            let expiry = turn.tick.saturating_add(gem.ttl);
            self.gems.insert(gem.position, expiry);
        }

        // A remembered gem on a floor seen this turn without it was picked up
        let seen_floor: HashSet<(i32, i32)> = turn.floor.iter().copied().collect();
        let seen_gems: HashSet<(i32, i32)> = turn.visible_gems.iter().map(|gem| gem.position).collect();
        let tick = turn.tick;
        let bot = turn.bot;
        self.gems.retain(|pos, &mut expiry| {
            expiry >= tick && *pos != bot && (seen_gems.contains(pos) || !seen_floor.contains(pos))
        });
    }

    /// Record that the given non-wall cells were observed at `tick`
    pub fn mark_checked(&mut self, visible: &BitGrid, tick: u32) {
        for (x, y) in visible {
            if !self.walls.get(x, y) {
                self.check(x, y, tick);
            }
        }
    }

    pub fn check(&mut self, x: i32, y: i32, tick: u32) {
        let i = self.walls.index(x, y);
        self.last_checked[i] = Some(tick);
    }

    pub fn last_checked(&self, x: i32, y: i32) -> Option<u32> {
        self.last_checked[self.walls.index(x, y)]
    }

    /// A gem could have appeared here without us noticing
    pub fn is_stale(&self, x: i32, y: i32, tick: u32, gem_ttl: u32) -> bool {
        if self.walls.get(x, y) {
            return false;
        }
        match self.last_checked(x, y) {
            None => true,
            Some(seen) => tick.saturating_sub(seen) > gem_ttl,
        }
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.walls.get(x, y)
    }

    pub fn is_discovered(&self, x: i32, y: i32) -> bool {
        self.discovered.get(x, y)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.walls.in_bounds(x, y)
    }

    pub fn walls(&self) -> &BitGrid {
        &self.walls
    }

    pub fn discovered(&self) -> &BitGrid {
        &self.discovered
    }

    /// Known gems with their expiry tick
    pub fn gems(&self) -> &HashMap<(i32, i32), u32> {
        &self.gems
    }
}
