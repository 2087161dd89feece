use crate::grid::BitGrid;
use crate::protocol::Move;
use std::collections::VecDeque;

/// Neighbour offsets in search order, each with the move that leads
/// from that neighbour back onto the centre cell.
const NEIGHBORS: [(i32, i32, Move); 4] = [
    (-1, 0, Move::East),
    (1, 0, Move::West),
    (0, -1, Move::South),
    (0, 1, Move::North),
];

/// Breadth-first step distances from a single origin.
///
/// Known walls and the grid border block movement; cells of unknown
/// status are assumed walkable.
#[derive(Clone, Debug)]
pub struct DistanceField {
    width: i32,
    height: i32,
    origin: (i32, i32),
    distances: Vec<Option<u32>>,
}

impl DistanceField {
    pub fn from_origin(walls: &BitGrid, origin: (i32, i32)) -> Self {
        let (width, height) = (walls.width(), walls.height());
        let mut field = DistanceField {
            width,
            height,
            origin,
            distances: vec![None; (width * height).max(0) as usize],
        };
        if !walls.in_bounds(origin.0, origin.1) {
            return field;
        }

        let mut queue = VecDeque::new();
        field.distances[walls.index(origin.0, origin.1)] = Some(0);
        queue.push_back(origin);

        while let Some((x, y)) = queue.pop_front() {
            let current = field.distances[walls.index(x, y)].unwrap_or(0);
            for &(dx, dy, _) in &NEIGHBORS {
                let (nx, ny) = (x + dx, y + dy);
                if !walls.in_bounds(nx, ny) || walls.get(nx, ny) {
                    continue;
                }
                let slot = &mut field.distances[walls.index(nx, ny)];
                if slot.is_none() {
                    *slot = Some(current + 1);
                    queue.push_back((nx, ny));
                }
            }
        }

        field
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Steps from the origin, `None` if unreachable or out of bounds
    pub fn distance(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        self.distances[(x + y * self.width) as usize]
    }

    /// Reachable cells with their distance, row-major order
    pub fn reachable(&self) -> impl Iterator<Item = ((i32, i32), u32)> + '_ {
        let width = self.width;
        self.distances
            .iter()
            .enumerate()
            .filter_map(move |(i, d)| d.map(|d| ((i as i32 % width, i as i32 / width), d)))
    }

    /// First move of a shortest path from the origin to `target`.
    ///
    /// Walks back from the target, always onto the first neighbour with the
    /// smallest distance, until reaching a cell next to the origin.
    pub fn first_move(&self, target: (i32, i32)) -> Option<Move> {
        let (mut x, mut y) = target;
        let mut current = self.distance(x, y)?;
        if current == 0 {
            return None;
        }

        loop {
            let (dx, dy, mv) = NEIGHBORS
                .iter()
                .copied()
                .filter(|&(dx, dy, _)| self.distance(x + dx, y + dy).is_some())
                .min_by_key(|&(dx, dy, _)| self.distance(x + dx, y + dy))?;

            if current == 1 {
                return Some(mv);
            }
            x += dx;
            y += dy;
            current = self.distance(x, y)?;
        }
    }
}
