use crate::config::Config;
use crate::error::Result;
use crate::map_state::MapState;
use crate::pathfinding::DistanceField;
use crate::protocol::{MatchConfig, Move, TurnData};
use crate::signal::mark_signal_area;
use crate::turn_log::Reason;
use crate::visibility::VisibilityEngine;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Move chosen for one turn
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub mv: Move,
    pub target: Option<(i32, i32)>,
    pub reason: Reason,
    /// Cells visible from the bot this turn
    pub visible_cells: usize,
}

/// Per-match decision maker: accumulates map knowledge and picks moves
pub struct Brain {
    config: MatchConfig,
    map: MapState,
    engine: VisibilityEngine,
    rng: Pcg32,
    explore: bool,
}

impl Brain {
    pub fn new(config: MatchConfig, settings: &Config) -> Self {
        let seed = settings.bot.seed.unwrap_or(config.bot_seed);
        Brain {
            map: MapState::new(config.width, config.height),
            engine: VisibilityEngine::with_epsilon(config.width, config.height, settings.vision.epsilon),
            rng: Pcg32::seed_from_u64(seed),
            explore: settings.bot.explore,
            config,
        }
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn engine(&self) -> &VisibilityEngine {
        &self.engine
    }

    pub fn decide(&mut self, turn: &TurnData) -> Result<Decision> {
        let tick = turn.tick;
        let bot = turn.bot;
        let radius = self.config.vis_radius;

        self.map.absorb(turn);
        let visible = self
            .engine
            .visible_from(bot.0, bot.1, radius, self.map.walls(), self.map.discovered())?;
        self.map.mark_checked(&visible, tick);
        if turn.signal_level > 0.0 {
            mark_signal_area(&mut self.map, bot, self.config.signal_radius, turn.signal_level, tick);
        }
        let visible_cells = visible.count();

        let field = DistanceField::from_origin(self.map.walls(), bot);

        if let Some(target) = self.nearest_gem(&field, tick) {
            if let Some(mv) = field.first_move(target) {
                return Ok(self.decision(mv, Some(target), Reason::Gem, visible_cells));
            }
        }

        if self.explore {
            if let Some(target) = self.exploration_target(&field, tick)? {
                if let Some(mv) = field.first_move(target) {
                    return Ok(self.decision(mv, Some(target), Reason::Explore, visible_cells));
                }
            }
        }

        let mv = self.wander(bot);
        Ok(self.decision(mv, None, Reason::Wander, visible_cells))
    }

    fn decision(&self, mv: Move, target: Option<(i32, i32)>, reason: Reason, visible_cells: usize) -> Decision {
        debug!("decision: {} towards {:?} ({:?})", mv, target, reason);
        Decision {
            mv,
            target,
            reason,
            visible_cells,
        }
    }

    /// Closest known gem that can still be reached before it expires
    fn nearest_gem(&self, field: &DistanceField, tick: u32) -> Option<(i32, i32)> {
        self.map
            .gems()
            .iter()
            .filter_map(|(&pos, &expiry)| {
                let distance = field.distance(pos.0, pos.1)?;
                (distance > 0 && tick.saturating_add(distance) <= expiry).then_some((distance, pos))
            })
            .min()
            .map(|(_, pos)| pos)
    }

    /// Reachable cell with the best ratio of stale cells in view to travel distance
    fn exploration_target(&mut self, field: &DistanceField, tick: u32) -> Result<Option<(i32, i32)>> {
        let radius = self.config.vis_radius;
        let gem_ttl = self.config.gem_ttl;

        let mut best_score = 0.0;
        let mut best: Vec<(i32, i32)> = Vec::new();

        for ((x, y), distance) in field.reachable() {
            if distance == 0 {
                continue;
            }
            let visible = self
                .engine
                .visible_from(x, y, radius, self.map.walls(), self.map.discovered())?;
            let stale = visible
                .iter()
                .filter(|&(vx, vy)| self.map.is_stale(vx, vy, tick, gem_ttl))
                .count();
            if stale == 0 {
                continue;
            }

            let score = stale as f64 / (distance as f64 + 1.0);
            if score > best_score + 1e-12 {
                best_score = score;
                best.clear();
                best.push((x, y));
            } else if (score - best_score).abs() <= 1e-12 {
                best.push((x, y));
            }
        }

        if best.is_empty() {
            return Ok(None);
        }
        let pick = best[self.rng.random_range(0..best.len())];
        debug!("exploration target {:?} score {:.3} ({} tied)", pick, best_score, best.len());
        Ok(Some(pick))
    }

    fn wander(&mut self, bot: (i32, i32)) -> Move {
        let open: Vec<Move> = Move::ALL
            .iter()
            .copied()
            .filter(|mv| {
                let (dx, dy) = mv.delta();
                let (x, y) = (bot.0 + dx, bot.1 + dy);
                self.map.in_bounds(x, y) && !self.map.is_wall(x, y)
            })
            .collect();

        let choices: &[Move] = if open.is_empty() { &Move::ALL } else { &open };
        choices[self.rng.random_range(0..choices.len())]
    }
}
