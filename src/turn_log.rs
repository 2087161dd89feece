use crate::protocol::Move;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Why the bot picked its move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    /// Heading for a visible gem
    Gem,
    /// Heading for the most promising unexplored area
    Explore,
    /// Nothing better to do
    Wander,
}

/// Events recorded by the bot loop
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TurnEvent {
    /// Move chosen for a tick
    Decision {
        tick: u32,
        bot: (i32, i32),
        mv: Move,
        target: Option<(i32, i32)>,
        reason: Reason,
        visible_cells: usize,
    },
    /// An input line could not be parsed
    BadInput { line_number: usize, error: String },
}

/// Logged event with timestamp and processing time
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedTurn {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    /// Time spent on this turn
    pub elapsed_us: u64,
    pub event: TurnEvent,
}

/// Per-match record of bot decisions
pub struct TurnLog {
    start_time: Instant,
    turns: Vec<LoggedTurn>,
}

impl Default for TurnLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnLog {
    pub fn new() -> Self {
        TurnLog {
            start_time: Instant::now(),
            turns: Vec::new(),
        }
    }

    /// Log an event with current timestamp
    pub fn log(&mut self, event: TurnEvent, elapsed_us: u64) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.turns.push(LoggedTurn {
            timestamp_ms,
            elapsed_us,
            event,
        });
    }

    pub fn turns(&self) -> &[LoggedTurn] {
        &self.turns
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(&self.turns)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut gem = 0;
        let mut explore = 0;
        let mut wander = 0;
        let mut bad_input = 0;
        let mut slowest_us = 0;

        for logged in &self.turns {
            slowest_us = slowest_us.max(logged.elapsed_us);
            match &logged.event {
                TurnEvent::Decision { reason, .. } => match reason {
                    Reason::Gem => gem += 1,
                    Reason::Explore => explore += 1,
                    Reason::Wander => wander += 1,
                },
                TurnEvent::BadInput { .. } => bad_input += 1,
            }
        }

        format!(
            "Turns: {} ({} gem, {} explore, {} wander, {} bad input)\n\
             Slowest turn: {}us",
            gem + explore + wander,
            gem,
            explore,
            wander,
            bad_input,
            slowest_us
        )
    }
}
