//! Gem-hunting bot
//!
//! Reads one JSON turn per line on stdin and answers each with a single
//! move letter on stdout. Diagnostics go to stderr (set RUST_LOG=debug).

use gemscout::turn_log::{Reason, TurnEvent, TurnLog};
use gemscout::{protocol, Brain, Config, Move};
use log::{debug, error, info, warn};
use std::io::{self, BufRead, Write};
use std::time::Instant;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = Config::load();
    let mut brain: Option<Brain> = None;
    let mut turn_log = TurnLog::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for (line_number, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let start = Instant::now();

        let turn = match protocol::parse_turn(&line) {
            Ok(turn) => turn,
            Err(e) => {
                warn!("line {}: {}", line_number + 1, e);
                turn_log.log(
                    TurnEvent::BadInput {
                        line_number: line_number + 1,
                        error: e.to_string(),
                    },
                    start.elapsed().as_micros() as u64,
                );
                writeln!(stdout, "{}", Move::North)?;
                stdout.flush()?;
                continue;
            }
        };

        let brain = brain.get_or_insert_with(|| {
            info!(
                "match {}: {}x{} radius {}",
                turn.config.stage_key, turn.config.width, turn.config.height, turn.config.vis_radius
            );
            Brain::new(turn.config.clone(), &config)
        });

        let (mv, event) = match brain.decide(&turn) {
            Ok(decision) => (
                decision.mv,
                TurnEvent::Decision {
                    tick: turn.tick,
                    bot: turn.bot,
                    mv: decision.mv,
                    target: decision.target,
                    reason: decision.reason,
                    visible_cells: decision.visible_cells,
                },
            ),
            Err(e) => {
                error!("tick {}: {}", turn.tick, e);
                (
                    Move::North,
                    TurnEvent::Decision {
                        tick: turn.tick,
                        bot: turn.bot,
                        mv: Move::North,
                        target: None,
                        reason: Reason::Wander,
                        visible_cells: 0,
                    },
                )
            }
        };

        writeln!(stdout, "{}", mv)?;
        stdout.flush()?;

        let elapsed = start.elapsed();
        debug!("tick {} took {}ms", turn.tick, elapsed.as_millis());
        turn_log.log(event, elapsed.as_micros() as u64);
    }

    info!("{}", turn_log.summary());
    if config.logging.enable_turn_log {
        if let Err(e) = turn_log.save_to_file(&config.logging.turn_log_path) {
            error!("Failed to save turn log: {}", e);
        }
    }

    Ok(())
}
