//! Cube Snakes headless driver
//!
//! Runs one autopilot round with a fixed-timestep accumulator, logging the
//! leaderboard as it goes, then prints the final frame as JSON.
//!
//! Usage: `cube-snakes [SEED] [TUNING_JSON]`

use std::error::Error;

use cube_snakes::consts::*;
use cube_snakes::leaderboard::BOARD_SIZE;
use cube_snakes::sim::{GameEvent, GameState, TickInput, tick};
use cube_snakes::tuning::Tuning;

/// Simulated display refresh (deliberately not the sim rate)
const FRAME_DT: f32 = 1.0 / 50.0;
/// Longest round the driver will play, in simulated seconds
const MAX_ROUND_SECS: f32 = 180.0;
/// Seconds between leaderboard log lines
const REPORT_EVERY_SECS: f32 = 5.0;

/// Frame-paced wrapper around the simulation
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    elapsed: f32,
}

impl Game {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput {
                autopilot: true,
                ..Default::default()
            },
            elapsed: 0.0,
        }
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;
        self.elapsed += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &self.state.events {
                match event {
                    GameEvent::AiShattered { ai_id, cubes } => {
                        log::info!("AI {} destroyed ({} cubes released)", ai_id, cubes);
                    }
                    GameEvent::CubeAbsorbed {
                        value,
                        grew_head: true,
                        ..
                    } => {
                        log::debug!("Head doubled on a {} cube", value);
                    }
                    _ => {}
                }
            }

            if self.state.is_game_over() {
                break;
            }
        }
    }

    fn report(&self) {
        let board = self.state.leaderboard();
        let line: Vec<String> = board
            .top(BOARD_SIZE)
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {} {}", i + 1, s.name, s.score))
            .collect();
        log::info!(
            "t={:.0}s cubes={} | {}",
            self.elapsed,
            self.state.cubes.len(),
            line.join("  ")
        );
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 2048,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    log::info!("Cube Snakes (headless) starting with seed {}", seed);
    let mut game = Game::new(GameState::with_tuning(seed, tuning)?);

    let mut next_report = REPORT_EVERY_SECS;
    while game.elapsed < MAX_ROUND_SECS && !game.state.is_game_over() {
        game.update(FRAME_DT);
        if game.elapsed >= next_report {
            game.report();
            next_report += REPORT_EVERY_SECS;
        }
    }
    game.report();

    let board = game.state.leaderboard();
    log::info!(
        "Round finished: score {}, rank {:?} of {}",
        game.state.player.score(),
        board.player_rank(),
        board.entries.len()
    );

    println!("{}", serde_json::to_string_pretty(&game.state.snapshot())?);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
