use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use jass_bot::{Agent, HeuristicAgent, MctsAgent, MinimaxAgent, RandomAgent};
use jass_core::game::state::GameState;
use jass_core::model::deck::Deck;
use jass_core::model::player::{PlayerPosition, Team};
use jass_core::model::trump::{Trump, TrumpChoice};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AgentKind, ArenaConfig, ResolvedOutputs, SeatConfig};

/// Primary entry point for orchestrating agent tournaments.
pub struct TournamentRunner {
    config: ArenaConfig,
    outputs: ResolvedOutputs,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub team_wins: [usize; 2],
}

struct SeatState {
    name: String,
    agent: Box<dyn Agent>,
    metrics: DecisionMetrics,
}

#[derive(Debug, Default, Clone, Copy)]
struct DecisionMetrics {
    decisions: u64,
    elapsed: Duration,
}

impl DecisionMetrics {
    fn record(&mut self, elapsed: Duration) -> f64 {
        self.decisions += 1;
        self.elapsed += elapsed;
        elapsed.as_secs_f64() * 1_000.0
    }

    fn avg_ms_per_decision(&self) -> f64 {
        if self.decisions == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1_000.0 / self.decisions as f64
    }
}

struct GameOutcome {
    trump: Trump,
    pushed: bool,
    points: [u32; 2],
    winner: Team,
}

/// One JSONL row per seat per game.
#[derive(Debug, Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    deal_seed: u64,
    dealer: String,
    seat: String,
    agent: String,
    trump: String,
    pushed: bool,
    team: String,
    team_points: u32,
    won: bool,
    decisions: u64,
    speed_ms_turn: f64,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: ArenaConfig, outputs: ResolvedOutputs) -> Self {
        Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        }
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut seats = build_seats(&self.config.seats);
        let mut rows_written = 0usize;
        let mut team_wins = [0usize; 2];
        let mut team_points = [0u64; 2];

        for game_index in 0..self.config.games.count {
            let deal_seed = rng.next_u64();
            let dealer = PlayerPosition::from_index(game_index % 4)
                .expect("dealer index is always in range");

            let outcome = self.play_game(&mut seats, game_index, deal_seed, dealer)?;
            team_wins[outcome.winner.index()] += 1;
            for team in [Team::NorthSouth, Team::EastWest] {
                team_points[team.index()] += u64::from(outcome.points[team.index()]);
            }

            rows_written +=
                write_game_rows(&mut writer, &self.config, game_index, deal_seed, dealer, &seats, &outcome)?;
        }

        writer.flush()?;
        self.write_summary(&seats, team_wins, team_points)?;

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            team_wins,
        })
    }

    fn play_game(
        &self,
        seats: &mut [SeatState],
        game_index: usize,
        deal_seed: u64,
        dealer: PlayerPosition,
    ) -> Result<GameOutcome, RunnerError> {
        let mut state = GameState::deal(&Deck::shuffled_with_seed(deal_seed), dealer);
        let mut pushed = false;

        while state.trump().is_none() {
            let seat = state.current_player();
            let obs = state.observe(seat);
            let seat_state = &mut seats[seat.index()];

            let start = Instant::now();
            let choice = seat_state.agent.choose_trump(&obs);
            let elapsed_ms = seat_state.metrics.record(start.elapsed());

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "jass_arena::trump",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    game_index = game_index as u32,
                    seat = %seat,
                    agent = %seat_state.name,
                    choice = %choice,
                    elapsed_ms
                );
            }

            state.declare_trump(seat, choice).map_err(|err| {
                RunnerError::game(format!(
                    "agent '{}' made an illegal trump choice: {err}",
                    seat_state.name
                ))
            })?;
            if matches!(choice, TrumpChoice::Push) {
                pushed = true;
            }
        }

        while !state.is_done() {
            let seat = state.current_player();
            let obs = state.observe(seat);
            let seat_state = &mut seats[seat.index()];

            let start = Instant::now();
            let card = seat_state.agent.choose_card(&obs);
            let elapsed_ms = seat_state.metrics.record(start.elapsed());

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "jass_arena::play",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    game_index = game_index as u32,
                    seat = %seat,
                    agent = %seat_state.name,
                    card = %card,
                    elapsed_ms
                );
            }

            state.play_card(seat, card).map_err(|err| {
                RunnerError::game(format!(
                    "agent '{}' played an illegal card: {err}",
                    seat_state.name
                ))
            })?;
        }

        Ok(GameOutcome {
            trump: state.trump().expect("selection loop declared a trump"),
            pushed,
            points: state.point_totals(),
            winner: state.winner().expect("a finished deal has a winner"),
        })
    }

    fn write_summary(
        &self,
        seats: &[SeatState],
        team_wins: [usize; 2],
        team_points: [u64; 2],
    ) -> Result<(), RunnerError> {
        let mut out = String::new();
        out.push_str(&format!("# Arena run `{}`\n\n", self.config.run_id));
        out.push_str(&format!(
            "{} games. North/South won {} (total {} points), East/West won {} (total {} points).\n\n",
            self.config.games.count,
            team_wins[Team::NorthSouth.index()],
            team_points[Team::NorthSouth.index()],
            team_wins[Team::EastWest.index()],
            team_points[Team::EastWest.index()],
        ));
        out.push_str("| Seat | Agent | Decisions | Avg ms/decision |\n");
        out.push_str("|------|-------|-----------|------------------|\n");
        for (index, seat) in seats.iter().enumerate() {
            let position =
                PlayerPosition::from_index(index).expect("seat index is always in range");
            out.push_str(&format!(
                "| {position} | {} | {} | {:.2} |\n",
                seat.name,
                seat.metrics.decisions,
                seat.metrics.avg_ms_per_decision(),
            ));
        }
        fs::write(&self.outputs.summary_md, out)?;
        Ok(())
    }
}

fn build_seats(configs: &[SeatConfig]) -> Vec<SeatState> {
    configs
        .iter()
        .enumerate()
        .map(|(index, cfg)| {
            let seed = cfg.seed.unwrap_or(index as u64);
            let agent: Box<dyn Agent> = match cfg.kind {
                AgentKind::Random => Box::new(RandomAgent::new(seed)),
                AgentKind::Heuristic => Box::new(HeuristicAgent::new()),
                AgentKind::Minimax => Box::new(MinimaxAgent::with_depth(seed, cfg.depth())),
                AgentKind::Mcts => Box::new(MctsAgent::with_iterations(seed, cfg.iterations())),
            };
            SeatState {
                name: cfg.name.clone(),
                agent,
                metrics: DecisionMetrics::default(),
            }
        })
        .collect()
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_rows(
    writer: &mut BufWriter<File>,
    config: &ArenaConfig,
    game_index: usize,
    deal_seed: u64,
    dealer: PlayerPosition,
    seats: &[SeatState],
    outcome: &GameOutcome,
) -> Result<usize, RunnerError> {
    let game_id = format!("G{game_index:05}");

    let mut rows_written = 0usize;
    for (index, seat) in seats.iter().enumerate() {
        let position = PlayerPosition::from_index(index).expect("seat index is always in range");
        let team = position.team();
        let row = GameLogRow {
            run_id: config.run_id.clone(),
            game_id: game_id.clone(),
            game_index,
            deal_seed,
            dealer: dealer.to_string(),
            seat: position.to_string(),
            agent: seat.name.clone(),
            trump: outcome.trump.to_string(),
            pushed: outcome.pushed,
            team: team.to_string(),
            team_points: outcome.points[team.index()],
            won: outcome.winner == team,
            decisions: seat.metrics.decisions,
            speed_ms_turn: seat.metrics.avg_ms_per_decision(),
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

/// Errors surfaced while running a tournament.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("row serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("game aborted: {0}")]
    Game(String),
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game(message)
    }
}
