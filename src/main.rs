//! Flappy Sim entry point
//!
//! Headless runner: plays rounds with the autopilot and reports the results.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::ops::ControlFlow;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use flappy_sim::sim::{GamePhase, SoundCue};
    use flappy_sim::{GameState, Runner, SimConfig};

    #[derive(Parser, Debug)]
    #[command(name = "flappy-sim", about = "Headless flappy simulation", version)]
    pub struct Args {
        /// JSON config file; missing fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many ticks
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,

        /// Sleep between ticks to run at the configured tick rate
        #[arg(long)]
        realtime: bool,

        /// Rounds to play before exiting
        #[arg(long, default_value_t = 1)]
        rounds: u32,

        /// Print run metrics as JSON
        #[arg(long)]
        json: bool,
    }

    #[derive(Debug, Default, Serialize)]
    struct RoundResult {
        round: u32,
        score: u32,
        ticks: u64,
        hit_pipe: bool,
    }

    #[derive(Debug, Default, Serialize)]
    struct RunMetrics {
        seed: u64,
        ticks: u64,
        best_score: u32,
        flaps: u32,
        rounds: Vec<RoundResult>,
    }

    fn load_config(args: &Args) -> Result<SimConfig> {
        let mut config = match &args.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                SimConfig::from_json(&text)
                    .with_context(|| format!("loading config {}", path.display()))?
            }
            None => SimConfig::default(),
        };
        if let Some(seed) = args.seed {
            config.seed = seed;
        }
        config.validate().context("invalid config")?;
        Ok(config)
    }

    pub fn run(args: Args) -> Result<()> {
        let config = load_config(&args)?;
        let seed = config.seed;
        let state = GameState::new(config).context("setting up the world")?;
        let mut runner = Runner::new(state)
            .with_idle_mode(true)
            .with_realtime(args.realtime)
            .with_max_ticks(Some(args.max_ticks));

        let mut metrics = RunMetrics {
            seed,
            ..Default::default()
        };
        let restart = runner.sender();
        let mut round_start = 0u64;
        let mut hit_pipe = false;

        let ticks = runner.run(|state, report| {
            for cue in &report.cues {
                match cue {
                    SoundCue::Launch => metrics.flaps += 1,
                    SoundCue::Death => hit_pipe = true,
                    SoundCue::Pass | SoundCue::Hit => {}
                }
            }
            if report.phase == GamePhase::Playing && state.round as usize > metrics.rounds.len() {
                round_start = report.tick;
                hit_pipe = false;
                metrics.rounds.push(RoundResult {
                    round: state.round,
                    ..Default::default()
                });
            }
            if report.phase != GamePhase::Over {
                return ControlFlow::Continue(());
            }
            // Over is seen once per round: either we stop or the queued tap
            // resets the game on the next tick
            if let Some(result) = metrics.rounds.last_mut() {
                result.score = report.score;
                result.ticks = report.tick - round_start;
                result.hit_pipe = hit_pipe;
                log::info!("round {} over: score {}", result.round, result.score);
            }
            if state.round >= args.rounds {
                ControlFlow::Break(())
            } else {
                restart.tap();
                ControlFlow::Continue(())
            }
        });

        metrics.ticks = ticks;
        let state = runner.into_state();
        metrics.best_score = state.best_score.max(state.score);

        if args.json {
            let text = serde_json::to_string_pretty(&metrics).context("encoding metrics")?;
            println!("{text}");
        } else {
            println!("seed {} | {} ticks | best score {}", seed, ticks, metrics.best_score);
            for r in &metrics.rounds {
                let cause = if r.hit_pipe { "pipe" } else { "ground" };
                println!(
                    "  round {}: score {} in {} ticks ({})",
                    r.round, r.score, r.ticks, cause
                );
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Flappy Sim (headless) starting...");
    headless::run(headless::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; hosts drive `flappy_sim::tick` directly
}
