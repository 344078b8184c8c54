use battleship_targeting::{
    config::{DEFAULT_FLEET, DEFAULT_GRID_SIZE, DEFAULT_SAMPLES},
    fit_fleet, init_logging, play_match, selfplay, Combatant, EngineConfig, HeuristicKind,
    MatchStats, Side,
};
use clap::{Args, Parser, Subcommand};
use rand::Rng;
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about = "Battleship targeting engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct GameArgs {
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, help = "Side of the square grid (>= 2)")]
    size: usize,
    #[arg(long, value_delimiter = ',', help = "Ship lengths, e.g. 5,4,3,3,2,2")]
    fleet: Option<Vec<usize>>,
    #[arg(long, default_value_t = DEFAULT_SAMPLES, help = "Monte Carlo sample budget")]
    samples: usize,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
}

impl GameArgs {
    fn config(&self, heuristic: &str) -> EngineConfig {
        let fleet = self.fleet.clone().unwrap_or_else(|| DEFAULT_FLEET.to_vec());
        EngineConfig {
            heuristic: HeuristicKind::from_name(heuristic),
            samples: self.samples,
            grid_size: self.size,
            // Ships longer than the grid are dropped rather than rejected.
            fleet: fit_fleet(&fleet, self.size),
        }
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play one automated match and print the result.
    Play {
        #[arg(long, default_value = "smart")]
        first: String,
        #[arg(long, default_value = "uniform")]
        second: String,
        #[command(flatten)]
        game: GameArgs,
    },
    /// Self-play each heuristic and report winner move statistics as JSON.
    Bench {
        #[arg(long, default_value_t = 100)]
        trials: usize,
        #[arg(long, value_delimiter = ',', default_value = "uniform,markov,montecarlo,smart")]
        heuristics: Vec<String>,
        #[command(flatten)]
        game: GameArgs,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            first,
            second,
            game,
        } => {
            let seed = game.seed();
            log::info!("playing {} vs {} (seed {})", first, second, seed);
            let c1 = game.config(&first);
            let c2 = game.config(&second);
            let mut a = Combatant::automated(&c1, seed)?;
            let mut b = Combatant::automated(&c2, seed.wrapping_add(2))?;
            let result = play_match(&mut a, &mut b)?;
            let (winner, loser_board) = match result.winner {
                Side::First => (c1.heuristic.name(), b.board()),
                Side::Second => (c2.heuristic.name(), a.board()),
            };
            log::debug!("losing board after the final shot:\n{}", loser_board.fired());
            let report = json!({
                "seed": seed,
                "first": c1.heuristic.name(),
                "second": c2.heuristic.name(),
                "winner": winner,
                "winner_moves": result.winner_moves,
                "total_moves": result.total_moves,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Bench {
            trials,
            heuristics,
            game,
        } => {
            let seed = game.seed();
            let mut rows = Vec::new();
            for name in &heuristics {
                let config = game.config(name);
                let stats: Option<MatchStats> =
                    selfplay::self_play_stats(&config, trials, Some(seed))?;
                if let Some(s) = &stats {
                    log::info!(
                        "{}: mean {:.2} moves (sd {:.2}, stderr {:.3})",
                        config.heuristic.name(),
                        s.mean,
                        s.std_dev,
                        s.std_error
                    );
                }
                rows.push(json!({ "heuristic": config.heuristic.name(), "stats": stats }));
            }
            let report = json!({
                "seed": seed,
                "trials": trials,
                "grid_size": game.size,
                "results": rows,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
