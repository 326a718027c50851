//! Prediction Master CLI
//!
//! Terminal front end over the game engine: shows the profile, plays rounds,
//! grants ad bonuses and runs the energy countdown.

use clap::{Parser, Subcommand, ValueEnum};
use prediction_master::{
    common::SystemClock,
    config::{generate_sample_config, AppConfig, ConfigLoader, StorageBackend},
    errors::AppResult,
    fairness::SeedCommitment,
    games::{catalog, GameKind, Prediction, RandomSource},
    session::PlaySession,
    storage::open_storage,
    user_store::{ProfileSnapshot, UserStore},
};
use std::{path::PathBuf, sync::Arc};

#[derive(Parser)]
#[command(name = "prediction-master")]
#[command(about = "Predict the card, the dice or the number")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Data directory for the player record
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Storage backend override
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Rocksdb,
    Memory,
}

#[derive(Clone, Copy, ValueEnum)]
enum AdReward {
    Coins,
    Energy,
}

#[derive(Subcommand)]
enum Commands {
    /// Show coins, energy, level and lifetime stats
    Status,

    /// List games and whether they are unlocked
    Games,

    /// Play one round
    Play {
        /// card, dice or number
        game: GameKind,

        /// red|black, low|middle|high, or 1-10
        prediction: String,

        /// Coins to wager
        #[arg(short, long)]
        bet: Option<u64>,
    },

    /// Claim an ad reward
    Ad {
        #[arg(value_enum)]
        reward: AdReward,
    },

    /// Poll energy regeneration and print the countdown
    Watch {
        #[arg(short, long, default_value = "10")]
        ticks: u32,
    },

    /// Print a fresh seed and its commitment
    Seed,

    /// Write a sample configuration file
    ConfigInit { path: PathBuf },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;

    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_directory = dir;
    }
    if let Some(backend) = cli.backend {
        config.storage.backend = match backend {
            BackendArg::Rocksdb => StorageBackend::Rocksdb,
            BackendArg::Memory => StorageBackend::Memory,
        };
    }

    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::ConfigInit { path } => {
            generate_sample_config(&path.to_string_lossy())?;
            println!("Wrote sample configuration to {}", path.display());
            Ok(())
        }
        Commands::Seed => {
            let sc = SeedCommitment::generate(&mut RandomSource::os())?;
            println!("seed:       {}", sc.seed);
            println!("commitment: {}", sc.commitment);
            Ok(())
        }
        Commands::Games => {
            let session = open_session(&config)?;
            print_games(session.store().user().level);
            Ok(())
        }
        Commands::Status => {
            let mut session = open_session(&config)?;
            session.store_mut().refresh_energy();
            print_profile(&session.store().profile());
            session.store().flush()
        }
        Commands::Play {
            game,
            prediction,
            bet,
        } => {
            let mut session = open_session(&config)?;
            let prediction = Prediction::parse(game, &prediction)?;
            let bet = bet.unwrap_or_else(|| prediction_master::games::game_config(game).min_bet);
            run_play(&mut session, prediction, bet).await?;
            session.store().flush()
        }
        Commands::Ad { reward } => {
            let mut session = open_session(&config)?;
            match reward {
                AdReward::Coins => session.store_mut().add_coins_from_ad(),
                AdReward::Energy => session.store_mut().add_energy_from_ad(),
            }
            print_profile(&session.store().profile());
            session.store().flush()
        }
        Commands::Watch { ticks } => {
            let mut session = open_session(&config)?;
            session
                .watch_energy(ticks, |profile| match &profile.next_energy_in {
                    Some(countdown) => println!(
                        "⚡ {}/{}  next in {}",
                        profile.energy, profile.max_energy, countdown
                    ),
                    None => println!("⚡ {}/{}  full", profile.energy, profile.max_energy),
                })
                .await;
            session.store().flush()
        }
    }
}

fn init_tracing(config: &AppConfig, verbose: bool) {
    let default_filter = if verbose {
        "prediction_master=debug".to_string()
    } else {
        format!("prediction_master={}", config.monitoring.log_level.as_filter())
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn open_session(config: &AppConfig) -> AppResult<PlaySession> {
    let storage = open_storage(&config.storage)?;
    let store = UserStore::initialize(
        storage,
        config.storage.record_key.clone(),
        Arc::new(SystemClock),
    );
    Ok(PlaySession::secure(store, config.session.clone()))
}

async fn run_play(session: &mut PlaySession, prediction: Prediction, bet: u64) -> AppResult<()> {
    println!("🎮 Betting {} coins on {}...", bet, prediction_label(&prediction));

    let outcome = session.play_round(prediction, bet).await?;
    let result = &outcome.result;

    if result.won {
        println!("🎉 You won {} coins!", result.win_amount);
    } else {
        println!("😔 No luck this time.");
    }
    println!("   prediction: {}", result.prediction_label());
    println!("   actual:     {}", result.actual_label());
    println!("   +{} XP", result.xp_gained);
    if outcome.applied.leveled_up() {
        println!(
            "⭐ Level {}! Bonus {} coins",
            outcome.applied.new_level, outcome.applied.level_up_bonus
        );
    }

    print_profile(&session.store().profile());
    Ok(())
}

fn prediction_label(prediction: &Prediction) -> String {
    match prediction {
        Prediction::Card(color) => color.to_string(),
        Prediction::Dice(range) => range.to_string(),
        Prediction::Number(value) => value.to_string(),
    }
}

fn print_profile(profile: &ProfileSnapshot) {
    println!("💰 {} coins", profile.coins);
    match &profile.next_energy_in {
        Some(countdown) => println!(
            "⚡ {}/{} (next in {})",
            profile.energy, profile.max_energy, countdown
        ),
        None => println!("⚡ {}/{}", profile.energy, profile.max_energy),
    }
    println!(
        "⭐ Level {}  {}/{} XP ({:.0}%)",
        profile.level, profile.progress.current, profile.progress.required, profile.progress.percentage
    );
    println!(
        "📊 {} played, {} won, {} coins won in total",
        profile.games_played, profile.games_won, profile.total_winnings
    );
}

fn print_games(level: u32) {
    for game in catalog() {
        let lock = if game.is_unlocked_for(level) {
            "unlocked".to_string()
        } else {
            format!("unlocks at level {}", game.unlock_level)
        };
        println!(
            "{} {:<13} x{:<3} min bet {:<4} {}  ({})",
            game.icon, game.name, game.multiplier, game.min_bet, game.description, lock
        );
    }
}
