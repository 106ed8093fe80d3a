use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use preps_football::calculate::win_percentage;
use preps_football::config::AppConfig;
use preps_football::models::{
    Conference, ConferenceId, Game, Player, PlayerGame, PlayerSeason, Position, School, SchoolId,
    Season, SeasonId, Sport, TeamGame, TeamSeason,
};
use preps_football::storage::{EntityKind, Record, Repository};

#[derive(Parser)]
#[command(name = "preps-football")]
#[command(about = "Scholastic football statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./preps.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive and store one record read from a JSON file
    Commit {
        /// Record kind, e.g. game, team-season, player-game
        kind: EntityKind,

        /// JSON file holding the record
        path: PathBuf,
    },

    /// Print a team's schedule for a season, ordered by week
    Schedule {
        #[arg(long)]
        team: u64,

        #[arg(long)]
        season: u64,
    },

    /// Print the standings table for a season
    Standings {
        #[arg(long)]
        season: u64,

        /// Limit to one conference
        #[arg(long)]
        conference: Option<u64>,
    },

    /// Tally a team's record from final game scores
    Record {
        #[arg(long)]
        team: u64,

        #[arg(long)]
        season: u64,

        /// Copy the tally onto the stored team season and recommit it
        #[arg(long)]
        apply: bool,
    },

    /// Recompute derived fields for every stored record of a kind
    Rederive { kind: EntityKind },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting preps-football v{}", env!("CARGO_PKG_VERSION"));

    let mut repo = Repository::open(config.storage_config())?;
    let writes = matches!(
        cli.command,
        Commands::Commit { .. } | Commands::Rederive { .. } | Commands::Record { apply: true, .. }
    );

    match cli.command {
        Commands::Commit { kind, path } => {
            let json = match kind {
                EntityKind::Sport => commit_file::<Sport>(&mut repo, &path)?,
                EntityKind::Conference => commit_file::<Conference>(&mut repo, &path)?,
                EntityKind::Season => commit_file::<Season>(&mut repo, &path)?,
                EntityKind::School => commit_file::<School>(&mut repo, &path)?,
                EntityKind::Player => commit_file::<Player>(&mut repo, &path)?,
                EntityKind::Position => commit_file::<Position>(&mut repo, &path)?,
                EntityKind::Game => commit_file::<Game>(&mut repo, &path)?,
                EntityKind::TeamGame => commit_file::<TeamGame>(&mut repo, &path)?,
                EntityKind::TeamSeason => commit_file::<TeamSeason>(&mut repo, &path)?,
                EntityKind::PlayerGame => commit_file::<PlayerGame>(&mut repo, &path)?,
                EntityKind::PlayerSeason => commit_file::<PlayerSeason>(&mut repo, &path)?,
            };
            println!("{}", json);
        }

        Commands::Schedule { team, season } => {
            let team = SchoolId::new(team);
            let schedule = repo.schedule_for(team, SeasonId::new(season));
            if schedule.is_empty() {
                println!("No games found.");
                return Ok(());
            }

            println!("\n=== Schedule ===");
            for game in schedule {
                let opponent = game
                    .opponent_of(team)
                    .and_then(|id| repo.get::<School>(id))
                    .map(|s| s.label())
                    .unwrap_or_else(|| "?".to_string());
                let venue = if game.home_team == team { "vs" } else { "at" };
                let score = match game.score_for(team) {
                    Some((us, them)) if game.details.status.is_final() => {
                        let ot = if game.went_to_overtime() { " (OT)" } else { "" };
                        format!("{}-{}{}", us, them, ot)
                    }
                    _ => game.details.status.to_string(),
                };
                println!("Week {:>2}  {} {:<30} {}", game.week, venue, opponent, score);
            }
        }

        Commands::Standings { season, conference } => {
            let table = repo.standings(SeasonId::new(season), conference.map(ConferenceId::new));
            if table.is_empty() {
                println!("No team seasons found.");
                return Ok(());
            }

            println!("\n=== Standings ===");
            println!(
                "{:<4} {:<30} {:>7} {:>6} {:>7} {:>6} {:>6}",
                "Pl", "Team", "Conf", "Pct", "All", "PF", "PA"
            );
            for line in table {
                let name = repo
                    .get::<School>(line.team)
                    .map(|s| s.label())
                    .unwrap_or_else(|| line.team.to_string());
                let place = if line.place == 0 {
                    "-".to_string()
                } else {
                    line.place.to_string()
                };
                println!(
                    "{:<4} {:<30} {:>7} {:>6.3} {:>7} {:>6} {:>6}",
                    place,
                    name,
                    format!("{}-{}", line.conference_wins, line.conference_losses),
                    win_percentage(line.conference_wins, line.conference_losses),
                    format!("{}-{}", line.wins, line.losses),
                    line.points_for,
                    line.points_against
                );
            }
        }

        Commands::Record {
            team,
            season,
            apply,
        } => {
            let team = SchoolId::new(team);
            let season = SeasonId::new(season);
            let record = repo.tally_record(team, season);

            println!("\n=== Record ===");
            println!(
                "Overall:     {}-{}-{}",
                record.wins, record.losses, record.ties
            );
            println!(
                "Conference:  {}-{}-{}",
                record.conference_wins, record.conference_losses, record.conference_ties
            );
            println!("Points:      {} for, {} against", record.points_for, record.points_against);

            if apply {
                let stored = repo
                    .find::<TeamSeason, _>(|l| l.team == team && l.season == season)
                    .first()
                    .map(|l| (*l).clone());
                match stored {
                    Some(mut line) => {
                        record.apply_to(&mut line);
                        repo.commit(line)?;
                        println!("\nTeam season updated.");
                    }
                    None => {
                        tracing::warn!("No team season stored for team {} in season {}", team, season);
                    }
                }
            }
        }

        Commands::Rederive { kind } => {
            let count = match kind {
                EntityKind::Sport => repo.rederive_all::<Sport>()?,
                EntityKind::Conference => repo.rederive_all::<Conference>()?,
                EntityKind::Season => repo.rederive_all::<Season>()?,
                EntityKind::School => repo.rederive_all::<School>()?,
                EntityKind::Player => repo.rederive_all::<Player>()?,
                EntityKind::Position => repo.rederive_all::<Position>()?,
                EntityKind::Game => repo.rederive_all::<Game>()?,
                EntityKind::TeamGame => repo.rederive_all::<TeamGame>()?,
                EntityKind::TeamSeason => repo.rederive_all::<TeamSeason>()?,
                EntityKind::PlayerGame => repo.rederive_all::<PlayerGame>()?,
                EntityKind::PlayerSeason => repo.rederive_all::<PlayerSeason>()?,
            };
            println!("Re-derived {} {} records.", count, kind);
        }
    }

    if writes {
        repo.flush()?;
    }
    Ok(())
}

/// Read one record from a JSON file, commit it, and render the result.
fn commit_file<T: Record>(repo: &mut Repository, path: &Path) -> Result<String> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    let record: T = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {} from {:?}", T::KIND, path))?;
    let committed = repo.commit(record)?;
    Ok(serde_json::to_string_pretty(&committed)?)
}
