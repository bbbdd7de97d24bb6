use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use footstat::config::Config;
use footstat::file::{recurse_dir, Dataset, FromJsonFile};
use footstat::league::{analyze_season_trends, compare_competitions};
use footstat::player::{analyze_top_performers, calculate_player_performance};
use footstat::print;
use footstat::rating::calculate_elo_ratings;
use footstat::referee::analyze_referee_impact;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// dataset to analyse
    file: Option<PathBuf>,

    /// directory of datasets to compare against each other
    #[clap(short = 'c', long)]
    compare: Option<PathBuf>,

    /// configuration overrides
    #[clap(long)]
    config: Option<PathBuf>,

    /// season label, when the dataset does not carry one
    #[clap(short = 's', long)]
    season: Option<String>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.file.is_none() && self.compare.is_none() {
            bail!("either a dataset file or the --compare flag must be specified");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    config.validate()?;
    debug!("config: {config:?}");

    if let Some(file) = &args.file {
        analyse(file, &config, args.season.as_deref())?;
    }
    if let Some(dir) = &args.compare {
        compare(dir)?;
    }
    Ok(())
}

fn analyse(file: &Path, config: &Config, season: Option<&str>) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let dataset = Dataset::from_json_file(file)
        .map_err(|err| anyhow!("cannot read {}: {err}", file.display()))?
        .into_chronological();
    if dataset.teams.is_empty() {
        bail!("{} contains no teams", file.display());
    }
    let season = season
        .map(str::to_string)
        .or_else(|| dataset.season.clone())
        .unwrap_or_else(|| "unspecified".to_string());
    if let Some(first) = dataset.matches.first().and_then(|record| record.kickoff_time()) {
        info!("season {season}: {} matches from {}", dataset.matches.len(), first.format("%Y-%m-%d"));
    }

    let analysis = analyze_season_trends(&dataset.matches, &dataset.teams, &season);
    info!("Table:\n{}", Console::default().render(&print::tabulate_league_table(&analysis.table)));
    info!(
        "Statistics:\n{}",
        Console::default().render(&print::tabulate_statistics(&analysis.statistics))
    );
    info!(
        "Top scorers:\n{}",
        Console::default().render(&print::tabulate_team_goals(&analysis.top_scorers, "Scored"))
    );
    info!(
        "Best defences:\n{}",
        Console::default().render(&print::tabulate_team_goals(&analysis.best_defenses, "Conceded"))
    );
    info!(
        "goal trend: {}, competitiveness: {:.2}, predictability: {:.2}",
        analysis.trends.goal_trend, analysis.trends.competitiveness, analysis.trends.predictability
    );

    let ratings = calculate_elo_ratings(&dataset.matches, config.elo_initial_rating, config.elo_k_factor);
    let team_name = |team_id| {
        dataset
            .team(team_id)
            .map(|team| team.name.clone())
            .unwrap_or_else(|| format!("#{team_id}"))
    };
    info!("Elo ratings:\n{}", Console::default().render(&print::tabulate_ratings(&ratings, team_name)));

    if !dataset.players.is_empty() {
        let pool: Vec<_> = dataset
            .players
            .iter()
            .map(|entry| calculate_player_performance(&entry.player, &entry.appearances, &entry.totals))
            .collect();
        let top = analyze_top_performers(&pool, config.top_performers);
        info!("Top scorers:\n{}", Console::default().render(&print::tabulate_players(&top.top_scorers)));
        info!("Highest impact:\n{}", Console::default().render(&print::tabulate_players(&top.highest_impact)));
        if !top.rising_stars.is_empty() {
            info!("Rising stars:\n{}", Console::default().render(&print::tabulate_players(&top.rising_stars)));
        }
    }

    if !dataset.referees.is_empty() {
        let impacts: Vec<_> = dataset
            .referees
            .iter()
            .map(|referee| analyze_referee_impact(referee, &dataset.matches))
            .collect();
        info!("Referees:\n{}", Console::default().render(&print::tabulate_referees(&impacts)));
    }

    let elapsed_time = start_time.elapsed();
    debug!("analysed {} in {}s", file.display(), elapsed_time.as_millis() as f64 / 1_000.);
    Ok(())
}

fn compare(dir: &Path) -> anyhow::Result<()> {
    let mut files = vec![];
    recurse_dir(dir.to_path_buf(), &mut files, &mut |ext| ext == "json")?;
    let mut competitions = Vec::with_capacity(files.len());
    for file in files {
        let default_name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dataset = Dataset::from_json_file(&file)
            .map_err(|err| anyhow!("cannot read {}: {err}", file.display()))?
            .into_chronological();
        debug!("loaded {} with {} matches", file.display(), dataset.matches.len());
        competitions.push(dataset.into_competition(&default_name));
    }

    let comparison = compare_competitions(&competitions)?;
    info!("Competitions:\n{}", Console::default().render(&print::tabulate_competitions(&comparison)));
    info!(
        "most competitive: {}, highest scoring: {}, most defensive: {}, most predictable: {}",
        comparison.most_competitive,
        comparison.highest_scoring,
        comparison.most_defensive,
        comparison.most_predictable
    );
    Ok(())
}
