use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use footstat::config::Config;
use footstat::domain::{MatchRecord, TeamRecord};
use footstat::file::{Dataset, FromJsonFile};
use footstat::predict::{predict_match, PredictionOptions};
use footstat::print;
use footstat::team::compare_teams;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// dataset to source the form from
    file: Option<PathBuf>,

    /// home team, by name or id
    #[clap(long)]
    home: Option<String>,

    /// away team, by name or id
    #[clap(long)]
    away: Option<String>,

    /// judge each side on its matches at the same venue
    #[clap(short = 'v', long)]
    venue: bool,

    /// ignore previous meetings of the two sides
    #[clap(long)]
    no_h2h: bool,

    /// configuration overrides
    #[clap(long)]
    config: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.file.is_none() {
            bail!("dataset file must be specified");
        }
        if self.home.is_none() || self.away.is_none() {
            bail!("both the home and the away team must be specified");
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

    let file = args.file.as_ref().ok_or(anyhow!("dataset file must be specified"))?;
    let home = args.home.as_deref().ok_or(anyhow!("home team must be specified"))?;
    let away = args.away.as_deref().ok_or(anyhow!("away team must be specified"))?;
    let dataset = Dataset::from_json_file(file)
        .map_err(|err| anyhow!("cannot read {}: {err}", file.display()))?
        .into_chronological();
    let (home, away) = resolve_fixture(&dataset, home, away)?;

    let home_form = recent_form(&dataset.matches, home, config.form_window);
    let away_form = recent_form(&dataset.matches, away, config.form_window);
    let meetings: Vec<_> = dataset
        .matches
        .iter()
        .filter(|record| record.is_complete() && record.is_between(home.id, away.id))
        .cloned()
        .collect();
    debug!(
        "{} form matches for {}, {} for {}, {} meetings",
        home_form.len(),
        home.name,
        away_form.len(),
        away.name,
        meetings.len()
    );

    let comparison = compare_teams(
        &dataset.matches,
        home.id,
        away.id,
        Some(meetings.as_slice()),
        config.form_window,
    );
    info!(
        "strength: {} {:.2}, {} {:.2}; form: {} {}, {} {}",
        home.name,
        comparison.home.strength(),
        away.name,
        comparison.away.strength(),
        home.name,
        comparison.home.form.form,
        away.name,
        comparison.away.form.form
    );
    info!(
        "season split: {:.2}/{:.2}/{:.2} (confidence {:.0})",
        comparison.prediction.home_win,
        comparison.prediction.draw,
        comparison.prediction.away_win,
        comparison.confidence
    );

    let options = PredictionOptions {
        head_to_head: (!args.no_h2h).then_some(meetings.as_slice()),
        venue_effects: args.venue,
    };
    let prediction = predict_match(&config, home, away, &home_form, &away_form, options);
    info!("Prediction:\n{}", Console::default().render(&print::tabulate_prediction(&prediction)));
    Ok(())
}

/// Looks up both sides, rejecting a fixture whose keys name the same team.
fn resolve_fixture<'a>(
    dataset: &'a Dataset,
    home: &str,
    away: &str,
) -> anyhow::Result<(&'a TeamRecord, &'a TeamRecord)> {
    let home = find_team(dataset, home)?;
    let away = find_team(dataset, away)?;
    if home.id == away.id {
        bail!("{} cannot play itself", home.name);
    }
    Ok((home, away))
}

fn find_team<'a>(dataset: &'a Dataset, key: &str) -> anyhow::Result<&'a TeamRecord> {
    let by_id = key.parse().ok().and_then(|team_id| dataset.team(team_id));
    by_id
        .or_else(|| dataset.team_by_name(key))
        .ok_or(anyhow!("no team matching '{key}'"))
}

/// The last `window` complete matches played by `team`.
fn recent_form(matches: &[MatchRecord], team: &TeamRecord, window: usize) -> Vec<MatchRecord> {
    let played: Vec<_> = matches
        .iter()
        .filter(|record| record.is_complete() && record.involves(team.id))
        .collect();
    played[played.len().saturating_sub(window)..]
        .iter()
        .map(|&record| record.clone())
        .collect()
}
