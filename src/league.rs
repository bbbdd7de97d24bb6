//! League-wide statistics, standings and season trends, and comparison across competitions.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{MatchRecord, MatchResult, Side, TeamId, TeamRecord};
use crate::stats::{self, percentage, ratio, round2, Trend};

const FORM_LENGTH: usize = 5;
const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;
const LEADERBOARD_SIZE: usize = 5;

#[derive(Debug, Error, PartialEq)]
pub enum LeagueError {
    #[error("at least one competition must be supplied")]
    NoCompetitions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeagueStatistics {
    pub total_matches: usize,
    pub total_goals: u32,
    pub average_goals_per_match: f64,
    pub home_win_percentage: f64,
    pub draw_percentage: f64,
    pub away_win_percentage: f64,
    pub btts_percentage: f64,
    pub over_25_percentage: f64,
    pub over_35_percentage: f64,
    /// Matches in which at least one side failed to score.
    pub clean_sheet_percentage: f64,
    /// Four or more goals.
    pub high_scoring_matches: usize,
    /// One goal or fewer.
    pub low_scoring_matches: usize,
}

/// Aggregates over the `complete` matches only.
pub fn calculate_league_statistics(matches: &[MatchRecord]) -> LeagueStatistics {
    let mut stats = LeagueStatistics::default();
    let (mut home_wins, mut draws, mut away_wins) = (0, 0, 0);
    let (mut btts, mut over_25, mut over_35, mut clean_sheets) = (0, 0, 0, 0);
    for record in matches.iter().filter(|record| record.is_complete()) {
        let goals = record.total_goals();
        stats.total_matches += 1;
        stats.total_goals += goals as u32;
        match record.result_for(Side::Home) {
            MatchResult::Win => home_wins += 1,
            MatchResult::Draw => draws += 1,
            MatchResult::Loss => away_wins += 1,
        }
        if record.both_teams_scored() {
            btts += 1;
        } else {
            clean_sheets += 1;
        }
        if goals > 2 {
            over_25 += 1;
        }
        if goals > 3 {
            over_35 += 1;
            stats.high_scoring_matches += 1;
        }
        if goals <= 1 {
            stats.low_scoring_matches += 1;
        }
    }

    let total = stats.total_matches;
    stats.average_goals_per_match = round2(ratio(stats.total_goals as f64, total as f64));
    stats.home_win_percentage = percentage(home_wins, total);
    stats.draw_percentage = percentage(draws, total);
    stats.away_win_percentage = percentage(away_wins, total);
    stats.btts_percentage = percentage(btts, total);
    stats.over_25_percentage = percentage(over_25, total);
    stats.over_35_percentage = percentage(over_35, total);
    stats.clean_sheet_percentage = percentage(clean_sheets, total);
    stats
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VenueRecord {
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
}
impl VenueRecord {
    fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::Win => self.won += 1,
            MatchResult::Draw => self.drawn += 1,
            MatchResult::Loss => self.lost += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueTableRow {
    /// 1-based.
    pub position: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// Last five results, oldest first.
    pub form: String,
    pub home: VenueRecord,
    pub away: VenueRecord,
}

struct Standing<'a> {
    team: &'a TeamRecord,
    overall: VenueRecord,
    home: VenueRecord,
    away: VenueRecord,
    goals_for: u32,
    goals_against: u32,
    results: Vec<MatchResult>,
}
impl<'a> Standing<'a> {
    fn new(team: &'a TeamRecord) -> Self {
        Self {
            team,
            overall: VenueRecord::default(),
            home: VenueRecord::default(),
            away: VenueRecord::default(),
            goals_for: 0,
            goals_against: 0,
            results: vec![],
        }
    }

    fn record(&mut self, record: &MatchRecord, side: Side) {
        let result = record.result_for(side);
        self.goals_for += record.goals_for(side) as u32;
        self.goals_against += record.goals_against(side) as u32;
        self.overall.record(result);
        match side {
            Side::Home => self.home.record(result),
            Side::Away => self.away.record(result),
        }
        self.results.push(result);
    }

    fn points(&self) -> u32 {
        self.overall.won * 3 + self.overall.drawn
    }

    fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }

    fn into_row(self) -> LeagueTableRow {
        let form = self.results[self.results.len().saturating_sub(FORM_LENGTH)..]
            .iter()
            .map(MatchResult::symbol)
            .collect();
        LeagueTableRow {
            position: 0,
            team_id: self.team.id,
            team_name: self.team.name.clone(),
            played: self.results.len() as u32,
            won: self.overall.won,
            drawn: self.overall.drawn,
            lost: self.overall.lost,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            goal_difference: self.goal_difference(),
            points: self.points(),
            form,
            home: self.home,
            away: self.away,
        }
    }
}

/// Standings for `teams` from their complete matches, ordered by points, then goal difference, then
/// goals scored. Teams level on all three keep their order in `teams`. A side absent from `teams`
/// is ignored; its opponent's result still counts.
///
/// `matches` must already be in ascending kickoff order for the form column to be meaningful.
pub fn generate_league_table(matches: &[MatchRecord], teams: &[TeamRecord]) -> Vec<LeagueTableRow> {
    let mut standings: Vec<_> = teams.iter().map(Standing::new).collect();
    let index: FxHashMap<TeamId, usize> = teams
        .iter()
        .enumerate()
        .map(|(position, team)| (team.id, position))
        .collect();

    for record in matches.iter().filter(|record| record.is_complete()) {
        for side in [Side::Home, Side::Away] {
            if let Some(&position) = index.get(&record.team_id(side)) {
                standings[position].record(record, side);
            }
        }
    }

    let mut table: Vec<_> = standings.into_iter().map(Standing::into_row).collect();
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    for (position, row) in table.iter_mut().enumerate() {
        row.position = position + 1;
    }
    debug!("generated table of {} teams from {} matches", table.len(), matches.len());
    table
}

/// How tight the table is, 0–100: the points gap between first and last place relative to the
/// largest gap possible after the games played. 0 when nothing has been played.
pub fn calculate_competitiveness(table: &[LeagueTableRow]) -> f64 {
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return 0.0;
    };
    let max_played = table.iter().map(|row| row.played).max().unwrap_or(0);
    let max_spread = (max_played * 3) as f64;
    if max_spread == 0.0 {
        return 0.0;
    }
    let spread = first.points.saturating_sub(last.points) as f64;
    round2(f64::max(0.0, 100.0 - spread / max_spread * 100.0))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamGoals {
    pub team_id: TeamId,
    pub team_name: String,
    pub goals: u32,
}
impl From<&LeagueTableRow> for TeamGoals {
    fn from(row: &LeagueTableRow) -> Self {
        Self {
            team_id: row.team_id,
            team_name: row.team_name.clone(),
            goals: row.goals_for,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonTrends {
    /// Direction of average goals per match across week-long buckets.
    pub goal_trend: Trend,
    pub weekly_goal_averages: Vec<f64>,
    pub competitiveness: f64,
    /// Home-win rate as a percentage.
    pub predictability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAnalysis {
    pub season: String,
    pub statistics: LeagueStatistics,
    pub table: Vec<LeagueTableRow>,
    pub top_scorers: Vec<TeamGoals>,
    /// `goals` holds goals conceded.
    pub best_defenses: Vec<TeamGoals>,
    pub trends: SeasonTrends,
}

/// Statistics, table, attacking/defensive leaders and trend signals for a season.
///
/// `matches` must already be in ascending kickoff order: weeks are counted from the first
/// complete match.
pub fn analyze_season_trends(matches: &[MatchRecord], teams: &[TeamRecord], season: &str) -> SeasonAnalysis {
    let statistics = calculate_league_statistics(matches);
    let table = generate_league_table(matches, teams);

    let mut by_attack: Vec<_> = table.iter().collect();
    by_attack.sort_by(|a, b| b.goals_for.cmp(&a.goals_for));
    let top_scorers = by_attack
        .into_iter()
        .take(LEADERBOARD_SIZE)
        .map(TeamGoals::from)
        .collect();

    let mut by_defense: Vec<_> = table.iter().collect();
    by_defense.sort_by(|a, b| a.goals_against.cmp(&b.goals_against));
    let best_defenses = by_defense
        .into_iter()
        .take(LEADERBOARD_SIZE)
        .map(|row| TeamGoals {
            goals: row.goals_against,
            ..TeamGoals::from(row)
        })
        .collect();

    let weekly_goal_averages = weekly_goal_averages(matches);
    let trends = SeasonTrends {
        goal_trend: stats::trend(&weekly_goal_averages),
        weekly_goal_averages,
        competitiveness: calculate_competitiveness(&table),
        predictability: statistics.home_win_percentage,
    };

    SeasonAnalysis {
        season: season.to_string(),
        statistics,
        table,
        top_scorers,
        best_defenses,
        trends,
    }
}

/// Average goals per complete match for each week-long bucket, in week order. Weeks without
/// matches are skipped.
fn weekly_goal_averages(matches: &[MatchRecord]) -> Vec<f64> {
    let mut complete = matches.iter().filter(|record| record.is_complete()).peekable();
    let Some(start) = complete.peek().map(|record| record.kickoff) else {
        return vec![];
    };
    let mut weeks: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for record in complete {
        let week = (record.kickoff - start).div_euclid(WEEK_SECONDS);
        weeks.entry(week).or_default().push(record.total_goals() as f64);
    }
    weeks.values().map(|goals| stats::average(goals)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub name: String,
    pub matches: Vec<MatchRecord>,
    pub teams: Vec<TeamRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionSummary {
    pub name: String,
    pub statistics: LeagueStatistics,
    pub table: Vec<LeagueTableRow>,
    pub competitiveness: f64,
    pub quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionComparison {
    pub competitions: Vec<CompetitionSummary>,
    pub most_competitive: String,
    pub highest_scoring: String,
    pub most_defensive: String,
    /// Highest home-win rate.
    pub most_predictable: String,
}

/// Entertainment score: goal volume (capped) blended with the BTTS and Over-2.5 rates.
pub fn calculate_quality(statistics: &LeagueStatistics) -> f64 {
    let goal_volume = f64::min(100.0, statistics.average_goals_per_match * 30.0);
    let open_play = (statistics.btts_percentage + statistics.over_25_percentage) / 2.0;
    round2(0.4 * goal_volume + 0.6 * open_play)
}

/// Summarises each competition and names the superlatives. Ties go to the competition listed
/// first.
pub fn compare_competitions(competitions: &[Competition]) -> Result<CompetitionComparison, LeagueError> {
    if competitions.is_empty() {
        return Err(LeagueError::NoCompetitions);
    }
    let summaries: Vec<_> = competitions
        .iter()
        .map(|competition| {
            let statistics = calculate_league_statistics(&competition.matches);
            let table = generate_league_table(&competition.matches, &competition.teams);
            CompetitionSummary {
                name: competition.name.clone(),
                competitiveness: calculate_competitiveness(&table),
                quality: calculate_quality(&statistics),
                statistics,
                table,
            }
        })
        .collect();

    let most_competitive = pick(&summaries, |summary| summary.competitiveness, Extreme::Max);
    let highest_scoring = pick(&summaries, |summary| summary.statistics.average_goals_per_match, Extreme::Max);
    let most_defensive = pick(&summaries, |summary| summary.statistics.average_goals_per_match, Extreme::Min);
    let most_predictable = pick(&summaries, |summary| summary.statistics.home_win_percentage, Extreme::Max);
    debug!(
        "compared {} competitions: most competitive {most_competitive}, highest scoring {highest_scoring}",
        summaries.len()
    );

    Ok(CompetitionComparison {
        competitions: summaries,
        most_competitive,
        highest_scoring,
        most_defensive,
        most_predictable,
    })
}

enum Extreme {
    Max,
    Min,
}

/// Name of the summary with the extreme `key`; the first one seen wins ties.
fn pick(summaries: &[CompetitionSummary], key: impl Fn(&CompetitionSummary) -> f64, extreme: Extreme) -> String {
    let mut best = &summaries[0];
    for summary in &summaries[1..] {
        let better = match extreme {
            Extreme::Max => key(summary) > key(best),
            Extreme::Min => key(summary) < key(best),
        };
        if better {
            best = summary;
        }
    }
    best.name.clone()
}

#[cfg(test)]
mod tests;
