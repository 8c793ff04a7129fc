// Triple crown: a league leader in batting average, home runs and RBI at once.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::metrics::batting_average;
use crate::records::CountingStat;
use crate::store::{BattingTable, MasterTable};

/// A stint needs at least this many at-bats to be considered.
pub const MIN_AT_BATS: i64 = 500;

/// League buckets in the order their outcomes are reported.
pub const DEFAULT_LEAGUES: [&str; 2] = ["NL", "AL"];

const NO_DATA: &str = "No data for this year.";

/// The three triple-crown categories for one qualifying stint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrownCandidate {
    #[serde(rename = "playerID")]
    pub player_id: String,
    pub league: String,
    pub home_runs: i64,
    pub rbi: i64,
    pub batting_average: f64,
}

/// Result of the triple-crown check for one league.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LeagueOutcome {
    Winner {
        league: String,
        #[serde(rename = "playerID")]
        player_id: String,
        full_name: String,
    },
    NoWinner {
        league: String,
    },
    NoData {
        league: String,
    },
}

impl LeagueOutcome {
    pub fn league(&self) -> &str {
        match self {
            LeagueOutcome::Winner { league, .. }
            | LeagueOutcome::NoWinner { league }
            | LeagueOutcome::NoData { league } => league,
        }
    }

    /// Display sentence for this league. Sentences carry their own trailing
    /// space so they can be concatenated directly.
    pub fn message(&self) -> String {
        match self {
            LeagueOutcome::Winner {
                league, full_name, ..
            } => format!("{league} has a winner, {full_name}. "),
            LeagueOutcome::NoWinner { league } => format!("{league} does not have a winner. "),
            LeagueOutcome::NoData { .. } => NO_DATA.to_string(),
        }
    }
}

/// Per-league triple-crown outcomes for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripleCrownResult {
    pub year: i32,
    pub leagues: Vec<LeagueOutcome>,
}

impl TripleCrownResult {
    /// All league messages joined, in league order.
    pub fn summary(&self) -> String {
        self.leagues.iter().map(LeagueOutcome::message).collect()
    }
}

impl fmt::Display for TripleCrownResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Every stint in `year` with at least [`MIN_AT_BATS`], in table order.
///
/// Stints are not merged: a traded player competes with each stint
/// separately, in the league it was played in.
pub fn triple_crown_candidates(batting: &BattingTable, year: i32) -> Vec<CrownCandidate> {
    batting
        .rows()
        .iter()
        .filter(|r| r.year_id == year && r.at_bats.is_some_and(|ab| ab >= MIN_AT_BATS))
        .map(|r| CrownCandidate {
            player_id: r.player_id.clone(),
            league: r.league.clone(),
            home_runs: r.count_or_zero(CountingStat::HomeRuns),
            rbi: r.count_or_zero(CountingStat::RunsBattedIn),
            batting_average: batting_average(r),
        })
        .collect()
}

/// Index of the first candidate with the highest `key`.
fn leader_by<T, F>(candidates: &[&CrownCandidate], key: F) -> Option<usize>
where
    T: PartialOrd,
    F: Fn(&CrownCandidate) -> T,
{
    let mut best: Option<(usize, T)> = None;
    for (i, candidate) in candidates.iter().copied().enumerate() {
        let value = key(candidate);
        let ahead = match &best {
            Some((_, top)) => value > *top,
            None => true,
        };
        if ahead {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

fn league_outcome(
    league: &str,
    candidates: &[&CrownCandidate],
    master: &MasterTable,
) -> Result<LeagueOutcome> {
    let average = leader_by(candidates, |c| c.batting_average);
    let homers = leader_by(candidates, |c| c.home_runs);
    let rbi = leader_by(candidates, |c| c.rbi);

    let outcome = match (average, homers, rbi) {
        (Some(a), Some(h), Some(r)) if a == h && h == r => {
            let player_id = candidates[a].player_id.clone();
            let full_name = master.full_name(&player_id)?;
            LeagueOutcome::Winner {
                league: league.to_string(),
                player_id,
                full_name,
            }
        }
        (Some(_), Some(_), Some(_)) => LeagueOutcome::NoWinner {
            league: league.to_string(),
        },
        _ => LeagueOutcome::NoData {
            league: league.to_string(),
        },
    };
    Ok(outcome)
}

/// Triple-crown outcome for `year` in each of [`DEFAULT_LEAGUES`].
pub fn triple_crown_winner(
    batting: &BattingTable,
    master: &MasterTable,
    year: i32,
) -> Result<TripleCrownResult> {
    triple_crown_winner_in(batting, master, year, &DEFAULT_LEAGUES)
}

/// Triple-crown outcome for `year`, evaluated and reported in the given
/// league order. A league bucket holds the candidates whose league label
/// matches it exactly.
pub fn triple_crown_winner_in<S: AsRef<str>>(
    batting: &BattingTable,
    master: &MasterTable,
    year: i32,
    leagues: &[S],
) -> Result<TripleCrownResult> {
    let candidates = triple_crown_candidates(batting, year);
    debug!(year, candidates = candidates.len(), "triple crown candidates");

    let outcomes = leagues
        .iter()
        .map(|league| {
            let league = league.as_ref();
            let bucket: Vec<&CrownCandidate> =
                candidates.iter().filter(|c| c.league == league).collect();
            league_outcome(league, &bucket, master)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TripleCrownResult {
        year,
        leagues: outcomes,
    })
}
