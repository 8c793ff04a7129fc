// Result formatter: the combined response for one analysis request.

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::queries::improvement::MostImprovedBatter;
use crate::queries::slugging::SluggingRecord;
use crate::queries::triple_crown::DEFAULT_LEAGUES;
use crate::store::StatStore;

/// Parameters for the three queries of a combined request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub first_year: i32,
    pub second_year: i32,
    pub team: String,
    pub team_year: i32,
    pub triple_crown_year: i32,
    pub leagues: Vec<String>,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        AnalysisRequest {
            first_year: 2009,
            second_year: 2010,
            team: "OAK".into(),
            team_year: 2007,
            triple_crown_year: 2012,
            leagues: DEFAULT_LEAGUES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// The aggregate response handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub most_improved: MostImprovedBatter,
    pub team_stats: Vec<SluggingRecord>,
    pub triple_winner: String,
}

/// Run all three queries against the store and shape the response.
pub fn build_report(store: &StatStore, request: &AnalysisRequest) -> Result<AnalysisReport> {
    let most_improved = store.most_improved_batter(request.first_year, request.second_year)?;
    let team_stats = store.team_slugging_percentage(&request.team, request.team_year)?;
    let triple_winner = store
        .triple_crown_winner_in(request.triple_crown_year, request.leagues.as_slice())?
        .summary();

    info!(
        most_improved = %most_improved.player_id,
        team = %request.team,
        team_players = team_stats.len(),
        "analysis report built"
    );

    Ok(AnalysisReport {
        most_improved,
        team_stats,
        triple_winner,
    })
}
