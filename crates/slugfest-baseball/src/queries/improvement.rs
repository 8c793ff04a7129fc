// Batting average change between two seasons, and the most improved batter.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, StatsError};
use crate::metrics::{batting_average, round3};
use crate::queries::eligibility::eligible_batters;
use crate::records::BattingRecord;
use crate::store::{BattingTable, MasterTable};

/// A player's batting average in each of two seasons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageChange {
    #[serde(rename = "playerID")]
    pub player_id: String,
    /// Average in the first requested year.
    pub average1: f64,
    /// Average in the second requested year.
    pub average2: f64,
    /// `average2 - average1`, rounded to three places.
    pub difference: f64,
}

/// The top [`AverageChange`] with the player's display name attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MostImprovedBatter {
    #[serde(rename = "playerID")]
    pub player_id: String,
    pub average1: f64,
    pub average2: f64,
    pub difference: f64,
    pub full_name: String,
}

/// Average change for every eligible batter, most improved first.
///
/// Each player's two season lines are joined on `playerID` and `yearID`
/// rather than by position. Ties keep ascending `playerID` order.
pub fn batting_average_differences(
    batting: &BattingTable,
    first_year: i32,
    second_year: i32,
) -> Vec<AverageChange> {
    let eligible = eligible_batters(batting, first_year, second_year);

    let mut seasons: BTreeMap<&str, (Option<&BattingRecord>, Option<&BattingRecord>)> =
        BTreeMap::new();
    for row in &eligible {
        let entry = seasons.entry(row.player_id.as_str()).or_default();
        if row.year_id == first_year {
            entry.0 = Some(row);
        } else if row.year_id == second_year {
            entry.1 = Some(row);
        }
    }

    let mut changes: Vec<AverageChange> = seasons
        .into_iter()
        .filter_map(|(player_id, pair)| match pair {
            (Some(first), Some(second)) => {
                let average1 = batting_average(first);
                let average2 = batting_average(second);
                Some(AverageChange {
                    player_id: player_id.to_string(),
                    average1,
                    average2,
                    difference: round3(average2 - average1),
                })
            }
            _ => None,
        })
        .collect();

    changes.sort_by(|a, b| b.difference.total_cmp(&a.difference));
    changes
}

/// The batter whose average rose the most from `first_year` to `second_year`.
pub fn most_improved_batter(
    batting: &BattingTable,
    master: &MasterTable,
    first_year: i32,
    second_year: i32,
) -> Result<MostImprovedBatter> {
    let top = batting_average_differences(batting, first_year, second_year)
        .into_iter()
        .next()
        .ok_or_else(|| StatsError::NoEligiblePlayers {
            query: format!("most improved batter {first_year}-{second_year}"),
        })?;

    let full_name = master.full_name(&top.player_id)?;
    Ok(MostImprovedBatter {
        player_id: top.player_id,
        average1: top.average1,
        average2: top.average2,
        difference: top.difference,
        full_name,
    })
}
