// Slugging percentage of every player who appeared for a team in a season.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::merge::combine_stats;
use crate::metrics::slugging_percentage;
use crate::records::BattingRecord;
use crate::store::{BattingTable, MasterTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SluggingRecord {
    #[serde(rename = "playerID")]
    pub player_id: String,
    pub slugging_percentage: f64,
    pub full_name: String,
}

/// Slugging percentage for each player on `team` in `year`.
///
/// A player traded to or from the team that season is measured on their full
/// season: the stints with other clubs are pulled in and merged. Players who
/// spent the whole season with the team come first, in table order, followed
/// by the merged players in order of first appearance. A team with no rows
/// gives an empty list.
pub fn team_slugging_percentage(
    batting: &BattingTable,
    master: &MasterTable,
    team: &str,
    year: i32,
) -> Result<Vec<SluggingRecord>> {
    let season: Vec<&BattingRecord> = batting
        .rows()
        .iter()
        .filter(|r| r.year_id == year)
        .collect();

    let mut players: Vec<&BattingRecord> = season
        .iter()
        .copied()
        .filter(|r| r.team_id == team)
        .collect();

    let mut pulled: HashSet<&str> = HashSet::new();
    let mut fragments: Vec<&BattingRecord> = Vec::new();
    for member in players.iter().copied() {
        if !pulled.insert(member.player_id.as_str()) {
            continue;
        }
        fragments.extend(
            season
                .iter()
                .copied()
                .filter(|r| r.team_id != team && r.player_id == member.player_id),
        );
    }
    players.extend(fragments);

    let mut stints: HashMap<&str, usize> = HashMap::new();
    for row in players.iter().copied() {
        *stints.entry(row.player_id.as_str()).or_insert(0) += 1;
    }
    let (whole_season, traded): (Vec<&BattingRecord>, Vec<&BattingRecord>) = players
        .into_iter()
        .partition(|r| stints[r.player_id.as_str()] == 1);

    let combined = combine_stats(traded);
    debug!(
        team,
        year,
        players = whole_season.len() + combined.len(),
        merged = combined.len(),
        "team slugging computed"
    );

    whole_season
        .into_iter()
        .chain(combined.iter())
        .map(|record| -> Result<SluggingRecord> {
            Ok(SluggingRecord {
                player_id: record.player_id.clone(),
                slugging_percentage: slugging_percentage(record),
                full_name: master.full_name(&record.player_id)?,
            })
        })
        .collect()
}
