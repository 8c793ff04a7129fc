// Eligible batters: regulars in both of two compared seasons.

use std::collections::BTreeMap;

use tracing::debug;

use crate::merge::combine_stats;
use crate::records::BattingRecord;
use crate::store::BattingTable;

/// A stint qualifies with strictly more at-bats than this.
pub const MIN_AT_BATS: i64 = 200;

fn qualifies(row: &BattingRecord, first_year: i32, second_year: i32) -> bool {
    row.at_bats.is_some_and(|ab| ab > MIN_AT_BATS)
        && (row.year_id == first_year || row.year_id == second_year)
}

/// One season line per eligible player per year, sorted by
/// `(playerID, yearID)`.
///
/// A player is eligible when at least one stint with more than
/// [`MIN_AT_BATS`] exists in each year. Players with more than two qualifying
/// stints were traded in at least one of the years; both of their seasons are
/// then rebuilt through [`combine_stats`], so they come back labeled `TOT`.
/// Equal years leave nothing to compare and give an empty result.
pub fn eligible_batters(
    batting: &BattingTable,
    first_year: i32,
    second_year: i32,
) -> Vec<BattingRecord> {
    if first_year == second_year {
        debug!(year = first_year, "eligible_batters called with equal years");
        return Vec::new();
    }

    let mut by_player: BTreeMap<&str, Vec<&BattingRecord>> = BTreeMap::new();
    for row in batting
        .rows()
        .iter()
        .filter(|r| qualifies(r, first_year, second_year))
    {
        by_player.entry(row.player_id.as_str()).or_default().push(row);
    }

    let mut eligible = Vec::new();
    let mut traded = 0usize;
    for stints in by_player.values() {
        let (first, second): (Vec<&BattingRecord>, Vec<&BattingRecord>) = stints
            .iter()
            .copied()
            .partition(|r| r.year_id == first_year);
        if first.is_empty() || second.is_empty() {
            continue;
        }

        if stints.len() > 2 {
            traded += 1;
            eligible.extend(combine_stats(first));
            eligible.extend(combine_stats(second));
        } else {
            eligible.extend(stints.iter().map(|r| (*r).clone()));
        }
    }

    eligible.sort_by(|a, b| {
        a.player_id
            .cmp(&b.player_id)
            .then(a.year_id.cmp(&b.year_id))
    });
    debug!(
        first_year,
        second_year,
        rows = eligible.len(),
        traded,
        "eligible batters selected"
    );
    eligible
}
