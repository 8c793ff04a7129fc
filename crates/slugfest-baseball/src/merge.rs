// Stat merger: folds a traded player's stints into one season line.

use std::collections::HashMap;

use crate::records::{parse_count, BattingRecord, CountingStat, COMBINED_LEAGUE, COMBINED_TEAM};

/// A batting line built from several stints. Same shape as a stint row, but
/// labeled `TOT` / `MLB`.
pub type CombinedRecord = BattingRecord;

/// Merge rows into one record per `playerID`, in first-encountered order.
///
/// The first row of each player seeds a fresh accumulator; every later row
/// adds its counting stats and any integer-valued extra columns into it.
/// `yearID` is never summed. Cells that are blank or not integers are skipped
/// rather than failing the merge, and sums saturate at `i64::MAX`. Callers pass rows from a single season.
pub fn combine_stats<'a, I>(rows: I) -> Vec<CombinedRecord>
where
    I: IntoIterator<Item = &'a BattingRecord>,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut combined: Vec<CombinedRecord> = Vec::new();

    for row in rows {
        match slots.get(row.player_id.as_str()) {
            Some(&slot) => add_stint(&mut combined[slot], row),
            None => {
                slots.insert(row.player_id.as_str(), combined.len());
                combined.push(row.clone());
            }
        }
    }

    for record in &mut combined {
        record.team_id = COMBINED_TEAM.to_string();
        record.league = COMBINED_LEAGUE.to_string();
    }
    combined
}

fn add_stint(total: &mut CombinedRecord, stint: &BattingRecord) {
    for stat in CountingStat::ALL {
        if let Some(value) = stint.count(stat) {
            let slot = total.count_mut(stat);
            *slot = Some(slot.unwrap_or(0).saturating_add(value));
        }
    }

    for (column, raw) in &stint.extra {
        let Some(value) = parse_count(raw) else {
            continue;
        };
        // A text cell already in the accumulator is kept as is.
        let current = match total.extra.get(column) {
            Some(existing) => match parse_count(existing) {
                Some(n) => n,
                None if existing.trim().is_empty() => 0,
                None => continue,
            },
            None => 0,
        };
        total
            .extra
            .insert(column.clone(), current.saturating_add(value).to_string());
    }
}
