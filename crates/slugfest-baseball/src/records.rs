// Typed rows for the batting and master tables.

use std::collections::BTreeMap;

/// Team label given to a record built by merging several stints.
pub const COMBINED_TEAM: &str = "TOT";
/// League label given to a record built by merging several stints.
pub const COMBINED_LEAGUE: &str = "MLB";

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Header names of the batting table.
pub mod batting_columns {
    pub const PLAYER_ID: &str = "playerID";
    pub const YEAR_ID: &str = "yearID";
    pub const TEAM_ID: &str = "teamID";
    pub const LEAGUE: &str = "league";
    /// Lahman-database spelling of the league column.
    pub const LEAGUE_ALIAS: &str = "lgID";
    pub const AB: &str = "AB";
    pub const H: &str = "H";
    pub const DOUBLES: &str = "2B";
    pub const TRIPLES: &str = "3B";
    pub const HR: &str = "HR";
    pub const RBI: &str = "RBI";
}

/// Header names of the master table.
pub mod master_columns {
    pub const PLAYER_ID: &str = "playerID";
    pub const NAME_FIRST: &str = "nameFirst";
    pub const NAME_LAST: &str = "nameLast";
}

// ---------------------------------------------------------------------------
// Counting stats
// ---------------------------------------------------------------------------

/// Parse a cell as an integer count.
///
/// Surrounding whitespace is ignored. Blank or non-integer text yields `None`;
/// this never panics, so it doubles as the "is this summable?" test used by
/// the stat merger.
pub fn parse_count(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// The typed numeric batting columns that are summed when stints merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountingStat {
    AtBats,
    Hits,
    Doubles,
    Triples,
    HomeRuns,
    RunsBattedIn,
}

impl CountingStat {
    pub const ALL: [CountingStat; 6] = [
        CountingStat::AtBats,
        CountingStat::Hits,
        CountingStat::Doubles,
        CountingStat::Triples,
        CountingStat::HomeRuns,
        CountingStat::RunsBattedIn,
    ];

    /// Header name of this stat in the batting table.
    pub fn column(self) -> &'static str {
        match self {
            CountingStat::AtBats => batting_columns::AB,
            CountingStat::Hits => batting_columns::H,
            CountingStat::Doubles => batting_columns::DOUBLES,
            CountingStat::Triples => batting_columns::TRIPLES,
            CountingStat::HomeRuns => batting_columns::HR,
            CountingStat::RunsBattedIn => batting_columns::RBI,
        }
    }
}

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

/// A single cell read back from a record by column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(&'a str),
}

// ---------------------------------------------------------------------------
// Batting record
// ---------------------------------------------------------------------------

/// One player's batting line for one stint (team) in one season.
///
/// Counting stats are `None` when the source cell was blank. Columns beyond
/// the declared schema are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BattingRecord {
    pub player_id: String,
    pub year_id: i32,
    pub team_id: String,
    pub league: String,
    pub at_bats: Option<i64>,
    pub hits: Option<i64>,
    pub doubles: Option<i64>,
    pub triples: Option<i64>,
    pub home_runs: Option<i64>,
    pub rbi: Option<i64>,
    pub extra: BTreeMap<String, String>,
}

impl BattingRecord {
    pub fn count(&self, stat: CountingStat) -> Option<i64> {
        match stat {
            CountingStat::AtBats => self.at_bats,
            CountingStat::Hits => self.hits,
            CountingStat::Doubles => self.doubles,
            CountingStat::Triples => self.triples,
            CountingStat::HomeRuns => self.home_runs,
            CountingStat::RunsBattedIn => self.rbi,
        }
    }

    pub fn count_mut(&mut self, stat: CountingStat) -> &mut Option<i64> {
        match stat {
            CountingStat::AtBats => &mut self.at_bats,
            CountingStat::Hits => &mut self.hits,
            CountingStat::Doubles => &mut self.doubles,
            CountingStat::Triples => &mut self.triples,
            CountingStat::HomeRuns => &mut self.home_runs,
            CountingStat::RunsBattedIn => &mut self.rbi,
        }
    }

    /// A counting stat with blank cells read as zero.
    pub fn count_or_zero(&self, stat: CountingStat) -> i64 {
        self.count(stat).unwrap_or(0)
    }

    /// Look up any column by its header name.
    ///
    /// Returns `None` for blank cells and for columns this row does not carry.
    pub fn field(&self, column: &str) -> Option<FieldValue<'_>> {
        use batting_columns as col;

        match column {
            col::PLAYER_ID => text_field(&self.player_id),
            col::YEAR_ID => Some(FieldValue::Int(i64::from(self.year_id))),
            col::TEAM_ID => text_field(&self.team_id),
            col::LEAGUE | col::LEAGUE_ALIAS => text_field(&self.league),
            _ => {
                if let Some(stat) = CountingStat::ALL.iter().find(|s| s.column() == column) {
                    return self.count(*stat).map(FieldValue::Int);
                }
                let raw = self.extra.get(column)?;
                if raw.trim().is_empty() {
                    return None;
                }
                Some(match parse_count(raw) {
                    Some(n) => FieldValue::Int(n),
                    None => FieldValue::Text(raw),
                })
            }
        }
    }
}

fn text_field(value: &str) -> Option<FieldValue<'_>> {
    if value.trim().is_empty() {
        None
    } else {
        Some(FieldValue::Text(value))
    }
}

// ---------------------------------------------------------------------------
// Master record
// ---------------------------------------------------------------------------

/// Season-independent identity of a player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MasterRecord {
    pub player_id: String,
    pub name_first: String,
    pub name_last: String,
}
