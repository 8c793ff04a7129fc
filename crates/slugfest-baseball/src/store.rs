// Tabular store: loads the batting and master CSV tables once per session.
//
// A `StatStore` is owned by the caller and lives for one analysis session.
// The first successful load of each table wins; later loads are ignored and
// hand back the cached table.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{DataFormatError, Result, StatsError};
use crate::records::{
    batting_columns, master_columns, parse_count, BattingRecord, CountingStat, MasterRecord,
};

const BATTING: &str = "batting";
const MASTER: &str = "master";

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where a table's delimited text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Path(PathBuf),
    Text(String),
}

impl TableSource {
    pub fn text(content: impl Into<String>) -> Self {
        TableSource::Text(content.into())
    }

    fn read_to_string(&self) -> std::result::Result<String, DataFormatError> {
        match self {
            TableSource::Path(path) => {
                std::fs::read_to_string(path).map_err(|e| DataFormatError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
            TableSource::Text(content) => Ok(content.clone()),
        }
    }
}

impl From<PathBuf> for TableSource {
    fn from(path: PathBuf) -> Self {
        TableSource::Path(path)
    }
}

impl From<&Path> for TableSource {
    fn from(path: &Path) -> Self {
        TableSource::Path(path.to_path_buf())
    }
}

fn read_stream<R: Read>(mut rdr: R) -> std::result::Result<String, DataFormatError> {
    let mut content = String::new();
    rdr.read_to_string(&mut content)
        .map_err(|e| DataFormatError::Io {
            path: "<stream>".into(),
            source: e,
        })?;
    Ok(content)
}

/// Build a CSV reader over the trimmed content and return it with its header row.
fn open_csv<'a>(
    content: &'a str,
    table: &'static str,
) -> std::result::Result<(csv::Reader<&'a [u8]>, StringRecord), DataFormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.trim().as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| DataFormatError::Csv { table, source: e })?
        .clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataFormatError::Empty { table });
    }
    Ok((reader, headers))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn find_column(
    headers: &StringRecord,
    table: &'static str,
    column: &'static str,
) -> std::result::Result<usize, DataFormatError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or(DataFormatError::MissingColumn { table, column })
}

// ---------------------------------------------------------------------------
// Batting table
// ---------------------------------------------------------------------------

/// Column positions resolved from the batting header row.
struct BattingColumns {
    player_id: usize,
    year_id: usize,
    team_id: usize,
    league: usize,
    counts: Vec<(CountingStat, usize)>,
    extra: Vec<(usize, String)>,
}

fn find_batting_columns(
    headers: &StringRecord,
) -> std::result::Result<BattingColumns, DataFormatError> {
    use batting_columns as col;

    let player_id = find_column(headers, BATTING, col::PLAYER_ID)?;
    let year_id = find_column(headers, BATTING, col::YEAR_ID)?;
    let team_id = find_column(headers, BATTING, col::TEAM_ID)?;
    let league = headers
        .iter()
        .position(|h| h == col::LEAGUE || h == col::LEAGUE_ALIAS)
        .ok_or(DataFormatError::MissingColumn {
            table: BATTING,
            column: col::LEAGUE,
        })?;

    let mut counts = Vec::with_capacity(CountingStat::ALL.len());
    for stat in CountingStat::ALL {
        counts.push((stat, find_column(headers, BATTING, stat.column())?));
    }

    let claimed = |i: usize| {
        i == player_id
            || i == year_id
            || i == team_id
            || i == league
            || counts.iter().any(|(_, idx)| *idx == i)
    };
    let extra = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| !claimed(*i) && !h.is_empty())
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    Ok(BattingColumns {
        player_id,
        year_id,
        team_id,
        league,
        counts,
        extra,
    })
}

fn parse_batting_row(
    record: &StringRecord,
    cols: &BattingColumns,
) -> std::result::Result<BattingRecord, DataFormatError> {
    use batting_columns as col;

    let line = line_of(record);
    let cell = |idx: usize| record.get(idx).unwrap_or("");

    let player_id = cell(cols.player_id);
    if player_id.is_empty() {
        return Err(DataFormatError::MissingValue {
            table: BATTING,
            line,
            column: col::PLAYER_ID,
        });
    }

    let year_raw = cell(cols.year_id);
    if year_raw.is_empty() {
        return Err(DataFormatError::MissingValue {
            table: BATTING,
            line,
            column: col::YEAR_ID,
        });
    }
    let year_id = year_raw
        .parse::<i32>()
        .map_err(|_| DataFormatError::InvalidNumber {
            table: BATTING,
            line,
            column: col::YEAR_ID,
            value: year_raw.to_string(),
        })?;

    let mut row = BattingRecord {
        player_id: player_id.to_string(),
        year_id,
        team_id: cell(cols.team_id).to_string(),
        league: cell(cols.league).to_string(),
        ..BattingRecord::default()
    };

    for (stat, idx) in &cols.counts {
        let raw = cell(*idx);
        if raw.is_empty() {
            continue;
        }
        let value = parse_count(raw).ok_or_else(|| DataFormatError::InvalidNumber {
            table: BATTING,
            line,
            column: stat.column(),
            value: raw.to_string(),
        })?;
        *row.count_mut(*stat) = Some(value);
    }

    row.extra = cols
        .extra
        .iter()
        .map(|(idx, name)| (name.clone(), cell(*idx).to_string()))
        .collect::<BTreeMap<_, _>>();

    Ok(row)
}

/// Every stint row of the batting table, in file order.
#[derive(Debug, Clone, Default)]
pub struct BattingTable {
    rows: Vec<BattingRecord>,
}

impl BattingTable {
    pub fn from_records(rows: Vec<BattingRecord>) -> Self {
        BattingTable { rows }
    }

    /// Parse delimited text with a header row.
    pub fn parse(content: &str) -> std::result::Result<Self, DataFormatError> {
        let (mut reader, headers) = open_csv(content, BATTING)?;
        let cols = find_batting_columns(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| DataFormatError::Csv {
                table: BATTING,
                source: e,
            })?;
            rows.push(parse_batting_row(&record, &cols)?);
        }
        Ok(BattingTable { rows })
    }

    pub fn from_reader<R: Read>(rdr: R) -> std::result::Result<Self, DataFormatError> {
        Self::parse(&read_stream(rdr)?)
    }

    pub fn rows(&self) -> &[BattingRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Master table
// ---------------------------------------------------------------------------

/// Master CSV row. Only the identity columns are read; the Lahman master
/// file carries many more, which serde ignores.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawMaster {
    playerID: String,
    #[serde(default)]
    nameFirst: String,
    #[serde(default)]
    nameLast: String,
}

/// Player identities keyed by `playerID`.
#[derive(Debug, Clone, Default)]
pub struct MasterTable {
    records: Vec<MasterRecord>,
    index: HashMap<String, usize>,
}

impl MasterTable {
    /// Build a table, rejecting a `playerID` that appears twice.
    pub fn from_records(
        records: Vec<MasterRecord>,
    ) -> std::result::Result<Self, DataFormatError> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, rec) in records.iter().enumerate() {
            if index.insert(rec.player_id.clone(), i).is_some() {
                return Err(DataFormatError::DuplicatePlayer {
                    player_id: rec.player_id.clone(),
                });
            }
        }
        Ok(MasterTable { records, index })
    }

    /// Parse delimited text with a header row. All fields stay strings.
    pub fn parse(content: &str) -> std::result::Result<Self, DataFormatError> {
        let (mut reader, headers) = open_csv(content, MASTER)?;
        find_column(&headers, MASTER, master_columns::PLAYER_ID)?;
        find_column(&headers, MASTER, master_columns::NAME_FIRST)?;
        find_column(&headers, MASTER, master_columns::NAME_LAST)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| DataFormatError::Csv {
                table: MASTER,
                source: e,
            })?;
            let raw: RawMaster = record
                .deserialize(Some(&headers))
                .map_err(|e| DataFormatError::Csv {
                    table: MASTER,
                    source: e,
                })?;
            if raw.playerID.is_empty() {
                return Err(DataFormatError::MissingValue {
                    table: MASTER,
                    line: line_of(&record),
                    column: master_columns::PLAYER_ID,
                });
            }
            records.push(MasterRecord {
                player_id: raw.playerID,
                name_first: raw.nameFirst,
                name_last: raw.nameLast,
            });
        }
        Self::from_records(records)
    }

    pub fn from_reader<R: Read>(rdr: R) -> std::result::Result<Self, DataFormatError> {
        Self::parse(&read_stream(rdr)?)
    }

    pub fn get(&self, player_id: &str) -> Option<&MasterRecord> {
        self.index.get(player_id).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[MasterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Session-scoped holder of the two tables.
///
/// Create one store per analysis session. Sharing a store between callers
/// means they all see whichever dataset was loaded first.
#[derive(Debug, Default)]
pub struct StatStore {
    batting: Option<BattingTable>,
    master: Option<MasterTable>,
}

impl StatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with both tables already in place.
    pub fn with_tables(batting: BattingTable, master: MasterTable) -> Self {
        StatStore {
            batting: Some(batting),
            master: Some(master),
        }
    }

    /// Load the batting table unless one is already cached.
    pub fn load_batting(&mut self, source: &TableSource) -> Result<&BattingTable> {
        self.cache_batting(|| source.read_to_string())
    }

    /// Load the batting table from a byte stream unless one is already
    /// cached. A cached table leaves the stream unread.
    pub fn load_batting_from_reader<R: Read>(&mut self, rdr: R) -> Result<&BattingTable> {
        self.cache_batting(|| read_stream(rdr))
    }

    /// Load the master table unless one is already cached.
    pub fn load_master(&mut self, source: &TableSource) -> Result<&MasterTable> {
        self.cache_master(|| source.read_to_string())
    }

    /// Load the master table from a byte stream unless one is already cached.
    pub fn load_master_from_reader<R: Read>(&mut self, rdr: R) -> Result<&MasterTable> {
        self.cache_master(|| read_stream(rdr))
    }

    fn cache_batting<F>(&mut self, read: F) -> Result<&BattingTable>
    where
        F: FnOnce() -> std::result::Result<String, DataFormatError>,
    {
        if self.batting.is_some() {
            warn!("batting table already loaded; ignoring new source");
        } else {
            let table = BattingTable::parse(&read()?)?;
            debug!(rows = table.len(), "batting table loaded");
            self.batting = Some(table);
        }
        self.batting()
    }

    fn cache_master<F>(&mut self, read: F) -> Result<&MasterTable>
    where
        F: FnOnce() -> std::result::Result<String, DataFormatError>,
    {
        if self.master.is_some() {
            warn!("master table already loaded; ignoring new source");
        } else {
            let table = MasterTable::parse(&read()?)?;
            debug!(rows = table.len(), "master table loaded");
            self.master = Some(table);
        }
        self.master()
    }

    pub fn batting(&self) -> Result<&BattingTable> {
        self.batting
            .as_ref()
            .ok_or(StatsError::TableNotLoaded { table: BATTING })
    }

    pub fn master(&self) -> Result<&MasterTable> {
        self.master
            .as_ref()
            .ok_or(StatsError::TableNotLoaded { table: MASTER })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
