// Error types for table loading and statistical queries.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

// ---------------------------------------------------------------------------
// Data format errors
// ---------------------------------------------------------------------------

/// Raised while turning raw delimited text into a typed table.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {table} table: {source}")]
    Csv {
        table: &'static str,
        source: csv::Error,
    },

    #[error("{table} table has no header row")]
    Empty { table: &'static str },

    #[error("{table} table is missing required column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("{table} table, line {line}: column `{column}` is blank")]
    MissingValue {
        table: &'static str,
        line: u64,
        column: &'static str,
    },

    #[error("{table} table, line {line}: column `{column}` is not an integer: {value:?}")]
    InvalidNumber {
        table: &'static str,
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("master table lists player `{player_id}` more than once")]
    DuplicatePlayer { player_id: String },
}

// ---------------------------------------------------------------------------
// Crate-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),

    #[error("no master record for player `{player_id}`")]
    UnknownPlayer { player_id: String },

    #[error("no eligible players for {query}")]
    NoEligiblePlayers { query: String },

    #[error("{table} table has not been loaded")]
    TableNotLoaded { table: &'static str },
}
