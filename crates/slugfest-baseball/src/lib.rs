// Baseball batting statistics engine.
//
// Loads a per-stint batting table and a player master table, reconciles
// mid-season trades, and answers the most-improved, team-slugging and
// triple-crown questions.

pub mod error;
pub mod identity;
pub mod merge;
pub mod metrics;
pub mod queries;
pub mod records;
pub mod report;
pub mod store;

pub use error::{DataFormatError, Result, StatsError};
pub use merge::{combine_stats, CombinedRecord};
pub use queries::improvement::{AverageChange, MostImprovedBatter};
pub use queries::slugging::SluggingRecord;
pub use queries::triple_crown::{LeagueOutcome, TripleCrownResult};
pub use records::{BattingRecord, FieldValue, MasterRecord};
pub use report::{build_report, AnalysisReport, AnalysisRequest};
pub use store::{BattingTable, MasterTable, StatStore, TableSource};
