// Identity resolver: display names from the master table.

use crate::error::{Result, StatsError};
use crate::store::MasterTable;

impl MasterTable {
    /// `"{nameFirst} {nameLast}"` for the given player.
    ///
    /// A missing master record is a data-quality fault and is reported as
    /// `StatsError::UnknownPlayer` rather than papered over.
    pub fn full_name(&self, player_id: &str) -> Result<String> {
        let record = self.get(player_id).ok_or_else(|| StatsError::UnknownPlayer {
            player_id: player_id.to_string(),
        })?;
        Ok(format!("{} {}", record.name_first, record.name_last))
    }
}
