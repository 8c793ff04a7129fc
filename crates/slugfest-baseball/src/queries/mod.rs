// Analytical queries over the loaded tables.
//
// Each query is a free function over `BattingTable` / `MasterTable`; the
// `StatStore` methods below run them against the session's cached tables.

pub mod eligibility;
pub mod improvement;
pub mod slugging;
pub mod triple_crown;

use crate::error::Result;
use crate::records::BattingRecord;
use crate::store::StatStore;

use improvement::{AverageChange, MostImprovedBatter};
use slugging::SluggingRecord;
use triple_crown::TripleCrownResult;

impl StatStore {
    pub fn eligible_batters(&self, first_year: i32, second_year: i32) -> Result<Vec<BattingRecord>> {
        Ok(eligibility::eligible_batters(
            self.batting()?,
            first_year,
            second_year,
        ))
    }

    pub fn batting_average_differences(
        &self,
        first_year: i32,
        second_year: i32,
    ) -> Result<Vec<AverageChange>> {
        Ok(improvement::batting_average_differences(
            self.batting()?,
            first_year,
            second_year,
        ))
    }

    pub fn most_improved_batter(
        &self,
        first_year: i32,
        second_year: i32,
    ) -> Result<MostImprovedBatter> {
        improvement::most_improved_batter(self.batting()?, self.master()?, first_year, second_year)
    }

    pub fn team_slugging_percentage(&self, team: &str, year: i32) -> Result<Vec<SluggingRecord>> {
        slugging::team_slugging_percentage(self.batting()?, self.master()?, team, year)
    }

    pub fn triple_crown_winner(&self, year: i32) -> Result<TripleCrownResult> {
        triple_crown::triple_crown_winner(self.batting()?, self.master()?, year)
    }

    pub fn triple_crown_winner_in<S: AsRef<str>>(
        &self,
        year: i32,
        leagues: &[S],
    ) -> Result<TripleCrownResult> {
        triple_crown::triple_crown_winner_in(self.batting()?, self.master()?, year, leagues)
    }
}
