// Derived rate stats: batting average and slugging percentage.

use crate::records::{BattingRecord, CountingStat};

/// Round to three decimal places, the precision rate stats are reported at.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// `H / AB`, rounded. Zero (or blank) at-bats give 0.0.
pub fn batting_average(record: &BattingRecord) -> f64 {
    let at_bats = record.count_or_zero(CountingStat::AtBats);
    if at_bats <= 0 {
        return 0.0;
    }
    round3(record.count_or_zero(CountingStat::Hits) as f64 / at_bats as f64)
}

/// Total bases per at-bat, rounded. Zero (or blank) at-bats give 0.0.
///
/// Singles are derived as `H - 2B - 3B - HR`; the table is not checked for
/// `H >= 2B + 3B + HR`, so inconsistent rows simply produce odd values.
pub fn slugging_percentage(record: &BattingRecord) -> f64 {
    let at_bats = record.count_or_zero(CountingStat::AtBats);
    if at_bats <= 0 {
        return 0.0;
    }
    let hits = record.count_or_zero(CountingStat::Hits);
    let doubles = record.count_or_zero(CountingStat::Doubles);
    let triples = record.count_or_zero(CountingStat::Triples);
    let home_runs = record.count_or_zero(CountingStat::HomeRuns);

    // Totals in f64: counts may sit near i64::MAX.
    let singles = hits as f64 - doubles as f64 - triples as f64 - home_runs as f64;
    let total_bases =
        singles + 2.0 * doubles as f64 + 3.0 * triples as f64 + 4.0 * home_runs as f64;
    round3(total_bases / at_bats as f64)
}
