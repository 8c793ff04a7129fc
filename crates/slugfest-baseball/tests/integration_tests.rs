// Integration tests for the batting statistics engine.
//
// These load the CSV fixtures through the public `StatStore` API and check
// the three analytical queries, the trade merger and the combined report
// end-to-end.

use std::collections::HashMap;
use std::path::Path;

use slugfest_baseball::queries::eligibility::eligible_batters;
use slugfest_baseball::queries::improvement::batting_average_differences;
use slugfest_baseball::*;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture(name: &str) -> TableSource {
    TableSource::from(Path::new(FIXTURES).join(name))
}

fn loaded_store() -> StatStore {
    let mut store = StatStore::new();
    store
        .load_batting(&fixture("batting.csv"))
        .expect("batting fixture should load");
    store
        .load_master(&fixture("master.csv"))
        .expect("master fixture should load");
    store
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn fixtures_load_with_blank_at_bats() {
    let store = loaded_store();
    let batting = store.batting().unwrap();
    assert_eq!(batting.len(), 21);
    assert_eq!(store.master().unwrap().len(), 13);

    let pitcher = batting
        .rows()
        .iter()
        .find(|r| r.player_id == "pitcher01")
        .unwrap();
    assert_eq!(pitcher.at_bats, None);
    assert_eq!(pitcher.field("AB"), None);
    assert_eq!(pitcher.field("G"), Some(FieldValue::Int(33)));
}

#[test]
fn second_load_keeps_first_dataset() {
    let mut store = loaded_store();
    let replacement = TableSource::text(
        "playerID,yearID,league,teamID,AB,H,2B,3B,HR,RBI\nnew01,2020,AL,OAK,1,1,0,0,0,0",
    );
    let table = store.load_batting(&replacement).unwrap();
    assert_eq!(table.len(), 21);
}

// ===========================================================================
// Stat merger
// ===========================================================================

#[test]
fn combine_stats_sums_every_player_season() {
    let store = loaded_store();
    let season: Vec<&BattingRecord> = store
        .batting()
        .unwrap()
        .rows()
        .iter()
        .filter(|r| r.year_id == 2009)
        .collect();
    let combined = combine_stats(season.iter().copied());

    let mut distinct: Vec<&str> = Vec::new();
    for row in &season {
        if !distinct.contains(&row.player_id.as_str()) {
            distinct.push(&row.player_id);
        }
    }
    let ids: Vec<&str> = combined.iter().map(|r| r.player_id.as_str()).collect();
    assert_eq!(ids, distinct);

    let mut at_bats: HashMap<&str, i64> = HashMap::new();
    for row in &season {
        *at_bats.entry(&row.player_id).or_insert(0) += row.at_bats.unwrap_or(0);
    }
    for rec in &combined {
        assert_eq!(rec.year_id, 2009);
        assert_eq!(rec.team_id, "TOT");
        assert_eq!(rec.league, "MLB");
        assert_eq!(rec.at_bats.unwrap_or(0), at_bats[rec.player_id.as_str()]);
    }

    let trader = combined.iter().find(|r| r.player_id == "trader01").unwrap();
    assert_eq!(trader.at_bats, Some(500));
    assert_eq!(trader.hits, Some(125));
    assert_eq!(trader.home_runs, Some(18));
    assert_eq!(trader.field("G"), Some(FieldValue::Int(142)));
}

// ===========================================================================
// Most improved batter
// ===========================================================================

#[test]
fn eligible_batters_have_a_line_in_each_year() {
    let store = loaded_store();
    let eligible = eligible_batters(store.batting().unwrap(), 2009, 2010);

    let mut years: HashMap<&str, Vec<i32>> = HashMap::new();
    for row in &eligible {
        years.entry(&row.player_id).or_default().push(row.year_id);
    }
    assert_eq!(years.len(), 4);
    for seasons in years.values() {
        assert_eq!(seasons, &vec![2009, 2010]);
    }
    assert!(!years.contains_key("parttime01"));
    assert!(!years.contains_key("pitcher01"));
}

#[test]
fn differences_ranked_most_improved_first() {
    let store = loaded_store();
    let changes = batting_average_differences(store.batting().unwrap(), 2009, 2010);

    let ids: Vec<&str> = changes.iter().map(|c| c.player_id.as_str()).collect();
    assert_eq!(ids, vec!["jumper01", "trader01", "steady01", "faller01"]);

    for change in &changes {
        assert!(approx(
            change.difference,
            ((change.average2 - change.average1) * 1000.0).round() / 1000.0
        ));
    }

    let trader = &changes[1];
    assert!(approx(trader.average1, 0.25));
    assert!(approx(trader.average2, 0.32));
    assert!(approx(trader.difference, 0.07));
}

#[test]
fn most_improved_batter_is_named() {
    let best = loaded_store().most_improved_batter(2009, 2010).unwrap();
    assert_eq!(best.player_id, "jumper01");
    assert_eq!(best.full_name, "Leaping Larry");
    assert!(approx(best.average1, 0.25));
    assert!(approx(best.average2, 0.35));
    assert!(approx(best.difference, 0.1));
}

#[test]
fn most_improved_without_candidates_fails() {
    let err = loaded_store().most_improved_batter(1950, 1951).unwrap_err();
    assert!(matches!(err, StatsError::NoEligiblePlayers { .. }));
}

// ===========================================================================
// Team slugging
// ===========================================================================

#[test]
fn oakland_slugging_merges_traded_player() {
    let store = loaded_store();
    let stats = store.team_slugging_percentage("OAK", 2007).unwrap();

    let ids: Vec<&str> = stats.iter().map(|s| s.player_id.as_str()).collect();
    assert_eq!(ids, vec!["oakone01", "oaktwo01", "oaktrade01"]);

    assert!(approx(stats[0].slugging_percentage, 0.53));
    assert_eq!(stats[0].full_name, "Oakland Ollie");
    assert_eq!(stats[1].slugging_percentage, 0.0);
    assert!(approx(stats[2].slugging_percentage, 0.447));
    assert_eq!(stats[2].full_name, "Moving Mike");

    assert_eq!(stats, store.team_slugging_percentage("OAK", 2007).unwrap());
}

// ===========================================================================
// Triple crown
// ===========================================================================

#[test]
fn triple_crown_2012() {
    let result = loaded_store().triple_crown_winner(2012).unwrap();
    assert_eq!(
        result.summary(),
        "NL does not have a winner. AL has a winner, Miguel Crown. "
    );
    assert!(matches!(
        &result.leagues[1],
        LeagueOutcome::Winner { player_id, .. } if player_id == "crownal01"
    ));
}

#[test]
fn triple_crown_without_qualifiers() {
    let result = loaded_store().triple_crown_winner(2007).unwrap();
    // oakone01 has exactly 500 at-bats, the inclusive threshold.
    assert_eq!(
        result.summary(),
        "No data for this year.AL has a winner, Oakland Ollie. "
    );

    let result = loaded_store().triple_crown_winner(1900).unwrap();
    assert_eq!(result.summary(), "No data for this year.No data for this year.");
}

// ===========================================================================
// Combined report
// ===========================================================================

#[test]
fn default_report_as_json() {
    let store = loaded_store();
    let report = build_report(&store, &AnalysisRequest::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["most_improved"]["playerID"], "jumper01");
    assert_eq!(json["most_improved"]["full_name"], "Leaping Larry");
    assert_eq!(json["team_stats"].as_array().unwrap().len(), 3);
    assert_eq!(json["team_stats"][2]["playerID"], "oaktrade01");
    assert_eq!(
        json["triple_winner"],
        "NL does not have a winner. AL has a winner, Miguel Crown. "
    );
}
