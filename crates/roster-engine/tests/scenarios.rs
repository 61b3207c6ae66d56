//! End-to-end trade, lookup and delete scenarios.
//!
//! Most tests run against `ScriptedStore` so store calls can be counted and
//! faults injected per team; the last one runs on a file-backed SQLite store.

use std::collections::HashMap;
use std::sync::Arc;

use roster_engine::codec::decode;
use roster_engine::test_support::{sample_reference, ScriptedStore, StoreCalls};
use roster_engine::{compute_score, EngineError, ReferenceData, RosterEngine};
use roster_models::player::PlayerAttributes;
use roster_models::request::{DeleteRequest, LookupMode, LookupRequest, TradeRequest};
use roster_models::store_schema::TeamKey;
use roster_models::team::{Pick, ScoreVector};
use roster_store::SqliteStore;

fn ids(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix}{i}")).collect()
}

fn lakers_celtics_trade(session_id: &str) -> TradeRequest {
    TradeRequest {
        session_id: session_id.to_string(),
        trade_teams: vec!["Lakers".to_string(), "Celtics".to_string()],
        new_rosters: vec![ids("p", 9), ids("q", 6)],
        picks: vec![
            vec![Pick::new("2026-R1-unprotected")],
            vec![Pick::new("2027-R2-top-40")],
        ],
        team: Some("Lakers".to_string()),
    }
}

fn lookup(session_id: &str, team: &str, mode: LookupMode) -> LookupRequest {
    LookupRequest {
        session_id: session_id.to_string(),
        team: team.to_string(),
        mode,
    }
}

#[test]
fn five_player_roster_scores_floor_averages() {
    let category_rows = [
        [6, 8, 2, 4, 0, 1],
        [8, 8, 4, 4, 0, 1],
        [10, 8, 6, 4, 10, 1],
        [12, 8, 8, 4, 0, 1],
        [14, 8, 10, 4, 0, 1],
    ];
    let mut players = HashMap::new();
    for (i, c) in category_rows.iter().enumerate() {
        players.insert(
            format!("r{}", i + 1),
            PlayerAttributes {
                overall: 70 + i as u32,
                inside_scoring: c[0],
                outside_scoring: c[1],
                athleticism: c[2],
                playmaking: c[3],
                rebounding: c[4],
                defending: c[5],
            },
        );
    }
    let reference = ReferenceData::new(players, HashMap::new());

    let score = compute_score(&ids("r", 5), &reference).unwrap();
    assert_eq!(score, ScoreVector::from_categories([10, 8, 6, 4, 2, 1]));
}

#[tokio::test]
async fn trade_scores_each_side_from_its_own_roster() {
    let store = Arc::new(ScriptedStore::new());
    let engine = RosterEngine::new(store.clone(), Arc::new(sample_reference()));

    let outcome = engine.trade(&lakers_celtics_trade("s1")).await.unwrap();

    // Lakers: top 8 of p1..p9 (p9 has the lowest overall)
    assert_eq!(outcome.scores[0], ScoreVector::from_categories([45, 22, 4, 9, 13, 18]));
    // Celtics: all six q players
    assert_eq!(outcome.scores[1], ScoreVector::from_categories([24, 3, 3, 3, 3, 3]));
    assert!(outcome.transaction.is_success());
    assert_eq!(store.calls().puts, 2);

    let lakers = decode(&store.record(&TeamKey::new("s1", "Lakers")).unwrap()).unwrap();
    assert_eq!(lakers.roster, ids("p", 9));
    assert_eq!(lakers.picks, vec![Pick::new("2026-R1-unprotected")]);
    assert_eq!(lakers.score, outcome.scores[0]);

    let celtics = decode(&store.record(&TeamKey::new("s1", "Celtics")).unwrap()).unwrap();
    assert_eq!(celtics.roster, ids("q", 6));
    assert_eq!(celtics.score, outcome.scores[1]);

    let response = outcome.to_response();
    assert_eq!(response.current_team_score, Some(outcome.scores[0].clone()));
}

#[tokio::test]
async fn store_lookup_before_any_trade_is_not_found_but_seed_is_available() {
    let store = Arc::new(ScriptedStore::new());
    let engine = RosterEngine::new(store, Arc::new(sample_reference()));

    let result = engine.lookup(&lookup("s1", "Lakers", LookupMode::Store)).await;
    assert!(matches!(result, Err(EngineError::NotFound(_))));

    let seeded = engine
        .lookup(&lookup("s1", "Lakers", LookupMode::StaticFallback))
        .await
        .unwrap();
    let seeded_elsewhere = engine
        .lookup(&lookup("another-session", "Lakers", LookupMode::StaticFallback))
        .await
        .unwrap();
    assert_eq!(seeded, seeded_elsewhere);
    assert_eq!(seeded.players, ids("p", 8));
}

#[tokio::test]
async fn one_failed_write_still_returns_both_scores() {
    let store = Arc::new(ScriptedStore::failing_on(&["Celtics"]));
    let engine = RosterEngine::new(store.clone(), Arc::new(sample_reference()));

    let outcome = engine.trade(&lakers_celtics_trade("s1")).await.unwrap();

    assert_eq!(outcome.scores[0], ScoreVector::from_categories([45, 22, 4, 9, 13, 18]));
    assert_eq!(outcome.scores[1], ScoreVector::from_categories([24, 3, 3, 3, 3, 3]));
    assert!(!outcome.transaction.is_success());

    let failures: Vec<_> = outcome.transaction.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "Celtics");
    assert!(matches!(failures[0].1, EngineError::Store(_)));

    // No rollback: the Lakers write landed
    assert!(store.record(&TeamKey::new("s1", "Lakers")).is_some());
    assert!(store.record(&TeamKey::new("s1", "Celtics")).is_none());

    let response = outcome.to_response();
    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.failures[0].team, "Celtics");
}

#[tokio::test]
async fn later_trade_replaces_earlier_record() {
    let store = Arc::new(ScriptedStore::new());
    let engine = RosterEngine::new(store.clone(), Arc::new(sample_reference()));

    engine.trade(&lakers_celtics_trade("s1")).await.unwrap();

    let mut second = lakers_celtics_trade("s1");
    second.new_rosters = vec![vec!["p1".to_string()], ids("q", 2)];
    second.picks = vec![vec![], vec![]];
    engine.trade(&second).await.unwrap();

    let lakers = engine
        .lookup(&lookup("s1", "Lakers", LookupMode::Store))
        .await
        .unwrap();
    assert_eq!(lakers.players, vec!["p1".to_string()]);
    assert!(lakers.picks.is_empty());
    assert_eq!(lakers.score, ScoreVector::from_categories([10, 5, 1, 2, 3, 4]));
}

#[tokio::test]
async fn empty_delete_makes_no_store_calls() {
    let store = Arc::new(ScriptedStore::new());
    let engine = RosterEngine::new(store.clone(), Arc::new(sample_reference()));

    engine
        .delete(&DeleteRequest {
            session_id: "s1".to_string(),
            teams: vec![],
        })
        .await
        .unwrap();
    assert_eq!(store.calls(), StoreCalls::default());
}

#[tokio::test]
async fn full_cycle_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.db");
    let store = Arc::new(SqliteStore::open(path.to_str().unwrap()).unwrap());
    let engine = RosterEngine::new(store.clone(), Arc::new(sample_reference()));

    let outcome = engine.trade(&lakers_celtics_trade("s1")).await.unwrap();
    assert!(outcome.transaction.is_success());
    assert_eq!(store.count().unwrap(), 2);

    let celtics = engine
        .lookup(&lookup("s1", "Celtics", LookupMode::Store))
        .await
        .unwrap();
    assert_eq!(celtics.score, outcome.scores[1]);
    assert_eq!(celtics.picks, vec![Pick::new("2027-R2-top-40")]);

    engine
        .delete(&DeleteRequest {
            session_id: "s1".to_string(),
            teams: vec!["Lakers".to_string(), "Celtics".to_string(), "Knicks".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(store.count().unwrap(), 0);
}
