//! Tests for match record persistence and the history service.

use diesel::prelude::*;
use tempfile::NamedTempFile;

use tictac_engine::{Outcome, Player};
use tictac_history::{HistoryError, HistoryService, MatchRecord, MatchRepository, RECENT_LIMIT};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, MatchRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = MatchRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

fn winners(records: &[MatchRecord]) -> Vec<&str> {
    records.iter().map(|r| r.winner().as_str()).collect()
}

fn ids(records: &[MatchRecord]) -> Vec<i32> {
    records.iter().map(|r| *r.id()).collect()
}

#[test]
fn test_empty_path_is_rejected() {
    assert!(MatchRepository::new("  ".to_string()).is_err());
}

#[test]
fn test_migrations_are_idempotent() {
    let (_db, repo) = setup_test_db();
    assert_eq!(repo.run_migrations().expect("Second run failed"), 0);
}

#[test]
fn test_create_assigns_id_and_timestamp() {
    let (_db, repo) = setup_test_db();
    let first = repo.create(Outcome::Winner(Player::X)).expect("Create failed");
    let second = repo.create(Outcome::Draw).expect("Create failed");

    assert_eq!(first.winner(), "X");
    assert_eq!(second.winner(), "draw");
    assert!(*first.id() > 0);
    assert_ne!(first.id(), second.id());
    assert!(second.created_at() >= first.created_at());
    assert_eq!(second.outcome().expect("Parse failed"), Outcome::Draw);
}

#[test]
fn test_list_empty() {
    let (_db, repo) = setup_test_db();
    let records = repo.list_recent().expect("List failed");
    assert!(records.is_empty());
}

#[test]
fn test_list_is_newest_first_and_capped() {
    let (_db, repo) = setup_test_db();
    let mut created = Vec::new();
    for i in 0..12 {
        let outcome = Outcome::ALL[i % 3];
        created.push(repo.create(outcome).expect("Create failed"));
    }

    let records = repo.list_recent().expect("List failed");
    assert_eq!(records.len() as i64, RECENT_LIMIT);

    let expected: Vec<i32> = created.iter().rev().take(10).map(|r| *r.id()).collect();
    assert_eq!(ids(&records), expected);
    for pair in records.windows(2) {
        assert!(pair[0].created_at() >= pair[1].created_at());
    }
}

/// Inserts a row with an explicit timestamp, bypassing the clock.
fn insert_at(repo: &MatchRepository, winner: &str, created_at: &str) -> i32 {
    let mut conn = SqliteConnection::establish(repo.db_path()).expect("Failed to connect");
    diesel::sql_query(format!(
        "INSERT INTO match_records (winner, created_at) VALUES ('{winner}', '{created_at}')"
    ))
    .execute(&mut conn)
    .expect("Insert failed");
    diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>("last_insert_rowid()"))
        .get_result(&mut conn)
        .expect("Failed to read inserted id")
}

#[test]
fn test_list_breaks_timestamp_ties_by_descending_id() {
    let (_db, repo) = setup_test_db();
    let newest = insert_at(&repo, "O", "2026-01-02 00:00:00");
    let first_tied = insert_at(&repo, "X", "2026-01-01 12:00:00");
    let second_tied = insert_at(&repo, "draw", "2026-01-01 12:00:00");
    let third_tied = insert_at(&repo, "O", "2026-01-01 12:00:00");
    let oldest = insert_at(&repo, "X", "2025-12-31 00:00:00");

    let records = repo.list_recent().expect("List failed");
    assert_eq!(
        ids(&records),
        vec![newest, third_tied, second_tied, first_tied, oldest]
    );
}

#[test]
fn test_delete_one() {
    let (_db, repo) = setup_test_db();
    let keep = repo.create(Outcome::Winner(Player::O)).expect("Create failed");
    let gone = repo.create(Outcome::Draw).expect("Create failed");

    assert_eq!(repo.delete_one(*gone.id()).expect("Delete failed"), 1);
    assert_eq!(ids(&repo.list_recent().expect("List failed")), vec![*keep.id()]);
}

#[test]
fn test_delete_missing_id_is_noop() {
    let (_db, repo) = setup_test_db();
    repo.create(Outcome::Draw).expect("Create failed");
    let before = repo.list_recent().expect("List failed");

    assert_eq!(repo.delete_one(9_999).expect("Delete failed"), 0);
    assert_eq!(repo.list_recent().expect("List failed"), before);
}

#[test]
fn test_delete_many_ignores_unknown_ids() {
    let (_db, repo) = setup_test_db();
    let a = repo.create(Outcome::Winner(Player::X)).expect("Create failed");
    let b = repo.create(Outcome::Winner(Player::O)).expect("Create failed");
    let c = repo.create(Outcome::Draw).expect("Create failed");

    let deleted = repo
        .delete_many(&[*a.id(), *c.id(), 12_345])
        .expect("Delete failed");
    assert_eq!(deleted, 2);
    assert_eq!(ids(&repo.list_recent().expect("List failed")), vec![*b.id()]);
}

#[test]
fn test_delete_many_empty_is_noop() {
    let (_db, repo) = setup_test_db();
    repo.create(Outcome::Draw).expect("Create failed");
    assert_eq!(repo.delete_many(&[]).expect("Delete failed"), 0);
    assert_eq!(repo.count().expect("Count failed"), 1);
}

#[test]
fn test_delete_many_spans_statement_chunks() {
    let (_db, repo) = setup_test_db();
    let target = repo.create(Outcome::Draw).expect("Create failed");
    let survivor = repo.create(Outcome::Draw).expect("Create failed");

    let mut requested: Vec<i32> = (100_000..101_200).collect();
    requested.push(*target.id());
    assert_eq!(repo.delete_many(&requested).expect("Delete failed"), 1);
    assert_eq!(ids(&repo.list_recent().expect("List failed")), vec![*survivor.id()]);
}

#[test]
fn test_seed_populates_empty_store_in_order() {
    let (_db, repo) = setup_test_db();
    let seeded = repo.seed_if_empty().expect("Seed failed");
    assert_eq!(winners(&seeded), vec!["X", "O", "draw"]);
    assert!(seeded.windows(2).all(|pair| pair[0].id() < pair[1].id()));

    let listed = repo.list_recent().expect("List failed");
    assert_eq!(winners(&listed), vec!["draw", "O", "X"]);
}

#[test]
fn test_seed_skips_non_empty_store() {
    let (_db, repo) = setup_test_db();
    repo.create(Outcome::Winner(Player::O)).expect("Create failed");
    assert!(repo.seed_if_empty().expect("Seed failed").is_empty());
    assert_eq!(repo.count().expect("Count failed"), 1);
}

#[test]
fn test_seed_runs_once() {
    let (_db, repo) = setup_test_db();
    repo.seed_if_empty().expect("Seed failed");
    assert!(repo.seed_if_empty().expect("Seed failed").is_empty());
    assert_eq!(repo.count().expect("Count failed"), 3);
}

#[test]
fn test_concurrent_creates_get_unique_ids() {
    let (_db, repo) = setup_test_db();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let repo = repo.clone();
            std::thread::spawn(move || {
                (0..5)
                    .map(|_| *repo.create(Outcome::Draw).expect("Create failed").id())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut all: Vec<i32> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("Thread panicked"))
        .collect();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), 20);
    assert_eq!(repo.count().expect("Count failed"), 20);
}

#[test]
fn test_service_create_then_list_puts_it_first() {
    let (_db, repo) = setup_test_db();
    let service = HistoryService::new(repo);
    service.bootstrap().expect("Bootstrap failed");

    let record = service.create("draw").expect("Create failed");
    let listed = service.list().expect("List failed");
    assert_eq!(listed[0].winner(), "draw");
    assert_eq!(listed[0].id(), record.id());
}

#[test]
fn test_service_rejects_unknown_winner() {
    let (_db, repo) = setup_test_db();
    let service = HistoryService::new(repo.clone());

    for bad in ["x", "Draw", "", "nobody"] {
        match service.create(bad) {
            Err(HistoryError::Validation(err)) => {
                assert_eq!(err.field.as_deref(), Some("winner"));
            }
            other => panic!("Expected validation error for {bad:?}, got {other:?}"),
        }
    }
    assert_eq!(repo.count().expect("Count failed"), 0);
}

#[test]
fn test_service_bootstrap_seeds_fresh_database() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let service = HistoryService::new(MatchRepository::new(db_path).expect("Repository failed"));

    let seeded = service.bootstrap().expect("Bootstrap failed");
    assert_eq!(winners(&seeded), vec!["X", "O", "draw"]);
    assert!(service.bootstrap().expect("Second bootstrap failed").is_empty());
}

#[test]
fn test_service_deletes_are_noops_for_missing_ids() {
    let (_db, repo) = setup_test_db();
    let service = HistoryService::new(repo);
    service.bootstrap().expect("Bootstrap failed");
    let before = service.list().expect("List failed");

    service.delete_one(424_242).expect("Delete failed");
    service.delete_many(&[]).expect("Delete failed");
    assert_eq!(service.list().expect("List failed"), before);
}

#[test]
fn test_record_serializes_camel_case() {
    let (_db, repo) = setup_test_db();
    let record = repo.create(Outcome::Winner(Player::O)).expect("Create failed");

    let json = serde_json::to_value(&record).expect("Serialize failed");
    assert_eq!(json["id"], *record.id());
    assert_eq!(json["winner"], "O");
    assert!(json["createdAt"].is_string());

    let back: MatchRecord = serde_json::from_value(json).expect("Deserialize failed");
    assert_eq!(back, record);
}
