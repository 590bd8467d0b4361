//! Collection store tests.

mod common;

use common::TestContext;
use flashcards_local::db::{CardRepository, CollectionRepository, DbError};
use flashcard_core::types::CollectionStats;
use pretty_assertions::assert_eq;

#[test]
fn create_trims_name() {
    let ctx = TestContext::new();
    let collection = ctx.collection("  Spanish verbs  ");
    assert_eq!(collection.name, "Spanish verbs");

    let stored = ctx.repo.get_collection(collection.id).unwrap().unwrap();
    assert_eq!(stored, collection);
}

#[test]
fn create_rejects_blank_name() {
    let ctx = TestContext::new();
    let result = ctx.repo.create_collection("   ");
    assert!(matches!(result, Err(DbError::EmptyField { field: "name" })));
    assert!(ctx.repo.list_collections().unwrap().is_empty());
}

#[test]
fn list_is_newest_first() {
    let ctx = TestContext::new();
    let first = ctx.collection("first");
    let second = ctx.collection("second");
    let third = ctx.collection("third");

    let ids: Vec<i64> = ctx
        .repo
        .list_collections()
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn delete_cascades_to_cards_only_of_that_collection() {
    let ctx = TestContext::new();
    let doomed = ctx.collection("doomed");
    let kept = ctx.collection("kept");
    ctx.card(doomed.id, "q1", "a1");
    ctx.card(doomed.id, "q2", "a2");
    let survivor = ctx.card(kept.id, "q3", "a3");

    ctx.repo.delete_collection(doomed.id).unwrap();

    assert!(ctx.repo.get_collection(doomed.id).unwrap().is_none());
    assert!(ctx.repo.get_cards_by_collection(doomed.id).unwrap().is_empty());
    let orphans: i64 = ctx
        .repo
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM cards WHERE collection_id NOT IN (SELECT id FROM collections)",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
    assert_eq!(
        ctx.repo.get_cards_by_collection(kept.id).unwrap(),
        vec![survivor]
    );
}

#[test]
fn delete_is_atomic_when_second_statement_fails() {
    let ctx = TestContext::new();
    let collection = ctx.collection("guarded");
    ctx.card(collection.id, "q", "a");
    ctx.repo
        .conn()
        .execute_batch(
            "CREATE TRIGGER keep_collections BEFORE DELETE ON collections
             BEGIN SELECT RAISE(ABORT, 'collections are read-only'); END;",
        )
        .unwrap();

    let result = ctx.repo.delete_collection(collection.id);
    assert!(matches!(result, Err(DbError::Sqlite(_))));

    assert!(ctx.repo.get_collection(collection.id).unwrap().is_some());
    assert_eq!(ctx.repo.get_cards_by_collection(collection.id).unwrap().len(), 1);
}

#[test]
fn delete_missing_collection_is_noop() {
    let ctx = TestContext::new();
    let collection = ctx.collection("still here");
    ctx.repo.delete_collection(collection.id + 100).unwrap();
    assert_eq!(ctx.repo.list_collections().unwrap(), vec![collection]);
}

#[test]
fn stats_on_empty_collection() {
    let ctx = TestContext::new();
    let collection = ctx.collection("empty");
    assert_eq!(
        ctx.repo.collection_stats(collection.id).unwrap(),
        CollectionStats {
            total: 0,
            mastered: 0,
            percent: 0
        }
    );
}

#[test]
fn stats_count_mastered_cards() {
    let ctx = TestContext::new();
    let collection = ctx.collection("progress");
    let a = ctx.card(collection.id, "a", "1");
    ctx.card(collection.id, "b", "2");
    let c = ctx.card(collection.id, "c", "3");
    ctx.repo.set_mastered(a.id, true).unwrap();
    ctx.repo.set_mastered(c.id, true).unwrap();

    assert_eq!(
        ctx.repo.collection_stats(collection.id).unwrap(),
        CollectionStats {
            total: 3,
            mastered: 2,
            percent: 67
        }
    );
}

#[test]
fn list_with_stats_joins_each_collection() {
    let ctx = TestContext::new();
    let empty = ctx.collection("empty");
    let full = ctx.collection("full");
    let card = ctx.card(full.id, "q", "a");
    ctx.repo.set_mastered(card.id, true).unwrap();

    let rows = ctx.repo.list_collections_with_stats().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].collection, full);
    assert_eq!(rows[0].stats, CollectionStats::new(1, 1));
    assert_eq!(rows[1].collection, empty);
    assert_eq!(rows[1].stats, CollectionStats::new(0, 0));
}
