//! Shared fixtures for the store integration tests.
//!
//! Every context runs against a fresh in-memory database and a manual clock
//! starting on 2024-03-10, so day rollovers are driven by the test.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use chrono::NaiveDate;
use flashcards_local::db::{CardRepository, CollectionRepository, ManualClock, SqliteRepository};
use flashcards_local::AppState;
use flashcard_core::types::{Card, Collection, RawCard};

pub const START_DAY: &str = "2024-03-10";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub struct TestContext {
    pub repo: SqliteRepository,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(date(START_DAY)));
        let repo = SqliteRepository::open_in_memory_with_clock(clock.clone())
            .expect("open in-memory database");
        Self { repo, clock }
    }

    pub fn collection(&self, name: &str) -> Collection {
        self.repo.create_collection(name).expect("create collection")
    }

    pub fn card(&self, collection_id: i64, front: &str, back: &str) -> Card {
        self.repo
            .create_card(collection_id, &RawCard::new(front, back))
            .expect("create card")
    }

    pub fn tagged_card(&self, collection_id: i64, front: &str, tags: &str) -> Card {
        self.repo
            .create_card(collection_id, &RawCard::new(front, "back").with_tags(tags))
            .expect("create card")
    }
}

/// App state sharing a manual clock, for command-level tests.
pub fn app_state() -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(date(START_DAY)));
    let repo = SqliteRepository::open_in_memory_with_clock(clock.clone())
        .expect("open in-memory database");
    (AppState::new(repo), clock)
}

pub fn fronts(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|c| c.front.as_str()).collect()
}
