//! Command-line front end over the command surface.

use crate::commands::{self, DEFAULT_ACTIVITY_DAYS};
use crate::reminder::LogScheduler;
use crate::state::AppState;
use clap::{Parser, Subcommand, ValueEnum};
use flashcard_core::study::SeededShuffle;
use flashcard_core::types::{RawCard, ReminderSettings, SearchQuery, SortOrder};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "flashcards", version, about = "Study flashcards from a local database")]
pub struct Cli {
    /// Database file (overrides FLASHCARDS_DB_PATH).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage collections.
    Collections {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Manage cards.
    Cards {
        #[command(subcommand)]
        action: CardAction,
    },
    /// Import a .txt (`front | back` per line) or .json file into a collection.
    Import { collection: i64, file: PathBuf },
    /// Export a collection as JSON.
    Export {
        collection: i64,
        /// Write to this path instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the study order for a collection.
    Study {
        collection: i64,
        /// Seed for a reproducible order.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Record an answer for a card.
    Answer {
        card: i64,
        #[arg(value_enum)]
        outcome: Outcome,
    },
    /// Show the current streak.
    Streak,
    /// Show answers per day.
    Activity {
        #[arg(long, default_value_t = DEFAULT_ACTIVITY_DAYS)]
        days: usize,
    },
    /// Show or change the daily reminder.
    Reminder {
        #[command(subcommand)]
        action: ReminderAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionAction {
    List,
    Create { name: String },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CardAction {
    Add {
        collection: i64,
        front: String,
        back: String,
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long)]
        image: Option<String>,
    },
    Search {
        collection: i64,
        #[arg(long, default_value = "")]
        query: String,
        /// Required tag; repeat for several.
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        not_mastered: bool,
        #[arg(long, value_enum, default_value_t = Order::Newest)]
        order: Order,
    },
    /// Update fields from a JSON object, e.g. '{"back": "new", "tags": "a,b"}'.
    Update { id: i64, fields: String },
    Master {
        id: i64,
        /// Clear the mastered flag instead of setting it.
        #[arg(long)]
        off: bool,
    },
    Delete { id: i64 },
}

/// Result order for `cards search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Order {
    Alphabetical,
    Oldest,
    Newest,
}

impl From<Order> for SortOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Alphabetical => Self::Alphabetical,
            Order::Oldest => Self::Oldest,
            Order::Newest => Self::Newest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    Hit,
    Miss,
}

#[derive(Debug, Subcommand)]
pub enum ReminderAction {
    Show,
    Set {
        #[arg(long)]
        hour: u32,
        #[arg(long, default_value_t = 0)]
        minute: u32,
        /// Store the time but disable the reminder.
        #[arg(long)]
        off: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Execute one command against the application state.
pub fn run(command: Command, state: &AppState) -> anyhow::Result<()> {
    match command {
        Command::Collections { action } => match action {
            CollectionAction::List => print_json(&commands::list_collections(state)?),
            CollectionAction::Create { name } => {
                print_json(&commands::create_collection(state, &name)?)
            }
            CollectionAction::Delete { id } => Ok(commands::delete_collection(state, id)?),
        },
        Command::Cards { action } => run_card_action(action, state),
        Command::Import { collection, file } => {
            print_json(&commands::import_file(state, collection, &file)?)
        }
        Command::Export { collection, out } => {
            let exported = commands::export_collection(state, collection)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &exported.json)?;
                    tracing::info!(path = %path.display(), "export written");
                    Ok(())
                }
                None => {
                    println!("{}", exported.json);
                    Ok(())
                }
            }
        }
        Command::Study { collection, seed } => {
            let mut order = seed.map_or_else(SeededShuffle::from_entropy, SeededShuffle::new);
            let session = commands::get_study_queue(state, collection, &mut order)?;
            print_json(&session.cards())
        }
        Command::Answer { card, outcome } => {
            print_json(&commands::record_answer(state, card, outcome == Outcome::Hit)?)
        }
        Command::Streak => print_json(&commands::get_streak(state)?),
        Command::Activity { days } => print_json(&commands::get_activity(state, Some(days))?),
        Command::Reminder { action } => match action {
            ReminderAction::Show => print_json(&commands::get_reminder_settings(state)?),
            ReminderAction::Set { hour, minute, off } => {
                let settings = ReminderSettings {
                    enabled: !off,
                    hour,
                    minute,
                };
                print_json(&commands::save_reminder_settings(state, settings, &LogScheduler)?)
            }
        },
    }
}

fn run_card_action(action: CardAction, state: &AppState) -> anyhow::Result<()> {
    match action {
        CardAction::Add {
            collection,
            front,
            back,
            tags,
            image,
        } => {
            let mut card = RawCard::new(front, back).with_tags(tags);
            card.image_uri = image;
            print_json(&commands::create_card(state, collection, &card)?)
        }
        CardAction::Search {
            collection,
            query,
            tags,
            not_mastered,
            order,
        } => {
            let mut search = SearchQuery::new(collection)
                .matching(query)
                .with_tags(tags)
                .ordered_by(order.into());
            search.only_not_mastered = not_mastered;
            print_json(&commands::search_cards(state, &search)?)
        }
        CardAction::Update { id, fields } => {
            let fields: serde_json::Value = serde_json::from_str(&fields)?;
            Ok(commands::update_card_fields(state, id, fields)?)
        }
        CardAction::Master { id, off } => Ok(commands::set_card_mastered(state, id, !off)?),
        CardAction::Delete { id } => Ok(commands::delete_card(state, id)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_flags() {
        let cli = Cli::parse_from([
            "flashcards", "cards", "search", "3", "--query", "verb", "--tag", "vocab", "--tag",
            "a1", "--not-mastered", "--order", "alphabetical",
        ]);
        match cli.command {
            Command::Cards {
                action:
                    CardAction::Search {
                        collection,
                        tags,
                        not_mastered,
                        order,
                        ..
                    },
            } => {
                assert_eq!(collection, 3);
                assert_eq!(tags, vec!["vocab", "a1"]);
                assert!(not_mastered);
                assert_eq!(order, Order::Alphabetical);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_order() {
        let result = Cli::try_parse_from([
            "flashcards", "cards", "search", "3", "--order", "alphabetic",
        ]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::InvalidValue
        );
    }

    #[test]
    fn parses_answer_outcome() {
        let cli = Cli::parse_from(["flashcards", "answer", "12", "miss"]);
        assert!(matches!(
            cli.command,
            Command::Answer {
                card: 12,
                outcome: Outcome::Miss
            }
        ));
    }

    #[test]
    fn run_against_in_memory_state() {
        let state = AppState::new(crate::SqliteRepository::open_in_memory().unwrap());
        run(
            Command::Collections {
                action: CollectionAction::Create {
                    name: "Capitals".to_string(),
                },
            },
            &state,
        )
        .unwrap();
        let collections = commands::list_collections(&state).unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].collection.name, "Capitals");
    }
}
