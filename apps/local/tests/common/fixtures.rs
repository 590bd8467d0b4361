//! Test data builders.

use flashcard_core::types::RawCard;

/// Three usable records and two with an empty side.
pub fn mixed_records() -> Vec<RawCard> {
    vec![
        RawCard::new("Capital of France", "Paris").with_tags("Geo, Europe"),
        RawCard::new("   ", "orphan back"),
        RawCard::new("Capital of Japan", "Tokyo").with_image("file:///tokyo.png"),
        RawCard::new("", ""),
        RawCard::new("  Capital of Peru ", " Lima "),
    ]
}

/// Text import with two valid lines and three rejected ones.
pub const TEXT_IMPORT: &str = "\
Capital of France | Paris

no separator here
Capital of Spain|Madrid
 | missing front
missing back |
";

/// Minimal JSON import in the export shape.
pub const JSON_IMPORT: &str = r#"{
  "version": 1,
  "cards": [
    {"front": "hola", "back": "hello", "tags": "Spanish, Greeting"},
    {"front": "adios", "back": "goodbye", "image_uri": "file:///wave.png"},
    {"front": "", "back": "dropped"}
  ]
}"#;
