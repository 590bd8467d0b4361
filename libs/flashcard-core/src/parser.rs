//! Import parsers for plain-text and JSON card files.
//!
//! # Text format
//! ```text
//! Capital of France | Paris
//! 2 + 2 | 4
//! ```
//! One card per line, front and back split at the first `|`. Blank lines are
//! ignored; lines without a `|` or with an empty side are skipped and counted.
//!
//! # JSON format
//! Any object with a `cards` array of `{front, back, tags?, image_uri?}`.
//! A collection export is accepted as-is.

use crate::error::{ParseError, Result};
use crate::types::RawCard;
use serde_json::Value;

/// Cards read from a text file plus the number of rejected lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextImport {
    pub cards: Vec<RawCard>,
    pub skipped: usize,
}

/// Parse text content into raw cards.
///
/// Fails with `EmptyFile` when there is no non-blank line and with
/// `NoValidLines` when every non-blank line was skipped.
pub fn parse_text(content: &str) -> Result<TextImport> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut import = TextImport::default();
    let mut seen_lines = 0;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        seen_lines += 1;

        match parse_line(line) {
            Some(card) => import.cards.push(card),
            None => import.skipped += 1,
        }
    }

    if seen_lines == 0 {
        return Err(ParseError::EmptyFile);
    }
    if import.cards.is_empty() {
        return Err(ParseError::NoValidLines {
            skipped: import.skipped,
        });
    }
    Ok(import)
}

fn parse_line(line: &str) -> Option<RawCard> {
    let (front, back) = line.split_once('|')?;
    let card = RawCard::new(front.trim(), back.trim());
    card.is_valid().then_some(card)
}

/// Parse JSON text, mapping syntax errors to `InvalidJson`.
pub fn parse_json(content: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

/// Map the `cards` array of a JSON document to raw cards.
///
/// Permissive: a missing or non-array `cards` yields nothing, non-object
/// entries become empty cards (rejected later), `tags` may be a string or an
/// array of strings, and a missing `image_uri` becomes `None`.
pub fn cards_from_json(value: &Value) -> Vec<RawCard> {
    let Some(entries) = value.get("cards").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries.iter().map(card_from_json).collect()
}

fn card_from_json(entry: &Value) -> RawCard {
    let text = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let tags = match entry.get("tags") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    };

    let image_uri = entry
        .get("image_uri")
        .and_then(Value::as_str)
        .filter(|uri| !uri.is_empty())
        .map(str::to_string);

    RawCard {
        front: text("front"),
        back: text("back"),
        tags,
        image_uri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_single_line() {
        let import = parse_text("Capital of France | Paris").unwrap();
        assert_eq!(import.cards, vec![RawCard::new("Capital of France", "Paris")]);
        assert_eq!(import.skipped, 0);
    }

    #[test]
    fn split_at_first_pipe() {
        let import = parse_text("a | b | c").unwrap();
        assert_eq!(import.cards[0].front, "a");
        assert_eq!(import.cards[0].back, "b | c");
    }

    #[test]
    fn skips_and_counts_bad_lines() {
        let input = "Q1 | A1\n\nno separator\n | missing front\nQ2 |\r\nQ3|A3\n";
        let import = parse_text(input).unwrap();
        assert_eq!(import.cards.len(), 2);
        assert_eq!(import.cards[1], RawCard::new("Q3", "A3"));
        assert_eq!(import.skipped, 3);
    }

    #[test]
    fn strips_byte_order_mark() {
        let import = parse_text("\u{feff}Hola | Hello").unwrap();
        assert_eq!(import.cards[0].front, "Hola");
    }

    #[test]
    fn reject_blank_file() {
        assert_eq!(parse_text(""), Err(ParseError::EmptyFile));
        assert_eq!(parse_text("\n   \n\t\n"), Err(ParseError::EmptyFile));
    }

    #[test]
    fn reject_file_without_valid_lines() {
        assert_eq!(
            parse_text("just text\n| only back\n"),
            Err(ParseError::NoValidLines { skipped: 2 })
        );
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(parse_json("{cards: ["), Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn json_entries_are_mapped_permissively() {
        let value = json!({
            "cards": [
                {"front": "F1", "back": "B1"},
                {"front": "F2", "back": "B2", "tags": "Vocab", "image_uri": "file:///img.png"},
                {"front": "F3", "back": "B3", "tags": ["a", "B"], "image_uri": null},
                "not an object",
                {"front": 5, "back": "B5"}
            ]
        });
        let cards = cards_from_json(&value);
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0], RawCard::new("F1", "B1"));
        assert_eq!(
            cards[1],
            RawCard::new("F2", "B2")
                .with_tags("Vocab")
                .with_image("file:///img.png")
        );
        assert_eq!(cards[2].tags, "a,B");
        assert_eq!(cards[2].image_uri, None);
        assert!(!cards[3].is_valid());
        assert!(!cards[4].is_valid());
    }

    #[test]
    fn json_without_cards() {
        assert!(cards_from_json(&json!({"collection": {"id": 1}})).is_empty());
        assert!(cards_from_json(&json!([1, 2, 3])).is_empty());
        assert!(cards_from_json(&json!({"cards": "nope"})).is_empty());
    }
}
