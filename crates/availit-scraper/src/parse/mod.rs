//! Structural extraction of hospital records from source pages.
//!
//! Each page layout is one [`HospitalParser`] implementation. [`Parser`]
//! dispatches over the known layouts so the fetch and endpoint layers never
//! need to know which shape a source uses.
//!
//! All of this is screen-scraping: a source that reorders its columns or
//! renames its CSS classes will be mis-read or read as empty, with no schema
//! to catch it. [`ParseOutcome::layout_found`] is the only structural signal.

mod card;
mod table;

pub use card::CardParser;
pub use table::TableParser;

use availit_core::{ParserConfig, RawHospitalRecord};
use scraper::{ElementRef, Selector};

use crate::error::ScraperError;

/// Records extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Records in document order. Malformed rows/cards are already dropped.
    pub records: Vec<RawHospitalRecord>,
    /// Whether the layout's container marker matched anything at all. `false`
    /// with no records usually means the page was redesigned, not that it
    /// legitimately listed nothing.
    pub layout_found: bool,
}

/// Turns raw HTML from one page layout into hospital records.
pub trait HospitalParser {
    fn parse(&self, html: &str) -> ParseOutcome;
}

/// The page layouts a live source can use.
#[derive(Debug, Clone)]
pub enum Parser {
    Table(TableParser),
    Card(CardParser),
}

impl Parser {
    /// Builds the parser described by a source's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if any configured selector
    /// does not parse.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ScraperError> {
        match config {
            ParserConfig::Table {
                container,
                row,
                cell,
            } => Ok(Parser::Table(TableParser::new(container, row, cell)?)),
            ParserConfig::Card { container, name } => {
                Ok(Parser::Card(CardParser::new(container, name)?))
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Parser::Table(_) => "table",
            Parser::Card(_) => "card",
        }
    }
}

impl HospitalParser for Parser {
    fn parse(&self, html: &str) -> ParseOutcome {
        match self {
            Parser::Table(parser) => parser.parse(html),
            Parser::Card(parser) => parser.parse(html),
        }
    }
}

/// Extracts bed-availability rows using the default report selectors.
#[must_use]
pub fn parse_table(html: &str) -> Vec<RawHospitalRecord> {
    TableParser::default().parse(html).records
}

/// Extracts directory cards using the default card selectors.
#[must_use]
pub fn parse_cards(html: &str) -> Vec<RawHospitalRecord> {
    CardParser::default().parse(html).records
}

pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All text under `element`, text nodes separated by a space and runs of
/// whitespace collapsed, so `<b>A</b><br>B` reads as `"A B"`.
pub(crate) fn flattened_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_builds_matching_variant() {
        let table = Parser::from_config(&ParserConfig::table()).unwrap();
        assert_eq!(table.kind(), "table");
        let card = Parser::from_config(&ParserConfig::card()).unwrap();
        assert_eq!(card.kind(), "card");
    }

    #[test]
    fn from_config_rejects_bad_selector() {
        let config = ParserConfig::Table {
            container: "table..broken".to_string(),
            row: "tr".to_string(),
            cell: "td".to_string(),
        };
        let err = Parser::from_config(&config).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidSelector { ref selector, .. } if selector == "table..broken"),
            "got: {err:?}"
        );
    }

    #[test]
    fn collapse_whitespace_joins_runs() {
        assert_eq!(collapse_whitespace("  a \n\t b  c "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn flattened_text_separates_text_nodes() {
        let html = scraper::Html::parse_fragment("<div><b>Name</b>Street<br>City</div>");
        let div = html
            .select(&Selector::parse("div").unwrap())
            .next()
            .unwrap();
        assert_eq!(flattened_text(div), "Name Street City");
    }

    #[test]
    fn dispatch_uses_the_selected_layout() {
        let html = r#"<table class="DataGridBody"><tr align="center"><td>1</td><td>AIIMS</td></tr></table>"#;
        let table = Parser::from_config(&ParserConfig::table()).unwrap();
        let card = Parser::from_config(&ParserConfig::card()).unwrap();
        assert_eq!(table.parse(html).records.len(), 1);
        let card_outcome = card.parse(html);
        assert!(card_outcome.records.is_empty());
        assert!(!card_outcome.layout_found);
    }
}
