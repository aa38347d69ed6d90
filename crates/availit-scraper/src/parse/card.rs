//! Card/div directory pages (the Bangalore hospital listing).
//!
//! These pages have no stable columns. The name comes from the card's first
//! heading or bold text, the phone from a `Phone: ...` token in the card's
//! text, and the address is whatever text is left once both are removed.

use std::sync::LazyLock;

use availit_core::sources::{DEFAULT_CARD_CONTAINER, DEFAULT_CARD_NAME};
use availit_core::DirectoryRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{collapse_whitespace, compile_selector, flattened_text, HospitalParser, ParseOutcome};
use crate::error::ScraperError;

/// `Phone: <number>`, where the number is digits joined by dashes or single
/// spaces (`080-26701150`, `080 2670 1150`, `+91 80 2670 1150`). It always
/// ends on a digit, so trailing words stay in the address.
static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bphone\s*(?:no\.?|number)?\s*[:\-]?\s*(\+?\d(?:-*\d| \d)*)")
        .expect("invalid regex: phone")
});

static RE_PHONE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^phone\b").expect("invalid regex: phone label"));

#[derive(Debug, Clone)]
pub struct CardParser {
    container: Selector,
    name: Selector,
}

impl CardParser {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if either selector does not parse.
    pub fn new(container: &str, name: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            container: compile_selector(container)?,
            name: compile_selector(name)?,
        })
    }

    /// Extracts every card that has both a name and a phone number, plus
    /// whether any card container was present.
    #[must_use]
    pub fn parse_cards(&self, html: &str) -> (Vec<DirectoryRecord>, bool) {
        let document = Html::parse_document(html);
        let mut layout_found = false;
        let mut records = Vec::new();

        for card in document.select(&self.container) {
            layout_found = true;
            let record = self.extract(card);
            if record.name.is_empty() || record.phone.is_empty() {
                tracing::debug!(name = %record.name, "dropping incomplete hospital card");
                continue;
            }
            records.push(record);
        }

        (records, layout_found)
    }

    fn extract(&self, card: ElementRef<'_>) -> DirectoryRecord {
        let name = card
            .select(&self.name)
            .map(flattened_text)
            .find(|text| !text.is_empty() && !RE_PHONE_LABEL.is_match(text))
            .unwrap_or_default();

        let mut remaining = flattened_text(card);

        let phone = match RE_PHONE.captures(&remaining) {
            Some(caps) => {
                let phone = caps[1].to_string();
                if let Some(whole) = caps.get(0) {
                    let range = whole.range();
                    remaining.replace_range(range, " ");
                }
                phone
            }
            None => String::new(),
        };

        if !name.is_empty() {
            remaining = remaining.replacen(&name, " ", 1);
        }

        DirectoryRecord {
            name,
            address: collapse_whitespace(&remaining),
            phone,
        }
    }
}

impl Default for CardParser {
    fn default() -> Self {
        Self::new(DEFAULT_CARD_CONTAINER, DEFAULT_CARD_NAME)
            .expect("default card selectors are valid")
    }
}

impl HospitalParser for CardParser {
    fn parse(&self, html: &str) -> ParseOutcome {
        let (cards, layout_found) = self.parse_cards(html);
        ParseOutcome {
            records: cards.into_iter().map(Into::into).collect(),
            layout_found,
        }
    }
}
