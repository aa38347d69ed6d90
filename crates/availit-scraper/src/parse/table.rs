//! Fixed-column report tables (the Delhi free-bed monitoring grid).

use availit_core::sources::{DEFAULT_TABLE_CELL, DEFAULT_TABLE_CONTAINER, DEFAULT_TABLE_ROW};
use availit_core::BedAvailabilityRecord;
use scraper::{ElementRef, Html, Selector};

use super::{compile_selector, HospitalParser, ParseOutcome};
use crate::error::ScraperError;

/// Reads data rows of a report table by column position.
///
/// Only rows matching the row selector are data; the report marks header and
/// footer rows differently, so they never match. Each data row's cells map
/// onto [`BedAvailabilityRecord`] in order.
#[derive(Debug, Clone)]
pub struct TableParser {
    container: Selector,
    row: Selector,
    cell: Selector,
}

impl TableParser {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if any selector does not parse.
    pub fn new(container: &str, row: &str, cell: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            container: compile_selector(container)?,
            row: compile_selector(row)?,
            cell: compile_selector(cell)?,
        })
    }

    /// Extracts every data row in document order, plus whether the table
    /// container was present.
    #[must_use]
    pub fn parse_rows(&self, html: &str) -> (Vec<BedAvailabilityRecord>, bool) {
        let document = Html::parse_document(html);
        let mut layout_found = false;
        let mut records = Vec::new();

        for table in document.select(&self.container) {
            layout_found = true;
            if self.is_nested(table) {
                continue;
            }
            for row in table.select(&self.row) {
                let cells: Vec<String> = row
                    .select(&self.cell)
                    .map(|cell| cell.text().collect::<String>().trim().to_string())
                    .collect();

                if cells.is_empty() {
                    continue;
                }

                if cells.len() < BedAvailabilityRecord::COLUMNS {
                    tracing::debug!(
                        cells = cells.len(),
                        expected = BedAvailabilityRecord::COLUMNS,
                        "short report row; missing columns left empty"
                    );
                }

                records.push(BedAvailabilityRecord::from_cells(&cells));
            }
        }

        (records, layout_found)
    }

    /// A container inside another matching container. Its rows are already
    /// reached through the outer one.
    fn is_nested(&self, element: ElementRef<'_>) -> bool {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.container.matches(&ancestor))
    }
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_CONTAINER, DEFAULT_TABLE_ROW, DEFAULT_TABLE_CELL)
            .expect("default table selectors are valid")
    }
}

impl HospitalParser for TableParser {
    fn parse(&self, html: &str) -> ParseOutcome {
        let (rows, layout_found) = self.parse_rows(html);
        ParseOutcome {
            records: rows.into_iter().map(Into::into).collect(),
            layout_found,
        }
    }
}
