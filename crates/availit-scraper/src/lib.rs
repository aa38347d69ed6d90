pub mod error;
pub mod fetch;
pub mod geocode;
pub mod normalize;
pub mod parse;
pub mod source;

pub use error::ScraperError;
pub use fetch::HtmlFetcher;
pub use geocode::Geocoder;
pub use normalize::{normalize, normalize_record};
pub use parse::{
    parse_cards, parse_table, CardParser, HospitalParser, ParseOutcome, Parser, TableParser,
};
pub use source::LiveSource;
